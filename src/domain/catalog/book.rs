use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::orders::pricing::round_money;

#[derive(Debug, Clone)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub cover_path: String,
    pub pdf_path: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub cover_path: String,
    pub pdf_path: String,
}

#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookFieldError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("price must be greater than 0")]
    InvalidPrice,
}

/// Text details shared by create and update, trimmed the same way for both.
#[derive(Debug, Clone)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
}

impl BookDetails {
    pub fn validated(self) -> Result<Self, BookFieldError> {
        let title = self.title.trim().to_string();
        let author = self.author.trim().to_string();
        let category = self.category.trim().to_string();
        if title.is_empty() {
            return Err(BookFieldError::Missing("title"));
        }
        if author.is_empty() {
            return Err(BookFieldError::Missing("author"));
        }
        if category.is_empty() {
            return Err(BookFieldError::Missing("category"));
        }
        if self.description.trim().is_empty() {
            return Err(BookFieldError::Missing("description"));
        }
        if self.price <= Decimal::ZERO {
            return Err(BookFieldError::InvalidPrice);
        }
        Ok(Self {
            title,
            author,
            description: self.description,
            price: round_money(self.price),
            category,
        })
    }
}

impl BookPatch {
    pub fn validated(self) -> Result<Self, BookFieldError> {
        fn trimmed(v: Option<String>, field: &'static str) -> Result<Option<String>, BookFieldError> {
            match v {
                Some(s) if s.trim().is_empty() => Err(BookFieldError::Missing(field)),
                Some(s) => Ok(Some(s.trim().to_string())),
                None => Ok(None),
            }
        }
        if let Some(p) = self.price {
            if p <= Decimal::ZERO {
                return Err(BookFieldError::InvalidPrice);
            }
        }
        Ok(Self {
            title: trimmed(self.title, "title")?,
            author: trimmed(self.author, "author")?,
            description: match self.description {
                Some(d) if d.trim().is_empty() => return Err(BookFieldError::Missing("description")),
                other => other,
            },
            price: self.price.map(round_money),
            category: trimmed(self.category, "category")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(price: Decimal) -> BookDetails {
        BookDetails {
            title: "  Gitanjali ".into(),
            author: " Rabindranath Tagore".into(),
            description: "Song offerings".into(),
            price,
            category: "poetry ".into(),
        }
    }

    #[test]
    fn details_are_trimmed() {
        let d = details(Decimal::new(19999, 2)).validated().unwrap();
        assert_eq!(d.title, "Gitanjali");
        assert_eq!(d.author, "Rabindranath Tagore");
        assert_eq!(d.category, "poetry");
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert_eq!(
            details(Decimal::ZERO).validated().unwrap_err(),
            BookFieldError::InvalidPrice
        );
    }

    #[test]
    fn blank_patch_field_is_rejected() {
        let patch = BookPatch {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(patch.validated().unwrap_err(), BookFieldError::Missing("title"));
    }
}
