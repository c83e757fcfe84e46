use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::use_cases::books::CatalogError;
use crate::domain::catalog::book::{Book, BookPatch};

pub struct UpdateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> UpdateBook<'a, R> {
    pub async fn execute(&self, id: Uuid, patch: BookPatch) -> Result<Book, CatalogError> {
        let patch = patch.validated()?;
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryStore, sample_book};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn updates_only_provided_fields() {
        let store = InMemoryStore::default();
        let book = store.insert_book(sample_book("Gora", "Tagore", 200));
        let updated = UpdateBook { repo: &store }
            .execute(
                book.id,
                BookPatch {
                    price: Some(Decimal::new(180, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, Decimal::new(180, 0));
        assert_eq!(updated.title, "Gora");
    }

    #[tokio::test]
    async fn unknown_book_is_not_found() {
        let store = InMemoryStore::default();
        let err = UpdateBook { repo: &store }
            .execute(Uuid::new_v4(), BookPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }
}
