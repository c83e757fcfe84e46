use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::catalog::category::{Category, normalize_slug};

pub struct CreateCategory<'a, R: CategoryRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(thiserror::Error, Debug)]
pub enum CreateCategoryError {
    #[error("Please provide name and slug")]
    Missing,
    #[error("Slug may only contain lowercase letters, digits and hyphens")]
    InvalidSlug,
    #[error("Category slug already exists")]
    SlugTaken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl<'a, R: CategoryRepository + ?Sized> CreateCategory<'a, R> {
    pub async fn execute(&self, name: &str, slug: &str) -> Result<Category, CreateCategoryError> {
        let name = name.trim();
        if name.is_empty() || slug.trim().is_empty() {
            return Err(CreateCategoryError::Missing);
        }
        let slug = normalize_slug(slug).ok_or(CreateCategoryError::InvalidSlug)?;
        self.repo
            .create(name, &slug)
            .await?
            .ok_or(CreateCategoryError::SlugTaken)
    }
}
