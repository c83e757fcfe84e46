use async_trait::async_trait;

use crate::domain::catalog::category::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Category>>;
    /// Returns `None` when the slug is already taken.
    async fn create(&self, name: &str, slug: &str) -> anyhow::Result<Option<Category>>;
}
