use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::book::{Book, BookPatch, NewBook};

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Case-insensitive substring match on title or author when `search` is set.
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Book>>;
    async fn list_by_category(&self, category: &str) -> anyhow::Result<Vec<Book>>;
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Book>>;
    async fn create(&self, book: &NewBook) -> anyhow::Result<Book>;
    async fn update(&self, id: Uuid, patch: &BookPatch) -> anyhow::Result<Option<Book>>;
    /// Returns the deleted row so its stored assets can be cleaned up.
    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Book>>;
}
