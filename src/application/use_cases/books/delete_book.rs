use uuid::Uuid;

use crate::application::ports::asset_storage::AssetStorage;
use crate::application::ports::book_repository::BookRepository;
use crate::application::use_cases::books::CatalogError;

pub struct DeleteBook<'a, R, S>
where
    R: BookRepository + ?Sized,
    S: AssetStorage + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
}

impl<'a, R, S> DeleteBook<'a, R, S>
where
    R: BookRepository + ?Sized,
    S: AssetStorage + ?Sized,
{
    pub async fn execute(&self, id: Uuid) -> Result<(), CatalogError> {
        let book = self.repo.delete(id).await?.ok_or(CatalogError::NotFound)?;
        for path in [&book.cover_path, &book.pdf_path] {
            if let Err(err) = self.storage.delete(path).await {
                tracing::warn!(book_id = %id, path = %path, error = ?err, "failed to remove book asset");
            }
        }
        tracing::info!(book_id = %id, "book_deleted");
        Ok(())
    }
}
