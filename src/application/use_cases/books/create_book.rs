use crate::application::ports::asset_storage::{AssetKind, AssetStorage};
use crate::application::ports::book_repository::BookRepository;
use crate::application::use_cases::books::CatalogError;
use crate::domain::catalog::book::{Book, BookDetails, NewBook};

pub struct CreateBook<'a, R, S>
where
    R: BookRepository + ?Sized,
    S: AssetStorage + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl<'a, R, S> CreateBook<'a, R, S>
where
    R: BookRepository + ?Sized,
    S: AssetStorage + ?Sized,
{
    pub async fn execute(
        &self,
        details: BookDetails,
        cover: UploadedFile,
        pdf: UploadedFile,
    ) -> Result<Book, CatalogError> {
        let details = details.validated()?;
        let cover_stored = self
            .storage
            .store(AssetKind::Cover, cover.filename.as_deref(), &cover.bytes)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "store_cover_failed");
                err
            })?;
        let pdf_stored = match self
            .storage
            .store(AssetKind::Pdf, pdf.filename.as_deref(), &pdf.bytes)
            .await
        {
            Ok(s) => s,
            Err(err) => {
                tracing::error!(error = ?err, "store_pdf_failed");
                self.discard(&cover_stored.relative_path).await;
                return Err(err.into());
            }
        };
        let new_book = NewBook {
            title: details.title,
            author: details.author,
            description: details.description,
            price: details.price,
            category: details.category,
            cover_path: cover_stored.relative_path.clone(),
            pdf_path: pdf_stored.relative_path.clone(),
        };
        match self.repo.create(&new_book).await {
            Ok(book) => {
                tracing::info!(book_id = %book.id, title = %book.title, "book_created");
                Ok(book)
            }
            Err(err) => {
                tracing::error!(error = ?err, "insert_book_failed");
                self.discard(&cover_stored.relative_path).await;
                self.discard(&pdf_stored.relative_path).await;
                Err(err.into())
            }
        }
    }

    async fn discard(&self, relative_path: &str) {
        if let Err(err) = self.storage.delete(relative_path).await {
            tracing::warn!(error = ?err, path = %relative_path, "asset_cleanup_failed");
        }
    }
}
