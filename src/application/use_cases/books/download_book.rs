use uuid::Uuid;

use crate::application::ports::asset_storage::AssetStorage;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::books::CatalogError;

pub struct DownloadBook<'a, B, O, S>
where
    B: BookRepository + ?Sized,
    O: OrderRepository + ?Sized,
    S: AssetStorage + ?Sized,
{
    pub books: &'a B,
    pub orders: &'a O,
    pub storage: &'a S,
}

#[derive(Debug)]
pub struct BookFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl<'a, B, O, S> DownloadBook<'a, B, O, S>
where
    B: BookRepository + ?Sized,
    O: OrderRepository + ?Sized,
    S: AssetStorage + ?Sized,
{
    /// Admins can fetch any PDF; buyers only books from a paid order.
    pub async fn execute(
        &self,
        user_id: Uuid,
        is_admin: bool,
        book_id: Uuid,
    ) -> Result<BookFile, CatalogError> {
        let book = self
            .books
            .get_by_id(book_id)
            .await?
            .ok_or(CatalogError::NotFound)?;
        if !is_admin && !self.orders.user_purchased_book(user_id, book_id).await? {
            return Err(CatalogError::NotPurchased);
        }
        let bytes = self.storage.read(&book.pdf_path).await?;
        let filename = book
            .pdf_path
            .rsplit('/')
            .next()
            .unwrap_or("book.pdf")
            .to_string();
        Ok(BookFile { filename, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryStore, MemoryAssets, sample_book};

    #[tokio::test]
    async fn buyers_without_an_order_are_refused() {
        let store = InMemoryStore::default();
        let assets = MemoryAssets::default();
        let book = store.insert_book(sample_book("Kabuliwala", "Tagore", 99));
        assets.put(&book.pdf_path, b"%PDF".to_vec());
        let uc = DownloadBook {
            books: &store,
            orders: &store,
            storage: &assets,
        };

        let err = uc.execute(Uuid::new_v4(), false, book.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotPurchased));

        let file = uc.execute(Uuid::new_v4(), true, book.id).await.unwrap();
        assert_eq!(file.bytes, b"%PDF".to_vec());
    }
}
