use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::use_cases::books::CatalogError;
use crate::domain::catalog::book::Book;

pub struct GetBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> GetBook<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Book, CatalogError> {
        self.repo.get_by_id(id).await?.ok_or(CatalogError::NotFound)
    }
}
