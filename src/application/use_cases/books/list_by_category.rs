use crate::application::ports::book_repository::BookRepository;
use crate::application::use_cases::books::CatalogError;
use crate::domain::catalog::book::Book;

pub struct ListBooksByCategory<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> ListBooksByCategory<'a, R> {
    pub async fn execute(&self, category: &str) -> Result<Vec<Book>, CatalogError> {
        let books = self.repo.list_by_category(category).await?;
        if books.is_empty() {
            return Err(CatalogError::EmptyCategory);
        }
        Ok(books)
    }
}
