use crate::application::ports::book_repository::BookRepository;
use crate::domain::catalog::book::Book;

pub struct ListBooks<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> ListBooks<'a, R> {
    pub async fn execute(&self, search: Option<String>) -> anyhow::Result<Vec<Book>> {
        let search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.repo.list(search).await
    }
}
