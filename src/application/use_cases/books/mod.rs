pub mod create_book;
pub mod delete_book;
pub mod download_book;
pub mod get_book;
pub mod list_books;
pub mod list_by_category;
pub mod update_book;

use crate::domain::catalog::book::BookFieldError;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Book not found")]
    NotFound,
    #[error("No books found in this category")]
    EmptyCategory,
    #[error("{0}")]
    Invalid(#[from] BookFieldError),
    #[error("You have not purchased this book")]
    NotPurchased,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
