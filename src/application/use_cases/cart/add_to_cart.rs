use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::use_cases::cart::{CartError, check_quantity};

pub struct AddToCart<'a, C, B>
where
    C: CartRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    pub carts: &'a C,
    pub books: &'a B,
}

impl<'a, C, B> AddToCart<'a, C, B>
where
    C: CartRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> Result<(), CartError> {
        check_quantity(quantity)?;
        if self.books.get_by_id(book_id).await?.is_none() {
            return Err(CartError::BookNotFound);
        }
        let held = self
            .carts
            .lines_for_user(user_id)
            .await?
            .unwrap_or_default()
            .iter()
            .find(|l| l.book.id == book_id)
            .map_or(0, |l| l.quantity);
        check_quantity(held.saturating_add(quantity))?;
        self.carts.add_item(user_id, book_id, quantity).await?;
        Ok(())
    }
}
