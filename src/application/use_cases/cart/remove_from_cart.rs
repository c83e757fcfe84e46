use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::use_cases::cart::{CartError, check_mutation};
use crate::domain::cart::cart::CartMutation;

pub struct RemoveFromCart<'a, R: CartRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CartRepository + ?Sized> RemoveFromCart<'a, R> {
    /// Removing a book that is not in an existing cart is not an error.
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid) -> Result<(), CartError> {
        match self.repo.remove_item(user_id, book_id).await? {
            CartMutation::ItemMissing => Ok(()),
            other => check_mutation(other),
        }
    }
}
