use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::use_cases::cart::{CartError, check_mutation, check_quantity};

pub struct UpdateCartItem<'a, R: CartRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CartRepository + ?Sized> UpdateCartItem<'a, R> {
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> Result<(), CartError> {
        check_quantity(quantity)?;
        check_mutation(self.repo.set_quantity(user_id, book_id, quantity).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::cart_repository::CartRepository;
    use crate::application::testing::{InMemoryStore, sample_book};

    #[tokio::test]
    async fn sets_quantity_of_existing_line_only() {
        let store = InMemoryStore::default();
        let book = store.insert_book(sample_book("Srikanta", "Sarat Chandra", 80));
        let user = Uuid::new_v4();
        store.add_item(user, book.id, 1).await.unwrap();
        let uc = UpdateCartItem { repo: &store };

        uc.execute(user, book.id, 4).await.unwrap();
        let lines = store.lines_for_user(user).await.unwrap().unwrap();
        assert_eq!(lines[0].quantity, 4);

        assert!(matches!(
            uc.execute(user, Uuid::new_v4(), 2).await.unwrap_err(),
            CartError::ItemNotFound
        ));
        assert!(matches!(
            uc.execute(user, book.id, 0).await.unwrap_err(),
            CartError::InvalidQuantity
        ));
        assert!(matches!(
            uc.execute(user, book.id, 1001).await.unwrap_err(),
            CartError::QuantityTooLarge
        ));
        assert_eq!(store.lines_for_user(user).await.unwrap().unwrap()[0].quantity, 4);
    }
}
