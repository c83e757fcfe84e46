use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::cart::{CartLine, CartMutation};

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// `None` when the user has never created a cart.
    async fn lines_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<Vec<CartLine>>>;
    /// Creates the cart on first use and adds to an existing line's quantity.
    async fn add_item(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> anyhow::Result<()>;
    async fn remove_item(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<CartMutation>;
    async fn set_quantity(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        quantity: i32,
    ) -> anyhow::Result<CartMutation>;
}
