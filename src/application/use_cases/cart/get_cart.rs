use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::domain::cart::cart::{CartLine, subtotal};

pub struct GetCart<'a, R: CartRepository + ?Sized> {
    pub repo: &'a R,
}

pub struct CartView {
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
}

impl<'a, R: CartRepository + ?Sized> GetCart<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<CartView> {
        let lines = self.repo.lines_for_user(user_id).await?.unwrap_or_default();
        let subtotal = subtotal(&lines);
        Ok(CartView { lines, subtotal })
    }
}
