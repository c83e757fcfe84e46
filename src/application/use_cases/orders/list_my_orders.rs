use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;

pub struct ListMyOrders<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> ListMyOrders<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        self.repo.list_for_user(user_id).await
    }
}
