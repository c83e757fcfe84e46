use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::OrderWithBuyer;

pub struct ListAllOrders<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> ListAllOrders<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<OrderWithBuyer>> {
        self.repo.list_all().await
    }
}
