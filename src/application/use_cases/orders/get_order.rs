use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::orders::{OrderError, load_owned_order};
use crate::domain::orders::order::Order;

pub struct GetOrder<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> GetOrder<'a, R> {
    pub async fn execute(&self, user_id: Uuid, order_id: Uuid) -> Result<Order, OrderError> {
        load_owned_order(self.repo, order_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryStore, placed_order};

    #[tokio::test]
    async fn only_the_buyer_can_read_an_order() {
        let store = InMemoryStore::default();
        let buyer = Uuid::new_v4();
        let order_id = placed_order(&store, buyer, &["Aparajito"]).await;
        let uc = GetOrder { repo: &store };

        assert_eq!(uc.execute(buyer, order_id).await.unwrap().id, order_id);
        assert!(matches!(
            uc.execute(Uuid::new_v4(), order_id).await.unwrap_err(),
            OrderError::NotOwner
        ));
        assert!(matches!(
            uc.execute(buyer, Uuid::new_v4()).await.unwrap_err(),
            OrderError::NotFound
        ));
    }
}
