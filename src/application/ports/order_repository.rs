use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::orders::order::{
    ChatMessage, DeliveryStatus, NewOrder, Order, OrderWithBuyer, RefundRequest, TrackingEvent,
};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order with its items and first tracking event and empties the
    /// buyer's cart, all in one transaction. Returns the id of the order already
    /// recorded for the same gateway order instead of inserting twice.
    async fn place(&self, order: &NewOrder) -> anyhow::Result<Uuid>;
    async fn find_by_gateway_order(&self, gateway_order_id: &str)
    -> anyhow::Result<Option<Uuid>>;
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>>;
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>>;
    async fn list_all(&self) -> anyhow::Result<Vec<OrderWithBuyer>>;
    async fn set_delivery_status(
        &self,
        order_id: Uuid,
        status: DeliveryStatus,
        event: &TrackingEvent,
    ) -> anyhow::Result<bool>;
    async fn set_item_refund(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        refund: &RefundRequest,
        event: &TrackingEvent,
    ) -> anyhow::Result<bool>;
    async fn append_chat(&self, order_id: Uuid, message: &ChatMessage) -> anyhow::Result<()>;
    async fn user_purchased_book(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool>;
}
