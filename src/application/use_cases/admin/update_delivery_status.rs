use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::orders::{OrderError, load_order};
use crate::domain::orders::order::{DeliveryStatus, Order, TrackingEvent};

pub struct UpdateDeliveryStatus<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> UpdateDeliveryStatus<'a, R> {
    pub async fn execute(&self, order_id: Uuid, raw_status: &str) -> Result<Order, OrderError> {
        let status =
            DeliveryStatus::parse(raw_status.trim()).ok_or(OrderError::InvalidDeliveryStatus)?;
        let event = TrackingEvent {
            status: status.as_str().to_string(),
            message: format!("Order status updated to {} by admin.", status.as_str()),
            created_at: chrono::Utc::now(),
        };
        if !self.repo.set_delivery_status(order_id, status, &event).await? {
            return Err(OrderError::NotFound);
        }
        tracing::info!(order_id = %order_id, status = status.as_str(), "delivery_status_updated");
        load_order(self.repo, order_id).await
    }
}
