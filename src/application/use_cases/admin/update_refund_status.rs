use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::orders::{OrderError, load_order};
use crate::domain::orders::order::{Order, RefundRequest, RefundStatus, TrackingEvent};

pub struct UpdateRefundStatus<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> UpdateRefundStatus<'a, R> {
    /// Admins may move an item to any refund status. Reason and request time are kept.
    pub async fn execute(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        raw_status: &str,
    ) -> Result<Order, OrderError> {
        let status = RefundStatus::parse(raw_status.trim()).ok_or(OrderError::InvalidRefundStatus)?;
        let order = load_order(self.repo, order_id).await?;
        let item = order.item(item_id).ok_or(OrderError::ItemNotFound)?;

        let refund = RefundRequest {
            status,
            ..item.refund.clone()
        };
        let event = TrackingEvent {
            status: format!("Refund {}", status.as_str()),
            message: format!(
                "Refund status for {} updated to {}.",
                item.title,
                status.as_str()
            ),
            created_at: chrono::Utc::now(),
        };
        if !self
            .repo
            .set_item_refund(order_id, item_id, &refund, &event)
            .await?
        {
            return Err(OrderError::ItemNotFound);
        }
        tracing::info!(order_id = %order_id, item_id = %item_id, status = status.as_str(), "refund_status_updated");
        load_order(self.repo, order_id).await
    }
}
