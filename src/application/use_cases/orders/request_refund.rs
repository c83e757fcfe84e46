use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::orders::{OrderError, load_order, load_owned_order, non_blank};
use crate::domain::orders::order::{Order, RefundRequest, RefundStatus, TrackingEvent};

pub struct RequestRefund<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> RequestRefund<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        item_id: Uuid,
        reason: &str,
    ) -> Result<Order, OrderError> {
        let order = load_owned_order(self.repo, order_id, user_id).await?;
        let item = order.item(item_id).ok_or(OrderError::ItemNotFound)?;
        if !item.refund.status.can_request() {
            return Err(OrderError::RefundAlreadyRequested);
        }
        let reason = non_blank(reason).ok_or(OrderError::MissingReason)?;

        let now = chrono::Utc::now();
        let refund = RefundRequest {
            status: RefundStatus::Requested,
            reason,
            requested_at: Some(now),
        };
        let event = TrackingEvent {
            status: format!("Refund {}", RefundStatus::Requested.as_str()),
            message: format!("Refund requested for {}.", item.title),
            created_at: now,
        };
        if !self
            .repo
            .set_item_refund(order_id, item_id, &refund, &event)
            .await?
        {
            return Err(OrderError::ItemNotFound);
        }
        tracing::info!(order_id = %order_id, item_id = %item_id, "refund_requested");
        load_order(self.repo, order_id).await
    }
}
