pub mod add_chat;
pub mod get_order;
pub mod list_my_orders;
pub mod request_refund;

use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;

#[derive(thiserror::Error, Debug)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,
    #[error("Item not found in order")]
    ItemNotFound,
    #[error("Not authorized")]
    NotOwner,
    #[error("Refund already requested for this item")]
    RefundAlreadyRequested,
    #[error("Please provide a reason for the refund")]
    MissingReason,
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Invalid delivery status")]
    InvalidDeliveryStatus,
    #[error("Invalid refund status")]
    InvalidRefundStatus,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub(crate) async fn load_order<R: OrderRepository + ?Sized>(
    repo: &R,
    order_id: Uuid,
) -> Result<Order, OrderError> {
    repo.get_by_id(order_id).await?.ok_or(OrderError::NotFound)
}

/// Loads an order and checks it belongs to `user_id`.
pub(crate) async fn load_owned_order<R: OrderRepository + ?Sized>(
    repo: &R,
    order_id: Uuid,
    user_id: Uuid,
) -> Result<Order, OrderError> {
    let order = load_order(repo, order_id).await?;
    if !order.is_owned_by(user_id) {
        tracing::warn!(order_id = %order_id, user_id = %user_id, "order_access_denied");
        return Err(OrderError::NotOwner);
    }
    Ok(order)
}

pub(crate) fn non_blank(text: &str) -> Option<String> {
    let t = text.trim();
    (!t.is_empty()).then(|| t.to_string())
}
