use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::users::user::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "success" => Some(PaymentStatus::Success),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Processing => "Processing",
            DeliveryStatus::Shipped => "Shipped",
            DeliveryStatus::OutForDelivery => "Out for Delivery",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(DeliveryStatus::Pending),
            "Processing" => Some(DeliveryStatus::Processing),
            "Shipped" => Some(DeliveryStatus::Shipped),
            "Out for Delivery" => Some(DeliveryStatus::OutForDelivery),
            "Delivered" => Some(DeliveryStatus::Delivered),
            "Cancelled" => Some(DeliveryStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundStatus {
    None,
    Requested,
    Approved,
    Rejected,
    Processing,
    Refunded,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::None => "None",
            RefundStatus::Requested => "Requested",
            RefundStatus::Approved => "Approved",
            RefundStatus::Rejected => "Rejected",
            RefundStatus::Processing => "Processing",
            RefundStatus::Refunded => "Refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "None" => Some(RefundStatus::None),
            "Requested" => Some(RefundStatus::Requested),
            "Approved" => Some(RefundStatus::Approved),
            "Rejected" => Some(RefundStatus::Rejected),
            "Processing" => Some(RefundStatus::Processing),
            "Refunded" => Some(RefundStatus::Refunded),
            _ => None,
        }
    }

    /// A buyer may open a request on an untouched item, or retry after a rejection.
    pub fn can_request(&self) -> bool {
        matches!(self, RefundStatus::None | RefundStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Admin,
}

impl ChatSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatSender::User => "user",
            ChatSender::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatSender::User),
            "admin" => Some(ChatSender::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub status: RefundStatus,
    pub reason: String,
    pub requested_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for RefundRequest {
    fn default() -> Self {
        Self {
            status: RefundStatus::None,
            reason: String::new(),
            requested_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub book_id: Option<Uuid>,
    pub title: String,
    pub cover_path: String,
    pub quantity: i32,
    pub price: Decimal,
    pub refund: RefundRequest,
}

#[derive(Debug, Clone)]
pub struct TrackingEvent {
    pub status: String,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ShippingSnapshot {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingSnapshot {
    pub fn from_profile(address: Option<&Address>, phone: Option<&str>) -> Self {
        let address = address.cloned().unwrap_or_default();
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            phone: phone.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub coupon_code: Option<String>,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub estimated_delivery_date: Option<chrono::DateTime<chrono::Utc>>,
    pub shipping: ShippingSnapshot,
    pub tracking_history: Vec<TrackingEvent>,
    pub chat_history: Vec<ChatMessage>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Order {
    pub fn item(&self, item_id: Uuid) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Snapshot of a cart line copied into a new order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub book_id: Uuid,
    pub title: String,
    pub cover_path: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub items: Vec<NewOrderItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub coupon_code: Option<String>,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub estimated_delivery_date: chrono::DateTime<chrono::Utc>,
    pub shipping: ShippingSnapshot,
    pub initial_event: TrackingEvent,
}

/// Admin-facing order listing row with the buyer attached.
#[derive(Debug, Clone)]
pub struct OrderWithBuyer {
    pub order: Order,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_labels_match_storage_values() {
        for s in [
            DeliveryStatus::Pending,
            DeliveryStatus::Processing,
            DeliveryStatus::Shipped,
            DeliveryStatus::OutForDelivery,
            DeliveryStatus::Delivered,
            DeliveryStatus::Cancelled,
        ] {
            assert_eq!(DeliveryStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(DeliveryStatus::parse("out for delivery"), None);
    }

    #[test]
    fn refund_can_be_requested_only_when_idle_or_rejected() {
        assert!(RefundStatus::None.can_request());
        assert!(RefundStatus::Rejected.can_request());
        assert!(!RefundStatus::Requested.can_request());
        assert!(!RefundStatus::Refunded.can_request());
    }

    #[test]
    fn shipping_snapshot_defaults_missing_profile_fields() {
        let snap = ShippingSnapshot::from_profile(None, None);
        assert_eq!(snap.state, "");
        assert_eq!(snap.phone, "");
    }
}
