use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A cart line priced at create-order time.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub book_id: Uuid,
    pub title: String,
    pub cover_path: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// What a gateway order was opened for, recorded before the buyer pays.
/// The order is built from `lines`, never from the cart as it is at verify time.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub gateway_order_id: String,
    pub user_id: Uuid,
    pub receipt: String,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub amount: Decimal,
    pub coupon_code: Option<String>,
    pub lines: Vec<CheckoutLine>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    async fn save(&self, session: &CheckoutSession) -> anyhow::Result<()>;
    async fn find(
        &self,
        gateway_order_id: &str,
        user_id: Uuid,
    ) -> anyhow::Result<Option<CheckoutSession>>;
}
