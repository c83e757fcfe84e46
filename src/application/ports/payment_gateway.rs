use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct GatewayOrderRequest {
    /// Amount in the currency's minor unit (paise for INR).
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("payment gateway is not configured")]
    NotConfigured,
    #[error("{description}")]
    Rejected { status: u16, description: String },
    #[error("payment gateway unreachable")]
    Transport(#[source] anyhow::Error),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id the browser checkout widget is opened with.
    fn key_id(&self) -> &str;
    async fn create_order(&self, req: &GatewayOrderRequest) -> Result<GatewayOrder, GatewayError>;
    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
