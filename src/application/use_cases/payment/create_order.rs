use rand::RngCore;
use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::checkout_repository::{
    CheckoutLine, CheckoutRepository, CheckoutSession,
};
use crate::application::ports::coupon_repository::CouponRepository;
use crate::application::ports::payment_gateway::{GatewayOrderRequest, PaymentGateway};
use crate::application::services::cart_pricing::price_cart;
use crate::application::use_cases::payment::CheckoutError;
use crate::domain::orders::pricing::to_minor_units;
use rust_decimal::Decimal;

const RECEIPT_PREFIX: &str = "nakshatra_rcpt_";

pub struct CreateCheckoutOrder<'a, R, C, G, S>
where
    R: CartRepository + ?Sized,
    C: CouponRepository + ?Sized,
    G: PaymentGateway + ?Sized,
    S: CheckoutRepository + ?Sized,
{
    pub carts: &'a R,
    pub coupons: &'a C,
    pub gateway: &'a G,
    pub checkouts: &'a S,
    pub currency: &'a str,
}

#[derive(Debug, Clone)]
pub struct CheckoutOrder {
    pub gateway_order_id: String,
    /// Minor units, as the gateway reports it.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

pub fn new_receipt_id() -> String {
    let mut bytes = [0u8; 10];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{RECEIPT_PREFIX}{}", hex::encode(bytes))
}

impl<'a, R, C, G, S> CreateCheckoutOrder<'a, R, C, G, S>
where
    R: CartRepository + ?Sized,
    C: CouponRepository + ?Sized,
    G: PaymentGateway + ?Sized,
    S: CheckoutRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        coupon_code: Option<&str>,
    ) -> Result<CheckoutOrder, CheckoutError> {
        let now = chrono::Utc::now();
        let priced = price_cart(self.carts, self.coupons, user_id, coupon_code, now).await?;
        if priced.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let total = priced.quote.total;
        let amount = to_minor_units(total).ok_or(CheckoutError::NonPositiveAmount)?;
        if total <= Decimal::ZERO || amount <= 0 {
            return Err(CheckoutError::NonPositiveAmount);
        }

        let receipt = new_receipt_id();
        let order = self
            .gateway
            .create_order(&GatewayOrderRequest {
                amount,
                currency: self.currency.to_string(),
                receipt: receipt.clone(),
            })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, user_id = %user_id, "gateway_create_order_failed");
                err
            })?;

        self.checkouts
            .save(&CheckoutSession {
                gateway_order_id: order.id.clone(),
                user_id,
                receipt,
                subtotal: priced.quote.subtotal,
                discount: priced.quote.discount,
                amount: total,
                coupon_code: priced.coupon.map(|c| c.code),
                lines: priced
                    .lines
                    .iter()
                    .map(|l| CheckoutLine {
                        book_id: l.book.id,
                        title: l.book.title.clone(),
                        cover_path: l.book.cover_path.clone(),
                        quantity: l.quantity,
                        unit_price: l.book.price,
                    })
                    .collect(),
                created_at: now,
            })
            .await?;
        tracing::info!(user_id = %user_id, gateway_order_id = %order.id, amount, "checkout_order_created");

        Ok(CheckoutOrder {
            gateway_order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: self.gateway.key_id().to_string(),
        })
    }
}
