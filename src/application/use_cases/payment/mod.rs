pub mod create_order;
pub mod verify_payment;

use crate::application::ports::payment_gateway::GatewayError;
use crate::application::services::cart_pricing::PricingError;
use crate::domain::coupons::coupon::CouponRejection;

#[derive(thiserror::Error, Debug)]
pub enum CheckoutError {
    #[error("Cart is empty.")]
    EmptyCart,
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,
    #[error(transparent)]
    Coupon(#[from] CouponRejection),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Payment verification failed. Invalid signature.")]
    InvalidSignature,
    #[error("Payment verification failed. Unknown checkout session.")]
    UnknownCheckout,
    #[error("User not found.")]
    UserNotFound,
    #[error("Payment was successful, but failed to save your order. Please contact support.")]
    Persist(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<PricingError> for CheckoutError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Coupon(c) => CheckoutError::Coupon(c),
            PricingError::Internal(e) => CheckoutError::Internal(e),
        }
    }
}
