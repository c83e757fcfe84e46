use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::coupon_repository::CouponRepository;
use crate::domain::cart::cart::{CartLine, subtotal};
use crate::domain::coupons::coupon::{Coupon, CouponRejection, PriceQuote, normalize_code};

#[derive(thiserror::Error, Debug)]
pub enum PricingError {
    #[error(transparent)]
    Coupon(#[from] CouponRejection),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct PricedCart {
    pub lines: Vec<CartLine>,
    pub quote: PriceQuote,
    pub coupon: Option<Coupon>,
}

pub async fn resolve_coupon<C: CouponRepository + ?Sized>(
    coupons: &C,
    code: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<Coupon, PricingError> {
    let code = normalize_code(code);
    if code.is_empty() {
        return Err(CouponRejection::Invalid.into());
    }
    let coupon = coupons
        .find_by_code(&code)
        .await?
        .ok_or(CouponRejection::Invalid)?;
    coupon.ensure_usable(now)?;
    Ok(coupon)
}

/// Prices the user's current cart, applying `coupon_code` when given.
pub async fn price_cart<R, C>(
    carts: &R,
    coupons: &C,
    user_id: Uuid,
    coupon_code: Option<&str>,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<PricedCart, PricingError>
where
    R: CartRepository + ?Sized,
    C: CouponRepository + ?Sized,
{
    let lines = carts.lines_for_user(user_id).await?.unwrap_or_default();
    let sub = subtotal(&lines);
    let coupon = match coupon_code.filter(|c| !c.trim().is_empty()) {
        Some(code) => Some(resolve_coupon(coupons, code, now).await?),
        None => None,
    };
    let quote = match &coupon {
        Some(c) => c.quote(sub),
        None => PriceQuote::undiscounted(sub),
    };
    Ok(PricedCart {
        lines,
        quote,
        coupon,
    })
}
