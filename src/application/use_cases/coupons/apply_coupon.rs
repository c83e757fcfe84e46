use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::coupon_repository::CouponRepository;
use crate::application::services::cart_pricing::{PricingError, price_cart};
use crate::domain::coupons::coupon::{Coupon, CouponRejection, PriceQuote};

pub struct ApplyCoupon<'a, C, R>
where
    C: CouponRepository + ?Sized,
    R: CartRepository + ?Sized,
{
    pub coupons: &'a C,
    pub carts: &'a R,
}

#[derive(Debug)]
pub struct AppliedCoupon {
    pub coupon: Coupon,
    pub quote: PriceQuote,
}

impl<'a, C, R> ApplyCoupon<'a, C, R>
where
    C: CouponRepository + ?Sized,
    R: CartRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, code: &str) -> Result<AppliedCoupon, PricingError> {
        let priced = price_cart(
            self.carts,
            self.coupons,
            user_id,
            Some(code),
            chrono::Utc::now(),
        )
        .await?;
        let coupon = priced.coupon.ok_or(CouponRejection::Invalid)?;
        Ok(AppliedCoupon {
            coupon,
            quote: priced.quote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::cart_repository::CartRepository;
    use crate::application::testing::{InMemoryStore, sample_book, sample_coupon};
    use crate::domain::coupons::coupon::DiscountType;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn quotes_the_callers_cart() {
        let store = InMemoryStore::default();
        let book = store.insert_book(sample_book("Gitanjali", "Tagore", 200));
        let user = Uuid::new_v4();
        store.add_item(user, book.id, 2).await.unwrap();
        store.insert_coupon(sample_coupon("BOI10", DiscountType::Percentage, 10));

        let applied = ApplyCoupon {
            coupons: &store,
            carts: &store,
        }
        .execute(user, " boi10 ")
        .await
        .unwrap();
        assert_eq!(applied.quote.subtotal, Decimal::new(400, 0));
        assert_eq!(applied.quote.discount, Decimal::new(40, 0));
        assert_eq!(applied.quote.total, Decimal::new(360, 0));
    }

    #[tokio::test]
    async fn unknown_and_expired_codes_are_rejected() {
        let store = InMemoryStore::default();
        let mut expired = sample_coupon("OLD", DiscountType::Fixed, 20);
        expired.expires_at = Some(chrono::Utc::now() - chrono::Duration::hours(1));
        store.insert_coupon(expired);
        let uc = ApplyCoupon {
            coupons: &store,
            carts: &store,
        };

        assert!(matches!(
            uc.execute(Uuid::new_v4(), "NOPE").await.unwrap_err(),
            PricingError::Coupon(CouponRejection::Invalid)
        ));
        assert!(matches!(
            uc.execute(Uuid::new_v4(), "old").await.unwrap_err(),
            PricingError::Coupon(CouponRejection::Expired)
        ));
    }
}
