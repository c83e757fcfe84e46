use uuid::Uuid;

use crate::application::ports::coupon_repository::CouponRepository;
use crate::domain::coupons::coupon::Coupon;

pub struct ToggleCoupon<'a, R: CouponRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CouponRepository + ?Sized> ToggleCoupon<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Coupon>> {
        let coupon = self.repo.toggle_active(id).await?;
        if let Some(c) = &coupon {
            tracing::info!(code = %c.code, active = c.is_active, "coupon_toggled");
        }
        Ok(coupon)
    }
}
