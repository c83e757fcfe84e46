use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::coupons::coupon::{Coupon, NewCoupon};

#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Coupon>>;
    /// Returns `None` when the code already exists.
    async fn create(&self, coupon: &NewCoupon) -> anyhow::Result<Option<Coupon>>;
    async fn list(&self) -> anyhow::Result<Vec<Coupon>>;
    async fn toggle_active(&self, id: Uuid) -> anyhow::Result<Option<Coupon>>;
}
