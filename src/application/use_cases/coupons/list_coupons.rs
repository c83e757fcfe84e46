use crate::application::ports::coupon_repository::CouponRepository;
use crate::domain::coupons::coupon::Coupon;

pub struct ListCoupons<'a, R: CouponRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CouponRepository + ?Sized> ListCoupons<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Coupon>> {
        self.repo.list().await
    }
}
