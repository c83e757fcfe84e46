use crate::application::ports::coupon_repository::CouponRepository;
use crate::domain::coupons::coupon::{Coupon, CouponDefinitionError, NewCoupon};

pub struct CreateCoupon<'a, R: CouponRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(thiserror::Error, Debug)]
pub enum CreateCouponError {
    #[error("Coupon code already exists")]
    DuplicateCode,
    #[error(transparent)]
    Invalid(#[from] CouponDefinitionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl<'a, R: CouponRepository + ?Sized> CreateCoupon<'a, R> {
    pub async fn execute(&self, coupon: NewCoupon) -> Result<Coupon, CreateCouponError> {
        let coupon = coupon.validated()?;
        let created = self
            .repo
            .create(&coupon)
            .await?
            .ok_or(CreateCouponError::DuplicateCode)?;
        tracing::info!(code = %created.code, "coupon_created");
        Ok(created)
    }
}
