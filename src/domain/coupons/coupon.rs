use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::orders::pricing::round_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(DiscountType::Percentage),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub is_active: bool,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponRejection {
    #[error("Invalid coupon code")]
    Invalid,
    #[error("This coupon has expired")]
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponDefinitionError {
    #[error("Coupon code is required")]
    MissingCode,
    #[error("Discount value must be greater than 0")]
    NonPositiveValue,
    #[error("Percentage discount cannot exceed 100")]
    PercentageTooLarge,
}

/// Subtotal, discount and payable total for a cart, all rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl PriceQuote {
    pub fn undiscounted(subtotal: Decimal) -> Self {
        let subtotal = round_money(subtotal);
        Self {
            subtotal,
            discount: Decimal::ZERO,
            total: subtotal,
        }
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl NewCoupon {
    pub fn validated(self) -> Result<Self, CouponDefinitionError> {
        let code = normalize_code(&self.code);
        if code.is_empty() {
            return Err(CouponDefinitionError::MissingCode);
        }
        if self.discount_value <= Decimal::ZERO {
            return Err(CouponDefinitionError::NonPositiveValue);
        }
        if self.discount_type == DiscountType::Percentage
            && self.discount_value > Decimal::ONE_HUNDRED
        {
            return Err(CouponDefinitionError::PercentageTooLarge);
        }
        Ok(Self { code, ..self })
    }
}

impl Coupon {
    /// Inactive coupons read as unknown so callers cannot probe disabled codes.
    pub fn ensure_usable(&self, now: chrono::DateTime<chrono::Utc>) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Invalid);
        }
        match self.expires_at {
            Some(exp) if exp < now => Err(CouponRejection::Expired),
            _ => Ok(()),
        }
    }

    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.discount_type {
            DiscountType::Percentage => subtotal * self.discount_value / Decimal::ONE_HUNDRED,
            DiscountType::Fixed => self.discount_value,
        };
        round_money(raw.min(subtotal).max(Decimal::ZERO))
    }

    pub fn quote(&self, subtotal: Decimal) -> PriceQuote {
        let subtotal = round_money(subtotal);
        let discount = self.discount_for(subtotal);
        PriceQuote {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn coupon(kind: DiscountType, value: Decimal) -> Coupon {
        Coupon {
            id: Uuid::new_v4(),
            code: "DIWALI10".into(),
            discount_type: kind,
            discount_value: value,
            is_active: true,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn percentage_discount_rounds_to_paise() {
        let c = coupon(DiscountType::Percentage, Decimal::new(15, 0));
        let q = c.quote(Decimal::new(33333, 2));
        assert_eq!(q.discount, Decimal::new(5000, 2));
        assert_eq!(q.total, Decimal::new(28333, 2));
    }

    #[test]
    fn fixed_discount_is_clamped_to_subtotal() {
        let c = coupon(DiscountType::Fixed, Decimal::new(500, 0));
        let q = c.quote(Decimal::new(120, 0));
        assert_eq!(q.discount, Decimal::new(120, 0));
        assert_eq!(q.total, Decimal::ZERO);
    }

    #[test]
    fn expired_and_inactive_coupons_are_rejected() {
        let now = Utc::now();
        let mut c = coupon(DiscountType::Fixed, Decimal::TEN);
        c.expires_at = Some(now - Duration::days(1));
        assert_eq!(c.ensure_usable(now), Err(CouponRejection::Expired));

        c.expires_at = Some(now + Duration::days(1));
        assert_eq!(c.ensure_usable(now), Ok(()));

        c.is_active = false;
        assert_eq!(c.ensure_usable(now), Err(CouponRejection::Invalid));
    }

    #[test]
    fn definition_normalizes_code_and_bounds_percentage() {
        let ok = NewCoupon {
            code: " diwali10 ".into(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::TEN,
            expires_at: None,
        }
        .validated()
        .unwrap();
        assert_eq!(ok.code, "DIWALI10");

        let too_much = NewCoupon {
            code: "ALL".into(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(150, 0),
            expires_at: None,
        };
        assert_eq!(
            too_much.validated().unwrap_err(),
            CouponDefinitionError::PercentageTooLarge
        );
    }
}
