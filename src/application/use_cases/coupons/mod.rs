pub mod apply_coupon;
pub mod create_coupon;
pub mod list_coupons;
pub mod toggle_coupon;
