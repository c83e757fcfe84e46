pub mod asset_storage;
pub mod book_repository;
pub mod cart_repository;
pub mod category_repository;
pub mod checkout_repository;
pub mod coupon_repository;
pub mod order_repository;
pub mod payment_gateway;
pub mod user_repository;
