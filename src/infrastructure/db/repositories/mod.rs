pub mod book_repository_sqlx;
pub mod cart_repository_sqlx;
pub mod category_repository_sqlx;
pub mod checkout_repository_sqlx;
pub mod coupon_repository_sqlx;
pub mod order_repository_sqlx;
pub mod user_repository_sqlx;
