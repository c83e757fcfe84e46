pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod orders;
pub mod users;
