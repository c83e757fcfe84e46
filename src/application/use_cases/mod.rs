pub mod admin;
pub mod auth;
pub mod books;
pub mod cart;
pub mod categories;
pub mod coupons;
pub mod orders;
pub mod payment;
pub mod profile;
