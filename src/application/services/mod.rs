pub mod cart_pricing;
