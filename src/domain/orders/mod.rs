pub mod order;
pub mod pricing;
