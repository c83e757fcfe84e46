// Module layout (Clean Architecture style)
// - bootstrap: configuration and dependency wiring
// - infrastructure: Postgres, asset storage, payment gateway and signature adapters
// - presentation: HTTP handlers, routing and JSON error mapping
// - application: ports, use cases and pricing services
// - domain: books, carts, coupons, orders and users

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
