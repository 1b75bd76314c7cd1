//! Domain model and the ports the application layer talks through.

pub mod email;
pub mod order;
pub mod payment_products;
pub mod ports;
pub mod response;
pub mod schema;
pub mod transaction;
