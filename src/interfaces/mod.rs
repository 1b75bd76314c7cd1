//! Inbound and outbound edges: webhook events, the `checkOrder` query and CSV export.

pub mod csv;
pub mod graphql;
pub mod webhook;
