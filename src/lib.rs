//! Worldline payment core: transaction reconciliation, guarded gateway actions,
//! failure notifications and module uninstall, behind async ports.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
