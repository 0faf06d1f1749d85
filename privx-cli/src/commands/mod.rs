//! CLI command implementations
//!
//! One module per command group.

pub mod roles;
pub mod trusted_clients;
