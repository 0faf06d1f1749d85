//! Core functionality for the PrivX CLI
//!
//! This crate holds the logic that sits between the command router and the
//! remote services: client type dispatch, trusted client filtering, the
//! two-step pre-configuration download and role batch operations.
//! Everything here is written against the traits in `privx-protocol`, so
//! any implementation of those (the REST client, or a test double) works.

pub mod dispatch;
pub mod download;
pub mod error;
pub mod filter;
pub mod input;
pub mod roles;
pub mod staged;

pub use dispatch::{normalize, CaKind, ClientKind};
pub use download::{download_crl, download_pre_config, DownloadReport};
pub use error::CommandError;
pub use filter::filter_by_type;
pub use staged::StagedFile;

/// Re-export common types used throughout the crate
pub mod prelude {
    pub use super::dispatch::{
        list_ca_certificates, list_trusted_clients, normalize, show_ca_certificate, CaKind,
        ClientKind,
    };
    pub use super::download::{download_crl, download_pre_config, DownloadReport};
    pub use super::error::CommandError;
    pub use super::filter::filter_by_type;
    pub use super::input::{decode_json_file, load_role};
    pub use super::roles::{delete_roles, resolve_roles, role_members, split_list};
    pub use privx_protocol::prelude::*;
}
