//! Trusted client commands
//!
//! Type tokens are parsed up front, so an unknown type fails before any
//! request is made.

use anyhow::Result;
use privx_core::prelude::*;

use crate::utils::print_json;
use crate::TrustedClientAction;

/// Run trusted client action
pub async fn run_trusted_client_action<A>(api: &A, action: TrustedClientAction) -> Result<()>
where
    A: UserStore + Authorizer + ?Sized,
{
    match action {
        TrustedClientAction::List { client_type } => {
            let kind = ClientKind::parse(&client_type)?;
            print_json(&list_trusted_clients(api, kind).await?)
        }
        TrustedClientAction::Show { client_id } => {
            print_json(&api.trusted_client(&client_id).await?)
        }
        TrustedClientAction::ListCa {
            client_type,
            group_id,
        } => {
            let kind = CaKind::parse(&client_type)?;
            print_json(&list_ca_certificates(api, kind, group_id.as_deref()).await?)
        }
        TrustedClientAction::ShowCa {
            client_id,
            client_type,
        } => {
            let kind = CaKind::parse(&client_type)?;
            print_json(&show_ca_certificate(api, kind, &client_id).await?)
        }
        TrustedClientAction::ShowCrl {
            client_id,
            client_type,
            name,
        } => {
            let kind = CaKind::parse(&client_type)?;
            print_json(&download_crl(api, kind, &client_id, &name).await?)
        }
        TrustedClientAction::PreConfig {
            client_id,
            client_type,
            name,
        } => {
            let kind = ClientKind::parse(&client_type)?;
            print_json(&download_pre_config(api, kind, &client_id, &name).await?)
        }
    }
}
