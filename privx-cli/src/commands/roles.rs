//! Role management commands

use anyhow::{Context, Result};
use privx_core::prelude::*;
use tracing::warn;

use crate::utils::{print_json, print_line};
use crate::RoleAction;

/// Run role management action; no action lists every role
pub async fn run_role_action<R>(api: &R, action: Option<RoleAction>) -> Result<()>
where
    R: RoleStore + ?Sized,
{
    let Some(action) = action else {
        return print_json(&api.roles().await?);
    };

    match action {
        RoleAction::Create { file } => {
            let role = load_role(&file)?;
            let created = api.create_role(&role).await?;
            print_json(&created)
        }
        RoleAction::Show { id } => print_json(&api.role(&id).await?),
        RoleAction::Delete { id } => delete(api, &id).await,
        RoleAction::Update { file, id } => {
            let role = load_role(&file)?;
            api.update_role(&id, &role).await?;
            Ok(())
        }
        RoleAction::Members { id } => print_json(&role_members(api, &id).await?),
        RoleAction::Resolve { name } => print_json(&resolve_roles(api, &name).await?),
        RoleAction::AwsToken { id, mfa, ttl } => aws_token(api, &id, mfa.as_deref(), ttl).await,
    }
}

/// Prints each id as soon as its deletion succeeds, so a partial batch is
/// visible even when a later id fails.
async fn delete<R>(api: &R, ids: &str) -> Result<()>
where
    R: RoleStore + ?Sized,
{
    let mut output = Ok(());
    delete_roles(api, ids, |deleted| {
        if output.is_ok() {
            output = print_line(deleted);
        }
    })
    .await?;
    output
}

async fn aws_token<R>(api: &R, id: &str, mfa: Option<&str>, ttl: u32) -> Result<()>
where
    R: RoleStore + ?Sized,
{
    match api.aws_token(id, mfa, ttl).await {
        Ok(token) => print_json(&token),
        Err(e) if e.is_forbidden() && mfa.is_none() => {
            warn!(role_id = id, "AWS token refused without an MFA code");
            Err::<(), _>(e).context("access denied; if the role requires MFA, pass --mfa <CODE>")
        }
        Err(e) => Err(e.into()),
    }
}
