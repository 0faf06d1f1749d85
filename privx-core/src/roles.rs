//! Role batch operations
//!
//! `delete` and `members` walk a comma separated list left to right and
//! stop at the first failure. `resolve` sends the whole list at once.

use privx_protocol::{RoleRef, RoleStore, User};
use tracing::{debug, info};

use crate::error::CommandError;

/// Splits a comma separated list. There is no quoting; empty segments are
/// dropped, so `""` yields no items.
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',').filter(|item| !item.is_empty()).collect()
}

/// Deletes each role in turn, calling `on_deleted` after every success.
///
/// Roles deleted before a failure stay deleted; the rest are not attempted.
pub async fn delete_roles<R, F>(api: &R, ids: &str, mut on_deleted: F) -> Result<usize, CommandError>
where
    R: RoleStore + ?Sized,
    F: FnMut(&str),
{
    let mut deleted = 0;
    for id in split_list(ids) {
        api.delete_role(id).await?;
        info!(role_id = id, "role deleted");
        on_deleted(id);
        deleted += 1;
    }
    Ok(deleted)
}

/// Members of every listed role, concatenated in list order. A user in
/// several roles appears once per role.
pub async fn role_members<R>(api: &R, ids: &str) -> Result<Vec<User>, CommandError>
where
    R: RoleStore + ?Sized,
{
    let mut members = Vec::new();
    for id in split_list(ids) {
        let batch = api.role_members(id).await?;
        debug!(role_id = id, count = batch.len(), "fetched role members");
        members.extend(batch);
    }
    Ok(members)
}

pub async fn resolve_roles<R>(api: &R, names: &str) -> Result<Vec<RoleRef>, CommandError>
where
    R: RoleStore + ?Sized,
{
    let names: Vec<String> = split_list(names).into_iter().map(str::to_string).collect();
    Ok(api.resolve_roles(&names).await?)
}
