use std::path::Path;

use privx_protocol::Role;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::CommandError;

/// Reads and decodes a JSON request body.
pub fn decode_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let content = std::fs::read_to_string(path).map_err(|e| CommandError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| CommandError::InvalidInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Loads a role body for `create` or `update`.
pub fn load_role(path: &Path) -> Result<Role, CommandError> {
    let role: Role = decode_json_file(path)?;
    role.validate().map_err(|e| CommandError::InvalidInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(role)
}
