//! Download destinations that only appear once complete
//!
//! Content is written into a hidden temporary file next to the target and
//! renamed onto the target by [`StagedFile::commit`]. Dropping a staged file
//! without committing removes the temporary file, so a failed download never
//! leaves a truncated file under the requested name.

use std::fs::Permissions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::CommandError;

pub struct StagedFile {
    target: PathBuf,
    file: NamedTempFile,
}

impl StagedFile {
    /// Stages a download for `target`.
    ///
    /// Fails when `target` is a directory or its parent is not writable, so
    /// callers can run this before any remote call.
    pub fn create(target: impl AsRef<Path>) -> Result<Self, CommandError> {
        let target = target.as_ref().to_path_buf();
        let existing = match std::fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => {
                return Err(CommandError::io(
                    &target,
                    io::Error::new(io::ErrorKind::IsADirectory, "destination is a directory"),
                ));
            }
            Ok(meta) => Some(meta.permissions()),
            Err(_) => None,
        };

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let file = tempfile::Builder::new()
            .prefix(".privx-")
            .suffix(".part")
            .tempfile_in(&dir)
            .map_err(|e| CommandError::io(&target, e))?;

        // Temp files are owner-only; a replaced file keeps its mode.
        if let Some(permissions) = existing.or_else(default_permissions) {
            file.as_file()
                .set_permissions(permissions)
                .map_err(|e| CommandError::io(&target, e))?;
        }

        debug!(target = %target.display(), staged = %file.path().display(), "staged download");
        Ok(Self { target, file })
    }

    pub fn writer(&mut self) -> &mut (dyn Write + Send) {
        &mut self.file
    }

    /// Flushes the content and moves it onto the target path.
    pub fn commit(self) -> Result<PathBuf, CommandError> {
        let Self { target, mut file } = self;

        file.flush().map_err(|e| CommandError::io(&target, e))?;
        file.as_file()
            .sync_all()
            .map_err(|e| CommandError::io(&target, e))?;
        file.persist(&target)
            .map_err(|e| CommandError::io(&target, e.error))?;

        Ok(target)
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
