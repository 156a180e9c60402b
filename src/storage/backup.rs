//! Copy-backup-restore write protocol

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IoError, Result};

/// Path of the backup kept while `path` is being rewritten
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Run `write` against `path` so that a failure never leaves a half-written file.
///
/// An existing file is copied to `<path><suffix>` first. On success the copy is
/// removed. On failure the copy is moved back over `path` (or, when there was no
/// prior file, whatever `write` left behind is removed) and the write error is
/// returned.
pub fn write_with_backup<F>(path: &Path, suffix: &str, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let backup = if path.exists() {
        let backup = backup_path(path, suffix);
        fs::copy(path, &backup).map_err(|e| IoError::from_io(&backup, e))?;
        log::debug!("backed up {} to {}", path.display(), backup.display());
        Some(backup)
    } else {
        None
    };

    match write(path) {
        Ok(()) => {
            if let Some(backup) = backup {
                if let Err(e) = fs::remove_file(&backup) {
                    log::warn!("could not remove backup {}: {}", backup.display(), e);
                }
            }
            Ok(())
        }
        Err(err) => {
            match backup {
                Some(backup) => match fs::rename(&backup, path) {
                    Ok(()) => log::warn!("save failed, restored {} from backup", path.display()),
                    Err(e) => log::error!(
                        "save failed and restore from {} did not succeed: {}",
                        backup.display(),
                        e
                    ),
                },
                None => {
                    if let Err(e) = fs::remove_file(path) {
                        if e.kind() != std::io::ErrorKind::NotFound {
                            log::error!("could not remove partial file {}: {}", path.display(), e);
                        }
                    }
                }
            }
            Err(err)
        }
    }
}
