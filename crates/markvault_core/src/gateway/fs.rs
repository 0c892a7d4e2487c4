//! Filesystem-backed gateway implementation.
//!
//! # Responsibility
//! - Implement the primitive file contract over `std::fs`.
//! - Keep extension filtering and listing depth rules in one place.
//!
//! # Invariants
//! - Listing recurses exactly one directory level below the vault root.
//! - Extension matching is case-insensitive on `.md`.

use crate::gateway::{GatewayError, GatewayResult, VaultGateway};
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Gateway over the local filesystem, with `rfd` for directory picking.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsVaultGateway;

impl FsVaultGateway {
    pub fn new() -> Self {
        Self
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn map_io_error(path: &Path, source: std::io::Error) -> GatewayError {
    if source.kind() == ErrorKind::NotFound {
        GatewayError::NotFound(path.to_path_buf())
    } else {
        GatewayError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl VaultGateway for FsVaultGateway {
    fn pick_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new().pick_folder()
    }

    fn list_markdown_files(&self, root: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "event=vault_list module=gateway status=error root={} error={err}",
                    root.display()
                );
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                // One level down only; deeper nesting is out of scope.
                let Ok(sub_entries) = fs::read_dir(&path) else {
                    continue;
                };
                for sub_entry in sub_entries.flatten() {
                    let sub_path = sub_entry.path();
                    if sub_path.is_file() && is_markdown(&sub_path) {
                        files.push(sub_path);
                    }
                }
            } else if path.is_file() && is_markdown(&path) {
                files.push(path);
            }
        }

        debug!(
            "event=vault_list module=gateway status=ok root={} count={}",
            root.display(),
            files.len()
        );
        files
    }

    fn read_file(&self, path: &Path) -> GatewayResult<String> {
        fs::read_to_string(path).map_err(|err| map_io_error(path, err))
    }

    fn write_file(&self, path: &Path, content: &str) -> GatewayResult<()> {
        fs::write(path, content).map_err(|err| map_io_error(path, err))
    }

    fn delete_file(&self, path: &Path) -> GatewayResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            // Already gone counts as deleted.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(GatewayError::Io {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }

    fn rename_file(&self, old: &Path, new: &Path) -> GatewayResult<()> {
        if !old.exists() {
            return Err(GatewayError::NotFound(old.to_path_buf()));
        }
        if new.exists() {
            return Err(GatewayError::AlreadyExists(new.to_path_buf()));
        }
        fs::rename(old, new).map_err(|err| map_io_error(old, err))
    }
}
