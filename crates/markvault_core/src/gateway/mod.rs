//! File access boundary between the core and the host filesystem.
//!
//! # Responsibility
//! - Define the primitive, note-unaware file operations the core consumes.
//! - Return semantic errors (`NotFound`, `AlreadyExists`) in addition to
//!   transport I/O errors.
//!
//! # Invariants
//! - Every operation is independent and atomic; none track selection state.
//! - `list_markdown_files` never fails: I/O errors yield an empty listing.
//! - `delete_file` is idempotent: deleting an absent file succeeds.

pub mod fs;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Error raised by primitive file operations.
#[derive(Debug)]
pub enum GatewayError {
    /// Operand path vanished before the operation completed.
    NotFound(PathBuf),
    /// Rename target already exists.
    AlreadyExists(PathBuf),
    /// Generic read/write/delete/rename failure from the underlying storage.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::AlreadyExists(path) => write!(f, "file already exists: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "file operation failed for {}: {source}", path.display())
            }
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Primitive file operations consumed by the reconciler and the lifecycle.
///
/// Implementations have no awareness of notes or selection; they expose the
/// storage exactly as it is.
pub trait VaultGateway {
    /// Asks the user for a vault directory. `None` means cancelled, which is
    /// a valid outcome rather than an error.
    fn pick_directory(&self) -> Option<PathBuf>;

    /// Lists `.md` files directly under `root` plus files one subdirectory
    /// level down. Deeper nesting is not traversed. Returns an empty list on
    /// I/O error instead of failing, and makes no ordering guarantee beyond
    /// disk-enumeration order.
    fn list_markdown_files(&self, root: &Path) -> Vec<PathBuf>;

    /// Reads the whole file as UTF-8 text.
    fn read_file(&self, path: &Path) -> GatewayResult<String>;

    /// Writes `content`, creating or truncating the file.
    fn write_file(&self, path: &Path, content: &str) -> GatewayResult<()>;

    /// Deletes the file. Deleting an already-absent file is a success.
    fn delete_file(&self, path: &Path) -> GatewayResult<()>;

    /// Renames `old` to `new`. Fails with `NotFound` when `old` is missing
    /// and `AlreadyExists` when `new` is already taken.
    fn rename_file(&self, old: &Path, new: &Path) -> GatewayResult<()>;
}
