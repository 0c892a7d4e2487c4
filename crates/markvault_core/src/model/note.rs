//! Note selection and snapshot records.
//!
//! # Responsibility
//! - Track the currently open note across reconciliation passes.
//! - Keep the live draft separated from the last known on-disk content.
//!
//! # Invariants
//! - `is_new == true` means the path has never been persisted and was built
//!   from a timestamp-based name that did not collide at creation time.
//! - `draft_content` is only replaced by explicit edits, a refresh from
//!   disk, or a discard/delete/vault-change intent.

use serde::Serialize;
use std::path::PathBuf;

/// Full path identifying a (possibly not-yet-persisted) Markdown note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteRef = PathBuf;

/// The currently open note and its editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Note path. For a staged-new note this file does not exist yet.
    pub path: NoteRef,
    /// True until the note is persisted and found by a fresh listing.
    pub is_new: bool,
    /// Last content read from disk. `None` before the first read.
    pub saved_content: Option<String>,
    /// Live editor buffer. Defined whenever a selection exists.
    pub draft_content: String,
}

impl Selection {
    /// Selection for a note believed to exist on disk. Content is filled in
    /// by the next reconciliation pass.
    pub fn existing(path: impl Into<NoteRef>) -> Self {
        Self {
            path: path.into(),
            is_new: false,
            saved_content: None,
            draft_content: String::new(),
        }
    }

    /// Staged-new selection with an empty draft and no backing file.
    pub fn staged(path: impl Into<NoteRef>) -> Self {
        Self {
            path: path.into(),
            is_new: true,
            saved_content: None,
            draft_content: String::new(),
        }
    }

    /// Returns whether the draft differs from the last known disk content.
    pub fn is_dirty(&self) -> bool {
        self.saved_content.as_deref() != Some(self.draft_content.as_str())
    }
}

/// Read-only selection view published to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    /// Note path (may not exist on disk yet for a staged-new note).
    pub path: PathBuf,
    /// Staged-new flag.
    pub is_new: bool,
    /// Current editor buffer.
    pub draft_content: String,
    /// Whether the draft has unsaved changes.
    pub dirty: bool,
}

impl From<&Selection> for SelectionSnapshot {
    fn from(selection: &Selection) -> Self {
        Self {
            path: selection.path.clone(),
            is_new: selection.is_new,
            draft_content: selection.draft_content.clone(),
            dirty: selection.is_dirty(),
        }
    }
}

/// Read-only view published after every reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultSnapshot {
    /// Active vault root, if any.
    pub vault_path: Option<PathBuf>,
    /// Fresh note set in disk-enumeration order (not guaranteed sorted).
    pub notes: Vec<NoteRef>,
    /// Current selection, if any survived the pass.
    pub selection: Option<SelectionSnapshot>,
}
