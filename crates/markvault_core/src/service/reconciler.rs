//! Vault reconciliation pass.
//!
//! # Responsibility
//! - Rebuild the note set from disk and decide the disposition of the
//!   current selection in one run-to-completion pass.
//!
//! # Invariants
//! - Staged-new selections are preserved byte-for-byte without disk I/O.
//! - A non-new selection present in the fresh listing is refreshed from
//!   disk, overwriting any unsaved draft with disk truth.
//! - Any other selection is cleared; a non-new selection missing from the
//!   listing never survives a pass.

use crate::gateway::VaultGateway;
use crate::model::{NoteRef, Selection};
use log::{debug, warn};
use std::path::Path;

/// Runs one reconciliation pass.
///
/// Re-lists the vault unconditionally and returns the fresh note set
/// together with the new disposition of `previous`, decided in strict
/// priority order: preserve-as-new, refresh-existing, clear.
///
/// A listing failure yields an empty note set and the disposition rules
/// still run, so a transient I/O error can evict a valid non-new selection.
pub fn reconcile<G: VaultGateway>(
    gateway: &G,
    vault: Option<&Path>,
    previous: Option<Selection>,
) -> (Vec<NoteRef>, Option<Selection>) {
    let Some(root) = vault else {
        return (Vec::new(), None);
    };

    let notes = gateway.list_markdown_files(root);

    let selection = match previous {
        // A staged-but-unsaved note cannot be found by a listing, so its
        // absence from the fresh set must not be misread as deletion. Once
        // the path shows up (a completed save), the refresh rule below takes
        // over and clears the staged flag.
        Some(selection) if selection.is_new && !notes.contains(&selection.path) => {
            Some(selection)
        }
        Some(mut selection) if notes.contains(&selection.path) => {
            // Disk is the source of truth after any pass. This intentionally
            // replaces unsaved draft edits with the freshly read content.
            match gateway.read_file(&selection.path) {
                Ok(content) => {
                    selection.saved_content = Some(content.clone());
                    selection.draft_content = content;
                }
                Err(err) => {
                    warn!(
                        "event=selection_refresh module=reconciler status=error path={} error={err}",
                        selection.path.display()
                    );
                    selection.saved_content = None;
                    selection.draft_content = String::new();
                }
            }
            selection.is_new = false;
            Some(selection)
        }
        _ => None,
    };

    debug!(
        "event=reconcile_pass module=reconciler status=ok root={} notes={} selected={}",
        root.display(),
        notes.len(),
        selection.is_some()
    );
    (notes, selection)
}
