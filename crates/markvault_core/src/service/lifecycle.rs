//! Note lifecycle intents.
//!
//! # Responsibility
//! - Own the (vault, note set, selection) triple and expose the user
//!   intents that mutate it.
//! - Run a full reconciliation pass after every identity-changing intent.
//!
//! # Invariants
//! - Intents run to completion; a pass never interleaves with another.
//! - A failed save/rename/delete leaves the selection and draft untouched.
//! - Editing the draft never triggers a pass.

use crate::gateway::{GatewayError, VaultGateway};
use crate::model::{NoteRef, Selection, SelectionSnapshot, VaultSnapshot};
use crate::service::reconciler::reconcile;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

static ILLEGAL_NAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("valid name filter regex"));

/// Error raised by lifecycle intents.
#[derive(Debug)]
pub enum LifecycleError {
    /// Intent requires a vault and none is selected.
    NoVault,
    /// Intent requires a selection and none exists.
    NoSelection,
    /// Rename target name is empty after sanitization.
    InvalidName(String),
    /// Rename target path already exists.
    NameConflict(PathBuf),
    /// Operand path vanished before the operation completed.
    NotFound(PathBuf),
    /// Underlying storage failure.
    Gateway(GatewayError),
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoVault => write!(f, "no vault selected"),
            Self::NoSelection => write!(f, "no note selected"),
            Self::InvalidName(raw) => write!(f, "invalid note name: `{raw}`"),
            Self::NameConflict(path) => {
                write!(f, "a note already exists at {}", path.display())
            }
            Self::NotFound(path) => write!(f, "note not found: {}", path.display()),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GatewayError> for LifecycleError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::NotFound(path) => Self::NotFound(path),
            GatewayError::AlreadyExists(path) => Self::NameConflict(path),
            other => Self::Gateway(other),
        }
    }
}

/// Owned state container driving the reconciler.
///
/// The session holds the (vault, note set, selection) triple exclusively;
/// presentation layers only ever observe it through [`VaultSnapshot`]s
/// returned after each pass.
pub struct VaultSession<G: VaultGateway> {
    gateway: G,
    vault: Option<PathBuf>,
    notes: Vec<NoteRef>,
    selection: Option<Selection>,
    last_note_stamp: i64,
}

impl<G: VaultGateway> VaultSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            vault: None,
            notes: Vec::new(),
            selection: None,
            last_note_stamp: 0,
        }
    }

    /// Current read-only view. Matches the last published pass.
    pub fn snapshot(&self) -> VaultSnapshot {
        VaultSnapshot {
            vault_path: self.vault.clone(),
            notes: self.notes.clone(),
            selection: self.selection.as_ref().map(SelectionSnapshot::from),
        }
    }

    pub fn vault_path(&self) -> Option<&Path> {
        self.vault.as_deref()
    }

    pub fn notes(&self) -> &[NoteRef] {
        &self.notes
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Asks the gateway for a vault directory. Cancel is a valid outcome,
    /// not an error, and leaves all state untouched.
    pub fn select_vault(&mut self) -> VaultSnapshot {
        match self.gateway.pick_directory() {
            Some(path) => self.attach_vault(path),
            None => {
                info!("event=vault_pick module=lifecycle status=cancelled");
                self.snapshot()
            }
        }
    }

    /// Sets the vault from a host-picked path and clears the selection and
    /// draft unconditionally: vault identity itself changed, independent of
    /// what the pass would decide.
    pub fn attach_vault(&mut self, path: impl Into<PathBuf>) -> VaultSnapshot {
        let path = path.into();
        info!(
            "event=vault_attach module=lifecycle status=ok path={}",
            path.display()
        );
        self.vault = Some(path);
        self.selection = None;
        self.run_pass()
    }

    /// Opens a note from the current listing. Content is filled in by the
    /// pass's refresh rule; a path missing from the fresh listing is cleared
    /// by the pass rather than pre-validated here.
    pub fn open(&mut self, note: impl Into<NoteRef>) -> Result<VaultSnapshot, LifecycleError> {
        if self.vault.is_none() {
            return Err(LifecycleError::NoVault);
        }
        self.selection = Some(Selection::existing(note));
        Ok(self.run_pass())
    }

    /// Stages a new unsaved note with a unique timestamp-based name. No disk
    /// write happens until `save`.
    pub fn stage_new(&mut self) -> Result<VaultSnapshot, LifecycleError> {
        let vault = self.vault.clone().ok_or(LifecycleError::NoVault)?;
        let path = vault.join(self.next_note_name());
        info!(
            "event=note_stage module=lifecycle status=ok path={}",
            path.display()
        );
        self.selection = Some(Selection::staged(path));
        Ok(self.run_pass())
    }

    /// Overwrites the draft buffer. Editing is not a reconciliation trigger:
    /// only identity and vault changes are.
    pub fn edit(&mut self, text: impl Into<String>) -> Result<(), LifecycleError> {
        let selection = self.selection.as_mut().ok_or(LifecycleError::NoSelection)?;
        selection.draft_content = text.into();
        Ok(())
    }

    /// Writes the draft to disk, then re-runs the pass by re-asserting the
    /// unchanged vault so the written file is picked up and `is_new` clears
    /// once the path satisfies the refresh rule. A write failure leaves the
    /// selection and draft untouched.
    pub fn save(&mut self) -> Result<VaultSnapshot, LifecycleError> {
        let selection = self.selection.as_ref().ok_or(LifecycleError::NoSelection)?;
        self.gateway
            .write_file(&selection.path, &selection.draft_content)?;
        info!(
            "event=note_save module=lifecycle status=ok path={} bytes={}",
            selection.path.display(),
            selection.draft_content.len()
        );
        Ok(self.run_pass())
    }

    /// Renames the selected note on disk and updates the selection path.
    ///
    /// The new name is sanitized first; a name that sanitizes to empty or a
    /// target already present in the note set fails without any gateway
    /// call. Renaming to the current name is a no-op success. A staged-new
    /// selection has no file to rename and fails with `NotFound`. Any
    /// failure leaves the old selection intact.
    pub fn rename(&mut self, new_name: &str) -> Result<VaultSnapshot, LifecycleError> {
        let selection = self.selection.as_ref().ok_or(LifecycleError::NoSelection)?;
        let file_name = sanitize_note_name(new_name)
            .ok_or_else(|| LifecycleError::InvalidName(new_name.to_string()))?;
        let parent = selection
            .path
            .parent()
            .map(Path::to_path_buf)
            .or_else(|| self.vault.clone())
            .ok_or(LifecycleError::NoVault)?;
        let target = parent.join(file_name);

        if target == selection.path {
            return Ok(self.snapshot());
        }
        if self.notes.contains(&target) {
            return Err(LifecycleError::NameConflict(target));
        }

        self.gateway.rename_file(&selection.path, &target)?;
        info!(
            "event=note_rename module=lifecycle status=ok from={} to={}",
            selection.path.display(),
            target.display()
        );
        if let Some(selection) = self.selection.as_mut() {
            selection.path = target;
        }
        // The pass's refresh rule re-reads content at the new path.
        Ok(self.run_pass())
    }

    /// Deletes the selected note. A staged-new selection is discarded purely
    /// in memory without touching the gateway; for an existing note the
    /// gateway delete is idempotent, so an already-absent file is a success.
    /// A failure leaves the selection intact.
    pub fn delete(&mut self) -> Result<VaultSnapshot, LifecycleError> {
        let selection = self.selection.as_ref().ok_or(LifecycleError::NoSelection)?;
        if !selection.is_new {
            self.gateway.delete_file(&selection.path)?;
        }
        info!(
            "event=note_delete module=lifecycle status=ok path={} staged={}",
            selection.path.display(),
            selection.is_new
        );
        self.selection = None;
        Ok(self.run_pass())
    }

    fn run_pass(&mut self) -> VaultSnapshot {
        let previous = self.selection.take();
        let (notes, selection) = reconcile(&self.gateway, self.vault.as_deref(), previous);
        self.notes = notes;
        self.selection = selection;
        self.snapshot()
    }

    fn next_note_name(&mut self) -> String {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);
        // Strictly increasing stamp so two stagings within the same
        // millisecond cannot collide.
        self.last_note_stamp = now_millis.max(self.last_note_stamp + 1);
        format!("Untitled-{}.md", self.last_note_stamp)
    }
}

/// Normalizes a user-entered note name to a safe `*.md` file name.
///
/// Rules:
/// - surrounding whitespace is trimmed;
/// - path separators and reserved characters are removed;
/// - exactly one `.md` suffix is ensured (case-insensitive match);
/// - returns `None` when nothing remains besides the extension.
pub fn sanitize_note_name(raw: &str) -> Option<String> {
    let cleaned = ILLEGAL_NAME_CHARS_RE.replace_all(raw, "");
    let cleaned = cleaned.trim();
    let stem = if cleaned.to_ascii_lowercase().ends_with(".md") {
        &cleaned[..cleaned.len() - 3]
    } else {
        cleaned
    };
    let stem = stem.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}.md"))
}

#[cfg(test)]
mod tests {
    use super::sanitize_note_name;

    #[test]
    fn sanitize_appends_md_suffix_once() {
        assert_eq!(sanitize_note_name("notes").as_deref(), Some("notes.md"));
        assert_eq!(sanitize_note_name("notes.md").as_deref(), Some("notes.md"));
        assert_eq!(sanitize_note_name("NOTES.MD").as_deref(), Some("NOTES.md"));
    }

    #[test]
    fn sanitize_strips_separators_and_reserved_chars() {
        assert_eq!(
            sanitize_note_name("  a/b\\c:d*e  ").as_deref(),
            Some("abcde.md")
        );
    }

    #[test]
    fn sanitize_rejects_names_that_reduce_to_nothing() {
        assert!(sanitize_note_name("").is_none());
        assert!(sanitize_note_name("   ").is_none());
        assert!(sanitize_note_name("///").is_none());
        assert!(sanitize_note_name(".md").is_none());
    }
}
