//! FFI use-case API for shell-facing calls.
//!
//! # Responsibility
//! - Expose the vault intents and the published snapshot to host UIs.
//! - Keep error semantics simple: response envelopes instead of thrown
//!   errors.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - All mutations are serialized through one process-wide session lock.

use markvault_core::{
    core_version as core_version_inner, display_name, init_logging as init_logging_inner,
    ping as ping_inner, preview_line, render_html, FsVaultGateway, VaultSession, VaultSnapshot,
};
use std::sync::Mutex;

static SESSION: Mutex<Option<VaultSession<FsVaultGateway>>> = Mutex::new(None);

fn with_session<T>(action: impl FnOnce(&mut VaultSession<FsVaultGateway>) -> T) -> T {
    let mut guard = SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let session = guard.get_or_insert_with(|| VaultSession::new(FsVaultGateway::new()));
    action(session)
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same arguments (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Note list entry for sidebar display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Full note path.
    pub path: String,
    /// Display label (file stem).
    pub name: String,
}

/// Read-only vault view published after a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultView {
    /// Active vault root, empty when none is selected.
    pub vault_path: Option<String>,
    /// Fresh note set in disk-enumeration order.
    pub notes: Vec<NoteItem>,
    /// Selected note path, `None` when nothing is open.
    pub selection_path: Option<String>,
    /// Whether the selection is a staged-new note without a backing file.
    pub selection_is_new: bool,
    /// Current editor buffer (empty without a selection).
    pub draft_content: String,
    /// Whether the draft has unsaved changes.
    pub dirty: bool,
}

/// Action envelope for intent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultActionResponse {
    /// Whether the intent succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI notification.
    pub message: String,
    /// Vault view after the intent (unchanged state on failure).
    pub view: VaultView,
}

fn view_from(snapshot: &VaultSnapshot) -> VaultView {
    let selection = snapshot.selection.as_ref();
    VaultView {
        vault_path: snapshot
            .vault_path
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned()),
        notes: snapshot
            .notes
            .iter()
            .map(|path| NoteItem {
                path: path.to_string_lossy().into_owned(),
                name: display_name(path),
            })
            .collect(),
        selection_path: selection.map(|sel| sel.path.to_string_lossy().into_owned()),
        selection_is_new: selection.is_some_and(|sel| sel.is_new),
        draft_content: selection
            .map(|sel| sel.draft_content.clone())
            .unwrap_or_default(),
        dirty: selection.is_some_and(|sel| sel.dirty),
    }
}

fn respond(
    session: &VaultSession<FsVaultGateway>,
    result: Result<VaultSnapshot, markvault_core::LifecycleError>,
    success_message: &str,
) -> VaultActionResponse {
    match result {
        Ok(snapshot) => VaultActionResponse {
            ok: true,
            message: success_message.to_string(),
            view: view_from(&snapshot),
        },
        Err(err) => {
            log::warn!("event=intent_failed module=ffi error={err}");
            VaultActionResponse {
                ok: false,
                message: err.to_string(),
                view: view_from(&session.snapshot()),
            }
        }
    }
}

/// Returns the current vault view without mutating anything.
///
/// # FFI contract
/// - Sync call, non-blocking; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn vault_view() -> VaultView {
    with_session(|session| view_from(&session.snapshot()))
}

/// Opens the native directory picker and attaches the chosen vault.
///
/// Cancelling the picker is a valid outcome: the response is `ok` and the
/// view is unchanged.
///
/// # FFI contract
/// - Sync call; blocks on the native dialog.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn select_vault() -> VaultActionResponse {
    with_session(|session| {
        let snapshot = session.select_vault();
        VaultActionResponse {
            ok: true,
            message: "vault selection handled".to_string(),
            view: view_from(&snapshot),
        }
    })
}

/// Attaches a vault from a path picked by the host UI.
///
/// # FFI contract
/// - Sync call; triggers one reconciliation pass. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn attach_vault(path: String) -> VaultActionResponse {
    with_session(|session| {
        let snapshot = session.attach_vault(path);
        VaultActionResponse {
            ok: true,
            message: "vault attached".to_string(),
            view: view_from(&snapshot),
        }
    })
}

/// Opens a note from the current listing.
///
/// # FFI contract
/// - Sync call; triggers one reconciliation pass. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn open_note(path: String) -> VaultActionResponse {
    with_session(|session| {
        let result = session.open(path);
        respond(session, result, "note opened")
    })
}

/// Stages a new unsaved note with a unique generated name.
///
/// # FFI contract
/// - Sync call; no disk write happens until `save_note`. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn stage_new_note() -> VaultActionResponse {
    with_session(|session| {
        let result = session.stage_new();
        respond(session, result, "new note staged")
    })
}

/// Replaces the draft buffer of the current selection.
///
/// # FFI contract
/// - Sync call; never triggers a reconciliation pass. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_draft(text: String) -> VaultActionResponse {
    with_session(|session| {
        let result = session.edit(text).map(|()| session.snapshot());
        respond(session, result, "draft updated")
    })
}

/// Writes the draft to disk and reconciles.
///
/// # FFI contract
/// - Sync call; a failed write leaves the draft untouched. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn save_note() -> VaultActionResponse {
    with_session(|session| {
        let result = session.save();
        respond(session, result, "note saved")
    })
}

/// Renames the selected note; the name is sanitized to a `*.md` file name.
///
/// # FFI contract
/// - Sync call; any failure leaves the old selection intact. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn rename_note(new_name: String) -> VaultActionResponse {
    with_session(|session| {
        let result = session.rename(&new_name);
        respond(session, result, "note renamed")
    })
}

/// Deletes the selected note (staged-new notes are discarded in memory).
///
/// # FFI contract
/// - Sync call; deleting an already-absent file is a success. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_note() -> VaultActionResponse {
    with_session(|session| {
        let result = session.delete();
        respond(session, result, "note deleted")
    })
}

/// Renders markdown to sanitized HTML for the preview pane.
///
/// # FFI contract
/// - Sync, pure function of its input. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn render_markdown(text: String) -> String {
    render_html(&text)
}

/// Derives a short plain-text preview line for list display.
///
/// # FFI contract
/// - Sync, pure function of its input. Never panics; empty string when
///   nothing displayable remains.
#[flutter_rust_bridge::frb(sync)]
pub fn note_preview(text: String) -> String {
    preview_line(&text).unwrap_or_default()
}
