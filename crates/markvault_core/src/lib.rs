//! Core state machine for the markvault note editor.
//! This crate is the single source of truth for vault/selection invariants.

pub mod gateway;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod service;

pub use gateway::fs::FsVaultGateway;
pub use gateway::{GatewayError, GatewayResult, VaultGateway};
pub use logging::{default_log_level, init_logging, logging_status};
pub use markdown::{display_name, preview_line, render_html};
pub use model::{NoteRef, Selection, SelectionSnapshot, VaultSnapshot};
pub use service::lifecycle::{sanitize_note_name, LifecycleError, VaultSession};
pub use service::reconciler::reconcile;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
