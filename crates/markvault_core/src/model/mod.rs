//! Domain model for vault browsing and note editing.
//!
//! # Responsibility
//! - Define the selection record tracked across reconciliation passes.
//! - Define the read-only snapshot published to presentation layers.
//!
//! # Invariants
//! - At most one selection exists at any time.
//! - `draft_content` is always defined while a selection exists.

pub mod note;

pub use note::{NoteRef, Selection, SelectionSnapshot, VaultSnapshot};
