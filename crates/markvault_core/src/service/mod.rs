//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate gateway calls into the reconciliation pass and the note
//!   lifecycle intents.
//! - Keep UI/FFI layers decoupled from filesystem details.

pub mod lifecycle;
pub mod reconciler;
