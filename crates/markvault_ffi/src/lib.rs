//! FFI crate exposing the markvault core to host UIs.

pub mod api;
