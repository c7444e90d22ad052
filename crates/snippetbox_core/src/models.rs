//! Data models for persistence and view rendering.

/// Snippet entity and create-request payload.
pub mod snippet;
/// Per-request view payload.
pub mod view;
