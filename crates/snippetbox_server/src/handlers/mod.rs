//! HTTP request handlers.

/// Snippet pages and the create form target.
pub mod snippet;
