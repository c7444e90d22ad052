//! Core domain library for Snippetbox (config, storage, service, views).

/// Time source used for snippet creation and visibility checks.
pub mod clock;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Database access layer.
pub mod db;
/// Application error types (storage/domain/rendering).
pub mod error;
/// Data models for snippets and view payloads.
pub mod models;
/// Validation and expiry policy in front of the store.
pub mod service;
/// View composition (layout + page + partials).
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use constants::*;
pub use db::{Database, SnippetStore};
pub use error::{AppError, ErrorKind};
pub use service::SnippetService;
pub use view::{Renderer, TeraRenderer};
