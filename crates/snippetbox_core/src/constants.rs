//! Shared constants used across Snippetbox crates.

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 4000;

/// Default maximum snippet content size in bytes.
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 64 * 1024;

/// Maximum number of snippets returned by the home page listing.
pub const LATEST_SNIPPETS_LIMIT: usize = 10;

/// Maximum snippet title length, counted in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Default directory for static assets served under `/static`.
pub const DEFAULT_STATIC_DIR: &str = "./ui/static";
