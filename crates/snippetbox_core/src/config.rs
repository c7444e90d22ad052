//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_CONTENT_SIZE, DEFAULT_PORT, DEFAULT_STATIC_DIR};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for Snippetbox.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_content_size: usize,
    pub static_dir: String,
    pub template_dir: Option<String>,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String, home: Option<&PathBuf>) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(home) = lookup("HOME").filter(|home| !home.trim().is_empty()) {
        return Some(PathBuf::from(home));
    }

    // Windows
    if let Some(profile) = lookup("USERPROFILE").filter(|profile| !profile.trim().is_empty()) {
        return Some(PathBuf::from(profile));
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let home = resolve_home_dir(&lookup);

        Self {
            db_path: var("DB_PATH")
                .map(|path| expand_tilde(path, home.as_ref()))
                .unwrap_or_else(|| {
                    let home = home.clone().unwrap_or_else(|| PathBuf::from("."));
                    let cache_dir = home.join(".cache").join("snippetbox");
                    cache_dir.join("db").to_string_lossy().to_string()
                }),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            max_content_size: var("MAX_CONTENT_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_SIZE),
            static_dir: var("STATIC_DIR")
                .map(|dir| expand_tilde(dir, home.as_ref()))
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            template_dir: var("TEMPLATE_DIR").map(|dir| expand_tilde(dir, home.as_ref())),
        }
    }
}
