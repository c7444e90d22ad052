//! Database layer for Snippetbox.

/// Snippet storage helpers.
pub mod snippet;
/// redb table definitions.
pub mod tables;

use crate::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::models::snippet::Snippet;
use std::path::Path;
use std::sync::Arc;

pub use snippet::SnippetDb;

/// Persistence boundary used by [`crate::SnippetService`].
///
/// Every read applies the visibility rule (`created <= now < expires`);
/// writes never check it.
pub trait SnippetStore: Send + Sync {
    /// Persist a new snippet expiring `expiry_days` days from now.
    ///
    /// # Returns
    /// The id assigned to the new row (always `>= 1`).
    ///
    /// # Errors
    /// Storage failures, or a validation error when `expiry_days` is zero.
    fn insert(&self, title: &str, content: &str, expiry_days: u32) -> Result<u64, AppError>;

    /// Fetch a visible snippet.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the id was never stored, has expired, or is
    /// not yet visible. These cases are deliberately indistinguishable.
    fn get(&self, id: u64) -> Result<Snippet, AppError>;

    /// Up to [`crate::LATEST_SNIPPETS_LIMIT`] visible snippets, newest first.
    fn latest(&self) -> Result<Vec<Snippet>, AppError>;
}

/// Database handle with access to the snippet tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub snippets: Arc<SnippetDb>,
    /// Time source shared with the snippet tables.
    pub clock: Arc<dyn Clock>,
}

impl Database {
    /// Open the database using wall-clock time.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory or redb file cannot be created.
    pub fn new(path: &str) -> Result<Self, AppError> {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Open the database with an explicit time source.
    ///
    /// `path` is a directory; the redb file lives inside it.
    ///
    /// # Errors
    /// Returns an error if the directory or redb file cannot be created.
    pub fn with_clock(path: &str, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(tables::REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database '{}' is already open in another process.\n\
                    Stop the other Snippetbox instance, or set DB_PATH to a different location.",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            snippets: Arc::new(SnippetDb::new(db.clone(), clock.clone())?),
            db,
            clock,
        })
    }
}
