//! Snippet storage operations backed by redb.

use super::SnippetStore;
use crate::{
    clock::Clock, constants::LATEST_SNIPPETS_LIMIT, db::tables::*, error::AppError,
    models::snippet::Snippet,
};
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

// Pre-epoch timestamps are clamped to keep keys non-negative.
fn epoch_millis(at: DateTime<Utc>) -> u64 {
    at.timestamp_millis().max(0) as u64
}

fn reverse_created_key(created: DateTime<Utc>, id: u64) -> (u64, u64) {
    (u64::MAX.saturating_sub(epoch_millis(created)), u64::MAX - id)
}

/// Whether an index entry is certainly invisible at `now_millis`.
///
/// Millisecond truncation makes this conservative: rows it keeps still go
/// through [`Snippet::is_visible_at`].
fn index_entry_hidden(key: (u64, u64), expires_millis: u64, now_millis: u64) -> bool {
    let created_millis = u64::MAX - key.0;
    created_millis > now_millis || expires_millis < now_millis
}

fn deserialize_snippet(bytes: &[u8]) -> Result<Snippet, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Accessor for snippet-related redb tables.
pub struct SnippetDb {
    db: Arc<redb::Database>,
    clock: Arc<dyn Clock>,
}

impl SnippetDb {
    /// Initialize snippet tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SNIPPETS)?;
        write_txn.open_table(SNIPPETS_BY_CREATED)?;
        write_txn.commit()?;
        Ok(Self { db, clock })
    }

    /// Visible snippets, newest first, at most `limit`.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_visible(&self, limit: usize) -> Result<Vec<Snippet>, AppError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let now = self.clock.now();
        let now_millis = epoch_millis(now);
        let read_txn = self.db.begin_read()?;
        let by_created = read_txn.open_table(SNIPPETS_BY_CREATED)?;
        let snippets_table = read_txn.open_table(SNIPPETS)?;
        let mut snippets = Vec::with_capacity(limit);

        // Expired rows are never pruned, so skip them from the index value
        // before paying for a row lookup and decode.
        for item in by_created.iter()? {
            let (key, expires) = item?;
            let key = key.value();
            if index_entry_hidden(key, expires.value(), now_millis) {
                continue;
            }
            let (_, reverse_id) = key;
            let Some(row) = snippets_table.get(u64::MAX - reverse_id)? else {
                continue;
            };
            let snippet = deserialize_snippet(row.value())?;
            if !snippet.is_visible_at(now) {
                continue;
            }
            snippets.push(snippet);
            if snippets.len() >= limit {
                break;
            }
        }

        Ok(snippets)
    }
}

impl SnippetStore for SnippetDb {
    fn insert(&self, title: &str, content: &str, expiry_days: u32) -> Result<u64, AppError> {
        if expiry_days == 0 {
            return Err(AppError::Validation(
                "Expiry must be at least one day".to_string(),
            ));
        }

        let created = self.clock.now();
        let write_txn = self.db.begin_write()?;
        let id = {
            let mut snippets = write_txn.open_table(SNIPPETS)?;
            let mut by_created = write_txn.open_table(SNIPPETS_BY_CREATED)?;

            // Write transactions are serialized, so max + 1 cannot race.
            let last_id = snippets.last()?.map(|(key, _)| key.value()).unwrap_or(0);
            let id = last_id.checked_add(1).ok_or_else(|| {
                AppError::StorageMessage("Snippet id space exhausted".to_string())
            })?;

            let snippet = Snippet::new(id, title, content, created, expiry_days);
            let encoded = bincode::serialize(&snippet)?;
            snippets.insert(id, encoded.as_slice())?;
            by_created.insert(
                reverse_created_key(snippet.created, id),
                epoch_millis(snippet.expires),
            )?;
            id
        };
        write_txn.commit()?;

        tracing::debug!(id, expiry_days, "snippet stored");
        Ok(id)
    }

    fn get(&self, id: u64) -> Result<Snippet, AppError> {
        let now = self.clock.now();
        let read_txn = self.db.begin_read()?;
        let snippets = read_txn.open_table(SNIPPETS)?;
        let Some(row) = snippets.get(id)? else {
            return Err(AppError::NotFound);
        };
        let snippet = deserialize_snippet(row.value())?;
        if snippet.is_visible_at(now) {
            Ok(snippet)
        } else {
            Err(AppError::NotFound)
        }
    }

    fn latest(&self) -> Result<Vec<Snippet>, AppError> {
        self.list_visible(LATEST_SNIPPETS_LIMIT)
    }
}
