//! Shared test-only helpers for snippetbox_core.

use crate::clock::ManualClock;
use crate::Database;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

/// Fixed instant used as the starting point of manual clocks.
pub(crate) fn start_of_2024() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Creates an isolated temporary database driven by a manual clock.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db_with_clock() -> (Database, Arc<ManualClock>, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let clock = Arc::new(ManualClock::new(start_of_2024()));
    let db = Database::with_clock(db_path.to_str().expect("db path"), clock.clone())
        .expect("db");
    (db, clock, temp_dir)
}
