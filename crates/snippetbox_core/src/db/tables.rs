//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Canonical snippet rows (`Snippet`, bincode-encoded) keyed by id.
pub const SNIPPETS: TableDefinition<u64, &[u8]> = TableDefinition::new("snippets");

/// Recency index keyed by (reverse created-millis, reverse id); the value is
/// the expiry in epoch millis so expired rows can be skipped from the key alone.
pub const SNIPPETS_BY_CREATED: TableDefinition<(u64, u64), u64> =
    TableDefinition::new("snippets_by_created");
