use rusqlite::Connection;
use tracing::debug;

use crate::config::TableNames;
use crate::error::Result;
use crate::snapshot::SqliteSnapshot;

/// Schema and rows of the built-in sample snapshot.
pub const SAMPLE_SNAPSHOT_SQL: &str = include_str!("../content/sample_snapshot.sql");

/// Loads the sample into a private in-memory database and wraps it read-only.
pub fn open_sample() -> Result<SqliteSnapshot> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SAMPLE_SNAPSHOT_SQL)?;
    let snapshot = SqliteSnapshot::from_connection(conn, TableNames::default())?;
    let counts = snapshot.counts()?;
    debug!(items = counts.items, spells = counts.spells, "loaded sample snapshot");
    Ok(snapshot)
}

/// Writes the sample to `path` as a regular snapshot file.
pub fn write_sample(path: impl AsRef<std::path::Path>) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SAMPLE_SNAPSHOT_SQL)?;
    Ok(())
}
