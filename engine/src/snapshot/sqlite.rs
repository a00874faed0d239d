use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use super::rows::{item_from_row, spell_from_row};
use super::SnapshotReader;
use crate::config::TableNames;
use crate::error::{Error, Result};
use crate::model::{ItemEntry, ItemRecord, SpellId, SpellRecord};
use crate::search::TextQuery;

/// Stays under SQLite's bound-parameter limit on older builds.
const MAX_IDS_PER_STATEMENT: usize = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotCounts {
    pub items: i64,
    pub indexed_names: i64,
    pub spells: i64,
}

/// SQLite-backed snapshot.
///
/// One connection, opened read-only, guarded by a mutex: every read runs on
/// it one statement at a time.
pub struct SqliteSnapshot {
    conn: Mutex<Connection>,
    tables: TableNames,
}

impl SqliteSnapshot {
    /// Open an existing snapshot file read-only.
    pub fn open(path: impl AsRef<Path>, tables: TableNames) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        let snapshot = Self::from_connection(conn, tables)?;
        let counts = snapshot.counts()?;
        info!(
            path = %path.display(),
            items = counts.items,
            indexed = counts.indexed_names,
            spells = counts.spells,
            "opened snapshot"
        );
        Ok(snapshot)
    }

    /// Wrap a connection that already holds the snapshot tables. The
    /// connection is switched to `query_only` before it is stored.
    pub fn from_connection(conn: Connection, tables: TableNames) -> Result<Self> {
        tables.validate()?;
        conn.pragma_update(None, "query_only", true)?;
        Ok(Self {
            conn: Mutex::new(conn),
            tables,
        })
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    pub fn counts(&self) -> Result<SnapshotCounts> {
        let conn = self.lock()?;
        let count = |table: &str| -> Result<i64> {
            let sql = format!("SELECT COUNT(*) FROM {}", table);
            Ok(conn.query_row(&sql, [], |row| row.get(0))?)
        };
        Ok(SnapshotCounts {
            items: count(&self.tables.items)?,
            indexed_names: count(&self.tables.fts)?,
            spells: count(&self.tables.spells)?,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::StorePoisoned)
    }
}

impl SnapshotReader for SqliteSnapshot {
    fn item(&self, entry: ItemEntry) -> Result<Option<ItemRecord>> {
        let sql = format!("SELECT * FROM {} WHERE entry = ?1 LIMIT 1", self.tables.items);
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let item = stmt.query_row(params![entry], item_from_row).optional()?;
        Ok(item)
    }

    fn items_matching(&self, query: &TextQuery, limit: usize) -> Result<Vec<ItemRecord>> {
        let expression = query.match_expression();
        debug!(%expression, limit, "full-text item query");
        let sql = format!(
            "SELECT i.* FROM {items} i \
             JOIN {fts} f ON i.entry = f.rowid \
             WHERE {fts} MATCH ?1 \
             ORDER BY rank \
             LIMIT ?2",
            items = self.tables.items,
            fts = self.tables.fts,
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(params![expression, limit], item_from_row)?;
        let items = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn spells_by_ids(&self, ids: &[SpellId]) -> Result<Vec<SpellRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.lock()?;
        let mut spells = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_STATEMENT) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT * FROM {} WHERE entry IN ({})",
                self.tables.spells, placeholders
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), spell_from_row)?;
            for spell in rows {
                spells.push(spell?);
            }
        }
        Ok(spells)
    }

    fn spell(&self, id: SpellId) -> Result<Option<SpellRecord>> {
        let sql = format!("SELECT * FROM {} WHERE entry = ?1 LIMIT 1", self.tables.spells);
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let spell = stmt.query_row(params![id], spell_from_row).optional()?;
        Ok(spell)
    }
}
