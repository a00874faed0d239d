//! Read-only access to the items/spells snapshot.
//!
//! Every component that touches stored data goes through [`SnapshotReader`],
//! handed in at construction as a [`SharedReader`]. There is no global handle.

mod rows;
mod sqlite;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{ItemEntry, ItemRecord, SpellId, SpellRecord};
use crate::search::TextQuery;

pub use sqlite::{SnapshotCounts, SqliteSnapshot};

pub trait SnapshotReader: Send + Sync {
    /// Direct primary key lookup.
    fn item(&self, entry: ItemEntry) -> Result<Option<ItemRecord>>;

    /// Ranked full-text match over item names, best match first.
    fn items_matching(&self, query: &TextQuery, limit: usize) -> Result<Vec<ItemRecord>>;

    /// All spells whose id is in `ids`, in no particular order. Unknown ids
    /// are skipped.
    fn spells_by_ids(&self, ids: &[SpellId]) -> Result<Vec<SpellRecord>>;

    fn spell(&self, id: SpellId) -> Result<Option<SpellRecord>> {
        Ok(self
            .spells_by_ids(&[id])?
            .into_iter()
            .find(|spell| spell.entry == id))
    }
}

pub type SharedReader = Arc<dyn SnapshotReader>;

/// Stand-in used when no snapshot could be opened. Every read fails with
/// [`Error::StoreUnavailable`], which callers turn into empty results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Unavailable {
    pub fn shared() -> SharedReader {
        Arc::new(Unavailable)
    }
}

impl SnapshotReader for Unavailable {
    fn item(&self, _entry: ItemEntry) -> Result<Option<ItemRecord>> {
        Err(Error::StoreUnavailable)
    }

    fn items_matching(&self, _query: &TextQuery, _limit: usize) -> Result<Vec<ItemRecord>> {
        Err(Error::StoreUnavailable)
    }

    fn spells_by_ids(&self, _ids: &[SpellId]) -> Result<Vec<SpellRecord>> {
        Err(Error::StoreUnavailable)
    }
}
