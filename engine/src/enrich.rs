use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::model::{ItemRecord, SpellId, SpellRecord};
use crate::snapshot::SharedReader;

/// Attaches referenced spell rows to a batch of items with a single read.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    reader: SharedReader,
}

impl EnrichmentPipeline {
    pub fn new(reader: SharedReader) -> Self {
        Self { reader }
    }

    /// Returns the items in their original order, each carrying the spells
    /// named by its own slots. Items without matches get an empty list.
    pub fn enrich(&self, mut items: Vec<ItemRecord>) -> Vec<ItemRecord> {
        let ids = collect_spell_ids(&items);
        if ids.is_empty() {
            return items;
        }

        let ids: Vec<SpellId> = ids.into_iter().collect();
        let by_id: HashMap<SpellId, SpellRecord> = match self.reader.spells_by_ids(&ids) {
            Ok(spells) => spells.into_iter().map(|s| (s.entry, s)).collect(),
            Err(err) => {
                warn!(ids = ids.len(), error = %err, "spell lookup failed; items left without spells");
                HashMap::new()
            }
        };
        debug!(requested = ids.len(), found = by_id.len(), "enriched item batch");

        for item in &mut items {
            item.spells = attachments_for(item, &by_id);
        }
        items
    }
}

/// Distinct non-zero spell ids across the batch, in first-seen order.
pub fn collect_spell_ids(items: &[ItemRecord]) -> IndexSet<SpellId> {
    items.iter().flat_map(|item| item.spell_ids()).collect()
}

fn attachments_for(item: &ItemRecord, by_id: &HashMap<SpellId, SpellRecord>) -> Vec<SpellRecord> {
    let own: IndexSet<SpellId> = item.spell_ids().collect();
    own.into_iter()
        .filter_map(|id| by_id.get(&id).cloned())
        .collect()
}
