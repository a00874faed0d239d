#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use armory_engine::content::open_sample;
use armory_engine::model::{ItemEntry, ItemRecord, SpellEffect, SpellId, SpellRecord};
use armory_engine::snapshot::{SharedReader, SnapshotReader};
use armory_engine::{Result, TextQuery};

pub fn sample_reader() -> SharedReader {
    Arc::new(open_sample().expect("sample snapshot loads"))
}

/// Wraps a reader and counts calls per method.
pub struct CountingReader {
    inner: SharedReader,
    pub item_calls: AtomicUsize,
    pub text_calls: AtomicUsize,
    pub spell_batch_calls: AtomicUsize,
}

impl CountingReader {
    pub fn new(inner: SharedReader) -> Arc<Self> {
        Arc::new(Self {
            inner,
            item_calls: AtomicUsize::new(0),
            text_calls: AtomicUsize::new(0),
            spell_batch_calls: AtomicUsize::new(0),
        })
    }

    pub fn items(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn spell_batches(&self) -> usize {
        self.spell_batch_calls.load(Ordering::SeqCst)
    }
}

impl SnapshotReader for CountingReader {
    fn item(&self, entry: ItemEntry) -> Result<Option<ItemRecord>> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.item(entry)
    }

    fn items_matching(&self, query: &TextQuery, limit: usize) -> Result<Vec<ItemRecord>> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.items_matching(query, limit)
    }

    fn spells_by_ids(&self, ids: &[SpellId]) -> Result<Vec<SpellRecord>> {
        self.spell_batch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.spells_by_ids(ids)
    }
}

pub fn spell(entry: SpellId, description: &str) -> SpellRecord {
    SpellRecord {
        entry,
        description: Some(description.to_string()),
        ..SpellRecord::default()
    }
}

pub fn effect(base_points: i32) -> SpellEffect {
    SpellEffect {
        base_points: Some(base_points),
        ..SpellEffect::default()
    }
}

pub fn item_with_spells(entry: ItemEntry, ids: &[SpellId]) -> ItemRecord {
    let mut item = ItemRecord {
        entry,
        name: format!("item {}", entry),
        ..ItemRecord::default()
    };
    for (slot, id) in item.spell_refs.iter_mut().zip(ids) {
        slot.spell_id = *id;
    }
    item
}
