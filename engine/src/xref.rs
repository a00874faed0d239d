//! Answers placeholders that point at a different spell (`$6788d`,
//! `$17809s1`).

use tracing::debug;

use crate::duration;
use crate::model::{SpellId, SpellRecord};
use crate::snapshot::{SharedReader, Unavailable};

/// Durations of spells that descriptions reference but snapshots often lack.
const DURATION_FALLBACKS: &[(SpellId, &str)] = &[
    (6788, "15 sec"),
    // well fed buffs granted by food
    (19705, "15 min"),
    (19706, "15 min"),
    (19708, "15 min"),
    (19709, "15 min"),
    (19710, "15 min"),
    (19711, "15 min"),
];

/// (spell, effect number, display value)
const EFFECT_FALLBACKS: &[(SpellId, usize, &str)] = &[
    // Thunderfury attack speed slow
    (27648, 1, "20"),
];

#[derive(Clone)]
pub struct CrossReferenceResolver {
    reader: SharedReader,
}

impl CrossReferenceResolver {
    pub fn new(reader: SharedReader) -> Self {
        Self { reader }
    }

    /// A resolver with no live store; only the static tables answer.
    pub fn offline() -> Self {
        Self::new(Unavailable::shared())
    }

    /// Text for `$<id>d`.
    pub fn duration_of_spell(&self, id: SpellId) -> String {
        self.live_duration(id)
            .or_else(|| static_duration(id).map(str::to_string))
            .unwrap_or_else(|| format!("[{}d]", id))
    }

    /// Text for `$<id>s<n>`.
    pub fn effect_value_of_spell(&self, id: SpellId, effect: usize) -> String {
        self.live_effect_value(id, effect)
            .or_else(|| static_effect_value(id, effect).map(str::to_string))
            .unwrap_or_else(|| format!("[{}s{}]", id, effect))
    }

    fn lookup(&self, id: SpellId) -> Option<SpellRecord> {
        match self.reader.spell(id) {
            Ok(spell) => spell,
            Err(err) => {
                debug!(spell = id, error = %err, "cross-reference lookup unavailable");
                None
            }
        }
    }

    fn live_duration(&self, id: SpellId) -> Option<String> {
        let index = self.lookup(id)?.duration_index?;
        duration::duration_for(index)
    }

    fn live_effect_value(&self, id: SpellId, effect: usize) -> Option<String> {
        let spell = self.lookup(id)?;
        let value = spell.effect(effect)?.display_value()?;
        Some(value.to_string())
    }
}

pub fn static_duration(id: SpellId) -> Option<&'static str> {
    DURATION_FALLBACKS
        .iter()
        .find(|(spell, _)| *spell == id)
        .map(|(_, text)| *text)
}

pub fn static_effect_value(id: SpellId, effect: usize) -> Option<&'static str> {
    EFFECT_FALLBACKS
        .iter()
        .find(|(spell, n, _)| *spell == id && *n == effect)
        .map(|(_, _, text)| *text)
}
