use serde::Serialize;

/// Primary key of an item row.
pub type ItemEntry = i64;

/// Primary key of a spell row; item spell slots use the same id space.
pub type SpellId = u32;

pub const STAT_SLOTS: usize = 10;
pub const DAMAGE_SLOTS: usize = 5;
pub const SPELL_SLOTS: usize = 5;
pub const EFFECT_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatSlot {
    pub stat_type: i32,
    pub value: i32,
}

impl StatSlot {
    pub fn is_used(&self) -> bool {
        self.stat_type > 0 && self.value != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DamageSlot {
    pub min: f64,
    pub max: f64,
    pub school: i32,
}

impl DamageSlot {
    pub fn is_used(&self) -> bool {
        self.min > 0.0 || self.max > 0.0
    }
}

/// One of the five "spell effect" columns groups on an item.
///
/// `spell_id == 0` marks the slot unused. `trigger` stays optional because
/// 0 is a real value (on use).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpellRefSlot {
    pub spell_id: SpellId,
    pub trigger: Option<i32>,
    pub charges: Option<i32>,
    pub procs_per_minute: Option<f64>,
    pub cooldown_ms: Option<i32>,
    pub category: Option<i32>,
    pub category_cooldown_ms: Option<i32>,
}

impl SpellRefSlot {
    pub fn is_used(&self) -> bool {
        self.spell_id != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Resistances {
    pub holy: i32,
    pub fire: i32,
    pub nature: i32,
    pub frost: i32,
    pub shadow: i32,
    pub arcane: i32,
}

/// Immutable snapshot of a catalog entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ItemRecord {
    pub entry: ItemEntry,
    pub name: String,
    pub description: Option<String>,
    pub quality: i32,
    pub item_class: Option<i32>,
    pub subclass: Option<i32>,
    pub inventory_type: Option<i32>,
    pub item_level: Option<i32>,
    pub required_level: Option<i32>,
    pub allowable_class: Option<i32>,
    pub delay_ms: Option<i32>,
    pub armor: Option<i32>,
    pub block: Option<i32>,
    pub resistances: Resistances,
    pub bonding: Option<i32>,
    pub set_id: Option<i32>,
    pub max_durability: Option<i32>,
    pub buy_price: Option<i64>,
    pub sell_price: Option<i64>,
    pub stats: [StatSlot; STAT_SLOTS],
    pub damage: [DamageSlot; DAMAGE_SLOTS],
    pub spell_refs: [SpellRefSlot; SPELL_SLOTS],
    /// Spell rows attached by enrichment, in slot order.
    pub spells: Vec<SpellRecord>,
}

impl ItemRecord {
    /// Non-zero spell ids in slot order. May repeat if two slots share a spell.
    pub fn spell_ids(&self) -> impl Iterator<Item = SpellId> + '_ {
        self.spell_refs
            .iter()
            .filter(|slot| slot.is_used())
            .map(|slot| slot.spell_id)
    }

    pub fn has_spell_refs(&self) -> bool {
        self.spell_refs.iter().any(SpellRefSlot::is_used)
    }

    pub fn used_stats(&self) -> impl Iterator<Item = &StatSlot> {
        self.stats.iter().filter(|s| s.is_used())
    }

    pub fn used_damage(&self) -> impl Iterator<Item = &DamageSlot> {
        self.damage.iter().filter(|d| d.is_used())
    }

    pub fn attached_spell(&self, id: SpellId) -> Option<&SpellRecord> {
        self.spells.iter().find(|s| s.entry == id)
    }
}

/// One of the three effect column groups on a spell row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpellEffect {
    pub kind: Option<i32>,
    /// Stored as display value minus one.
    pub base_points: Option<i32>,
    pub die_sides: Option<i32>,
    pub base_dice: Option<f64>,
    pub aura: Option<i32>,
    pub chain_targets: Option<i32>,
    pub misc_value: Option<i32>,
    pub trigger_spell: Option<SpellId>,
}

impl SpellEffect {
    /// The value a tooltip shows: stored base points plus one.
    pub fn display_value(&self) -> Option<i64> {
        self.base_points.map(display_points)
    }
}

/// Converts stored base points into the value shown to players.
pub fn display_points(base_points: i32) -> i64 {
    i64::from(base_points) + 1
}

/// Immutable snapshot of a spell row.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpellRecord {
    pub entry: SpellId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub school: Option<i32>,
    pub duration_index: Option<i32>,
    pub mana_cost: Option<i32>,
    pub proc_chance: Option<i32>,
    pub proc_flags: Option<i64>,
    pub proc_charges: Option<i32>,
    pub dmg_class: Option<i32>,
    pub recovery_time_ms: Option<i32>,
    pub category_recovery_time_ms: Option<i32>,
    pub effects: [SpellEffect; EFFECT_SLOTS],
}

impl SpellRecord {
    /// Effect slot by its 1-based number as used in `$s1`..`$s3`.
    pub fn effect(&self, number: usize) -> Option<&SpellEffect> {
        number.checked_sub(1).and_then(|idx| self.effects.get(idx))
    }
}
