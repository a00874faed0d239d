//! Column decoding for item and spell rows.
//!
//! Snapshots in the wild differ in which columns they carry, so every column
//! is read by name and a missing column, a NULL or an unexpected type all
//! decode as `None`.

use rusqlite::types::ValueRef;
use rusqlite::Row;

use crate::model::{
    DamageSlot, ItemRecord, Resistances, SpellEffect, SpellId, SpellRecord, SpellRefSlot,
    StatSlot, DAMAGE_SLOTS, EFFECT_SLOTS, SPELL_SLOTS, STAT_SLOTS,
};

const STAT_TYPE: [&str; STAT_SLOTS] = [
    "stat_type1", "stat_type2", "stat_type3", "stat_type4", "stat_type5", "stat_type6",
    "stat_type7", "stat_type8", "stat_type9", "stat_type10",
];
const STAT_VALUE: [&str; STAT_SLOTS] = [
    "stat_value1", "stat_value2", "stat_value3", "stat_value4", "stat_value5", "stat_value6",
    "stat_value7", "stat_value8", "stat_value9", "stat_value10",
];

const DMG_MIN: [&str; DAMAGE_SLOTS] = ["dmg_min1", "dmg_min2", "dmg_min3", "dmg_min4", "dmg_min5"];
const DMG_MAX: [&str; DAMAGE_SLOTS] = ["dmg_max1", "dmg_max2", "dmg_max3", "dmg_max4", "dmg_max5"];
const DMG_TYPE: [&str; DAMAGE_SLOTS] =
    ["dmg_type1", "dmg_type2", "dmg_type3", "dmg_type4", "dmg_type5"];

struct SpellSlotColumns {
    id: &'static str,
    trigger: &'static str,
    charges: &'static str,
    ppm: &'static str,
    cooldown: &'static str,
    category: &'static str,
    category_cooldown: &'static str,
}

macro_rules! spell_slot_columns {
    ($n:literal) => {
        SpellSlotColumns {
            id: concat!("spellid_", $n),
            trigger: concat!("spelltrigger_", $n),
            charges: concat!("spellcharges_", $n),
            ppm: concat!("spellppmrate_", $n),
            cooldown: concat!("spellcooldown_", $n),
            category: concat!("spellcategory_", $n),
            category_cooldown: concat!("spellcategorycooldown_", $n),
        }
    };
}

const SPELL_SLOT: [SpellSlotColumns; SPELL_SLOTS] = [
    spell_slot_columns!(1),
    spell_slot_columns!(2),
    spell_slot_columns!(3),
    spell_slot_columns!(4),
    spell_slot_columns!(5),
];

struct EffectColumns {
    kind: &'static str,
    base_points: &'static str,
    die_sides: &'static str,
    base_dice: &'static str,
    aura: &'static str,
    chain_targets: &'static str,
    misc_value: &'static str,
    trigger_spell: &'static str,
}

macro_rules! effect_columns {
    ($n:literal) => {
        EffectColumns {
            kind: concat!("effect", $n),
            base_points: concat!("effectBasePoints", $n),
            die_sides: concat!("effectDieSides", $n),
            base_dice: concat!("effectBaseDice", $n),
            aura: concat!("effectApplyAuraName", $n),
            chain_targets: concat!("effectChainTarget", $n),
            misc_value: concat!("effectMiscValue", $n),
            trigger_spell: concat!("effectTriggerSpell", $n),
        }
    };
}

const EFFECT: [EffectColumns; EFFECT_SLOTS] = [effect_columns!(1), effect_columns!(2), effect_columns!(3)];

fn int(row: &Row<'_>, column: &str) -> Option<i64> {
    match row.get_ref(column) {
        Ok(ValueRef::Integer(v)) => Some(v),
        Ok(ValueRef::Real(v)) => Some(v as i64),
        _ => None,
    }
}

fn int32(row: &Row<'_>, column: &str) -> Option<i32> {
    int(row, column).and_then(|v| i32::try_from(v).ok())
}

fn real(row: &Row<'_>, column: &str) -> Option<f64> {
    match row.get_ref(column) {
        Ok(ValueRef::Real(v)) => Some(v),
        Ok(ValueRef::Integer(v)) => Some(v as f64),
        _ => None,
    }
}

fn text(row: &Row<'_>, column: &str) -> Option<String> {
    match row.get_ref(column) {
        Ok(ValueRef::Text(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Positive ids only; zero, negatives and NULL all mean "no spell".
fn spell_id(row: &Row<'_>, column: &str) -> Option<SpellId> {
    int(row, column)
        .filter(|v| *v > 0)
        .and_then(|v| SpellId::try_from(v).ok())
}

pub(crate) fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ItemRecord> {
    let entry: i64 = row.get("entry")?;

    let stats = std::array::from_fn(|i| StatSlot {
        stat_type: int32(row, STAT_TYPE[i]).unwrap_or(0),
        value: int32(row, STAT_VALUE[i]).unwrap_or(0),
    });
    let damage = std::array::from_fn(|i| DamageSlot {
        min: real(row, DMG_MIN[i]).unwrap_or(0.0),
        max: real(row, DMG_MAX[i]).unwrap_or(0.0),
        school: int32(row, DMG_TYPE[i]).unwrap_or(0),
    });
    let spell_refs = std::array::from_fn(|i| {
        let cols = &SPELL_SLOT[i];
        SpellRefSlot {
            spell_id: spell_id(row, cols.id).unwrap_or(0),
            trigger: int32(row, cols.trigger),
            charges: int32(row, cols.charges),
            procs_per_minute: real(row, cols.ppm),
            cooldown_ms: int32(row, cols.cooldown),
            category: int32(row, cols.category),
            category_cooldown_ms: int32(row, cols.category_cooldown),
        }
    });

    Ok(ItemRecord {
        entry,
        name: text(row, "name").unwrap_or_default(),
        description: text(row, "description").filter(|d| !d.is_empty()),
        quality: int32(row, "quality").unwrap_or(0),
        item_class: int32(row, "class"),
        subclass: int32(row, "subclass"),
        inventory_type: int32(row, "inventory_type"),
        item_level: int32(row, "item_level"),
        required_level: int32(row, "required_level"),
        allowable_class: int32(row, "allowable_class"),
        delay_ms: int32(row, "delay"),
        armor: int32(row, "armor"),
        block: int32(row, "block"),
        resistances: Resistances {
            holy: int32(row, "holy_res").unwrap_or(0),
            fire: int32(row, "fire_res").unwrap_or(0),
            nature: int32(row, "nature_res").unwrap_or(0),
            frost: int32(row, "frost_res").unwrap_or(0),
            shadow: int32(row, "shadow_res").unwrap_or(0),
            arcane: int32(row, "arcane_res").unwrap_or(0),
        },
        bonding: int32(row, "bonding"),
        set_id: int32(row, "set_id"),
        max_durability: int32(row, "max_durability"),
        buy_price: int(row, "buy_price"),
        sell_price: int(row, "sell_price"),
        stats,
        damage,
        spell_refs,
        spells: Vec::new(),
    })
}

pub(crate) fn spell_from_row(row: &Row<'_>) -> rusqlite::Result<SpellRecord> {
    let idx = row.as_ref().column_index("entry")?;
    let raw: i64 = row.get(idx)?;
    let entry =
        SpellId::try_from(raw).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, raw))?;

    let effects = std::array::from_fn(|i| {
        let cols = &EFFECT[i];
        SpellEffect {
            kind: int32(row, cols.kind),
            base_points: int32(row, cols.base_points),
            die_sides: int32(row, cols.die_sides),
            base_dice: real(row, cols.base_dice),
            aura: int32(row, cols.aura),
            chain_targets: int32(row, cols.chain_targets),
            misc_value: int32(row, cols.misc_value),
            trigger_spell: spell_id(row, cols.trigger_spell),
        }
    });

    Ok(SpellRecord {
        entry,
        name: text(row, "name1").or_else(|| text(row, "name")),
        description: text(row, "description1").or_else(|| text(row, "description")),
        school: int32(row, "school"),
        duration_index: int32(row, "durationIndex"),
        mana_cost: int32(row, "manaCost"),
        proc_chance: int32(row, "procChance"),
        proc_flags: int(row, "procFlags"),
        proc_charges: int32(row, "procCharges"),
        dmg_class: int32(row, "dmgClass"),
        recovery_time_ms: int32(row, "recoveryTime"),
        category_recovery_time_ms: int32(row, "categoryRecoveryTime"),
        effects,
    })
}
