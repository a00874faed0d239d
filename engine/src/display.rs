//! Labels derived from record fields: names for coded columns, stat and
//! damage lines, weapon speed and DPS, proc chance from PPM.

use std::collections::HashSet;

use crate::model::{ItemRecord, SpellRefSlot};

pub fn quality_name(quality: i32) -> &'static str {
    match quality {
        0 => "Poor",
        1 => "Common",
        2 => "Uncommon",
        3 => "Rare",
        4 => "Epic",
        5 => "Legendary",
        _ => "Unknown",
    }
}

pub fn inventory_type_name(inventory_type: i32) -> String {
    let name = match inventory_type {
        0 => "Non-equipable",
        1 => "Head",
        2 => "Neck",
        3 => "Shoulder",
        4 => "Shirt",
        5 => "Chest",
        6 => "Waist",
        7 => "Legs",
        8 => "Feet",
        9 => "Wrists",
        10 => "Hands",
        11 => "Finger",
        12 => "Trinket",
        13 => "One-Hand",
        14 => "Shield",
        15 => "Ranged",
        16 => "Back",
        17 => "Two-Hand",
        18 => "Bag",
        20 => "Robe",
        21 => "Main Hand",
        22 => "Off Hand",
        23 => "Held In Off-hand",
        24 => "Ammo",
        25 => "Thrown",
        26 => "Ranged (right)",
        28 => "Relic",
        other => return format!("Unknown ({})", other),
    };
    name.to_string()
}

pub fn bonding_name(bonding: i32) -> Option<&'static str> {
    match bonding {
        1 => Some("Binds when picked up"),
        2 => Some("Binds when equipped"),
        3 => Some("Binds when used"),
        4 => Some("Quest Item"),
        _ => None,
    }
}

pub fn stat_name(stat_type: i32) -> Option<&'static str> {
    let name = match stat_type {
        3 => "Agility",
        4 => "Strength",
        5 => "Intellect",
        6 => "Spirit",
        7 => "Stamina",
        12 => "Defense",
        13 => "Dodge",
        14 => "Parry",
        15 => "Block",
        16 => "Hit",
        17 => "Crit",
        18 => "Hit (Ranged)",
        19 => "Crit (Ranged)",
        20 => "Hit (Spell)",
        21 => "Crit (Spell)",
        31 => "Hit",
        32 => "Crit",
        35 => "Resilience",
        36 => "Haste",
        37 => "Expertise",
        38 => "Attack Power",
        39 => "Ranged Attack Power",
        43 => "Mana per 5",
        44 => "Armor Penetration",
        45 => "Spell Power",
        46 => "Health per 5",
        47 => "Spell Penetration",
        48 => "Block Value",
        _ => return None,
    };
    Some(name)
}

pub fn school_name(school: i32) -> &'static str {
    match school {
        0 => "",
        1 => "Holy",
        2 => "Fire",
        3 => "Nature",
        4 => "Frost",
        5 => "Shadow",
        6 => "Arcane",
        _ => "Magic",
    }
}

/// `+12 Stamina`, `-5 Spirit`, with regen stats spelled out. Unknown stat
/// types are skipped.
pub fn stat_lines(item: &ItemRecord) -> Vec<String> {
    item.used_stats()
        .filter_map(|slot| match (slot.stat_type, slot.value) {
            (43, v) if v > 0 => Some(format!("+{} Mana per 5 sec", v)),
            (46, v) if v > 0 => Some(format!("+{} Health per 5 sec", v)),
            (t, v) => stat_name(t).map(|name| format!("{:+} {}", v, name)),
        })
        .collect()
}

pub fn resistance_lines(item: &ItemRecord) -> Vec<String> {
    let r = &item.resistances;
    [
        (r.holy, "Holy"),
        (r.fire, "Fire"),
        (r.nature, "Nature"),
        (r.frost, "Frost"),
        (r.shadow, "Shadow"),
        (r.arcane, "Arcane"),
    ]
    .into_iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, school)| format!("+{} {} Resistance", value, school))
    .collect()
}

fn with_school(school: i32, rest: &str) -> String {
    match school_name(school) {
        "" => rest.to_string(),
        name => format!("{} {}", name, rest),
    }
}

/// First used damage slot as `37 - 69 Damage`, the rest as `+5-10 Fire Damage`.
pub fn damage_lines(item: &ItemRecord) -> Vec<String> {
    item.used_damage()
        .enumerate()
        .map(|(i, dmg)| {
            let kind = with_school(dmg.school, "Damage");
            match (i, dmg.min == dmg.max) {
                (0, true) => format!("{:.0} {}", dmg.min, kind),
                (0, false) => format!("{:.0} - {:.0} {}", dmg.min, dmg.max, kind),
                (_, true) => format!("+{:.0} {}", dmg.min, kind),
                (_, false) => format!("+{:.0}-{:.0} {}", dmg.min, dmg.max, kind),
            }
        })
        .collect()
}

pub fn weapon_speed(item: &ItemRecord) -> Option<String> {
    let delay = item.delay_ms.filter(|d| *d > 0)?;
    Some(format!("{:.2} sec", f64::from(delay) / 1000.0))
}

/// Average damage across every damage slot per second of weapon delay.
pub fn total_dps(item: &ItemRecord) -> Option<f64> {
    let delay = item.delay_ms.filter(|d| *d > 0)?;
    let (min, max) = item
        .used_damage()
        .fold((0.0, 0.0), |(lo, hi), d| (lo + d.min, hi + d.max));
    if min <= 0.0 && max <= 0.0 {
        return None;
    }
    Some((min + max) / 2.0 / (f64::from(delay) / 1000.0))
}

pub fn dps_label(item: &ItemRecord) -> Option<String> {
    total_dps(item).map(|dps| format!("{:.1} DPS", dps))
}

pub fn allowable_classes(mask: i32) -> Option<String> {
    if mask == -1 {
        return None;
    }
    const CLASSES: [(i32, &str); 9] = [
        (1, "Warrior"),
        (2, "Paladin"),
        (4, "Hunter"),
        (8, "Rogue"),
        (16, "Priest"),
        (64, "Shaman"),
        (128, "Mage"),
        (256, "Warlock"),
        (1024, "Druid"),
    ];
    let names: Vec<&str> = CLASSES
        .iter()
        .filter(|(bit, _)| mask & bit != 0)
        .map(|(_, name)| *name)
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellTrigger {
    Use,
    OnEquip,
    ChanceOnHit,
    Soulstone,
    UseNoDelay,
    OnLearn,
    Unknown(i32),
}

impl SpellTrigger {
    /// A missing trigger column means "use".
    pub fn from_slot(trigger: Option<i32>) -> Self {
        match trigger.unwrap_or(0) {
            0 => SpellTrigger::Use,
            1 => SpellTrigger::OnEquip,
            2 => SpellTrigger::ChanceOnHit,
            3 => SpellTrigger::Soulstone,
            4 => SpellTrigger::UseNoDelay,
            5 => SpellTrigger::OnLearn,
            other => SpellTrigger::Unknown(other),
        }
    }

    pub fn label(self) -> String {
        match self {
            SpellTrigger::Use => "Use".to_string(),
            SpellTrigger::OnEquip => "On Equip".to_string(),
            SpellTrigger::ChanceOnHit => "Chance on Hit".to_string(),
            SpellTrigger::Soulstone => "Soulstone".to_string(),
            SpellTrigger::UseNoDelay => "Use (No Delay)".to_string(),
            SpellTrigger::OnLearn => "On Learn".to_string(),
            SpellTrigger::Unknown(t) => format!("Unknown Trigger ({})", t),
        }
    }
}

/// Percent chance per hit for a chance-on-hit slot with a PPM rate:
/// `ppm * weapon_speed / 60 * 100`.
pub fn proc_chance_percent(slot: &SpellRefSlot, delay_ms: Option<i32>) -> Option<f64> {
    if SpellTrigger::from_slot(slot.trigger) != SpellTrigger::ChanceOnHit {
        return None;
    }
    let ppm = slot.procs_per_minute.filter(|p| *p > 0.0)?;
    let delay = delay_ms.filter(|d| *d > 0)?;
    let speed = f64::from(delay) / 1000.0;
    Some(ppm * speed / 60.0 * 100.0)
}

pub fn cooldown_label(cooldown_ms: i32) -> Option<String> {
    if cooldown_ms <= 0 {
        return None;
    }
    let seconds = cooldown_ms / 1000;
    Some(if seconds >= 60 {
        format!("{}m CD", seconds / 60)
    } else {
        format!("{}s CD", seconds)
    })
}

/// `Use (3 Charges) (2m CD)`.
pub fn slot_summary(slot: &SpellRefSlot) -> String {
    let mut out = SpellTrigger::from_slot(slot.trigger).label();
    if let Some(charges) = slot.charges.filter(|c| *c != 0) {
        out.push_str(&format!(" ({} Charges)", charges.abs()));
    }
    if let Some(cd) = slot.cooldown_ms.and_then(cooldown_label) {
        out.push_str(&format!(" ({})", cd));
    }
    out
}

/// Slots worth showing to a player, first occurrence of each spell only.
///
/// Use and equip effects always show. Chance-on-hit shows when the spell row
/// was found or the slot carries a PPM rate; every other trigger only when the
/// spell row was found. Anything else is usually an internal helper spell.
pub fn displayed_spell_refs(item: &ItemRecord) -> Vec<&SpellRefSlot> {
    let mut seen = HashSet::new();
    item.spell_refs
        .iter()
        .filter(|slot| slot.is_used() && seen.insert(slot.spell_id))
        .filter(|slot| {
            let known = item.attached_spell(slot.spell_id).is_some();
            match SpellTrigger::from_slot(slot.trigger) {
                SpellTrigger::Use | SpellTrigger::OnEquip => true,
                SpellTrigger::ChanceOnHit => {
                    known || slot.procs_per_minute.is_some_and(|p| p > 0.0)
                }
                _ => known,
            }
        })
        .collect()
}
