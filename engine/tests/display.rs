mod common;

use armory_engine::display::{
    allowable_classes, cooldown_label, damage_lines, displayed_spell_refs, dps_label,
    inventory_type_name, proc_chance_percent, quality_name, resistance_lines, slot_summary,
    stat_lines, weapon_speed, SpellTrigger,
};
use armory_engine::enrich::EnrichmentPipeline;
use armory_engine::model::{ItemRecord, SpellRefSlot};
use armory_engine::snapshot::SnapshotReader;
use common::sample_reader;

fn sample_item(entry: i64) -> ItemRecord {
    let reader = sample_reader();
    let item = reader.item(entry).unwrap().expect("item in sample");
    EnrichmentPipeline::new(reader).enrich(vec![item]).remove(0)
}

#[test]
fn thunderfury_lines() {
    let item = sample_item(19019);
    assert_eq!(quality_name(item.quality), "Legendary");
    assert_eq!(inventory_type_name(item.inventory_type.unwrap_or(0)), "One-Hand");
    assert_eq!(
        damage_lines(&item),
        vec!["44 - 115 Damage", "+16-30 Nature Damage"]
    );
    assert_eq!(weapon_speed(&item).as_deref(), Some("1.90 sec"));
    // (44 + 16 + 115 + 30) / 2 / 1.9
    assert_eq!(dps_label(&item).as_deref(), Some("53.9 DPS"));
    assert_eq!(stat_lines(&item), vec!["+5 Agility", "+8 Stamina"]);
    assert_eq!(
        resistance_lines(&item),
        vec!["+8 Fire Resistance", "+9 Nature Resistance"]
    );
}

#[test]
fn proc_chance_from_ppm_and_speed() {
    let item = sample_item(19019);
    let chance = proc_chance_percent(&item.spell_refs[0], item.delay_ms).unwrap();
    // 6 ppm on a 1.9 sec weapon
    assert!((chance - 19.0).abs() < 1e-9);

    let on_use = SpellRefSlot {
        spell_id: 1,
        trigger: Some(0),
        procs_per_minute: Some(6.0),
        ..SpellRefSlot::default()
    };
    assert_eq!(proc_chance_percent(&on_use, item.delay_ms), None);
}

#[test]
fn regen_stats_are_spelled_out() {
    let item = sample_item(19147);
    assert_eq!(stat_lines(&item), vec!["+9 Intellect", "+4 Mana per 5 sec"]);
}

#[test]
fn displayed_refs_skip_duplicates_and_unknown_helpers() {
    let item = sample_item(19147);
    let shown: Vec<u32> = displayed_spell_refs(&item).iter().map(|s| s.spell_id).collect();
    assert_eq!(shown, vec![9298]);

    let mut item = ItemRecord::default();
    item.spell_refs[0] = SpellRefSlot {
        spell_id: 10,
        trigger: Some(2),
        ..SpellRefSlot::default()
    };
    item.spell_refs[1] = SpellRefSlot {
        spell_id: 11,
        trigger: Some(2),
        procs_per_minute: Some(1.5),
        ..SpellRefSlot::default()
    };
    item.spell_refs[2] = SpellRefSlot {
        spell_id: 12,
        trigger: Some(5),
        ..SpellRefSlot::default()
    };
    item.spell_refs[3] = SpellRefSlot {
        spell_id: 13,
        trigger: None,
        ..SpellRefSlot::default()
    };
    let shown: Vec<u32> = displayed_spell_refs(&item).iter().map(|s| s.spell_id).collect();
    assert_eq!(shown, vec![11, 13]);
}

#[test]
fn slot_summaries() {
    let item = sample_item(11810);
    assert_eq!(slot_summary(&item.spell_refs[0]), "Use (2m CD)");
    let food = sample_item(2287);
    assert_eq!(slot_summary(&food.spell_refs[0]), "Use (1 Charges)");
    assert_eq!(cooldown_label(45_000).as_deref(), Some("45s CD"));
    assert_eq!(cooldown_label(0), None);
}

#[test]
fn labels_for_codes() {
    assert_eq!(SpellTrigger::from_slot(Some(4)).label(), "Use (No Delay)");
    assert_eq!(SpellTrigger::from_slot(Some(9)).label(), "Unknown Trigger (9)");
    assert_eq!(inventory_type_name(99), "Unknown (99)");
    assert_eq!(allowable_classes(-1), None);
    assert_eq!(allowable_classes(1 | 128).as_deref(), Some("Warrior, Mage"));
}
