use armory_engine::config::TableNames;
use armory_engine::content::{open_sample, write_sample};
use armory_engine::snapshot::{SnapshotReader, SqliteSnapshot};
use armory_engine::{Error, TextQuery};
use rusqlite::Connection;

#[test]
fn sample_counts() {
    let snapshot = open_sample().unwrap();
    let counts = snapshot.counts().unwrap();
    assert_eq!(counts.items, 12);
    assert_eq!(counts.indexed_names, counts.items);
    assert_eq!(counts.spells, 9);
}

#[test]
fn opens_a_snapshot_file_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.sqlite");
    write_sample(&path).unwrap();

    let snapshot = SqliteSnapshot::open(&path, TableNames::default()).unwrap();
    let item = snapshot.item(19019).unwrap().expect("thunderfury");
    assert_eq!(item.name, "Thunderfury, Blessed Blade of the Windseeker");
    assert_eq!(item.quality, 5);
    assert_eq!(item.delay_ms, Some(1900));
    assert_eq!(item.spell_refs[0].spell_id, 21992);
    assert_eq!(item.spell_refs[0].trigger, Some(2));
    assert_eq!(item.spell_refs[0].procs_per_minute, Some(6.0));
    assert!(!item.spell_refs[1].is_used());
    assert_eq!(item.damage[1].school, 3);
    assert_eq!(item.resistances.nature, 9);
    assert!(item.spells.is_empty());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SqliteSnapshot::open(dir.path().join("absent.sqlite"), TableNames::default());
    assert!(matches!(err, Err(Error::Sqlite(_))));
}

#[test]
fn spell_rows_decode_effects() {
    let snapshot = open_sample().unwrap();
    let spell = snapshot.spell(21992).unwrap().expect("spell");
    assert_eq!(spell.name.as_deref(), Some("Thunderfury"));
    assert_eq!(spell.duration_index, Some(29));
    assert_eq!(spell.effects[0].base_points, Some(-26));
    assert_eq!(spell.effects[1].kind, Some(2));
    assert_eq!(spell.effects[1].base_dice, Some(1.0));
    assert_eq!(spell.effects[0].chain_targets, None);
    assert!(snapshot.spell(27648).unwrap().is_none());
}

#[test]
fn batch_lookup_skips_unknown_ids() {
    let snapshot = open_sample().unwrap();
    let mut ids: Vec<u32> = snapshot
        .spells_by_ids(&[434, 27648, 7597, 434])
        .unwrap()
        .into_iter()
        .map(|s| s.entry)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![434, 7597]);
    assert!(snapshot.spells_by_ids(&[]).unwrap().is_empty());
}

#[test]
fn large_batches_are_split() {
    let snapshot = open_sample().unwrap();
    let mut ids: Vec<u32> = (100_000..102_000).collect();
    ids.push(18211);
    let found = snapshot.spells_by_ids(&ids).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entry, 18211);
}

#[test]
fn sparse_schema_decodes_with_defaults() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE loot (entry INTEGER PRIMARY KEY, name TEXT, spellid_1 INTEGER);
         CREATE VIRTUAL TABLE loot_fts USING fts5(name);
         CREATE TABLE magic (entry INTEGER PRIMARY KEY, name TEXT, description TEXT);
         INSERT INTO loot VALUES (7, 'Plain Stick', -3);
         INSERT INTO loot_fts (rowid, name) VALUES (7, 'Plain Stick');
         INSERT INTO magic VALUES (5, 'Old Name', 'Old $s1 text');",
    )
    .unwrap();
    let tables = TableNames {
        items: "loot".into(),
        fts: "loot_fts".into(),
        spells: "magic".into(),
    };
    let snapshot = SqliteSnapshot::from_connection(conn, tables).unwrap();

    let hits = snapshot
        .items_matching(&TextQuery::from_text("plain st"), 10)
        .unwrap();
    assert_eq!(hits.len(), 1);
    let item = &hits[0];
    assert_eq!(item.quality, 0);
    assert_eq!(item.delay_ms, None);
    assert!(!item.has_spell_refs(), "negative spell id means unused");

    let spell = snapshot.spell(5).unwrap().unwrap();
    assert_eq!(spell.name.as_deref(), Some("Old Name"));
    assert_eq!(spell.description.as_deref(), Some("Old $s1 text"));
    assert_eq!(spell.effects[0].base_points, None);
}

#[test]
fn table_names_must_be_identifiers() {
    let conn = Connection::open_in_memory().unwrap();
    let tables = TableNames {
        items: "items; DROP TABLE spells".into(),
        ..TableNames::default()
    };
    let err = SqliteSnapshot::from_connection(conn, tables);
    assert!(matches!(err, Err(Error::Config(_))));
}
