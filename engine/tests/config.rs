use std::time::Duration;

use armory_engine::config::{ArmoryConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_SEARCH_LIMIT};
use armory_engine::Error;

#[test]
fn empty_document_uses_defaults() {
    let config = ArmoryConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, ArmoryConfig::default());
    assert_eq!(config.search.limit, DEFAULT_SEARCH_LIMIT);
    assert_eq!(config.search.debounce(), Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    assert_eq!(config.database.path, None);
    assert_eq!(config.database.tables.items, "items");
    assert_eq!(config.database.tables.fts, "items_fts");
    assert_eq!(config.database.tables.spells, "spells");
}

#[test]
fn partial_document_overrides_named_keys() {
    let yaml = "
database:
  path: /data/snapshot.sqlite
  spells_table: spell_template
search:
  debounce_ms: 40
";
    let config = ArmoryConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(
        config.database.path.as_deref(),
        Some(std::path::Path::new("/data/snapshot.sqlite"))
    );
    assert_eq!(config.database.tables.spells, "spell_template");
    assert_eq!(config.database.tables.items, "items");
    assert_eq!(config.search.debounce_ms, 40);
    assert_eq!(config.search.limit, DEFAULT_SEARCH_LIMIT);
}

#[test]
fn rejects_zero_limit() {
    let err = ArmoryConfig::from_yaml_str("search: { limit: 0 }").unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err}");
}

#[test]
fn rejects_non_identifier_table() {
    let err = ArmoryConfig::from_yaml_str("database: { fts_table: \"items fts\" }").unwrap_err();
    assert!(err.to_string().contains("fts_table"), "{err}");
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = ArmoryConfig::from_yaml_str("search: [1, 2").unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("armory.yaml");
    std::fs::write(&path, "search:\n  limit: 7\n").unwrap();
    let config = ArmoryConfig::load(&path).unwrap();
    assert_eq!(config.search.limit, 7);

    let missing = ArmoryConfig::load(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(missing, Error::Io(_)));
}
