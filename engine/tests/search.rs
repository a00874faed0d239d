mod common;

use armory_engine::search::{Query, SearchEngine, TextQuery};
use armory_engine::snapshot::{SharedReader, Unavailable};
use common::{sample_reader, CountingReader};

#[test]
fn numeric_query_is_a_primary_key_lookup() {
    let counter = CountingReader::new(sample_reader());
    let engine = SearchEngine::new(counter.clone() as SharedReader);
    let items = engine.search("871", 50);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].entry, 871);
    assert_eq!(items[0].name, "Flurry Axe");
    assert_eq!(counter.items(), 1);
    assert_eq!(counter.texts(), 0);
}

#[test]
fn text_query_ranks_exact_name_first() {
    let engine = SearchEngine::new(sample_reader());
    let items = engine.search("flurry axe", 50);
    let entries: Vec<i64> = items.iter().map(|i| i.entry).collect();
    assert_eq!(entries, vec![871, 2024]);
}

#[test]
fn tokens_match_as_prefixes() {
    let engine = SearchEngine::new(sample_reader());
    let items = engine.search("  devil  gaunt ", 50);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].entry, 15063);

    let items = engine.search("devil", 50);
    assert_eq!(items.len(), 2);
}

#[test]
fn punctuation_in_query_does_not_break_match() {
    let engine = SearchEngine::new(sample_reader());
    assert!(engine.try_search("thunderfury,", 50).is_ok());
    assert!(engine.try_search("\"eye\" of-rend", 50).is_ok());
}

#[test]
fn limit_caps_text_results() {
    let engine = SearchEngine::new(sample_reader());
    assert_eq!(engine.search("flurry", 1).len(), 1);
    assert!(engine.search("flurry", 0).is_empty());
}

#[test]
fn blank_query_never_reads() {
    let counter = CountingReader::new(sample_reader());
    let engine = SearchEngine::new(counter.clone() as SharedReader);
    assert!(engine.search("", 50).is_empty());
    assert!(engine.search("   \t", 50).is_empty());
    assert_eq!(counter.items() + counter.texts(), 0);
}

#[test]
fn missing_entry_and_unmatched_text_are_empty() {
    let engine = SearchEngine::new(sample_reader());
    assert!(engine.search("999999", 50).is_empty());
    assert!(engine.search("zzzyx", 50).is_empty());
}

#[test]
fn unavailable_store_degrades_to_empty() {
    let engine = SearchEngine::new(Unavailable::shared());
    assert!(engine.search("871", 50).is_empty());
    assert!(engine.search("flurry", 50).is_empty());
    assert!(engine.try_search("flurry", 50).is_err());
}

#[test]
fn query_classification() {
    assert_eq!(Query::parse("  "), Query::Empty);
    assert_eq!(Query::parse(" 19019 "), Query::Entry(19019));
    assert_eq!(
        Query::parse("19019 axe"),
        Query::Text(TextQuery::from_text("19019 axe"))
    );
}

#[test]
fn match_expression_quotes_each_token() {
    let query = TextQuery::from_text("flurry  axe");
    assert_eq!(query.tokens(), ["flurry", "axe"]);
    assert_eq!(query.match_expression(), r#""flurry"* "axe"*"#);
    assert_eq!(
        TextQuery::from_text(r#"say"what"#).match_expression(),
        r#""say""what"*"#
    );
}
