mod common;

use armory_engine::xref::{static_duration, static_effect_value, CrossReferenceResolver};
use common::sample_reader;

#[test]
fn live_lookup_reads_target_spell() {
    let xref = CrossReferenceResolver::new(sample_reader());
    assert_eq!(xref.duration_of_spell(16929), "10 sec");
    assert_eq!(xref.effect_value_of_spell(16929, 1), "350");
    assert_eq!(xref.duration_of_spell(434), "18 sec");
}

#[test]
fn static_fallbacks_when_target_is_missing() {
    let xref = CrossReferenceResolver::new(sample_reader());
    assert_eq!(xref.duration_of_spell(6788), "15 sec");
    assert_eq!(xref.duration_of_spell(19705), "15 min");
    assert_eq!(xref.duration_of_spell(19711), "15 min");
    assert_eq!(xref.effect_value_of_spell(27648, 1), "20");
}

#[test]
fn unresolvable_references_render_bracketed() {
    let xref = CrossReferenceResolver::new(sample_reader());
    assert_eq!(xref.duration_of_spell(424242), "[424242d]");
    assert_eq!(xref.effect_value_of_spell(27648, 2), "[27648s2]");
    // present but without a duration index
    assert_eq!(xref.duration_of_spell(18211), "[18211d]");
    // effect slot with no base points
    assert_eq!(xref.effect_value_of_spell(18211, 3), "[18211s3]");
}

#[test]
fn offline_resolver_uses_static_tables_only() {
    let xref = CrossReferenceResolver::offline();
    assert_eq!(xref.duration_of_spell(16929), "[16929d]");
    assert_eq!(xref.duration_of_spell(6788), "15 sec");
    assert_eq!(xref.effect_value_of_spell(27648, 1), "20");
}

#[test]
fn static_tables() {
    assert_eq!(static_duration(19707), None);
    assert_eq!(static_duration(19708), Some("15 min"));
    assert_eq!(static_effect_value(27648, 1), Some("20"));
    assert_eq!(static_effect_value(27648, 0), None);
}
