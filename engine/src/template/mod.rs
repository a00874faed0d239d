//! Spell description templating.
//!
//! A description is rewritten by a fixed sequence of [`Pass`]es. Each pass
//! reads the previous pass's output and returns a new string, so a pass only
//! ever sees text that earlier passes have already settled. The order is
//! load-bearing: same-spell values go first, cross-spell references next, and
//! the catch-all last so it never claims a token a specific pass understands.

mod token;

use std::sync::OnceLock;

use regex::{Captures, NoExpand, Regex};
use tracing::trace;

use crate::duration;
use crate::model::{SpellId, SpellRecord};
use crate::snapshot::SharedReader;
use crate::xref::CrossReferenceResolver;

pub use token::{scan, PlaceholderToken};

pub const NO_DESCRIPTION: &str = "No description available";

/// Substituted when a token has no usable value.
pub const UNKNOWN_VALUE: &str = "X";

/// `$x` overrides for spells whose target count is not stored on any effect.
const TARGET_COUNT_OVERRIDES: &[(SpellId, &str)] = &[
    // Thunderfury chain lightning
    (21992, "4"),
];

static EFFECT_VALUE: OnceLock<Regex> = OnceLock::new();
static OVER_TIME_VALUE: OnceLock<Regex> = OnceLock::new();
static OWN_DURATION: OnceLock<Regex> = OnceLock::new();
static TARGET_COUNT: OnceLock<Regex> = OnceLock::new();
static MISC_VALUE: OnceLock<Regex> = OnceLock::new();
static CROSS_DURATION: OnceLock<Regex> = OnceLock::new();
static CROSS_EFFECT: OnceLock<Regex> = OnceLock::new();
static PLURAL: OnceLock<Regex> = OnceLock::new();
static CATCH_ALL: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid regex"))
}

// Value tokens swallow any run of `$` in front of them. Otherwise `$$s1d`
// would leave `$` glued to the substituted digits and a later pass would read
// `$6788d` as a cross-spell reference.
fn effect_value_re() -> &'static Regex {
    compiled(&EFFECT_VALUE, r"\$+s([1-3])")
}

fn over_time_value_re() -> &'static Regex {
    compiled(&OVER_TIME_VALUE, r"\$+o([1-3])")
}

fn own_duration_re() -> &'static Regex {
    compiled(&OWN_DURATION, r"\$+d")
}

fn target_count_re() -> &'static Regex {
    compiled(&TARGET_COUNT, r"\$+x([1-3])")
}

fn misc_value_re() -> &'static Regex {
    compiled(&MISC_VALUE, r"\$+m([1-3])")
}

fn cross_duration_re() -> &'static Regex {
    compiled(&CROSS_DURATION, r"\$+(\d+)d")
}

fn cross_effect_re() -> &'static Regex {
    compiled(&CROSS_EFFECT, r"\$+(\d+)s(\d+)")
}

fn plural_re() -> &'static Regex {
    compiled(&PLURAL, r"\$l([^:]+):([^;]+);")
}

fn catch_all_re() -> &'static Regex {
    compiled(&CATCH_ALL, r"\$[A-Za-z0-9]+")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    EffectValues,
    OverTimeValues,
    OwnDuration,
    CrossSpellDuration,
    CrossSpellEffect,
    TargetCounts,
    MiscValues,
    Plurals,
    CatchAll,
}

/// Passes in the order they run.
pub const PASSES: [Pass; 9] = [
    Pass::EffectValues,
    Pass::OverTimeValues,
    Pass::OwnDuration,
    Pass::CrossSpellDuration,
    Pass::CrossSpellEffect,
    Pass::TargetCounts,
    Pass::MiscValues,
    Pass::Plurals,
    Pass::CatchAll,
];

impl Pass {
    pub fn name(self) -> &'static str {
        match self {
            Pass::EffectValues => "effect-values",
            Pass::OverTimeValues => "over-time-values",
            Pass::OwnDuration => "own-duration",
            Pass::CrossSpellDuration => "cross-spell-duration",
            Pass::CrossSpellEffect => "cross-spell-effect",
            Pass::TargetCounts => "target-counts",
            Pass::MiscValues => "misc-values",
            Pass::Plurals => "plurals",
            Pass::CatchAll => "catch-all",
        }
    }

    pub fn apply(self, spell: &SpellRecord, xref: &CrossReferenceResolver, text: &str) -> String {
        match self {
            Pass::EffectValues => effect_values(spell, effect_value_re(), text),
            Pass::OverTimeValues => effect_values(spell, over_time_value_re(), text),
            Pass::OwnDuration => own_duration(spell, text),
            Pass::CrossSpellDuration => cross_spell_duration(xref, text),
            Pass::CrossSpellEffect => cross_spell_effect(xref, text),
            Pass::TargetCounts => target_counts(spell, text),
            Pass::MiscValues => misc_values(spell, text),
            Pass::Plurals => plural_re().replace_all(text, "${2}").into_owned(),
            Pass::CatchAll => catch_all(text),
        }
    }
}

/// Turns a spell's raw description into display text.
#[derive(Clone)]
pub struct TemplateResolver {
    xref: CrossReferenceResolver,
}

impl TemplateResolver {
    pub fn new(reader: SharedReader) -> Self {
        Self::with_cross_references(CrossReferenceResolver::new(reader))
    }

    pub fn with_cross_references(xref: CrossReferenceResolver) -> Self {
        Self { xref }
    }

    /// Resolver that cannot read other spells; cross references use the
    /// static fallbacks only.
    pub fn offline() -> Self {
        Self::with_cross_references(CrossReferenceResolver::offline())
    }

    pub fn resolve(&self, spell: &SpellRecord) -> String {
        self.resolve_text(spell.description.as_deref(), spell)
    }

    /// Resolve `description` using `spell`'s effect fields.
    pub fn resolve_text(&self, description: Option<&str>, spell: &SpellRecord) -> String {
        match description {
            None | Some("") => NO_DESCRIPTION.to_string(),
            Some(raw) => PASSES.iter().fold(raw.to_string(), |text, pass| {
                let next = pass.apply(spell, &self.xref, &text);
                if next != text {
                    trace!(spell = spell.entry, pass = pass.name(), "rewrote description");
                }
                next
            }),
        }
    }

    /// Output after every pass, for inspecting how a description resolved.
    pub fn trace(&self, spell: &SpellRecord) -> Vec<(Pass, String)> {
        let Some(raw) = spell.description.as_deref().filter(|d| !d.is_empty()) else {
            return Vec::new();
        };
        let mut text = raw.to_string();
        PASSES
            .iter()
            .map(|pass| {
                text = pass.apply(spell, &self.xref, &text);
                (*pass, text.clone())
            })
            .collect()
    }
}

/// Effect number captured by a same-spell token regex.
fn effect_number(caps: &Captures<'_>) -> usize {
    caps[1].parse().unwrap_or(0)
}

fn effect_values(spell: &SpellRecord, re: &Regex, text: &str) -> String {
    re.replace_all(text, |caps: &Captures<'_>| {
        match spell.effect(effect_number(caps)).and_then(|e| e.display_value()) {
            Some(value) => value.to_string(),
            // left for the catch-all
            None => caps[0].to_string(),
        }
    })
    .into_owned()
}

fn own_duration(spell: &SpellRecord, text: &str) -> String {
    let duration = spell
        .duration_index
        .and_then(duration::duration_for)
        .unwrap_or_else(|| "[duration]".to_string());
    own_duration_re()
        .replace_all(text, NoExpand(&duration))
        .into_owned()
}

fn cross_spell_duration(xref: &CrossReferenceResolver, text: &str) -> String {
    cross_duration_re()
        .replace_all(text, |caps: &Captures<'_>| match caps[1].parse::<SpellId>() {
            Ok(id) => xref.duration_of_spell(id),
            Err(_) => format!("[{}d]", &caps[1]),
        })
        .into_owned()
}

fn cross_spell_effect(xref: &CrossReferenceResolver, text: &str) -> String {
    cross_effect_re()
        .replace_all(text, |caps: &Captures<'_>| {
            match (caps[1].parse::<SpellId>(), caps[2].parse::<usize>()) {
                (Ok(id), Ok(effect)) => xref.effect_value_of_spell(id, effect),
                _ => format!("[{}s{}]", &caps[1], &caps[2]),
            }
        })
        .into_owned()
}

fn target_counts(spell: &SpellRecord, text: &str) -> String {
    target_count_re()
        .replace_all(text, |caps: &Captures<'_>| {
            let effect = spell.effect(effect_number(caps));
            effect
                .and_then(|e| e.chain_targets)
                .filter(|v| *v != 0)
                .or_else(|| effect.and_then(|e| e.misc_value).filter(|v| *v != 0))
                .map(|v| v.to_string())
                .or_else(|| target_count_override(spell.entry).map(str::to_string))
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
        })
        .into_owned()
}

fn target_count_override(id: SpellId) -> Option<&'static str> {
    TARGET_COUNT_OVERRIDES
        .iter()
        .find(|(spell, _)| *spell == id)
        .map(|(_, count)| *count)
}

fn misc_values(spell: &SpellRecord, text: &str) -> String {
    misc_value_re()
        .replace_all(text, |caps: &Captures<'_>| {
            spell
                .effect(effect_number(caps))
                .and_then(|e| e.misc_value)
                .filter(|v| *v != 0)
                .map(|v| v.to_string())
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
        })
        .into_owned()
}

fn catch_all(text: &str) -> String {
    let re = catch_all_re();
    let mut out = text.to_string();
    // "$$a" becomes "$X" after one sweep, so repeat until nothing matches
    while re.is_match(&out) {
        out = re.replace_all(&out, UNKNOWN_VALUE).into_owned();
    }
    out
}
