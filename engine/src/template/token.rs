use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::model::SpellId;

/// A `$` placeholder found in a raw description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlaceholderToken {
    EffectValue { effect: u8 },
    OverTimeValue { effect: u8 },
    Duration,
    CrossSpellDuration { spell: SpellId },
    CrossSpellEffect { spell: SpellId, effect: u8 },
    TargetCount { effect: u8 },
    MiscValue { effect: u8 },
    PluralPhrase { singular: String, plural: String },
    GenericUnknown { text: String },
}

static TOKEN: OnceLock<Regex> = OnceLock::new();

// Alternatives are tried left to right, mirroring which pass claims a token.
fn token_re() -> &'static Regex {
    TOKEN.get_or_init(|| {
        Regex::new(
            r"\$(?:l(?P<sing>[^:]+):(?P<plur>[^;]+);|(?P<xd>\d+)d|(?P<xs>\d+)s(?P<xn>\d+)|(?P<so>[so])(?P<son>[1-3])|(?P<x>[xm])(?P<xmn>[1-3])|d|[A-Za-z0-9]+)",
        )
        .expect("valid regex")
    })
}

/// Tokens of `description` in the order they appear.
pub fn scan(description: &str) -> Vec<PlaceholderToken> {
    token_re()
        .captures_iter(description)
        .map(|caps| {
            let whole = &caps[0];
            let digit = |name: &str| caps[name].parse::<u8>().unwrap_or(0);
            if let (Some(sing), Some(plur)) = (caps.name("sing"), caps.name("plur")) {
                return PlaceholderToken::PluralPhrase {
                    singular: sing.as_str().to_string(),
                    plural: plur.as_str().to_string(),
                };
            }
            if let Some(id) = caps.name("xd") {
                return match id.as_str().parse() {
                    Ok(spell) => PlaceholderToken::CrossSpellDuration { spell },
                    Err(_) => unknown(whole),
                };
            }
            if let Some(id) = caps.name("xs") {
                return match (id.as_str().parse(), caps["xn"].parse()) {
                    (Ok(spell), Ok(effect)) => PlaceholderToken::CrossSpellEffect { spell, effect },
                    _ => unknown(whole),
                };
            }
            if let Some(kind) = caps.name("so") {
                let effect = digit("son");
                return match kind.as_str() {
                    "s" => PlaceholderToken::EffectValue { effect },
                    _ => PlaceholderToken::OverTimeValue { effect },
                };
            }
            if let Some(kind) = caps.name("x") {
                let effect = digit("xmn");
                return match kind.as_str() {
                    "x" => PlaceholderToken::TargetCount { effect },
                    _ => PlaceholderToken::MiscValue { effect },
                };
            }
            if whole == "$d" {
                return PlaceholderToken::Duration;
            }
            unknown(whole)
        })
        .collect()
}

fn unknown(text: &str) -> PlaceholderToken {
    PlaceholderToken::GenericUnknown {
        text: text.to_string(),
    }
}
