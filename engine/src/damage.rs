use std::fmt;

use serde::Serialize;

use crate::model::{display_points, SpellEffect};

/// Effect kinds whose base points describe damage dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    SchoolDamage,
    Dummy,
    InstantDamage,
    WeaponDamage,
    NormalizedWeaponDamage,
}

impl DamageKind {
    pub const ALL: [DamageKind; 5] = [
        DamageKind::SchoolDamage,
        DamageKind::Dummy,
        DamageKind::InstantDamage,
        DamageKind::WeaponDamage,
        DamageKind::NormalizedWeaponDamage,
    ];

    pub fn from_effect(kind: i32) -> Option<Self> {
        match kind {
            2 => Some(DamageKind::SchoolDamage),
            3 => Some(DamageKind::Dummy),
            7 => Some(DamageKind::InstantDamage),
            58 => Some(DamageKind::WeaponDamage),
            121 => Some(DamageKind::NormalizedWeaponDamage),
            _ => None,
        }
    }

    pub fn effect_id(self) -> i32 {
        match self {
            DamageKind::SchoolDamage => 2,
            DamageKind::Dummy => 3,
            DamageKind::InstantDamage => 7,
            DamageKind::WeaponDamage => 58,
            DamageKind::NormalizedWeaponDamage => 121,
        }
    }
}

/// What a single effect slot amounts to once the dice are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ResolvedEffect {
    DamageRange { min: i64, max: i64 },
    Fixed { value: i64 },
    None,
}

impl ResolvedEffect {
    pub fn derive(kind: i32, base_points: i32, die_sides: i32, base_dice: f64) -> Self {
        if DamageKind::from_effect(kind).is_none() {
            return ResolvedEffect::None;
        }
        let actual_base = display_points(base_points);
        if actual_base <= 0 {
            // negative base points are resist reductions, not damage
            return ResolvedEffect::None;
        }
        if die_sides > 0 && base_dice > 0.0 {
            // `as` saturates, so huge REAL columns land on i64::MAX
            let dice = base_dice.floor() as i64;
            let range = actual_base.checked_add(dice).zip(
                dice.checked_mul(i64::from(die_sides))
                    .and_then(|rolled| actual_base.checked_add(rolled)),
            );
            return match range {
                Some((min, max)) => ResolvedEffect::DamageRange { min, max },
                None => ResolvedEffect::None,
            };
        }
        ResolvedEffect::Fixed { value: actual_base }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedEffect::None)
    }
}

impl fmt::Display for ResolvedEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedEffect::DamageRange { min, max } => write!(f, "{}-{}", min, max),
            ResolvedEffect::Fixed { value } => write!(f, "{}", value),
            ResolvedEffect::None => Ok(()),
        }
    }
}

/// Damage text for an effect: `"min-max"`, a single value, or `None` for
/// effects that are not damage-like or have no positive base.
pub fn range_for(kind: i32, base_points: i32, die_sides: i32, base_dice: f64) -> Option<String> {
    let resolved = ResolvedEffect::derive(kind, base_points, die_sides, base_dice);
    (!resolved.is_none()).then(|| resolved.to_string())
}

impl SpellEffect {
    /// Missing dice columns count as zero; missing base points resolve to nothing.
    pub fn resolve(&self) -> ResolvedEffect {
        let Some(base_points) = self.base_points else {
            return ResolvedEffect::None;
        };
        ResolvedEffect::derive(
            self.kind.unwrap_or(0),
            base_points,
            self.die_sides.unwrap_or(0),
            self.base_dice.unwrap_or(0.0),
        )
    }
}
