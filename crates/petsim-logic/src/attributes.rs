//! Bounded welfare attributes and the clamp helpers every mutation goes through.

use serde::{Deserialize, Serialize};

use crate::constants::{initial, ATTRIBUTE_MAX, ATTRIBUTE_MIN};

/// Raise `value` by `amount`, never past `max`.
pub fn increase_to(value: i32, amount: i32, max: i32) -> i32 {
    value.saturating_add(amount).min(max)
}

/// Lower `value` by `amount`, never below `min`.
pub fn decrease_to(value: i32, amount: i32, min: i32) -> i32 {
    value.saturating_sub(amount).max(min)
}

/// Raise against the standard ceiling of 20.
pub fn increase(value: i32, amount: i32) -> i32 {
    increase_to(value, amount, ATTRIBUTE_MAX)
}

/// Lower against the standard floor of 0.
pub fn decrease(value: i32, amount: i32) -> i32 {
    decrease_to(value, amount, ATTRIBUTE_MIN)
}

/// Clamp into [0, 20].
pub fn clamp(value: i32) -> i32 {
    value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
}

/// Which welfare attribute a delta targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Hunger,
    Happiness,
    Cleanliness,
}

/// The three numeric welfare attributes, each held in [0, 20].
///
/// Hunger grows toward 20 when neglected; happiness and cleanliness
/// shrink toward 0.
///
/// Deserialization goes through [`Welfare::new`], so out-of-range values in
/// stored records are clamped on load and missing fields take the
/// starting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWelfare")]
pub struct Welfare {
    pub hunger: i32,
    pub happiness: i32,
    pub cleanliness: i32,
}

/// Unvalidated wire form of [`Welfare`].
#[derive(Deserialize)]
#[serde(default)]
struct RawWelfare {
    hunger: i32,
    happiness: i32,
    cleanliness: i32,
}

impl Default for RawWelfare {
    fn default() -> Self {
        Self {
            hunger: initial::HUNGER,
            happiness: initial::HAPPINESS,
            cleanliness: initial::CLEANLINESS,
        }
    }
}

impl From<RawWelfare> for Welfare {
    fn from(raw: RawWelfare) -> Self {
        Welfare::new(raw.hunger, raw.happiness, raw.cleanliness)
    }
}

impl Default for Welfare {
    fn default() -> Self {
        Self {
            hunger: initial::HUNGER,
            happiness: initial::HAPPINESS,
            cleanliness: initial::CLEANLINESS,
        }
    }
}

impl Welfare {
    /// Build from raw values, clamping each into range.
    pub fn new(hunger: i32, happiness: i32, cleanliness: i32) -> Self {
        Self {
            hunger: clamp(hunger),
            happiness: clamp(happiness),
            cleanliness: clamp(cleanliness),
        }
    }

    /// Apply a signed delta to one attribute. Positive deltas go through
    /// [`increase`], negative ones through [`decrease`].
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) {
        let value = match attribute {
            Attribute::Hunger => &mut self.hunger,
            Attribute::Happiness => &mut self.happiness,
            Attribute::Cleanliness => &mut self.cleanliness,
        };
        *value = if delta >= 0 {
            increase(*value, delta)
        } else {
            decrease(*value, delta.saturating_neg())
        };
    }

    /// Whether every attribute sits inside [0, 20].
    pub fn in_bounds(&self) -> bool {
        [self.hunger, self.happiness, self.cleanliness]
            .iter()
            .all(|v| (ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(v))
    }
}
