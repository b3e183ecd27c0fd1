//! Illness tags and the threshold rule that derives them from welfare.
//!
//! [`derive_illness`] is the global rule and is only applied wholesale by
//! the decay pass. Care actions use the narrower, attribute-local rules in
//! [`crate::care`] instead, so the two must stay separate functions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::Welfare;
use crate::constants::thresholds;

/// What a pet can be sick with. `None` on the pet means healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Illness {
    /// Hunger pinned at the ceiling.
    StomachAche,
    /// Cleanliness near zero.
    Flu,
    /// Happiness near zero.
    Headache,
    /// Fed past empty. Only ever set by feeding, never derived.
    Indigestion,
}

impl Illness {
    pub const ALL: [Illness; 4] = [
        Illness::StomachAche,
        Illness::Flu,
        Illness::Headache,
        Illness::Indigestion,
    ];

    /// Stable tag used in catalogs (`cures`) and on the wire.
    pub fn tag(self) -> &'static str {
        match self {
            Illness::StomachAche => "stomach-ache",
            Illness::Flu => "flu",
            Illness::Headache => "headache",
            Illness::Indigestion => "indigestion",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.tag() == tag)
    }
}

impl fmt::Display for Illness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Illness::StomachAche => "stomach ache",
            Illness::Flu => "flu",
            Illness::Headache => "headache",
            Illness::Indigestion => "indigestion from overeating",
        };
        f.write_str(text)
    }
}

/// Global illness derivation. First match wins:
/// starving → stomach ache, filthy → flu, miserable → headache, else healthy.
pub fn derive_illness(welfare: &Welfare) -> Option<Illness> {
    if welfare.hunger >= thresholds::STARVING {
        Some(Illness::StomachAche)
    } else if welfare.cleanliness <= thresholds::FILTHY {
        Some(Illness::Flu)
    } else if welfare.happiness <= thresholds::MISERABLE {
        Some(Illness::Headache)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_stomach_ache_first() {
        let w = Welfare::new(20, 1, 1);
        assert_eq!(derive_illness(&w), Some(Illness::StomachAche));
    }

    #[test]
    fn test_flu_beats_headache() {
        let w = Welfare::new(10, 1, 2);
        assert_eq!(derive_illness(&w), Some(Illness::Flu));
    }

    #[test]
    fn test_headache() {
        let w = Welfare::new(10, 2, 3);
        assert_eq!(derive_illness(&w), Some(Illness::Headache));
    }

    #[test]
    fn test_healthy_at_boundaries() {
        let w = Welfare::new(19, 3, 3);
        assert_eq!(derive_illness(&w), None);
    }

    #[test]
    fn test_indigestion_never_derived() {
        for hunger in 0..=20 {
            for level in 0..=20 {
                let w = Welfare::new(hunger, level, level);
                assert_ne!(derive_illness(&w), Some(Illness::Indigestion));
            }
        }
    }

    #[test]
    fn test_tag_roundtrip() {
        for illness in Illness::ALL {
            assert_eq!(Illness::from_tag(illness.tag()), Some(illness));
        }
        assert_eq!(Illness::from_tag("plague"), None);
    }
}
