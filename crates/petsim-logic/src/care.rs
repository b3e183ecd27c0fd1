//! Care actions - the five explicit welfare transforms a caller can apply.
//!
//! Each action mutates a [`Condition`] in place and returns a
//! [`CareOutcome`] with a human-readable message plus the post-action
//! values. Illness handling here is attribute-local: feeding only looks at
//! hunger, bathing only at cleanliness, playing and walking only at
//! happiness. None of them re-run [`crate::illness::derive_illness`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{decrease, increase, Welfare};
use crate::constants::{care, thresholds, ATTRIBUTE_MIN};
use crate::illness::Illness;

/// Welfare plus the current illness tag - everything a care action touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub welfare: Welfare,
    pub illness: Option<Illness>,
}

impl Condition {
    pub fn new(welfare: Welfare, illness: Option<Illness>) -> Self {
        Self { welfare, illness }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareAction {
    Feed,
    Bathe,
    Play,
    Walk,
    Cure,
}

impl CareAction {
    pub const ALL: [CareAction; 5] = [
        CareAction::Feed,
        CareAction::Bathe,
        CareAction::Play,
        CareAction::Walk,
        CareAction::Cure,
    ];

    /// Apply this action to `condition`. `name` only feeds the message.
    pub fn apply(self, name: &str, condition: &mut Condition) -> CareOutcome {
        match self {
            CareAction::Feed => feed(name, condition),
            CareAction::Bathe => bathe(name, condition),
            CareAction::Play => play(name, condition),
            CareAction::Walk => walk(name, condition),
            CareAction::Cure => cure(name, condition),
        }
    }
}

impl fmt::Display for CareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CareAction::Feed => "feed",
            CareAction::Bathe => "bathe",
            CareAction::Play => "play",
            CareAction::Walk => "walk",
            CareAction::Cure => "cure",
        };
        f.write_str(text)
    }
}

/// Result of a care action. Only the attributes the action reports are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareOutcome {
    pub action: CareAction,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hunger: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub happiness: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cured_illness: Option<Illness>,
}

impl CareOutcome {
    fn new(action: CareAction, message: String) -> Self {
        Self {
            action,
            message,
            hunger: None,
            happiness: None,
            cleanliness: None,
            cured_illness: None,
        }
    }
}

/// Lower hunger by 3.
///
/// Feeding a pet whose hunger is already at 0 gives it indigestion and
/// leaves hunger untouched. Landing exactly on 0 also gives indigestion;
/// landing anywhere else below 5 clears illness.
pub fn feed(name: &str, condition: &mut Condition) -> CareOutcome {
    let welfare = &mut condition.welfare;

    if welfare.hunger <= ATTRIBUTE_MIN {
        condition.illness = Some(Illness::Indigestion);
        let mut outcome = CareOutcome::new(
            CareAction::Feed,
            format!("Careful! {name} was not hungry and got indigestion."),
        );
        outcome.hunger = Some(welfare.hunger);
        return outcome;
    }

    welfare.hunger = decrease(welfare.hunger, care::FEED_HUNGER_LOSS);
    if welfare.hunger == ATTRIBUTE_MIN {
        condition.illness = Some(Illness::Indigestion);
    } else if welfare.hunger < thresholds::SATED {
        condition.illness = None;
    }

    let mut outcome = CareOutcome::new(
        CareAction::Feed,
        format!("{name} was fed. Hunger is now {}.", welfare.hunger),
    );
    outcome.hunger = Some(welfare.hunger);
    outcome
}

/// Raise cleanliness by 5; a spotless pet (15+) is no longer sick.
pub fn bathe(name: &str, condition: &mut Condition) -> CareOutcome {
    let welfare = &mut condition.welfare;
    welfare.cleanliness = increase(welfare.cleanliness, care::BATHE_CLEANLINESS_GAIN);
    if welfare.cleanliness >= thresholds::SPOTLESS {
        condition.illness = None;
    }

    let mut outcome = CareOutcome::new(
        CareAction::Bathe,
        format!("{name} had a bath. Cleanliness is now {}.", welfare.cleanliness),
    );
    outcome.cleanliness = Some(welfare.cleanliness);
    outcome
}

/// Raise happiness by 4 at the cost of 1 hunger.
pub fn play(name: &str, condition: &mut Condition) -> CareOutcome {
    let welfare = &mut condition.welfare;
    welfare.happiness = increase(welfare.happiness, care::PLAY_HAPPINESS_GAIN);
    welfare.hunger = increase(welfare.hunger, care::PLAY_HUNGER_GAIN);
    if welfare.happiness >= thresholds::JOYFUL {
        condition.illness = None;
    }

    let mut outcome = CareOutcome::new(
        CareAction::Play,
        format!(
            "{name} played with you. Happiness is now {}, hunger is now {}.",
            welfare.happiness, welfare.hunger
        ),
    );
    outcome.happiness = Some(welfare.happiness);
    outcome.hunger = Some(welfare.hunger);
    outcome
}

/// Raise happiness by 3; the pet comes back 2 dirtier and 2 hungrier.
pub fn walk(name: &str, condition: &mut Condition) -> CareOutcome {
    let welfare = &mut condition.welfare;
    welfare.happiness = increase(welfare.happiness, care::WALK_HAPPINESS_GAIN);
    welfare.cleanliness = decrease(welfare.cleanliness, care::WALK_CLEANLINESS_LOSS);
    welfare.hunger = increase(welfare.hunger, care::WALK_HUNGER_GAIN);
    if welfare.happiness >= thresholds::JOYFUL {
        condition.illness = None;
    }

    let mut outcome = CareOutcome::new(
        CareAction::Walk,
        format!(
            "{name} went for a walk. Happiness is now {}, cleanliness is now {}, hunger is now {}.",
            welfare.happiness, welfare.cleanliness, welfare.hunger
        ),
    );
    outcome.happiness = Some(welfare.happiness);
    outcome.cleanliness = Some(welfare.cleanliness);
    outcome.hunger = Some(welfare.hunger);
    outcome
}

/// Clear whatever illness the pet has. A healthy pet is a no-op.
pub fn cure(name: &str, condition: &mut Condition) -> CareOutcome {
    match condition.illness.take() {
        None => CareOutcome::new(CareAction::Cure, format!("{name} is not sick.")),
        Some(illness) => {
            let mut outcome = CareOutcome::new(
                CareAction::Cure,
                format!("{name} was cured of {illness}."),
            );
            outcome.cured_illness = Some(illness);
            outcome
        }
    }
}
