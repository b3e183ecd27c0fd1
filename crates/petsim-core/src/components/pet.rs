//! Pet components and the flat `PetState` record assembled from them.

use petsim_logic::adoption::PetId;
use petsim_logic::attributes::Welfare;
use petsim_logic::care::{CareAction, CareOutcome, Condition};
use petsim_logic::decay::apply_decay;
use petsim_logic::illness::Illness;
use petsim_logic::inventory::ActorId;
use petsim_logic::items::ItemId;
use serde::{Deserialize, Serialize};

/// Descriptive, mostly immutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: PetId,
    pub name: String,
    pub species: String,
    pub power: String,
}

/// Who adopted the pet. `None` means available for adoption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner(pub Option<ActorId>);

/// Current illness, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sickness(pub Option<Illness>);

/// A cosmetic item worn by the pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Worn cosmetics, in the order they were put on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wardrobe(pub Vec<ItemRef>);

/// One pet as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub id: PetId,
    pub name: String,
    pub species: String,
    pub power: String,
    #[serde(default)]
    pub owner_id: Option<ActorId>,
    #[serde(flatten)]
    pub welfare: Welfare,
    #[serde(default)]
    pub illness: Option<Illness>,
    #[serde(default)]
    pub equipped_items: Vec<ItemRef>,
}

impl PetState {
    /// A fresh, unowned pet at the standard starting welfare.
    pub fn new(id: PetId, name: impl Into<String>, species: impl Into<String>, power: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            species: species.into(),
            power: power.into(),
            owner_id: None,
            welfare: Welfare::default(),
            illness: None,
            equipped_items: Vec::new(),
        }
    }

    pub fn condition(&self) -> Condition {
        Condition::new(self.welfare, self.illness)
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.welfare = condition.welfare;
        self.illness = condition.illness;
    }

    pub fn is_available(&self) -> bool {
        self.owner_id.is_none()
    }

    /// One decay tick.
    pub fn decay(&mut self) {
        let mut condition = self.condition();
        apply_decay(&mut condition);
        self.set_condition(condition);
    }

    pub fn apply_care(&mut self, action: CareAction) -> CareOutcome {
        let mut condition = self.condition();
        let outcome = action.apply(&self.name, &mut condition);
        self.set_condition(condition);
        outcome
    }

    pub fn status(&self) -> PetStatus {
        PetStatus {
            hunger: self.welfare.hunger,
            happiness: self.welfare.happiness,
            cleanliness: self.welfare.cleanliness,
            illness: self.illness,
        }
    }

    /// Split into ECS components.
    pub fn into_components(self) -> (Profile, Welfare, Sickness, Owner, Wardrobe) {
        (
            Profile {
                id: self.id,
                name: self.name,
                species: self.species,
                power: self.power,
            },
            self.welfare,
            Sickness(self.illness),
            Owner(self.owner_id),
            Wardrobe(self.equipped_items),
        )
    }

    /// Reassemble from ECS components.
    pub fn from_components(
        profile: &Profile,
        welfare: &Welfare,
        sickness: &Sickness,
        owner: &Owner,
        wardrobe: &Wardrobe,
    ) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            species: profile.species.clone(),
            power: profile.power.clone(),
            owner_id: owner.0,
            welfare: *welfare,
            illness: sickness.0,
            equipped_items: wardrobe.0.clone(),
        }
    }
}

/// The welfare view of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStatus {
    pub hunger: i32,
    pub happiness: i32,
    pub cleanliness: i32,
    pub illness: Option<Illness>,
}

/// Fields accepted when creating a pet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPet {
    /// Explicit id; allocated when absent.
    #[serde(default)]
    pub id: Option<PetId>,
    pub name: String,
    pub species: String,
    pub power: String,
}

/// Explicit field-by-field edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub power: Option<String>,
}

impl PetPatch {
    /// Apply to `pet`. The id is never touched.
    pub fn apply(&self, pet: &mut PetState) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(species) = &self.species {
            pet.species = species.clone();
        }
        if let Some(power) = &self.power {
            pet.power = power.clone();
        }
    }
}
