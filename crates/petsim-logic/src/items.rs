//! Catalog item definitions and how their effects land on a pet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Welfare};
use crate::illness::Illness;

/// Catalog item identifier (unique within its kind).
pub type ItemId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Food,
    Medicine,
    Clothing,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ItemKind::Food => "food",
            ItemKind::Medicine => "medicine",
            ItemKind::Clothing => "clothing",
        };
        f.write_str(text)
    }
}

/// Cosmetic slot. At most one clothing item may occupy each slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Headwear,
    Neckwear,
    Back,
    Body,
    Footwear,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Headwear,
        Slot::Neckwear,
        Slot::Back,
        Slot::Body,
        Slot::Footwear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Headwear => "headwear",
            Slot::Neckwear => "neckwear",
            Slot::Back => "back",
            Slot::Body => "body",
            Slot::Footwear => "footwear",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed deltas an item applies when used. Absent fields do nothing.
///
/// `health` is carried for catalog fidelity but pets have no health
/// attribute, so it is reported and never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemEffects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hunger: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub happiness: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
}

impl ItemEffects {
    pub fn is_empty(&self) -> bool {
        self.hunger.is_none()
            && self.happiness.is_none()
            && self.cleanliness.is_none()
            && self.health.is_none()
    }

    /// Apply every present delta to `welfare`, each clamped to [0, 20].
    pub fn apply(&self, welfare: &mut Welfare) {
        let deltas = [
            (Attribute::Hunger, self.hunger),
            (Attribute::Happiness, self.happiness),
            (Attribute::Cleanliness, self.cleanliness),
        ];
        for (attribute, delta) in deltas {
            if let Some(d) = delta {
                welfare.adjust(attribute, d);
            }
        }
    }
}

/// One entry in the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: ItemEffects,
    /// Medicine only: the illness this item cures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cures: Option<Illness>,
    /// Clothing only: the slot this item occupies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,
}

impl CatalogItem {
    /// Whether using this item clears `illness`.
    pub fn cures_illness(&self, illness: Option<Illness>) -> bool {
        matches!((self.cures, illness), (Some(c), Some(i)) if c == i)
    }
}
