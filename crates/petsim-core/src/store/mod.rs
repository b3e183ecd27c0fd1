//! Storage seams - pets and inventories are reached only through these traits.
//!
//! | Backend | Pets | Inventories |
//! |---------|------|-------------|
//! | in-memory | [`WorldStore`] (hecs ECS world) | [`MemoryInventoryStore`] |
//! | flat files | [`JsonPetStore`] (`pets.json`) | [`JsonInventoryStore`] (`inventory-<actor>.json`) |

mod json;
mod memory;
mod world;

pub use json::{JsonInventoryStore, JsonPetStore};
pub use memory::MemoryInventoryStore;
pub use world::WorldStore;

use petsim_logic::adoption::PetId;
use petsim_logic::inventory::{ActorId, Inventory};
use serde::{Deserialize, Serialize};

use crate::components::PetState;
use crate::error::StoreError;

/// Outcome of one decay pass over every stored pet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayReport {
    /// Pets decayed and persisted.
    pub decayed: usize,
    /// Pets whose read or write failed; they were skipped.
    pub failed: usize,
    /// Pets that disappeared between listing and update.
    pub vanished: usize,
}

/// Load/save access to the pet collection.
///
/// `modify_pet` is the read-modify-write primitive: implementations hold
/// their lock for the whole closure so a care action and a decay tick on
/// the same pet never interleave.
pub trait PetStore: Send + Sync {
    fn pet_ids(&self) -> Result<Vec<PetId>, StoreError>;

    fn find_pet(&self, id: PetId) -> Result<Option<PetState>, StoreError>;

    fn all_pets(&self) -> Result<Vec<PetState>, StoreError>;

    /// Insert a new pet. Returns `false` without writing if the id is taken.
    fn insert_pet(&self, pet: PetState) -> Result<bool, StoreError>;

    /// Upsert one pet.
    fn save_pet(&self, pet: &PetState) -> Result<(), StoreError>;

    /// Upsert many pets.
    fn save_pets(&self, pets: &[PetState]) -> Result<(), StoreError> {
        for pet in pets {
            self.save_pet(pet)?;
        }
        Ok(())
    }

    /// Returns `false` if there was nothing to remove.
    fn remove_pet(&self, id: PetId) -> Result<bool, StoreError>;

    /// Run `f` on the stored pet and persist the result atomically.
    /// Returns `false` if the pet does not exist.
    fn modify_pet(&self, id: PetId, f: &mut dyn FnMut(&mut PetState)) -> Result<bool, StoreError>;

    /// Apply one decay tick to every pet.
    ///
    /// The default walks pets one at a time so a failure on one pet is
    /// logged and does not stop the rest.
    fn decay_all(&self) -> Result<DecayReport, StoreError> {
        let mut report = DecayReport::default();
        for id in self.pet_ids()? {
            match self.modify_pet(id, &mut |pet: &mut PetState| pet.decay()) {
                Ok(true) => report.decayed += 1,
                Ok(false) => report.vanished += 1,
                Err(e) => {
                    log::warn!("decay skipped pet {}: {}", id, e);
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    /// The pet currently owned by `actor`, if any.
    fn find_by_owner(&self, actor: ActorId) -> Result<Option<PetState>, StoreError> {
        Ok(self
            .all_pets()?
            .into_iter()
            .find(|p| p.owner_id == Some(actor)))
    }
}

/// Load/save access to per-actor inventories.
pub trait InventoryStore: Send + Sync {
    /// The actor's inventory, or an empty one on first access.
    fn load_inventory(&self, actor: ActorId) -> Result<Inventory, StoreError>;

    fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError>;
}
