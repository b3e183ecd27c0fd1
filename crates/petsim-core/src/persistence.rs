//! Save/Load functionality for persisting the pet world
//!
//! Uses bincode for compact binary snapshots of the whole ECS world.
//! Components are serialized per entity then reconstructed on load.

use hecs::World;
use petsim_logic::attributes::Welfare;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::*;
use crate::error::StoreError;

/// Version number for snapshot format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the pet world
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Snapshot format version
    pub version: u32,
    /// Every pet with its components
    pub pets: Vec<SerializablePet>,
}

/// All components of one pet entity
#[derive(Serialize, Deserialize)]
pub struct SerializablePet {
    pub profile: Profile,
    pub welfare: Welfare,
    pub sickness: Sickness,
    pub owner: Owner,
    pub wardrobe: Wardrobe,
}

/// Extract every pet entity into serializable form
fn serialize_pets(world: &World) -> Vec<SerializablePet> {
    let mut pets: Vec<SerializablePet> = world
        .query::<(&Profile, &Welfare, &Sickness, &Owner, &Wardrobe)>()
        .iter()
        .map(|(_, (profile, welfare, sickness, owner, wardrobe))| SerializablePet {
            profile: profile.clone(),
            welfare: *welfare,
            sickness: *sickness,
            owner: *owner,
            wardrobe: wardrobe.clone(),
        })
        .collect();
    pets.sort_by_key(|p| p.profile.id);
    pets
}

/// Save the pet world to a writer
pub fn save_world<W: Write>(writer: W, world: &World) -> Result<(), StoreError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        pets: serialize_pets(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a pet world from a reader
pub fn load_world<R: Read>(reader: R) -> Result<World, StoreError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(StoreError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    for pet in save_data.pets {
        world.spawn((pet.profile, pet.welfare, pet.sickness, pet.owner, pet.wardrobe));
    }
    Ok(world)
}
