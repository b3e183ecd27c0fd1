//! In-memory pet store backed by a hecs ECS world.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::{Mutex, MutexGuard};

use hecs::{Entity, World};
use petsim_logic::adoption::PetId;
use petsim_logic::attributes::Welfare;

use super::{DecayReport, PetStore};
use crate::components::{Owner, PetState, Profile, Sickness, Wardrobe};
use crate::error::StoreError;
use crate::persistence;
use crate::systems::decay_system;

/// ECS world plus an id → entity index.
pub struct PetWorld {
    pub world: World,
    index: HashMap<PetId, Entity>,
}

impl PetWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
        }
    }

    /// Wrap an existing world, rebuilding the index from its profiles.
    pub fn from_world(world: World) -> Self {
        let index = world
            .query::<&Profile>()
            .iter()
            .map(|(entity, profile)| (profile.id, entity))
            .collect();
        Self { world, index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn spawn(&mut self, pet: PetState) {
        let id = pet.id;
        let entity = self.world.spawn(pet.into_components());
        self.index.insert(id, entity);
    }

    fn read(&self, entity: Entity) -> Option<PetState> {
        let mut query = self
            .world
            .query_one::<(&Profile, &Welfare, &Sickness, &Owner, &Wardrobe)>(entity)
            .ok()?;
        let pet = query
            .get()
            .map(|(p, w, s, o, r)| PetState::from_components(p, w, s, o, r));
        pet
    }

    fn write(&mut self, entity: Entity, pet: PetState) -> bool {
        let Ok((profile, welfare, sickness, owner, wardrobe)) = self
            .world
            .query_one_mut::<(&mut Profile, &mut Welfare, &mut Sickness, &mut Owner, &mut Wardrobe)>(entity)
        else {
            return false;
        };
        // The id is fixed at creation
        profile.name = pet.name;
        profile.species = pet.species;
        profile.power = pet.power;
        *welfare = pet.welfare;
        sickness.0 = pet.illness;
        owner.0 = pet.owner_id;
        wardrobe.0 = pet.equipped_items;
        true
    }
}

impl Default for PetWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe [`PetStore`] over a [`PetWorld`].
///
/// A single mutex guards the world, so every `modify_pet` and every decay
/// pass runs to completion before the next one starts.
pub struct WorldStore {
    inner: Mutex<PetWorld>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PetWorld::new()),
        }
    }

    pub fn with_pets(pets: impl IntoIterator<Item = PetState>) -> Self {
        let mut world = PetWorld::new();
        for pet in pets {
            world.spawn(pet);
        }
        Self {
            inner: Mutex::new(world),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PetWorld>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    /// Write a versioned binary snapshot of every pet.
    pub fn save_snapshot<W: Write>(&self, writer: W) -> Result<(), StoreError> {
        let guard = self.lock()?;
        persistence::save_world(writer, &guard.world)
    }

    /// Replace the current contents with a snapshot.
    pub fn load_snapshot<R: Read>(&self, reader: R) -> Result<usize, StoreError> {
        let world = persistence::load_world(reader)?;
        let mut guard = self.lock()?;
        *guard = PetWorld::from_world(world);
        Ok(guard.len())
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PetStore for WorldStore {
    fn pet_ids(&self) -> Result<Vec<PetId>, StoreError> {
        let guard = self.lock()?;
        let mut ids: Vec<PetId> = guard.index.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn find_pet(&self, id: PetId) -> Result<Option<PetState>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.index.get(&id).and_then(|e| guard.read(*e)))
    }

    fn all_pets(&self) -> Result<Vec<PetState>, StoreError> {
        let guard = self.lock()?;
        let mut pets: Vec<PetState> = guard
            .index
            .values()
            .filter_map(|e| guard.read(*e))
            .collect();
        pets.sort_by_key(|p| p.id);
        Ok(pets)
    }

    fn insert_pet(&self, pet: PetState) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        if guard.index.contains_key(&pet.id) {
            return Ok(false);
        }
        guard.spawn(pet);
        Ok(true)
    }

    fn save_pet(&self, pet: &PetState) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        match guard.index.get(&pet.id).copied() {
            Some(entity) => {
                guard.write(entity, pet.clone());
            }
            None => guard.spawn(pet.clone()),
        }
        Ok(())
    }

    fn remove_pet(&self, id: PetId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        match guard.index.remove(&id) {
            Some(entity) => Ok(guard.world.despawn(entity).is_ok()),
            None => Ok(false),
        }
    }

    fn modify_pet(&self, id: PetId, f: &mut dyn FnMut(&mut PetState)) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        let Some(entity) = guard.index.get(&id).copied() else {
            return Ok(false);
        };
        let Some(mut pet) = guard.read(entity) else {
            return Ok(false);
        };
        f(&mut pet);
        Ok(guard.write(entity, pet))
    }

    fn decay_all(&self) -> Result<DecayReport, StoreError> {
        let mut guard = self.lock()?;
        let decayed = decay_system(&mut guard.world);
        Ok(DecayReport {
            decayed,
            ..DecayReport::default()
        })
    }
}
