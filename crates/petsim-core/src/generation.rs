//! Roster seeding - fills an empty store with the starting pets

use petsim_logic::roster::seed_roster;

use crate::components::PetState;
use crate::error::StoreError;
use crate::store::PetStore;

/// Insert every roster pet whose id is not already taken.
/// Returns how many were added.
pub fn seed_pets(store: &dyn PetStore) -> Result<usize, StoreError> {
    let mut added = 0;
    for seed in seed_roster() {
        let pet = PetState::new(seed.id, seed.name, seed.species, seed.power);
        if store.insert_pet(pet)? {
            added += 1;
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WorldStore;
    use petsim_logic::roster::ROSTER_SIZE;

    #[test]
    fn test_seed_is_idempotent() {
        let store = WorldStore::new();
        assert_eq!(seed_pets(&store).unwrap(), ROSTER_SIZE);
        assert_eq!(seed_pets(&store).unwrap(), 0);
        assert_eq!(store.len().unwrap(), ROSTER_SIZE);
    }

    #[test]
    fn test_seeded_pets_start_available_and_healthy() {
        let store = WorldStore::new();
        seed_pets(&store).unwrap();
        for pet in store.all_pets().unwrap() {
            assert!(pet.is_available());
            assert_eq!(pet.illness, None);
            assert_eq!(pet.status().hunger, 15);
        }
    }

    #[test]
    fn test_seed_keeps_existing_pet() {
        let store = WorldStore::new();
        store
            .insert_pet(PetState::new(1, "Custom", "dragon", "fire"))
            .unwrap();
        assert_eq!(seed_pets(&store).unwrap(), ROSTER_SIZE - 1);
        assert_eq!(store.find_pet(1).unwrap().unwrap().name, "Custom");
    }
}
