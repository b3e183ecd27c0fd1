//! Flat-file stores: one `pets.json` array and one JSON file per inventory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use petsim_logic::adoption::PetId;
use petsim_logic::inventory::{ActorId, Inventory};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DecayReport, InventoryStore, PetStore};
use crate::components::PetState;
use crate::error::StoreError;

/// Read a JSON file, `None` if it does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write via a sibling temp file and rename, so readers never see a
/// half-written file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Pets kept as a single JSON array on disk.
///
/// Every operation reads the file, and writes it back whole when it
/// changes anything. The mutex serializes those read-modify-write cycles
/// within this process.
pub struct JsonPetStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonPetStore {
    /// Store at `<dir>/pets.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join("pets.json"))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn load(&self) -> Result<Vec<PetState>, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn store(&self, pets: &[PetState]) -> Result<(), StoreError> {
        write_json(&self.path, pets)
    }
}

impl PetStore for JsonPetStore {
    fn pet_ids(&self) -> Result<Vec<PetId>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.iter().map(|p| p.id).collect())
    }

    fn find_pet(&self, id: PetId) -> Result<Option<PetState>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    fn all_pets(&self) -> Result<Vec<PetState>, StoreError> {
        let _guard = self.guard()?;
        self.load()
    }

    fn insert_pet(&self, pet: PetState) -> Result<bool, StoreError> {
        let _guard = self.guard()?;
        let mut pets = self.load()?;
        if pets.iter().any(|p| p.id == pet.id) {
            return Ok(false);
        }
        pets.push(pet);
        self.store(&pets)?;
        Ok(true)
    }

    fn save_pet(&self, pet: &PetState) -> Result<(), StoreError> {
        self.save_pets(std::slice::from_ref(pet))
    }

    fn save_pets(&self, updated: &[PetState]) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut pets = self.load()?;
        for pet in updated {
            match pets.iter_mut().find(|p| p.id == pet.id) {
                Some(slot) => *slot = pet.clone(),
                None => pets.push(pet.clone()),
            }
        }
        self.store(&pets)
    }

    fn remove_pet(&self, id: PetId) -> Result<bool, StoreError> {
        let _guard = self.guard()?;
        let mut pets = self.load()?;
        let before = pets.len();
        pets.retain(|p| p.id != id);
        if pets.len() == before {
            return Ok(false);
        }
        self.store(&pets)?;
        Ok(true)
    }

    fn modify_pet(&self, id: PetId, f: &mut dyn FnMut(&mut PetState)) -> Result<bool, StoreError> {
        let _guard = self.guard()?;
        let mut pets = self.load()?;
        let Some(pet) = pets.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        f(pet);
        pet.id = id;
        self.store(&pets)?;
        Ok(true)
    }

    /// Decays every pet in memory and writes the file once.
    fn decay_all(&self) -> Result<DecayReport, StoreError> {
        let _guard = self.guard()?;
        let mut pets = self.load()?;
        for pet in pets.iter_mut() {
            pet.decay();
        }
        self.store(&pets)?;
        Ok(DecayReport {
            decayed: pets.len(),
            ..DecayReport::default()
        })
    }
}

/// One `inventory-<actor>.json` file per actor. Actors never contend, so
/// there is no lock.
pub struct JsonInventoryStore {
    dir: PathBuf,
}

impl JsonInventoryStore {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, actor: ActorId) -> PathBuf {
        self.dir.join(format!("inventory-{actor}.json"))
    }
}

impl InventoryStore for JsonInventoryStore {
    fn load_inventory(&self, actor: ActorId) -> Result<Inventory, StoreError> {
        let path = self.path_for(actor);
        match read_json(&path)? {
            Some(inventory) => Ok(inventory),
            None => {
                let inventory = Inventory::empty(actor);
                write_json(&path, &inventory)?;
                Ok(inventory)
            }
        }
    }

    fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError> {
        write_json(&self.path_for(inventory.actor_id), inventory)
    }
}
