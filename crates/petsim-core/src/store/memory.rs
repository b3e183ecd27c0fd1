//! In-memory inventory store.

use std::collections::HashMap;
use std::sync::Mutex;

use petsim_logic::inventory::{ActorId, Inventory};

use super::InventoryStore;
use crate::error::StoreError;

#[derive(Default)]
pub struct MemoryInventoryStore {
    inventories: Mutex<HashMap<ActorId, Inventory>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for MemoryInventoryStore {
    fn load_inventory(&self, actor: ActorId) -> Result<Inventory, StoreError> {
        let mut map = self.inventories.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map
            .entry(actor)
            .or_insert_with(|| Inventory::empty(actor))
            .clone())
    }

    fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let mut map = self.inventories.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(inventory.actor_id, inventory.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petsim_logic::items::{ItemKind, Slot};

    #[test]
    fn test_partitioned_per_actor() {
        let store = MemoryInventoryStore::new();
        let mut a = store.load_inventory(1).unwrap();
        a.add(ItemKind::Clothing, 5, 1);
        a.equip(Slot::Headwear, 5);
        store.save_inventory(&a).unwrap();

        assert_eq!(store.load_inventory(1).unwrap(), a);
        assert_eq!(store.load_inventory(2).unwrap(), Inventory::empty(2));
    }
}
