//! Pet engine - main entry point for care, inventory, adoption and decay

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use petsim_logic::adoption::{next_pet_id, pick_available, PetId};
use petsim_logic::care::{CareAction, CareOutcome};
use petsim_logic::inventory::{ActorId, EquippedSlot, Inventory};
use petsim_logic::items::{CatalogItem, ItemEffects, ItemId, ItemKind, Slot};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, StaticCatalog};
use crate::components::{ItemRef, NewPet, PetPatch, PetState, PetStatus};
use crate::config::{SimConfig, StorageBackend};
use crate::error::{CareError, StoreError};
use crate::generation::seed_pets;
use crate::store::{
    DecayReport, InventoryStore, JsonInventoryStore, JsonPetStore, MemoryInventoryStore, PetStore,
    WorldStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// The caller on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
}

impl Actor {
    pub fn user(id: ActorId) -> Self {
        Self { id, role: Role::User }
    }

    pub fn admin(id: ActorId) -> Self {
        Self { id, role: Role::Admin }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Most intervals a single `advance` will hand out. Anything beyond is
/// dropped along with the carried remainder.
pub const MAX_CATCH_UP_TICKS: u32 = 1_000;

/// Accumulates elapsed time and hands out whole decay intervals.
#[derive(Debug, Clone)]
pub struct DecayClock {
    interval_secs: f64,
    elapsed_secs: f64,
}

impl DecayClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_secs: interval.as_secs_f64(),
            elapsed_secs: 0.0,
        }
    }

    /// Add `delta_secs` and return how many full intervals are now due.
    /// The remainder carries over to the next call. At most
    /// [`MAX_CATCH_UP_TICKS`] are returned.
    pub fn advance(&mut self, delta_secs: f64) -> u32 {
        if !delta_secs.is_finite() || delta_secs <= 0.0 || self.interval_secs <= 0.0 {
            return 0;
        }
        self.elapsed_secs += delta_secs;
        let ticks = (self.elapsed_secs / self.interval_secs).floor();
        if ticks >= f64::from(MAX_CATCH_UP_TICKS) {
            log::warn!(
                "decay clock fell {} intervals behind, catching up {} only",
                ticks,
                MAX_CATCH_UP_TICKS
            );
            self.elapsed_secs = 0.0;
            return MAX_CATCH_UP_TICKS;
        }
        self.elapsed_secs -= ticks * self.interval_secs;
        ticks as u32
    }

    /// Seconds accumulated toward the next tick.
    pub fn pending_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

/// Result of consuming a food or medicine item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUse {
    pub message: String,
    pub effects: ItemEffects,
    pub inventory: Inventory,
    pub welfare: PetStatus,
}

/// Result of equip / unequip: what the actor is wearing afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipOutcome {
    pub message: String,
    pub equipped: Vec<EquippedSlot>,
}

/// Main pet engine
///
/// Stateless apart from the decay clock and actor locks: every operation
/// goes through the store traits, so one engine can be shared across
/// threads behind an `Arc`.
pub struct PetEngine {
    pets: Arc<dyn PetStore>,
    inventories: Arc<dyn InventoryStore>,
    catalog: Arc<dyn Catalog>,
    clock: Mutex<DecayClock>,
    /// One lock per actor, held across the load/apply/save of operations
    /// that touch both the inventory and the pet store.
    actor_locks: Mutex<HashMap<ActorId, Arc<Mutex<()>>>>,
}

impl PetEngine {
    pub fn new(
        pets: Arc<dyn PetStore>,
        inventories: Arc<dyn InventoryStore>,
        catalog: Arc<dyn Catalog>,
        decay_interval: Duration,
    ) -> Self {
        Self {
            pets,
            inventories,
            catalog,
            clock: Mutex::new(DecayClock::new(decay_interval)),
            actor_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Empty in-memory engine with the built-in catalog.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(
            Arc::new(WorldStore::new()),
            Arc::new(MemoryInventoryStore::new()),
            Arc::new(StaticCatalog::builtin()?),
            Duration::from_secs(SimConfig::default().decay_interval_secs),
        ))
    }

    /// Build stores and catalog as configured, seeding the roster if asked.
    pub fn from_config(config: &SimConfig) -> Result<Self, StoreError> {
        let catalog = match &config.catalog_path {
            Some(path) => StaticCatalog::load(path)?,
            None => StaticCatalog::builtin()?,
        };
        let (pets, inventories): (Arc<dyn PetStore>, Arc<dyn InventoryStore>) = match config.storage {
            StorageBackend::Memory => (
                Arc::new(WorldStore::new()),
                Arc::new(MemoryInventoryStore::new()),
            ),
            StorageBackend::Json => (
                Arc::new(JsonPetStore::in_dir(&config.data_dir)),
                Arc::new(JsonInventoryStore::in_dir(&config.data_dir)),
            ),
        };
        let engine = Self::new(pets, inventories, Arc::new(catalog), config.decay_interval());
        if config.seed_on_start {
            let added = engine.seed_roster()?;
            log::info!("seeded {} pets", added);
        }
        Ok(engine)
    }

    pub fn pet_store(&self) -> &Arc<dyn PetStore> {
        &self.pets
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    /// Add any missing roster pets. Returns how many were inserted.
    pub fn seed_roster(&self) -> Result<usize, StoreError> {
        seed_pets(self.pets.as_ref())
    }

    // ── Decay ───────────────────────────────────────────────────────────

    /// One decay pass over every pet. Failures are logged, never returned.
    pub fn decay_tick(&self) -> DecayReport {
        match self.pets.decay_all() {
            Ok(report) => {
                if report.failed > 0 {
                    log::warn!(
                        "decay tick: {} decayed, {} failed",
                        report.decayed,
                        report.failed
                    );
                } else {
                    log::debug!("decay tick: {} decayed", report.decayed);
                }
                report
            }
            Err(e) => {
                log::warn!("decay tick aborted: {}", e);
                DecayReport::default()
            }
        }
    }

    /// Advance the decay clock by `delta_secs` and run every tick that
    /// became due. Returns the number of ticks run.
    pub fn update(&self, delta_secs: f64) -> u32 {
        let ticks = match self.clock.lock() {
            Ok(mut clock) => clock.advance(delta_secs),
            Err(_) => {
                log::warn!("decay clock lock poisoned; skipping update");
                return 0;
            }
        };
        for _ in 0..ticks {
            self.decay_tick();
        }
        ticks
    }

    // ── Care actions ────────────────────────────────────────────────────

    pub fn care(&self, pet_id: PetId, action: CareAction) -> Result<CareOutcome, CareError> {
        let outcome = self.with_pet(pet_id, |pet| pet.apply_care(action))?;
        log::debug!("{} on pet {}: {}", action, pet_id, outcome.message);
        Ok(outcome)
    }

    pub fn feed(&self, pet_id: PetId) -> Result<CareOutcome, CareError> {
        self.care(pet_id, CareAction::Feed)
    }

    pub fn bathe(&self, pet_id: PetId) -> Result<CareOutcome, CareError> {
        self.care(pet_id, CareAction::Bathe)
    }

    pub fn play(&self, pet_id: PetId) -> Result<CareOutcome, CareError> {
        self.care(pet_id, CareAction::Play)
    }

    pub fn walk(&self, pet_id: PetId) -> Result<CareOutcome, CareError> {
        self.care(pet_id, CareAction::Walk)
    }

    pub fn cure(&self, pet_id: PetId) -> Result<CareOutcome, CareError> {
        self.care(pet_id, CareAction::Cure)
    }

    /// Care action on whichever pet the actor has adopted.
    pub fn care_for_own(&self, actor: &Actor, action: CareAction) -> Result<CareOutcome, CareError> {
        let pet = self.my_pet(actor)?;
        self.care(pet.id, action)
    }

    // ── Pet registry ────────────────────────────────────────────────────

    pub fn create_pet(&self, new: NewPet) -> Result<PetState, CareError> {
        for (field, value) in [("name", &new.name), ("species", &new.species), ("power", &new.power)] {
            if value.trim().is_empty() {
                return Err(CareError::BadRequest(format!("{field} must not be empty")));
            }
        }
        let id = match new.id {
            Some(id) => id,
            None => next_pet_id(self.pets.pet_ids()?),
        };
        let pet = PetState::new(id, new.name, new.species, new.power);
        if !self.pets.insert_pet(pet.clone())? {
            return Err(CareError::Conflict(format!("pet {id} already exists")));
        }
        log::info!("created pet {} ({})", id, pet.name);
        Ok(pet)
    }

    pub fn update_pet(&self, pet_id: PetId, patch: PetPatch) -> Result<PetState, CareError> {
        let blank = [&patch.name, &patch.species, &patch.power]
            .into_iter()
            .flatten()
            .any(|v| v.trim().is_empty());
        if blank {
            return Err(CareError::BadRequest("fields must not be empty".into()));
        }
        self.with_pet(pet_id, |pet| {
            patch.apply(pet);
            pet.clone()
        })
    }

    pub fn delete_pet(&self, actor: &Actor, pet_id: PetId) -> Result<(), CareError> {
        if !actor.is_admin() {
            return Err(CareError::Forbidden("only admins may delete pets".into()));
        }
        if !self.pets.remove_pet(pet_id)? {
            return Err(CareError::not_found("pet", pet_id));
        }
        log::info!("actor {} deleted pet {}", actor.id, pet_id);
        Ok(())
    }

    pub fn find_pet(&self, pet_id: PetId) -> Result<PetState, CareError> {
        self.pets
            .find_pet(pet_id)?
            .ok_or_else(|| CareError::not_found("pet", pet_id))
    }

    pub fn list_pets(&self) -> Result<Vec<PetState>, CareError> {
        let mut pets = self.pets.all_pets()?;
        pets.sort_by_key(|p| p.id);
        Ok(pets)
    }

    /// Pets nobody has adopted.
    pub fn available_pets(&self) -> Result<Vec<PetState>, CareError> {
        let mut pets = self.list_pets()?;
        pets.retain(PetState::is_available);
        Ok(pets)
    }

    pub fn pet_status(&self, pet_id: PetId) -> Result<PetStatus, CareError> {
        Ok(self.find_pet(pet_id)?.status())
    }

    // ── Adoption ────────────────────────────────────────────────────────

    pub fn adopt(&self, actor: &Actor, pet_id: PetId) -> Result<PetState, CareError> {
        let lock = self.actor_lock(actor.id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(owned) = self.pets.find_by_owner(actor.id)? {
            return Err(CareError::Conflict(format!(
                "actor {} already owns pet {}",
                actor.id, owned.id
            )));
        }
        let adopted = self.with_pet(pet_id, |pet| match pet.owner_id {
            Some(_) => None,
            None => {
                pet.owner_id = Some(actor.id);
                Some(pet.clone())
            }
        })?;
        let pet = adopted.ok_or_else(|| CareError::Conflict(format!("pet {pet_id} is already adopted")))?;
        log::info!("actor {} adopted pet {} ({})", actor.id, pet.id, pet.name);
        Ok(pet)
    }

    /// Adopt one pet chosen uniformly among the available ones.
    pub fn adopt_random<R: Rng + ?Sized>(&self, actor: &Actor, rng: &mut R) -> Result<PetState, CareError> {
        let available = self.available_pets()?;
        let pet_id = pick_available(&available, rng)
            .map(|p| p.id)
            .ok_or_else(|| CareError::BadRequest("no pets available".into()))?;
        self.adopt(actor, pet_id)
    }

    pub fn release(&self, actor: &Actor) -> Result<PetState, CareError> {
        let lock = self.actor_lock(actor.id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;
        let owned = self.my_pet(actor)?;
        let pet = self.with_pet(owned.id, |pet| {
            pet.owner_id = None;
            pet.clone()
        })?;
        log::info!("actor {} released pet {}", actor.id, pet.id);
        Ok(pet)
    }

    pub fn my_pet(&self, actor: &Actor) -> Result<PetState, CareError> {
        self.pets
            .find_by_owner(actor.id)?
            .ok_or_else(|| CareError::not_found("pet owned by actor", actor.id))
    }

    // ── Pet wardrobe ────────────────────────────────────────────────────

    pub fn attach_item(&self, pet_id: PetId, item: ItemRef) -> Result<PetState, CareError> {
        self.with_pet(pet_id, |pet| {
            let duplicate = pet
                .equipped_items
                .iter()
                .any(|i| i.id == item.id || i.name == item.name);
            if duplicate {
                return Err(CareError::Conflict(format!(
                    "{} is already attached to pet {}",
                    item.name, pet.id
                )));
            }
            pet.equipped_items.push(item);
            Ok(pet.clone())
        })?
    }

    pub fn detach_item(&self, pet_id: PetId, item_id: ItemId) -> Result<PetState, CareError> {
        self.with_pet(pet_id, |pet| {
            let index = pet
                .equipped_items
                .iter()
                .position(|i| i.id == item_id)
                .ok_or_else(|| CareError::not_found("attached item", item_id))?;
            pet.equipped_items.remove(index);
            Ok(pet.clone())
        })?
    }

    pub fn set_wardrobe(&self, pet_id: PetId, items: Vec<ItemRef>) -> Result<PetState, CareError> {
        self.with_pet(pet_id, |pet| {
            pet.equipped_items = items;
            pet.clone()
        })
    }

    // ── Inventory ───────────────────────────────────────────────────────

    pub fn inventory(&self, actor: &Actor) -> Result<Inventory, CareError> {
        Ok(self.inventories.load_inventory(actor.id)?)
    }

    /// Add stock of a catalog item to the actor's inventory.
    pub fn grant_item(
        &self,
        actor: &Actor,
        kind: ItemKind,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<Inventory, CareError> {
        if quantity == 0 {
            return Err(CareError::BadRequest("quantity must be at least 1".into()));
        }
        self.catalog_item(kind, item_id)?;
        let lock = self.actor_lock(actor.id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut inventory = self.inventories.load_inventory(actor.id)?;
        inventory.add(kind, item_id, quantity);
        self.inventories.save_inventory(&inventory)?;
        Ok(inventory)
    }

    pub fn use_food(&self, actor: &Actor, food_id: ItemId) -> Result<ItemUse, CareError> {
        self.consume(actor, ItemKind::Food, food_id)
    }

    pub fn use_medicine(&self, actor: &Actor, medicine_id: ItemId) -> Result<ItemUse, CareError> {
        self.consume(actor, ItemKind::Medicine, medicine_id)
    }

    /// Wear a held clothing item, displacing whatever occupied its slot.
    pub fn equip(&self, actor: &Actor, item_id: ItemId) -> Result<EquipOutcome, CareError> {
        let item = self.catalog_item(ItemKind::Clothing, item_id)?;
        let slot = item
            .slot
            .ok_or_else(|| CareError::BadRequest(format!("{} cannot be worn", item.name)))?;

        let lock = self.actor_lock(actor.id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut inventory = self.inventories.load_inventory(actor.id)?;
        if !inventory.holds(ItemKind::Clothing, item_id) {
            return Err(CareError::not_found("clothing in inventory", item_id));
        }
        let displaced = inventory.equip(slot, item_id);
        self.inventories.save_inventory(&inventory)?;

        let message = match displaced {
            Some(old) if old != item_id => format!("Equipped {} in {} (replaced item {})", item.name, slot, old),
            _ => format!("Equipped {} in {}", item.name, slot),
        };
        Ok(EquipOutcome {
            message,
            equipped: inventory.equipped,
        })
    }

    pub fn unequip(&self, actor: &Actor, slot: Slot) -> Result<EquipOutcome, CareError> {
        let lock = self.actor_lock(actor.id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut inventory = self.inventories.load_inventory(actor.id)?;
        let removed = inventory
            .unequip(slot)
            .ok_or_else(|| CareError::BadRequest(format!("nothing equipped in {slot}")))?;
        self.inventories.save_inventory(&inventory)?;
        Ok(EquipOutcome {
            message: format!("Unequipped item {} from {}", removed.item_id, slot),
            equipped: inventory.equipped,
        })
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn catalog_item(&self, kind: ItemKind, item_id: ItemId) -> Result<CatalogItem, CareError> {
        self.catalog
            .find_item(kind, item_id)
            .ok_or_else(|| CareError::not_found(kind_label(kind), item_id))
    }

    /// Shared path of `use_food` and `use_medicine`: check stock, apply
    /// the effects to the actor's pet, then spend one unit.
    fn consume(&self, actor: &Actor, kind: ItemKind, item_id: ItemId) -> Result<ItemUse, CareError> {
        let item = self.catalog_item(kind, item_id)?;
        let lock = self.actor_lock(actor.id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut inventory = self.inventories.load_inventory(actor.id)?;
        if !inventory.holds(kind, item_id) {
            return Err(CareError::InsufficientQuantity { item_id });
        }
        let owned = self.my_pet(actor)?;

        let (status, cured) = self.with_pet(owned.id, |pet| {
            let cured = match pet.illness {
                Some(illness) if item.cures_illness(Some(illness)) => {
                    pet.illness = None;
                    Some(illness)
                }
                _ => None,
            };
            item.effects.apply(&mut pet.welfare);
            (pet.status(), cured)
        })?;

        inventory
            .take_one(kind, item_id)
            .map_err(|_| CareError::InsufficientQuantity { item_id })?;
        self.inventories.save_inventory(&inventory)?;

        let message = match cured {
            Some(illness) => format!("{} used {} and cured {}", owned.name, item.name, illness),
            None => format!("{} used {}", owned.name, item.name),
        };
        log::debug!("actor {} used {} {}", actor.id, kind, item_id);
        Ok(ItemUse {
            message,
            effects: item.effects,
            inventory,
            welfare: status,
        })
    }

    /// Per-actor lock, created on first use.
    fn actor_lock(&self, actor: ActorId) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self.actor_locks.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(Arc::clone(locks.entry(actor).or_default()))
    }

    /// Run `f` against the stored pet under the store's lock and persist.
    fn with_pet<T>(&self, pet_id: PetId, f: impl FnOnce(&mut PetState) -> T) -> Result<T, CareError> {
        let mut f = Some(f);
        let mut out = None;
        let found = self.pets.modify_pet(pet_id, &mut |pet: &mut PetState| {
            if let Some(f) = f.take() {
                out = Some(f(pet));
            }
        })?;
        match (found, out) {
            (true, Some(value)) => Ok(value),
            _ => Err(CareError::not_found("pet", pet_id)),
        }
    }
}

fn kind_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Food => "food",
        ItemKind::Medicine => "medicine",
        ItemKind::Clothing => "clothing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petsim_logic::illness::Illness;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine_with_pet() -> PetEngine {
        let engine = PetEngine::in_memory().unwrap();
        engine
            .create_pet(NewPet {
                id: None,
                name: "Astro".into(),
                species: "dog".into(),
                power: "flight".into(),
            })
            .unwrap();
        engine
    }

    #[test]
    fn test_clock_carries_remainder() {
        let mut clock = DecayClock::new(Duration::from_secs(30));
        assert_eq!(clock.advance(20.0), 0);
        assert_eq!(clock.advance(20.0), 1);
        assert!((clock.pending_secs() - 10.0).abs() < 1e-9);
        assert_eq!(clock.advance(95.0), 3);
        assert_eq!(clock.advance(-5.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
    }

    #[test]
    fn test_clock_caps_catch_up() {
        let mut clock = DecayClock::new(Duration::from_secs(30));
        assert_eq!(clock.advance(1e18), MAX_CATCH_UP_TICKS);
        assert_eq!(clock.pending_secs(), 0.0);
        assert_eq!(clock.advance(45.0), 1);
    }

    #[test]
    fn test_update_runs_due_ticks() {
        let engine = engine_with_pet();
        assert_eq!(engine.update(10.0), 0);
        assert_eq!(engine.update(50.0), 2);
        assert_eq!(engine.pet_status(1).unwrap().hunger, 19);
    }

    #[test]
    fn test_care_missing_pet() {
        let engine = PetEngine::in_memory().unwrap();
        for action in CareAction::ALL {
            assert!(matches!(
                engine.care(99, action),
                Err(CareError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn test_care_for_own_needs_adoption() {
        let engine = engine_with_pet();
        let actor = Actor::user(3);
        assert!(matches!(
            engine.care_for_own(&actor, CareAction::Feed),
            Err(CareError::NotFound { .. })
        ));

        engine.adopt(&actor, 1).unwrap();
        let outcome = engine.care_for_own(&actor, CareAction::Feed).unwrap();
        assert_eq!(outcome.hunger, Some(12));
        assert_eq!(engine.pet_status(1).unwrap().hunger, 12);
    }

    #[test]
    fn test_create_assigns_max_plus_one() {
        let engine = engine_with_pet();
        let explicit = engine
            .create_pet(NewPet {
                id: Some(10),
                name: "Nube".into(),
                species: "cat".into(),
                power: "invisibility".into(),
            })
            .unwrap();
        assert_eq!(explicit.id, 10);

        let next = engine
            .create_pet(NewPet {
                id: None,
                name: "Rayo".into(),
                species: "parrot".into(),
                power: "speed".into(),
            })
            .unwrap();
        assert_eq!(next.id, 11);
    }

    #[test]
    fn test_create_rejects_blank_and_duplicate() {
        let engine = engine_with_pet();
        let blank = engine.create_pet(NewPet {
            id: None,
            name: " ".into(),
            species: "dog".into(),
            power: "flight".into(),
        });
        assert!(matches!(blank, Err(CareError::BadRequest(_))));

        let dup = engine.create_pet(NewPet {
            id: Some(1),
            name: "Again".into(),
            species: "dog".into(),
            power: "flight".into(),
        });
        assert!(matches!(dup, Err(CareError::Conflict(_))));
    }

    #[test]
    fn test_update_pet_fields() {
        let engine = engine_with_pet();
        let pet = engine
            .update_pet(
                1,
                PetPatch {
                    power: Some("telepathy".into()),
                    ..PetPatch::default()
                },
            )
            .unwrap();
        assert_eq!(pet.power, "telepathy");
        assert_eq!(pet.name, "Astro");
        assert!(matches!(
            engine.update_pet(7, PetPatch::default()),
            Err(CareError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_requires_admin() {
        let engine = engine_with_pet();
        assert!(matches!(
            engine.delete_pet(&Actor::user(1), 1),
            Err(CareError::Forbidden(_))
        ));
        engine.delete_pet(&Actor::admin(1), 1).unwrap();
        assert!(matches!(
            engine.delete_pet(&Actor::admin(1), 1),
            Err(CareError::NotFound { .. })
        ));
    }

    #[test]
    fn test_adopt_conflicts() {
        let engine = engine_with_pet();
        engine.seed_roster().unwrap();
        let alice = Actor::user(1);
        let bob = Actor::user(2);

        engine.adopt(&alice, 1).unwrap();
        assert!(matches!(engine.adopt(&bob, 1), Err(CareError::Conflict(_))));
        assert!(matches!(engine.adopt(&alice, 2), Err(CareError::Conflict(_))));
        assert!(matches!(engine.adopt(&bob, 999), Err(CareError::NotFound { .. })));
        assert_eq!(engine.my_pet(&alice).unwrap().id, 1);
    }

    #[test]
    fn test_adopt_random_only_available() {
        let engine = engine_with_pet();
        let mut rng = StdRng::seed_from_u64(7);
        let pet = engine.adopt_random(&Actor::user(1), &mut rng).unwrap();
        assert_eq!(pet.id, 1);
        assert!(matches!(
            engine.adopt_random(&Actor::user(2), &mut rng),
            Err(CareError::BadRequest(_))
        ));
    }

    #[test]
    fn test_release_frees_pet() {
        let engine = engine_with_pet();
        let actor = Actor::user(5);
        assert!(matches!(engine.release(&actor), Err(CareError::NotFound { .. })));
        engine.adopt(&actor, 1).unwrap();
        engine.release(&actor).unwrap();
        assert_eq!(engine.available_pets().unwrap().len(), 1);
    }

    #[test]
    fn test_wardrobe() {
        let engine = engine_with_pet();
        let cape = ItemRef {
            id: 3,
            name: "Hero cape".into(),
            description: String::new(),
        };
        engine.attach_item(1, cape.clone()).unwrap();
        assert!(matches!(
            engine.attach_item(1, cape),
            Err(CareError::Conflict(_))
        ));
        engine.detach_item(1, 3).unwrap();
        assert!(matches!(
            engine.detach_item(1, 3),
            Err(CareError::NotFound { .. })
        ));
        let pet = engine.set_wardrobe(1, Vec::new()).unwrap();
        assert!(pet.equipped_items.is_empty());
    }

    #[test]
    fn test_use_food_requires_stock_and_pet() {
        let engine = engine_with_pet();
        let actor = Actor::user(4);

        assert!(matches!(
            engine.use_food(&actor, 999),
            Err(CareError::NotFound { .. })
        ));
        assert!(matches!(
            engine.use_food(&actor, 1),
            Err(CareError::InsufficientQuantity { item_id: 1 })
        ));

        engine.grant_item(&actor, ItemKind::Food, 1, 1).unwrap();
        assert!(matches!(
            engine.use_food(&actor, 1),
            Err(CareError::NotFound { .. })
        ));
        assert_eq!(engine.inventory(&actor).unwrap().quantity(ItemKind::Food, 1), 1);

        engine.adopt(&actor, 1).unwrap();
        let used = engine.use_food(&actor, 1).unwrap();
        assert_eq!(used.welfare.hunger, 11);
        assert_eq!(used.welfare.happiness, 20);
        assert!(used.inventory.food.is_empty());
    }

    #[test]
    fn test_medicine_cures_only_matching() {
        let engine = engine_with_pet();
        let actor = Actor::user(4);
        engine.adopt(&actor, 1).unwrap();
        engine.pet_store()
            .modify_pet(1, &mut |pet: &mut PetState| pet.illness = Some(Illness::Flu))
            .unwrap();

        engine.grant_item(&actor, ItemKind::Medicine, 3, 1).unwrap();
        let aspirin = engine.use_medicine(&actor, 3).unwrap();
        assert_eq!(aspirin.welfare.illness, Some(Illness::Flu));

        engine.grant_item(&actor, ItemKind::Medicine, 2, 1).unwrap();
        let flu = engine.use_medicine(&actor, 2).unwrap();
        assert_eq!(flu.welfare.illness, None);
        assert!(flu.message.contains("cured"));
    }

    #[test]
    fn test_equip_and_unequip() {
        let engine = engine_with_pet();
        let actor = Actor::user(4);

        assert!(matches!(
            engine.equip(&actor, 1),
            Err(CareError::NotFound { .. })
        ));
        engine.grant_item(&actor, ItemKind::Clothing, 1, 1).unwrap();
        engine.grant_item(&actor, ItemKind::Clothing, 2, 1).unwrap();

        engine.equip(&actor, 1).unwrap();
        let out = engine.equip(&actor, 2).unwrap();
        assert_eq!(out.equipped, vec![EquippedSlot { slot: Slot::Headwear, item_id: 2 }]);

        let out = engine.unequip(&actor, Slot::Headwear).unwrap();
        assert!(out.equipped.is_empty());
        assert!(matches!(
            engine.unequip(&actor, Slot::Headwear),
            Err(CareError::BadRequest(_))
        ));
    }

    #[test]
    fn test_grant_validates() {
        let engine = PetEngine::in_memory().unwrap();
        let actor = Actor::user(1);
        assert!(matches!(
            engine.grant_item(&actor, ItemKind::Food, 1, 0),
            Err(CareError::BadRequest(_))
        ));
        assert!(matches!(
            engine.grant_item(&actor, ItemKind::Clothing, 77, 1),
            Err(CareError::NotFound { .. })
        ));
    }

    #[test]
    fn test_concurrent_use_food_spends_once() {
        let engine = engine_with_pet();
        let actor = Actor::user(4);
        engine.adopt(&actor, 1).unwrap();
        engine.grant_item(&actor, ItemKind::Food, 1, 1).unwrap();

        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| engine.use_food(&actor, 1)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, CareError::InsufficientQuantity { item_id: 1 })));
        assert_eq!(engine.pet_status(1).unwrap().hunger, 11);
        assert!(engine.inventory(&actor).unwrap().food.is_empty());
    }

    #[test]
    fn test_concurrent_adopt_same_actor() {
        let engine = PetEngine::in_memory().unwrap();
        engine.seed_roster().unwrap();
        let actor = Actor::user(9);

        let adopted: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (1..=8)
                .map(|pet_id| {
                    let engine = &engine;
                    s.spawn(move || engine.adopt(&actor, pet_id))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(adopted.iter().filter(|r| r.is_ok()).count(), 1);
        let owned: Vec<_> = engine
            .list_pets()
            .unwrap()
            .into_iter()
            .filter(|p| p.owner_id == Some(actor.id))
            .collect();
        assert_eq!(owned.len(), 1);
    }
}
