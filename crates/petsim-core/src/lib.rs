//! PetSim Core - Virtual Pet Welfare Engine
//!
//! Pets whose hunger, happiness and cleanliness drift on a timer and are
//! restored by care actions and inventory items.
//!
//! # Architecture
//!
//! Pets live in an Entity Component System world via `hecs`:
//! - **Entities**: one per pet
//! - **Components**: `Profile`, `Welfare`, `Sickness`, `Owner`, `Wardrobe`
//! - **Systems**: the decay pass queries and updates welfare in place
//!
//! Everything request-driven goes through [`engine::PetEngine`], which
//! only talks to storage via the [`store::PetStore`] and
//! [`store::InventoryStore`] traits. The pure welfare rules live in
//! `petsim_logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use petsim_core::prelude::*;
//!
//! let engine = PetEngine::from_config(&SimConfig::default()).unwrap();
//! let alice = Actor::user(1);
//! let pet = engine.adopt(&alice, 1).unwrap();
//! engine.feed(pet.id).unwrap();
//!
//! // Drive decay deterministically: two 30 s intervals elapse.
//! engine.update(60.0);
//! ```

pub mod catalog;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod persistence;
pub mod scheduler;
pub mod store;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::{Catalog, StaticCatalog};
    pub use crate::components::*;
    pub use crate::config::{SimConfig, StorageBackend};
    pub use crate::engine::{Actor, DecayClock, EquipOutcome, ItemUse, PetEngine, Role};
    pub use crate::error::{CareError, ConfigError, StoreError};
    pub use crate::scheduler::DecayScheduler;
    pub use crate::store::{DecayReport, InventoryStore, PetStore};
    pub use petsim_logic::care::{CareAction, CareOutcome};
    pub use petsim_logic::illness::Illness;
    pub use petsim_logic::items::{ItemKind, Slot};
}
