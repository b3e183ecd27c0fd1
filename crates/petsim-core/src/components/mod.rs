//! Component definitions for the ECS pet store.
//!
//! Components are pure data structs attached to entities.
//! Welfare itself comes from `petsim_logic::attributes::Welfare`.

mod pet;

pub use pet::*;
