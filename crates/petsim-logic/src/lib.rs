//! Pure pet welfare logic for PetSim.
//!
//! This crate contains the welfare state machine independent of any
//! storage, scheduler, or runtime. Functions take plain data and return
//! results, so they are unit-testable and shared by the engine crate and
//! the headless harness alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adoption`] | Pet id assignment, random pick among unowned pets |
//! | [`attributes`] | Bounded [0, 20] welfare attributes and clamp helpers |
//! | [`care`] | Feed / bathe / play / walk / cure transforms |
//! | [`constants`] | Bounds, decay steps, care amounts, illness thresholds |
//! | [`decay`] | Per-tick welfare loss plus global illness derivation |
//! | [`illness`] | Illness tags and the threshold derivation rule |
//! | [`inventory`] | Per-actor stacks and one-item-per-slot equipping |
//! | [`items`] | Catalog items, effects, clothing slots |
//! | [`roster`] | The 31-pet starting roster |

pub mod adoption;
pub mod attributes;
pub mod care;
pub mod constants;
pub mod decay;
pub mod illness;
pub mod inventory;
pub mod items;
pub mod roster;
