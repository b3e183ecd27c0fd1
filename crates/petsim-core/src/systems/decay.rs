//! Decay system - degrades every pet's welfare and re-derives illness

use crate::components::{Profile, Sickness};
use hecs::World;
use petsim_logic::attributes::Welfare;
use petsim_logic::care::Condition;
use petsim_logic::decay::apply_decay;
use petsim_logic::illness::Illness;

/// Apply one decay tick to every pet in the world. Returns how many pets
/// were decayed.
pub fn decay_system(world: &mut World) -> usize {
    let mut count = 0;
    for (_, (_, welfare, sickness)) in world.query_mut::<(&Profile, &mut Welfare, &mut Sickness)>() {
        let mut condition = Condition::new(*welfare, sickness.0);
        apply_decay(&mut condition);
        *welfare = condition.welfare;
        sickness.0 = condition.illness;
        count += 1;
    }
    count
}

/// Find pets that are currently sick
pub fn find_sick(world: &World) -> Vec<(hecs::Entity, Illness)> {
    let mut sick = Vec::new();

    for (entity, (_, sickness)) in world.query::<(&Profile, &Sickness)>().iter() {
        if let Some(illness) = sickness.0 {
            sick.push((entity, illness));
        }
    }

    sick
}
