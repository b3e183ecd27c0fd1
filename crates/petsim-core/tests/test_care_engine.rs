//! End-to-end checks of the engine against in-memory and flat-file stores.

use std::sync::Arc;
use std::time::Duration;

use petsim_core::prelude::*;
use petsim_core::store::{JsonInventoryStore, JsonPetStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded() -> PetEngine {
    let engine = PetEngine::in_memory().unwrap();
    engine.seed_roster().unwrap();
    engine
}

fn set_condition(engine: &PetEngine, id: u32, hunger: i32, happiness: i32, cleanliness: i32) {
    engine
        .pet_store()
        .modify_pet(id, &mut |pet: &mut PetState| {
            pet.welfare.hunger = hunger;
            pet.welfare.happiness = happiness;
            pet.welfare.cleanliness = cleanliness;
        })
        .unwrap();
}

#[test]
fn test_feed_then_three_ticks() {
    let engine = seeded();
    let fed = engine.feed(1).unwrap();
    assert_eq!(fed.hunger, Some(12));
    assert_eq!(engine.pet_status(1).unwrap().illness, None);

    let expected = [(14, 18, 13), (16, 16, 11), (18, 14, 9)];
    for (hunger, happiness, cleanliness) in expected {
        engine.decay_tick();
        let status = engine.pet_status(1).unwrap();
        assert_eq!(
            (status.hunger, status.happiness, status.cleanliness),
            (hunger, happiness, cleanliness)
        );
    }
    assert_eq!(engine.pet_status(1).unwrap().illness, None);
}

#[test]
fn test_attributes_stay_bounded_under_neglect() {
    let engine = seeded();
    for _ in 0..50 {
        engine.decay_tick();
    }
    for pet in engine.list_pets().unwrap() {
        let s = pet.status();
        for value in [s.hunger, s.happiness, s.cleanliness] {
            assert!((0..=20).contains(&value), "{} out of range: {:?}", pet.name, s);
        }
        assert_eq!(s.illness, Some(Illness::StomachAche));
    }
}

#[test]
fn test_decay_priority_stomach_ache_wins() {
    let engine = seeded();
    set_condition(&engine, 2, 18, 3, 3);
    engine.decay_tick();
    let status = engine.pet_status(2).unwrap();
    assert_eq!((status.hunger, status.happiness, status.cleanliness), (20, 1, 1));
    assert_eq!(status.illness, Some(Illness::StomachAche));
}

#[test]
fn test_cure_twice_is_harmless() {
    let engine = seeded();
    let first = engine.cure(3).unwrap();
    let second = engine.cure(3).unwrap();
    assert_eq!(first.message, second.message);
    assert!(first.cured_illness.is_none());
}

#[test]
fn test_feeding_full_pet_gives_indigestion() {
    let engine = seeded();
    set_condition(&engine, 4, 0, 20, 15);
    let out = engine.feed(4).unwrap();
    assert_eq!(out.hunger, Some(0));
    let status = engine.pet_status(4).unwrap();
    assert_eq!(status.hunger, 0);
    assert_eq!(status.illness, Some(Illness::Indigestion));
}

#[test]
fn test_bathe_clears_illness_despite_hunger() {
    let engine = seeded();
    set_condition(&engine, 5, 20, 10, 12);
    engine.decay_tick();
    assert_eq!(engine.pet_status(5).unwrap().illness, Some(Illness::StomachAche));

    engine.bathe(5).unwrap();
    let status = engine.pet_status(5).unwrap();
    assert_eq!(status.cleanliness, 15);
    assert_eq!(status.illness, None);
}

#[test]
fn test_two_headwear_items_leave_one() {
    let engine = seeded();
    let actor = Actor::user(10);
    engine.grant_item(&actor, ItemKind::Clothing, 1, 1).unwrap();
    engine.grant_item(&actor, ItemKind::Clothing, 2, 1).unwrap();
    engine.grant_item(&actor, ItemKind::Clothing, 3, 1).unwrap();

    engine.equip(&actor, 1).unwrap();
    engine.equip(&actor, 3).unwrap();
    let out = engine.equip(&actor, 2).unwrap();

    let headwear: Vec<_> = out
        .equipped
        .iter()
        .filter(|e| e.slot == Slot::Headwear)
        .collect();
    assert_eq!(headwear.len(), 1);
    assert_eq!(headwear[0].item_id, 2);
    assert_eq!(out.equipped.len(), 2);
}

#[test]
fn test_medicine_matching_and_not() {
    let engine = seeded();
    let actor = Actor::user(11);
    let mut rng = StdRng::seed_from_u64(3);
    let pet = engine.adopt_random(&actor, &mut rng).unwrap();

    set_condition(&engine, pet.id, 20, 10, 10);
    engine.decay_tick();
    assert_eq!(engine.pet_status(pet.id).unwrap().illness, Some(Illness::StomachAche));

    engine.grant_item(&actor, ItemKind::Medicine, 2, 1).unwrap();
    let wrong = engine.use_medicine(&actor, 2).unwrap();
    assert_eq!(wrong.welfare.illness, Some(Illness::StomachAche));

    engine.grant_item(&actor, ItemKind::Medicine, 1, 2).unwrap();
    let right = engine.use_medicine(&actor, 1).unwrap();
    assert_eq!(right.welfare.illness, None);
    assert_eq!(right.inventory.quantity(ItemKind::Medicine, 1), 1);
}

#[test]
fn test_adoption_drains_availability() {
    let engine = seeded();
    let total = engine.available_pets().unwrap().len();
    let mut rng = StdRng::seed_from_u64(9);
    for actor_id in 0..total as u64 {
        engine.adopt_random(&Actor::user(actor_id), &mut rng).unwrap();
    }
    assert!(engine.available_pets().unwrap().is_empty());
    assert!(matches!(
        engine.adopt_random(&Actor::user(999), &mut rng),
        Err(CareError::BadRequest(_))
    ));
}

#[test]
fn test_json_backend_persists_across_engines() {
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        PetEngine::new(
            Arc::new(JsonPetStore::in_dir(dir.path())),
            Arc::new(JsonInventoryStore::in_dir(dir.path())),
            Arc::new(StaticCatalog::builtin().unwrap()),
            Duration::from_secs(30),
        )
    };

    let first = build();
    first.seed_roster().unwrap();
    let actor = Actor::user(1);
    first.adopt(&actor, 7).unwrap();
    first.grant_item(&actor, ItemKind::Food, 2, 2).unwrap();
    first.decay_tick();

    let second = build();
    assert_eq!(second.my_pet(&actor).unwrap().id, 7);
    assert_eq!(second.pet_status(7).unwrap().hunger, 17);
    let used = second.use_food(&actor, 2).unwrap();
    assert_eq!(used.welfare.hunger, 15);
    assert_eq!(used.inventory.quantity(ItemKind::Food, 2), 1);
}

#[test]
fn test_from_config_seeds_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = SimConfig {
        storage: StorageBackend::Json,
        data_dir: dir.path().to_path_buf(),
        ..SimConfig::default()
    };
    let engine = PetEngine::from_config(&config).unwrap();
    assert_eq!(engine.list_pets().unwrap().len(), 31);
    assert!(dir.path().join("pets.json").exists());
}
