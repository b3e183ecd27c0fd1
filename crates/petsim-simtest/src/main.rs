//! PetSim Headless Simulation Harness
//!
//! Drives the welfare rules and the engine end to end and prints a
//! pass/fail report. Runs entirely in-process with in-memory stores.
//!
//! Usage:
//!   cargo run -p petsim-simtest
//!   cargo run -p petsim-simtest -- --verbose

use std::sync::Arc;
use std::time::Duration;

use petsim_core::prelude::*;
use petsim_core::store::WorldStore;
use petsim_logic::attributes::Welfare;
use petsim_logic::constants::{ATTRIBUTE_MAX, ATTRIBUTE_MIN, DECAY_INTERVAL_SECS};
use petsim_logic::decay::ticks_until_starving;
use petsim_logic::illness::derive_illness;
use petsim_logic::roster::ROSTER_SIZE;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== PetSim Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Item catalog
    results.extend(validate_catalog(verbose));

    // 2. Illness derivation sweep
    results.extend(validate_illness_rules(verbose));

    // 3. Care actions
    results.extend(validate_care_actions(verbose));

    // 4. Long-run decay
    results.extend(validate_decay(verbose));

    // 5. Adoption
    results.extend(validate_adoption(verbose));

    // 6. Inventory & equip
    results.extend(validate_inventory(verbose));

    // 7. Snapshot persistence
    results.extend(validate_snapshot(verbose));

    // 8. Background scheduler
    results.extend(validate_scheduler(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn fresh_engine() -> Result<PetEngine, String> {
    let engine = PetEngine::in_memory().map_err(|e| e.to_string())?;
    engine.seed_roster().map_err(|e| e.to_string())?;
    Ok(engine)
}

fn setup_failure(name: &str, err: impl std::fmt::Display) -> Vec<TestResult> {
    vec![TestResult {
        name: name.into(),
        passed: false,
        detail: format!("setup failed: {}", err),
    }]
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Item Catalog ---");
    let mut results = Vec::new();

    let catalog = match StaticCatalog::builtin() {
        Ok(c) => c,
        Err(e) => return setup_failure("catalog_parse", e),
    };

    results.push(TestResult {
        name: "catalog_not_empty".into(),
        passed: !catalog.is_empty(),
        detail: format!("{} items loaded", catalog.len()),
    });

    let medicines = catalog.items(ItemKind::Medicine);
    let uncured: Vec<_> = Illness::ALL
        .iter()
        .filter(|i| !medicines.iter().any(|m| m.cures == Some(**i)))
        .collect();
    results.push(TestResult {
        name: "catalog_every_illness_curable".into(),
        passed: uncured.is_empty(),
        detail: if uncured.is_empty() {
            "every illness has a medicine".into()
        } else {
            format!("no medicine for {:?}", uncured)
        },
    });

    let clothing = catalog.items(ItemKind::Clothing);
    let unslotted = clothing.iter().filter(|c| c.slot.is_none()).count();
    results.push(TestResult {
        name: "catalog_clothing_slotted".into(),
        passed: unslotted == 0,
        detail: format!("{} clothing items, {} without slot", clothing.len(), unslotted),
    });

    if verbose {
        for kind in [ItemKind::Food, ItemKind::Medicine, ItemKind::Clothing] {
            println!("  {}:", kind);
            for item in catalog.items(kind) {
                println!("    #{} {}", item.id, item.name);
            }
        }
    }

    results
}

// ── 2. Illness Derivation ───────────────────────────────────────────────

fn validate_illness_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Illness Derivation ---");
    let mut results = Vec::new();

    // Exhaustive sweep of the 21^3 welfare space
    let mut mismatches = 0;
    let mut checked = 0;
    for hunger in ATTRIBUTE_MIN..=ATTRIBUTE_MAX {
        for happiness in ATTRIBUTE_MIN..=ATTRIBUTE_MAX {
            for cleanliness in ATTRIBUTE_MIN..=ATTRIBUTE_MAX {
                let w = Welfare::new(hunger, happiness, cleanliness);
                let expected = if hunger >= 20 {
                    Some(Illness::StomachAche)
                } else if cleanliness <= 2 {
                    Some(Illness::Flu)
                } else if happiness <= 2 {
                    Some(Illness::Headache)
                } else {
                    None
                };
                if derive_illness(&w) != expected {
                    mismatches += 1;
                }
                checked += 1;
            }
        }
    }
    results.push(TestResult {
        name: "illness_priority_sweep".into(),
        passed: mismatches == 0,
        detail: format!("{} states checked, {} mismatches", checked, mismatches),
    });

    let never_indigestion = (ATTRIBUTE_MIN..=ATTRIBUTE_MAX)
        .all(|v| derive_illness(&Welfare::new(v, v, v)) != Some(Illness::Indigestion));
    results.push(TestResult {
        name: "illness_indigestion_not_derived".into(),
        passed: never_indigestion,
        detail: "indigestion only comes from feeding".into(),
    });

    let ticks = ticks_until_starving(15);
    results.push(TestResult {
        name: "illness_starving_eta".into(),
        passed: ticks == 3,
        detail: format!(
            "fresh pet starves after {} ticks ({} s)",
            ticks,
            u64::from(ticks) * DECAY_INTERVAL_SECS
        ),
    });

    results
}

// ── 3. Care Actions ─────────────────────────────────────────────────────

fn validate_care_actions(verbose: bool) -> Vec<TestResult> {
    println!("--- Care Actions ---");
    let mut results = Vec::new();

    let engine = match fresh_engine() {
        Ok(e) => e,
        Err(e) => return setup_failure("care_setup", e),
    };

    // Feed, then three decay ticks
    let fed = engine.feed(1).map(|o| o.hunger);
    let mut trail = Vec::new();
    for _ in 0..3 {
        engine.decay_tick();
        if let Ok(s) = engine.pet_status(1) {
            trail.push((s.hunger, s.happiness, s.cleanliness));
        }
    }
    let final_illness = engine.pet_status(1).ok().and_then(|s| s.illness);
    results.push(TestResult {
        name: "care_feed_then_decay".into(),
        passed: matches!(fed, Ok(Some(12)))
            && trail == [(14, 18, 13), (16, 16, 11), (18, 14, 9)]
            && final_illness.is_none(),
        detail: format!("fed={:?} trail={:?} illness={:?}", fed, trail, final_illness),
    });

    // Cure is a no-op on a healthy pet, twice in a row
    let first = engine.cure(2).map(|o| o.message);
    let second = engine.cure(2).map(|o| o.message);
    let idempotent = matches!((&first, &second), (Ok(a), Ok(b)) if a == b);
    results.push(TestResult {
        name: "care_cure_idempotent".into(),
        passed: idempotent,
        detail: format!("{:?}", first),
    });

    // Feeding a pet with hunger 0 gives indigestion
    let mut hunger_trail = Vec::new();
    for _ in 0..6 {
        if let Ok(o) = engine.feed(3) {
            hunger_trail.push(o.hunger.unwrap_or(-1));
        }
    }
    let status = engine.pet_status(3);
    let indigestion = matches!(
        &status,
        Ok(s) if s.hunger == 0 && s.illness == Some(Illness::Indigestion)
    );
    results.push(TestResult {
        name: "care_overfeeding".into(),
        passed: indigestion,
        detail: format!("hunger trail {:?}", hunger_trail),
    });

    // Unknown pet
    let missing = engine.walk(9_999);
    results.push(TestResult {
        name: "care_unknown_pet".into(),
        passed: matches!(missing, Err(CareError::NotFound { .. })),
        detail: "walk on missing pet is NotFound".into(),
    });

    if verbose {
        for action in CareAction::ALL {
            if let Ok(o) = engine.care(4, action) {
                println!("  {}: {}", action, o.message);
            }
        }
    }

    results
}

// ── 4. Decay ────────────────────────────────────────────────────────────

fn validate_decay(verbose: bool) -> Vec<TestResult> {
    println!("--- Decay ---");
    let mut results = Vec::new();

    let engine = match fresh_engine() {
        Ok(e) => e,
        Err(e) => return setup_failure("decay_setup", e),
    };

    // One simulated hour in uneven frames
    let mut ticks = 0;
    let mut elapsed = 0.0;
    while elapsed < 3600.0 {
        ticks += engine.update(7.5);
        elapsed += 7.5;
    }
    results.push(TestResult {
        name: "decay_clock_ticks".into(),
        passed: ticks == 120,
        detail: format!("{} ticks in one hour", ticks),
    });

    let pets = engine.list_pets().unwrap_or_default();
    let out_of_range = pets
        .iter()
        .filter(|p| {
            let s = p.status();
            [s.hunger, s.happiness, s.cleanliness]
                .iter()
                .any(|v| !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(v))
        })
        .count();
    results.push(TestResult {
        name: "decay_bounds_hold".into(),
        passed: pets.len() == ROSTER_SIZE && out_of_range == 0,
        detail: format!("{} pets, {} out of range", pets.len(), out_of_range),
    });

    let all_stomach = pets
        .iter()
        .all(|p| p.illness == Some(Illness::StomachAche));
    results.push(TestResult {
        name: "decay_neglect_stomach_ache".into(),
        passed: all_stomach,
        detail: "starved, filthy and miserable pets report stomach-ache first".into(),
    });

    if verbose {
        if let Some(pet) = pets.first() {
            match serde_json::to_string(pet) {
                Ok(json) => println!("  sample: {}", json),
                Err(e) => println!("  sample unavailable: {}", e),
            }
        }
    }

    results
}

// ── 5. Adoption ─────────────────────────────────────────────────────────

fn validate_adoption(_verbose: bool) -> Vec<TestResult> {
    println!("--- Adoption ---");
    let mut results = Vec::new();

    let engine = match fresh_engine() {
        Ok(e) => e,
        Err(e) => return setup_failure("adoption_setup", e),
    };
    let mut rng = StdRng::seed_from_u64(2024);

    let mut adopted = 0;
    for actor_id in 1..=ROSTER_SIZE as u64 {
        if engine.adopt_random(&Actor::user(actor_id), &mut rng).is_ok() {
            adopted += 1;
        }
    }
    results.push(TestResult {
        name: "adoption_drains_roster".into(),
        passed: adopted == ROSTER_SIZE,
        detail: format!("{}/{} adopted", adopted, ROSTER_SIZE),
    });

    let extra = engine.adopt_random(&Actor::user(10_000), &mut rng);
    results.push(TestResult {
        name: "adoption_none_left".into(),
        passed: matches!(extra, Err(CareError::BadRequest(_))),
        detail: "random adoption with no pets left is rejected".into(),
    });

    let twice = engine.adopt(&Actor::user(1), 1);
    results.push(TestResult {
        name: "adoption_one_per_actor".into(),
        passed: matches!(twice, Err(CareError::Conflict(_))),
        detail: "second adoption by the same actor conflicts".into(),
    });

    let released = engine
        .release(&Actor::user(1))
        .and_then(|_| engine.available_pets());
    results.push(TestResult {
        name: "adoption_release".into(),
        passed: matches!(&released, Ok(v) if v.len() == 1),
        detail: "released pet becomes available".into(),
    });

    results
}

// ── 6. Inventory & Equip ────────────────────────────────────────────────

fn validate_inventory(verbose: bool) -> Vec<TestResult> {
    println!("--- Inventory & Equip ---");
    let mut results = Vec::new();

    let engine = match fresh_engine() {
        Ok(e) => e,
        Err(e) => return setup_failure("inventory_setup", e),
    };
    let actor = Actor::user(42);
    let setup = engine
        .adopt(&actor, 5)
        .and_then(|_| engine.grant_item(&actor, ItemKind::Food, 1, 1))
        .and_then(|_| engine.grant_item(&actor, ItemKind::Medicine, 4, 1))
        .and_then(|_| engine.grant_item(&actor, ItemKind::Clothing, 1, 1))
        .and_then(|_| engine.grant_item(&actor, ItemKind::Clothing, 2, 1));
    if let Err(e) = setup {
        return setup_failure("inventory_setup", e);
    }

    let used = engine.use_food(&actor, 1);
    let again = engine.use_food(&actor, 1);
    results.push(TestResult {
        name: "inventory_food_consumed".into(),
        passed: matches!(&used, Ok(u) if u.inventory.food.is_empty())
            && matches!(again, Err(CareError::InsufficientQuantity { .. })),
        detail: format!("{:?}", used.as_ref().map(|u| &u.message)),
    });

    // Overfeed into indigestion, then cure it with the matching medicine
    for _ in 0..6 {
        let _ = engine.feed(5);
    }
    let before = engine.pet_status(5).ok().and_then(|s| s.illness);
    let cured = engine.use_medicine(&actor, 4);
    results.push(TestResult {
        name: "inventory_medicine_cures".into(),
        passed: before == Some(Illness::Indigestion)
            && matches!(&cured, Ok(u) if u.welfare.illness.is_none()),
        detail: format!("before={:?}", before),
    });

    let first = engine.equip(&actor, 1);
    let second = engine.equip(&actor, 2);
    let headwear = second
        .as_ref()
        .map(|o| o.equipped.iter().filter(|e| e.slot == Slot::Headwear).count())
        .unwrap_or(0);
    results.push(TestResult {
        name: "inventory_slot_exclusive".into(),
        passed: first.is_ok() && headwear == 1,
        detail: format!("{} headwear item(s) after two equips", headwear),
    });

    let off = engine.unequip(&actor, Slot::Headwear);
    let off_again = engine.unequip(&actor, Slot::Headwear);
    results.push(TestResult {
        name: "inventory_unequip".into(),
        passed: off.is_ok() && matches!(off_again, Err(CareError::BadRequest(_))),
        detail: "second unequip of the same slot is rejected".into(),
    });

    if verbose {
        if let Ok(inv) = engine.inventory(&actor) {
            println!(
                "  actor {}: {} food, {} medicine, {} clothing stacks",
                actor.id,
                inv.food.len(),
                inv.medicine.len(),
                inv.clothing.len()
            );
        }
    }

    results
}

// ── 7. Snapshot ─────────────────────────────────────────────────────────

fn validate_snapshot(_verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshot Persistence ---");
    let mut results = Vec::new();

    let store = WorldStore::new();
    if let Err(e) = petsim_core::generation::seed_pets(&store) {
        return setup_failure("snapshot_setup", e);
    }
    let _ = store.decay_all();

    let mut bytes = Vec::new();
    let saved = store.save_snapshot(&mut bytes);
    let restored = WorldStore::new();
    let loaded = restored.load_snapshot(bytes.as_slice());

    let same = match (store.all_pets(), restored.all_pets()) {
        (Ok(mut a), Ok(mut b)) => {
            a.sort_by_key(|p| p.id);
            b.sort_by_key(|p| p.id);
            a == b
        }
        _ => false,
    };
    results.push(TestResult {
        name: "snapshot_roundtrip".into(),
        passed: saved.is_ok() && matches!(loaded, Ok(n) if n == ROSTER_SIZE) && same,
        detail: format!("{} bytes", bytes.len()),
    });

    let garbage = WorldStore::new().load_snapshot(&b"not a snapshot"[..]);
    results.push(TestResult {
        name: "snapshot_rejects_garbage".into(),
        passed: garbage.is_err(),
        detail: "corrupt snapshot is an error".into(),
    });

    results
}

// ── 8. Scheduler ────────────────────────────────────────────────────────

fn validate_scheduler(_verbose: bool) -> Vec<TestResult> {
    println!("--- Decay Scheduler ---");

    let engine = match fresh_engine() {
        Ok(e) => Arc::new(e),
        Err(e) => return setup_failure("scheduler_setup", e),
    };
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return setup_failure("scheduler_runtime", e),
    };

    let ticks = runtime.block_on(async {
        let scheduler = DecayScheduler::start(Arc::clone(&engine), Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(200)).await;
        scheduler.stop().await
    });
    let hunger = engine.pet_status(1).map(|s| s.hunger).unwrap_or(-1);

    vec![TestResult {
        name: "scheduler_ticks_at_start".into(),
        passed: ticks == 1 && hunger == 17,
        detail: format!("{} tick(s), pet 1 hunger {}", ticks, hunger),
    }]
}
