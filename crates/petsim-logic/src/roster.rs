//! Starting roster - the pets seeded into an empty store.

use crate::adoption::PetId;

/// Size of the seeded roster.
pub const ROSTER_SIZE: usize = 31;

const NAMES: [&str; ROSTER_SIZE] = [
    "Astro", "Nube", "Rayo", "Chispa", "Lila", "Draco", "Coco", "Kira", "Max", "Luna", "Rocky",
    "Simba", "Maya", "Thor", "Bella", "Zeus", "Sasha", "Toby", "Nala", "Milo", "Duna", "Leo",
    "Gala", "Odin", "Arya", "Rex", "Mia", "Loki", "Sol", "Tiza", "Neo",
];

const SPECIES: [&str; 5] = ["dog", "cat", "parrot", "rabbit", "turtle"];

const POWERS: [&str; 5] = [
    "flight",
    "invisibility",
    "super strength",
    "telepathy",
    "speed",
];

/// Descriptive fields for one seeded pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPet {
    pub id: PetId,
    pub name: &'static str,
    pub species: &'static str,
    pub power: &'static str,
}

/// The full starting roster, ids 1..=31, species and powers cycling.
pub fn seed_roster() -> Vec<SeedPet> {
    NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| SeedPet {
            id: i as PetId + 1,
            name,
            species: SPECIES[i % SPECIES.len()],
            power: POWERS[i % POWERS.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roster_size_and_ids() {
        let roster = seed_roster();
        assert_eq!(roster.len(), ROSTER_SIZE);
        assert_eq!(roster[0].id, 1);
        assert_eq!(roster[30].id, 31);
    }

    #[test]
    fn test_names_unique() {
        let roster = seed_roster();
        let names: HashSet<_> = roster.iter().map(|p| p.name).collect();
        assert_eq!(names.len(), ROSTER_SIZE);
    }

    #[test]
    fn test_species_cycle() {
        let roster = seed_roster();
        assert_eq!(roster[0].species, "dog");
        assert_eq!(roster[5].species, "dog");
        assert_eq!(roster[6].power, "invisibility");
    }
}
