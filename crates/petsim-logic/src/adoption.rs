//! Adoption allocation and id assignment.

use rand::seq::SliceRandom;
use rand::Rng;

/// Stable pet identifier, assigned once at creation.
pub type PetId = u32;

/// Next free id: one past the highest existing id, or 1 for an empty roster.
pub fn next_pet_id(existing: impl IntoIterator<Item = PetId>) -> PetId {
    existing
        .into_iter()
        .max()
        .map(|max| max.saturating_add(1))
        .unwrap_or(1)
}

/// Pick one pet uniformly from candidates that are already known to be
/// unowned. `None` when there is nothing to adopt.
pub fn pick_available<'a, T, R: Rng + ?Sized>(available: &'a [T], rng: &mut R) -> Option<&'a T> {
    available.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_pet_id(Vec::new()), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        assert_eq!(next_pet_id([3, 9, 4]), 10);
    }

    #[test]
    fn test_pick_none_when_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [PetId; 0] = [];
        assert!(pick_available(&empty, &mut rng).is_none());
    }

    #[test]
    fn test_pick_always_from_candidates() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates = [4, 8, 15];
        for _ in 0..50 {
            let picked = pick_available(&candidates, &mut rng).copied();
            assert!(matches!(picked, Some(4 | 8 | 15)));
        }
    }
}
