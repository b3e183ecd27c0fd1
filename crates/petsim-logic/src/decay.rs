//! Decay - the timer-driven welfare loss applied to every pet each tick.

use crate::attributes::{decrease, increase};
use crate::care::Condition;
use crate::constants::decay;
use crate::illness::derive_illness;

/// One decay step: hunger +2, happiness -2, cleanliness -2, then the
/// illness is overwritten with the global derivation of the new values.
///
/// The overwrite is unconditional: a pet cured this tick falls sick again
/// if its thresholds are still breached.
pub fn apply_decay(condition: &mut Condition) {
    let w = &mut condition.welfare;
    w.hunger = increase(w.hunger, decay::HUNGER_GAIN);
    w.happiness = decrease(w.happiness, decay::HAPPINESS_LOSS);
    w.cleanliness = decrease(w.cleanliness, decay::CLEANLINESS_LOSS);
    condition.illness = derive_illness(w);
}

/// Number of ticks until hunger alone derives a stomach ache.
pub fn ticks_until_starving(hunger: i32) -> u32 {
    let remaining = crate::constants::thresholds::STARVING.saturating_sub(hunger);
    if remaining <= 0 {
        0
    } else {
        (remaining as u32).div_ceil(decay::HUNGER_GAIN as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Welfare;
    use crate::illness::Illness;

    #[test]
    fn test_single_tick() {
        let mut c = Condition::new(Welfare::new(12, 20, 15), None);
        apply_decay(&mut c);
        assert_eq!(c.welfare, Welfare::new(14, 18, 13));
        assert_eq!(c.illness, None);
    }

    #[test]
    fn test_tick_rederives_after_cure() {
        let mut c = Condition::new(Welfare::new(19, 10, 10), None);
        apply_decay(&mut c);
        assert_eq!(c.illness, Some(Illness::StomachAche));
    }

    #[test]
    fn test_tick_clears_indigestion() {
        let mut c = Condition::new(Welfare::new(0, 10, 10), Some(Illness::Indigestion));
        apply_decay(&mut c);
        assert_eq!(c.welfare.hunger, 2);
        assert_eq!(c.illness, None);
    }

    #[test]
    fn test_saturates_at_bounds() {
        let mut c = Condition::new(Welfare::new(20, 0, 1), None);
        apply_decay(&mut c);
        assert_eq!(c.welfare, Welfare::new(20, 0, 0));
        assert_eq!(c.illness, Some(Illness::StomachAche));
    }

    #[test]
    fn test_ticks_until_starving() {
        assert_eq!(ticks_until_starving(20), 0);
        assert_eq!(ticks_until_starving(19), 1);
        assert_eq!(ticks_until_starving(15), 3);
        assert_eq!(ticks_until_starving(0), 10);
        assert_eq!(ticks_until_starving(i32::MIN), (i32::MAX as u32).div_ceil(2));
        assert_eq!(ticks_until_starving(i32::MAX), 0);
    }
}
