//! Welfare constants - attribute bounds, decay steps, care amounts, thresholds.
//!
//! These are plain `i32` constants with no storage dependency.
//! Both the engine crate and the simtest harness use these.

/// Lowest value any welfare attribute can hold.
pub const ATTRIBUTE_MIN: i32 = 0;

/// Highest value any welfare attribute can hold.
pub const ATTRIBUTE_MAX: i32 = 20;

/// Default period between decay ticks, in seconds.
pub const DECAY_INTERVAL_SECS: u64 = 30;

pub mod decay {
    pub const HUNGER_GAIN: i32 = 2;
    pub const HAPPINESS_LOSS: i32 = 2;
    pub const CLEANLINESS_LOSS: i32 = 2;
}

pub mod care {
    // Feed
    pub const FEED_HUNGER_LOSS: i32 = 3;
    // Bathe
    pub const BATHE_CLEANLINESS_GAIN: i32 = 5;
    // Play
    pub const PLAY_HAPPINESS_GAIN: i32 = 4;
    pub const PLAY_HUNGER_GAIN: i32 = 1;
    // Walk
    pub const WALK_HAPPINESS_GAIN: i32 = 3;
    pub const WALK_CLEANLINESS_LOSS: i32 = 2;
    pub const WALK_HUNGER_GAIN: i32 = 2;
}

pub mod thresholds {
    /// Hunger at or above this derives a stomach ache.
    pub const STARVING: i32 = 20;
    /// Cleanliness at or below this derives the flu.
    pub const FILTHY: i32 = 2;
    /// Happiness at or below this derives a headache.
    pub const MISERABLE: i32 = 2;
    /// Feeding below this hunger clears illness.
    pub const SATED: i32 = 5;
    /// Bathing to this cleanliness clears illness.
    pub const SPOTLESS: i32 = 15;
    /// Playing or walking to this happiness clears illness.
    pub const JOYFUL: i32 = 15;
}

pub mod initial {
    pub const HUNGER: i32 = 15;
    pub const HAPPINESS: i32 = 20;
    pub const CLEANLINESS: i32 = 15;
}
