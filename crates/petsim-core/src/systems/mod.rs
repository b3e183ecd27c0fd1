//! Systems - logic that operates on components

mod decay;

pub use decay::*;
