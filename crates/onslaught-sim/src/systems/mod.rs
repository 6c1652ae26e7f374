//! Per-tick systems run by the engine in a fixed order.
//!
//! Systems are free functions over the `Battlefield`. They hold no state of
//! their own; timestamps they need across ticks are passed in and returned.

pub mod beams;
pub mod collection;
pub mod collision;
pub mod movement;
pub mod snapshot;
pub mod zones;
