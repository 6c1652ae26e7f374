//! Enemy AI for ONSLAUGHT.
//!
//! Implements the enemy attack state machines, type profiles with wave
//! scaling, and spawn placement around the player's viewport.

pub mod fsm;
pub mod placement;
pub mod profiles;

pub use onslaught_core as core;
