//! Simulation engine for ONSLAUGHT.
//!
//! Owns the enemy population (a hecs world), the player, projectiles,
//! beams and pickups, runs the combat resolver once per host frame and
//! produces `FrameSnapshot`s for the renderer.

pub mod abilities;
pub mod battlefield;
pub mod engine;
pub mod geometry;
pub mod pickups;
pub mod player;
pub mod population;
pub mod projectiles;
pub mod systems;
pub mod waves;
pub mod weapons;

pub use onslaught_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
