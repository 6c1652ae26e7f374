//! ECS components for enemy entities.
//!
//! Components are plain data structs. Enemy behaviour lives in the
//! AI crate (pure transitions) and the population systems.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyType;
use crate::types::Position;

/// Identity of an enemy entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id handed to collaborators (never reused within a session).
    pub id: u32,
    pub kind: EnemyType,
    /// Wave number the enemy was spawned in.
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f64,
    pub max_health: f64,
}

/// Wave-scaled combat stats. Berserker multipliers are applied on top at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub speed: f64,
    pub damage: f64,
    /// Collision radius.
    pub size: f64,
}

/// Per-enemy transient flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyStatus {
    /// Recomputed every tick by the shield-aura pass.
    pub shielded: bool,
    /// One-way, Strong only.
    pub is_berserker: bool,
    /// Spawned by a Strong death. Never explodes or splits again.
    pub is_split_enemy: bool,
    /// Burn expires at this sim time; `None` when never ignited.
    pub burn_until: Option<f64>,
}

impl EnemyStatus {
    pub fn is_burning(&self, now: f64) -> bool {
        self.burn_until.is_some_and(|until| now < until)
    }
}

/// Normal-enemy ranged attack timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangedAttack {
    pub last_shot_at: Option<f64>,
}

/// Strong-enemy charged shot phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum ChargePhase {
    #[default]
    Idle,
    /// Winding up. `target` is the player position captured at `started_at`.
    Charging { started_at: f64, target: Position },
    Cooldown { until: f64 },
}

/// Strong-enemy charged shot state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargedShot {
    pub phase: ChargePhase,
}

/// Lazer major-attack sequence phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum MajorPhase {
    #[default]
    Idle,
    Charging { started_at: f64 },
    /// Teleported behind the player, waiting out the wind-up.
    WindUp { teleported_at: f64 },
    /// Beam live until `beam_until`.
    Firing { beam_until: f64 },
}

impl MajorPhase {
    /// True while the enemy holds (or should hold) the major-attack lock.
    pub fn is_active(&self) -> bool {
        !matches!(self, MajorPhase::Idle)
    }

    /// Stationary phases suppress steering.
    pub fn is_stationary(&self) -> bool {
        self.is_active()
    }
}

/// Lazer-enemy attack state: two independently gated tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LazerState {
    pub last_lightning_at: Option<f64>,
    pub major: MajorPhase,
    /// Personal post-attack cooldown expiry.
    pub personal_ready_at: f64,
}
