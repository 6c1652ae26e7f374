//! Events emitted by the simulation for audio and UI feedback.
//!
//! Events are collected during a tick and handed out with the snapshot.
//! Collaborators consume them fire-and-forget; nothing in the simulation
//! waits on them.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Player weapon fired.
    ProjectileFired { weapon_type: WeaponType },
    /// Strong enemy crossed the berserker threshold.
    BerserkerActivated { enemy_id: u32 },
    /// Strong enemy began winding up a charged shot.
    ChargeStarted { enemy_id: u32 },
    /// A charge ended (fired, or interrupted by death or relocation).
    ChargeStopped { enemy_id: u32 },
    ChargedShotFired { enemy_id: u32 },
    WeakEnemyExploded { position: Position },
    NormalEnemyDied { position: Position },
    /// A hit was absorbed by the player's shield or an enemy shield aura.
    ShieldBlocked { position: Position },
    EnemySplit { position: Position, children: u32 },
    LightningFired { enemy_id: u32 },
    MajorAttackCharging { enemy_id: u32 },
    MajorAttackFired { enemy_id: u32, kind: BeamKind },
    AbilityActivated { ability: AbilityType },
    PickupCollected { kind: PickupKind },
    WaveCompleted { wave: u32 },
    PlayerDied,
}
