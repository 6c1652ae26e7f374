//! Frame snapshot: the complete visible state handed to the renderer after each tick.

use serde::{Deserialize, Serialize};

use crate::components::{ChargePhase, MajorPhase};
use crate::entities::{ActiveAbilityState, Beam, Pickup, PlayerStats, Projectile, WaveState};
use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub lightning_beams: Vec<Beam>,
    pub energy_beams: Vec<Beam>,
    pub laser_beams: Vec<Beam>,
    pub health_pickups: Vec<Pickup>,
    pub ammo_pickups: Vec<Pickup>,
    pub vest_pickups: Vec<Pickup>,
    pub wave: WaveView,
    pub abilities: Vec<ActiveAbilityState>,
    /// Candidates on offer while the wave is in power-up selection.
    pub power_up_offer: Vec<PowerUp>,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyType,
    pub level: u32,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    /// Effective radius (berserker scaling applied).
    pub size: f64,
    pub shielded: bool,
    pub is_berserker: bool,
    pub is_split_enemy: bool,
    pub burning: bool,
    /// Strong only.
    pub charge: Option<ChargePhase>,
    /// Lazer only.
    pub major: Option<MajorPhase>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub aim: Position,
    pub stats: Option<PlayerStats>,
    pub weapon: Option<WeaponType>,
    /// `None` for unlimited-ammo weapons.
    pub ammo: Option<u32>,
    pub max_ammo: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub state: WaveState,
    pub target_count: u32,
    pub spawned_count: u32,
    pub alive_count: u32,
    pub kills: u32,
}
