//! Inputs from the host: per-tick input and queued player commands.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::constants::DT;
use crate::enums::*;
use crate::types::Position;

/// Ability activation requests for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityTriggers {
    pub shield: bool,
    pub damage_boost: bool,
    pub speed_boost: bool,
    pub fire_ring: bool,
    pub time_freeze: bool,
}

impl AbilityTriggers {
    /// Abilities requested this tick, in archetype order.
    pub fn requested(&self) -> impl Iterator<Item = AbilityType> + '_ {
        AbilityType::ALL.into_iter().filter(|ability| match ability {
            AbilityType::Shield => self.shield,
            AbilityType::DamageBoost => self.damage_boost,
            AbilityType::SpeedBoost => self.speed_boost,
            AbilityType::FireRing => self.fire_ring,
            AbilityType::TimeFreeze => self.time_freeze,
        })
    }
}

/// Everything the host feeds into one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Seconds since the previous tick. Clamped to `[0, MAX_DT]`.
    pub dt: f64,
    /// Authoritative player position from the host, if it tracks one.
    pub player_position: Option<Position>,
    /// World position the player is aiming at.
    pub aim: Position,
    /// Movement direction; normalized before use, zero means standing still.
    pub movement: (f64, f64),
    pub abilities: AbilityTriggers,
    /// Fire the equipped weapon when off cooldown.
    pub firing: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            dt: DT,
            player_position: None,
            aim: Position::new(1.0, 0.0),
            movement: (0.0, 0.0),
            abilities: AbilityTriggers::default(),
            firing: false,
        }
    }
}

/// Discrete player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Reset the session and start wave 1.
    StartGame,
    /// Leave a completed wave for the power-up screen.
    ContinueWave,
    /// Pick one of the offered power-ups and start the next wave.
    SelectPowerUp { index: usize },
    EquipWeapon {
        weapon_type: WeaponType,
        rarity: Rarity,
    },
    Pause,
    Resume,
}
