//! Non-ECS simulation records: projectiles, beams, pickups, player and wave state.
//!
//! These live in plain collections owned by the engine or the enemy population,
//! not in the hecs world.

use serde::{Deserialize, Serialize};

use crate::constants::ARMOR_CAP;
use crate::enums::*;
use crate::types::{Position, Velocity};

/// Behaviour flags carried by a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileFlags {
    /// Survives hitting an enemy (player side) or an enemy projectile.
    pub piercing: bool,
    /// Single-pass melee hitbox.
    pub is_instant: bool,
    /// Steers toward the player every tick (enemy side).
    pub is_homing: bool,
    /// Cannot be shot down by player projectiles.
    pub indestructible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: ProjectileOwner,
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
    /// Collision radius.
    pub size: f64,
    pub flags: ProjectileFlags,
    /// Knockback applied to enemies on hit (player projectiles only).
    pub knockback: f64,
    /// Maximum travel distance before expiry.
    pub range: f64,
    /// Distance travelled so far.
    pub travelled: f64,
    /// Enemy ids already struck by a piercing projectile.
    #[serde(skip)]
    pub hit_enemies: Vec<u32>,
}

impl Projectile {
    pub fn has_hit(&self, enemy_id: u32) -> bool {
        self.hit_enemies.contains(&enemy_id)
    }
}

/// Beam geometry by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum BeamShape {
    /// Ordered polyline: enemy, bounce targets, player.
    Path { points: Vec<Position> },
    /// Ray from `origin` along `angle`.
    Ray { origin: Position, angle: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub kind: BeamKind,
    pub shape: BeamShape,
    pub started_at: f64,
    pub ends_at: f64,
    /// Lightning: per-hit damage. Energy/Laser: damage per second.
    pub damage: f64,
    pub owner_enemy: u32,
    /// Lightning only: the single hit has been spent.
    pub has_hit: bool,
}

impl Beam {
    pub fn is_live(&self, now: f64) -> bool {
        now >= self.started_at && now < self.ends_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub position: Position,
    pub restore: f64,
    pub size: f64,
    /// Bobbing animation phase (radians), advanced every tick.
    pub anim_phase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: f64,
    /// Blue health, drained before `health`.
    pub armor: f64,
    pub max_health: f64,
    pub movement_speed: f64,
    pub damage_multiplier: f64,
    pub attack_speed: f64,
    pub projectile_size_multiplier: f64,
    pub knockback: f64,
    /// Fraction in [0, MAX_COOLDOWN_REDUCTION].
    pub cooldown_reduction: f64,
}

impl PlayerStats {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage, draining armor first. Returns the amount actually absorbed.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 || self.is_dead() {
            return 0.0;
        }
        let from_armor = amount.min(self.armor);
        self.armor -= from_armor;
        let rest = amount - from_armor;
        let from_health = rest.min(self.health);
        self.health = (self.health - rest).max(0.0);
        from_armor + from_health
    }

    pub fn heal(&mut self, amount: f64) {
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
    }

    pub fn add_armor(&mut self, amount: f64) {
        self.armor = (self.armor + amount.max(0.0)).min(ARMOR_CAP);
    }
}

/// Timer record for one owned ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbilityState {
    pub ability: AbilityType,
    pub active_until: f64,
    pub cooldown_until: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    pub current_wave: u32,
    pub phase: WavePhase,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            current_wave: 1,
            phase: WavePhase::InProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub weapon_type: WeaponType,
    pub rarity: Rarity,
    pub base_damage: f64,
    /// Seconds between attacks before multipliers.
    pub base_cooldown: f64,
    pub range: f64,
}
