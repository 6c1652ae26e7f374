//! Player weapon: cooldown gating, ammo and the per-type attack patterns.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::config::{BalanceConfig, WeaponBalance};
use onslaught_core::constants::{MAX_COOLDOWN_REDUCTION, PLAYER_RADIUS};
use onslaught_core::entities::{PlayerStats, ProjectileFlags, Weapon};
use onslaught_core::enums::{Rarity, WeaponType};
use onslaught_core::types::{Position, Velocity};

use crate::projectiles::ProjectileSpec;

/// Angular offsets of the three shotgun pellets (radians).
const SHOTGUN_SPREAD: [f64; 3] = [-0.12, 0.0, 0.12];
/// Per-pellet damage fraction.
const SHOTGUN_PELLET_DAMAGE: f64 = 0.6;
const SMG_JITTER: f64 = 0.06;
const MINIGUN_JITTER: f64 = 0.18;

#[derive(Debug, Clone)]
pub struct WeaponSystem {
    weapon: Weapon,
    balance: WeaponBalance,
    cooldown_multiplier: f64,
    last_attack_at: Option<f64>,
    /// `None` for unlimited weapons.
    ammo: Option<u32>,
}

impl WeaponSystem {
    pub fn new(weapon_type: WeaponType, rarity: Rarity, config: &BalanceConfig) -> Self {
        let balance = config.weapon(weapon_type);
        Self {
            weapon: Weapon {
                weapon_type,
                rarity,
                base_damage: balance.base_damage,
                base_cooldown: balance.base_cooldown,
                range: balance.range,
            },
            balance,
            cooldown_multiplier: config.weapon_cooldown_multiplier,
            last_attack_at: None,
            ammo: balance.max_ammo,
        }
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn ammo(&self) -> Option<u32> {
        self.ammo
    }

    pub fn max_ammo(&self) -> Option<u32> {
        self.balance.max_ammo
    }

    /// Keep the rounds and cooldown of a replaced weapon of the same type.
    pub fn carry_over(&mut self, previous: &WeaponSystem) {
        if previous.weapon.weapon_type != self.weapon.weapon_type {
            return;
        }
        if let (Some(ammo), Some(rounds)) = (self.ammo.as_mut(), previous.ammo) {
            *ammo = rounds.min(*ammo);
        }
        self.last_attack_at = previous.last_attack_at;
    }

    /// Seconds between attacks:
    /// `base * global multiplier / attack_speed * (1 - reduction)`.
    pub fn cooldown(&self, cooldown_reduction: f64, attack_speed: f64) -> f64 {
        let reduction = cooldown_reduction.clamp(0.0, MAX_COOLDOWN_REDUCTION);
        let speed = if attack_speed > 0.0 { attack_speed } else { 1.0 };
        self.weapon.base_cooldown * self.cooldown_multiplier / speed * (1.0 - reduction)
    }

    /// Off cooldown and carrying ammo.
    pub fn can_attack(&self, now: f64, cooldown_reduction: f64, attack_speed: f64) -> bool {
        if self.ammo == Some(0) {
            return false;
        }
        match self.last_attack_at {
            Some(at) => now - at >= self.cooldown(cooldown_reduction, attack_speed),
            None => true,
        }
    }

    /// Refill ammo, capped at the weapon's maximum. No effect on unlimited weapons.
    pub fn restore_ammo(&mut self, amount: u32) {
        if let (Some(ammo), Some(max)) = (self.ammo.as_mut(), self.balance.max_ammo) {
            *ammo = ammo.saturating_add(amount).min(max);
        }
    }

    /// Fire toward `aim` if allowed. Returns the emitted projectiles (empty
    /// when gated). One attack consumes one round.
    pub fn attack(
        &mut self,
        now: f64,
        origin: Position,
        aim: Position,
        stats: &PlayerStats,
        rng: &mut ChaCha8Rng,
    ) -> Vec<ProjectileSpec> {
        if !self.can_attack(now, stats.cooldown_reduction, stats.attack_speed) {
            return Vec::new();
        }
        self.last_attack_at = Some(now);
        if let Some(ammo) = self.ammo.as_mut() {
            *ammo -= 1;
        }

        let angle = origin.angle_to(&aim);
        let base = ProjectileSpec {
            position: origin,
            velocity: Velocity::from_angle(angle, self.balance.projectile_speed),
            damage: self.weapon.base_damage * self.weapon.rarity.damage_multiplier() * stats.damage_multiplier,
            size: self.balance.projectile_size * stats.projectile_size_multiplier,
            flags: ProjectileFlags::default(),
            knockback: stats.knockback,
            range: self.weapon.range,
        };
        let speed = self.balance.projectile_speed;

        match self.weapon.weapon_type {
            WeaponType::Pistol => vec![base],
            WeaponType::Shotgun => SHOTGUN_SPREAD
                .iter()
                .map(|offset| ProjectileSpec {
                    velocity: Velocity::from_angle(angle + offset, speed),
                    damage: base.damage * SHOTGUN_PELLET_DAMAGE,
                    ..base
                })
                .collect(),
            WeaponType::Sword => {
                let reach = PLAYER_RADIUS + self.weapon.range / 2.0;
                vec![ProjectileSpec {
                    position: origin.offset(glam::DVec2::from_angle(angle) * reach),
                    velocity: Velocity::default(),
                    flags: ProjectileFlags {
                        piercing: true,
                        is_instant: true,
                        ..Default::default()
                    },
                    ..base
                }]
            }
            WeaponType::Smg => vec![ProjectileSpec {
                velocity: Velocity::from_angle(angle + rng.gen_range(-SMG_JITTER..=SMG_JITTER), speed),
                ..base
            }],
            WeaponType::Sniper => vec![ProjectileSpec {
                flags: ProjectileFlags {
                    piercing: true,
                    ..Default::default()
                },
                ..base
            }],
            WeaponType::Minigun => vec![ProjectileSpec {
                velocity: Velocity::from_angle(
                    angle + rng.gen_range(-MINIGUN_JITTER..=MINIGUN_JITTER),
                    speed,
                ),
                ..base
            }],
        }
    }
}
