//! Balance configuration: the static tuning table injected at engine construction.
//!
//! Every section is `#[serde(default)]`, so a partial JSON document overrides
//! only the keys it names. Lookups for enemy, weapon or ability types missing
//! from their maps fall back to a documented default stat set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::PlayerStats;
use crate::enums::*;

/// Errors raised while loading a balance table. The simulation itself never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("balance table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid balance value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub viewport: ViewportBalance,
    pub waves: WaveBalance,
    pub enemies: HashMap<EnemyType, EnemyBalance>,
    pub weapons: HashMap<WeaponType, WeaponBalance>,
    /// Global multiplier applied to every weapon cooldown.
    pub weapon_cooldown_multiplier: f64,
    pub attacks: AttackBalance,
    pub abilities: HashMap<AbilityType, AbilityBalance>,
    pub ability_effects: AbilityEffects,
    pub drops: DropBalance,
    pub player: PlayerBalance,
    pub power_ups: PowerUpBalance,
}

/// Camera rectangle centered on the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportBalance {
    pub width: f64,
    pub height: f64,
}

impl ViewportBalance {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

impl Default for ViewportBalance {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Relative spawn weights for one wave tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeWeights {
    pub weak: f64,
    pub normal: f64,
    pub strong: f64,
    pub lazer: f64,
}

impl TypeWeights {
    pub fn weight(&self, kind: EnemyType) -> f64 {
        match kind {
            EnemyType::Weak => self.weak,
            EnemyType::Normal => self.normal,
            EnemyType::Strong => self.strong,
            EnemyType::Lazer => self.lazer,
        }
    }
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            weak: 0.6,
            normal: 0.4,
            strong: 0.0,
            lazer: 0.0,
        }
    }
}

/// Weights that apply from `from_wave` onward (until a later tier takes over).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeTier {
    pub from_wave: u32,
    pub weights: TypeWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveBalance {
    /// Target enemy count of wave 1.
    pub base_enemy_count: u32,
    /// Extra enemies per subsequent wave.
    pub enemies_per_wave: u32,
    /// Floor of the concurrent-alive cap.
    pub min_concurrent: u32,
    /// Concurrent-alive cap as a fraction of the wave target.
    pub concurrent_fraction: f64,
    /// Cap on concurrently alive Lazer enemies.
    pub max_concurrent_elites: u32,
    pub spawn_interval_secs: f64,
    pub spawn_interval_floor_secs: f64,
    /// Seconds shaved off the spawn interval per wave.
    pub spawn_interval_decay: f64,
    /// Fractional health growth per wave past the first.
    pub health_growth: f64,
    pub damage_growth: f64,
    pub speed_growth: f64,
    pub type_tiers: Vec<TypeTier>,
}

impl WaveBalance {
    pub fn target_count(&self, wave: u32) -> u32 {
        self.base_enemy_count + self.enemies_per_wave * wave.saturating_sub(1)
    }

    /// `max(min_concurrent, concurrent_fraction * target)`.
    pub fn concurrent_cap(&self, wave: u32) -> u32 {
        let scaled = (self.target_count(wave) as f64 * self.concurrent_fraction).floor() as u32;
        scaled.max(self.min_concurrent)
    }

    pub fn spawn_interval(&self, wave: u32) -> f64 {
        let shaved = self.spawn_interval_decay * wave.saturating_sub(1) as f64;
        (self.spawn_interval_secs - shaved).max(self.spawn_interval_floor_secs)
    }

    /// Multiplier for a stat growing linearly per wave.
    pub fn scale(growth: f64, wave: u32) -> f64 {
        1.0 + growth * wave.saturating_sub(1) as f64
    }

    pub fn weights_for(&self, wave: u32) -> TypeWeights {
        self.type_tiers
            .iter()
            .filter(|tier| tier.from_wave <= wave)
            .max_by_key(|tier| tier.from_wave)
            .map(|tier| tier.weights)
            .unwrap_or_default()
    }
}

impl Default for WaveBalance {
    fn default() -> Self {
        Self {
            base_enemy_count: 10,
            enemies_per_wave: 2,
            min_concurrent: 8,
            concurrent_fraction: 0.4,
            max_concurrent_elites: 2,
            spawn_interval_secs: 0.9,
            spawn_interval_floor_secs: 0.25,
            spawn_interval_decay: 0.05,
            health_growth: 0.15,
            damage_growth: 0.08,
            speed_growth: 0.02,
            type_tiers: vec![
                TypeTier {
                    from_wave: 1,
                    weights: TypeWeights {
                        weak: 0.7,
                        normal: 0.3,
                        strong: 0.0,
                        lazer: 0.0,
                    },
                },
                TypeTier {
                    from_wave: 3,
                    weights: TypeWeights {
                        weak: 0.5,
                        normal: 0.35,
                        strong: 0.15,
                        lazer: 0.0,
                    },
                },
                TypeTier {
                    from_wave: 6,
                    weights: TypeWeights {
                        weak: 0.4,
                        normal: 0.35,
                        strong: 0.17,
                        lazer: 0.08,
                    },
                },
                TypeTier {
                    from_wave: 10,
                    weights: TypeWeights {
                        weak: 0.3,
                        normal: 0.35,
                        strong: 0.22,
                        lazer: 0.13,
                    },
                },
            ],
        }
    }
}

/// Base stats of one enemy type at wave 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyBalance {
    pub health: f64,
    pub speed: f64,
    pub damage: f64,
    pub size: f64,
}

/// The fallback stat set for unknown enemy types (the Normal profile).
impl Default for EnemyBalance {
    fn default() -> Self {
        Self {
            health: 40.0,
            speed: 80.0,
            damage: 10.0,
            size: 18.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponBalance {
    pub base_damage: f64,
    pub base_cooldown: f64,
    pub range: f64,
    pub projectile_speed: f64,
    pub projectile_size: f64,
    /// `None` means unlimited (melee).
    pub max_ammo: Option<u32>,
}

/// The fallback stat set for unknown weapon types (the Pistol profile).
impl Default for WeaponBalance {
    fn default() -> Self {
        Self {
            base_damage: 12.0,
            base_cooldown: 0.4,
            range: 700.0,
            projectile_speed: 650.0,
            projectile_size: 5.0,
            max_ammo: Some(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalAttackBalance {
    pub range: f64,
    pub cooldown_secs: f64,
    pub projectile_speed: f64,
    pub projectile_size: f64,
    /// Angular gap between shots of one volley (radians).
    pub volley_spread: f64,
}

impl Default for NormalAttackBalance {
    fn default() -> Self {
        Self {
            range: 450.0,
            cooldown_secs: 2.0,
            projectile_speed: 260.0,
            projectile_size: 6.0,
            volley_spread: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrongAttackBalance {
    /// Range at which a charge may begin.
    pub range: f64,
    pub base_charge_secs: f64,
    /// Seconds of charge removed per wave past the first.
    pub charge_decay_per_wave: f64,
    pub min_charge_secs: f64,
    pub cooldown_secs: f64,
    pub projectile_speed: f64,
    pub projectile_size: f64,
    pub damage_multiplier: f64,
}

impl Default for StrongAttackBalance {
    fn default() -> Self {
        Self {
            range: 600.0,
            base_charge_secs: 2.0,
            charge_decay_per_wave: 0.08,
            min_charge_secs: 0.8,
            cooldown_secs: 3.0,
            projectile_speed: 700.0,
            projectile_size: 15.0,
            damage_multiplier: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazerAttackBalance {
    pub lightning_range: f64,
    pub lightning_cooldown_secs: f64,
    pub lightning_bounce_radius: f64,
    pub lightning_max_bounces: usize,
    /// Distance from any path segment that counts as a hit.
    pub lightning_hit_radius: f64,
    pub lightning_duration_secs: f64,
    pub lightning_damage_multiplier: f64,
    pub major_charge_secs: f64,
    pub major_windup_secs: f64,
    pub major_beam_secs: f64,
    pub major_personal_cooldown_secs: f64,
    /// Cross-enemy cooldown, set when any Lazer starts charging.
    pub major_global_cooldown_secs: f64,
    pub major_teleport_distance: f64,
    pub beam_half_width: f64,
    /// Energy beams deal no damage or knockback until this long after firing.
    pub beam_warmup_secs: f64,
    /// Beam damage per second as a multiple of enemy damage.
    pub beam_dps_multiplier: f64,
    /// Knockback speed applied to the player inside a beam (pixels per second).
    pub beam_knockback: f64,
    /// Which beam the major attack fires.
    pub major_beam_kind: BeamKind,
}

impl Default for LazerAttackBalance {
    fn default() -> Self {
        Self {
            lightning_range: 500.0,
            lightning_cooldown_secs: 2.5,
            lightning_bounce_radius: 220.0,
            lightning_max_bounces: 3,
            lightning_hit_radius: 18.0,
            lightning_duration_secs: 0.25,
            lightning_damage_multiplier: 0.8,
            major_charge_secs: 1.5,
            major_windup_secs: 0.6,
            major_beam_secs: 1.5,
            major_personal_cooldown_secs: 8.0,
            major_global_cooldown_secs: 5.0,
            major_teleport_distance: 350.0,
            beam_half_width: 24.0,
            beam_warmup_secs: 0.15,
            beam_dps_multiplier: 2.0,
            beam_knockback: 600.0,
            major_beam_kind: BeamKind::Energy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackBalance {
    pub normal: NormalAttackBalance,
    pub strong: StrongAttackBalance,
    pub lazer: LazerAttackBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityBalance {
    pub duration_secs: f64,
    pub cooldown_secs: f64,
}

/// The fallback timing for abilities missing from the table.
impl Default for AbilityBalance {
    fn default() -> Self {
        Self {
            duration_secs: 5.0,
            cooldown_secs: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityEffects {
    pub damage_boost_multiplier: f64,
    pub speed_boost_multiplier: f64,
    /// Enemy speed multiplier while TimeFreeze is active.
    pub freeze_multiplier: f64,
    pub fire_ring_radius: f64,
    /// How long a burn lasts after the enemy was last inside the ring.
    pub burn_duration_secs: f64,
    /// Burn damage is applied at most once per interval.
    pub burn_tick_secs: f64,
    pub burn_damage: f64,
}

impl Default for AbilityEffects {
    fn default() -> Self {
        Self {
            damage_boost_multiplier: 2.0,
            speed_boost_multiplier: 1.6,
            freeze_multiplier: 0.25,
            fire_ring_radius: 150.0,
            burn_duration_secs: 2.0,
            burn_tick_secs: 0.5,
            burn_damage: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropBalance {
    pub health_chance: f64,
    pub ammo_chance: f64,
    pub vest_chance: f64,
    pub health_restore: f64,
    pub ammo_restore: f64,
    pub vest_restore: f64,
    pub pickup_size: f64,
}

impl Default for DropBalance {
    fn default() -> Self {
        Self {
            health_chance: 0.08,
            ammo_chance: 0.12,
            vest_chance: 0.04,
            health_restore: 25.0,
            ammo_restore: 30.0,
            vest_restore: 25.0,
            pickup_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerBalance {
    pub max_health: f64,
    pub starting_armor: f64,
    pub movement_speed: f64,
    pub knockback: f64,
}

impl PlayerBalance {
    /// Fresh stats for a new session.
    pub fn initial_stats(&self) -> PlayerStats {
        PlayerStats {
            health: self.max_health,
            armor: self.starting_armor,
            max_health: self.max_health,
            movement_speed: self.movement_speed,
            damage_multiplier: 1.0,
            attack_speed: 1.0,
            projectile_size_multiplier: 1.0,
            knockback: self.knockback,
            cooldown_reduction: 0.0,
        }
    }
}

impl Default for PlayerBalance {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            starting_armor: 0.0,
            movement_speed: 220.0,
            knockback: 12.0,
        }
    }
}

/// Magnitude of each stat boost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpBalance {
    pub max_health: f64,
    pub damage: f64,
    pub attack_speed: f64,
    pub movement_speed: f64,
    pub projectile_size: f64,
    pub knockback: f64,
    pub cooldown_reduction: f64,
}

impl Default for PowerUpBalance {
    fn default() -> Self {
        Self {
            max_health: 20.0,
            damage: 0.15,
            attack_speed: 0.1,
            movement_speed: 0.08,
            projectile_size: 0.15,
            knockback: 6.0,
            cooldown_reduction: 0.08,
        }
    }
}

impl Default for BalanceConfig {
    fn default() -> Self {
        let enemies = HashMap::from([
            (
                EnemyType::Weak,
                EnemyBalance {
                    health: 20.0,
                    speed: 110.0,
                    damage: 8.0,
                    size: 14.0,
                },
            ),
            (EnemyType::Normal, EnemyBalance::default()),
            (
                EnemyType::Strong,
                EnemyBalance {
                    health: 150.0,
                    speed: 55.0,
                    damage: 20.0,
                    size: 30.0,
                },
            ),
            (
                EnemyType::Lazer,
                EnemyBalance {
                    health: 220.0,
                    speed: 60.0,
                    damage: 18.0,
                    size: 26.0,
                },
            ),
        ]);

        let weapons = HashMap::from([
            (WeaponType::Pistol, WeaponBalance::default()),
            (
                WeaponType::Shotgun,
                WeaponBalance {
                    base_damage: 10.0,
                    base_cooldown: 0.8,
                    range: 380.0,
                    projectile_speed: 600.0,
                    projectile_size: 5.0,
                    max_ammo: Some(48),
                },
            ),
            (
                WeaponType::Sword,
                WeaponBalance {
                    base_damage: 30.0,
                    base_cooldown: 0.6,
                    range: 60.0,
                    projectile_speed: 0.0,
                    projectile_size: 40.0,
                    max_ammo: None,
                },
            ),
            (
                WeaponType::Smg,
                WeaponBalance {
                    base_damage: 7.0,
                    base_cooldown: 0.12,
                    range: 550.0,
                    projectile_speed: 700.0,
                    projectile_size: 4.0,
                    max_ammo: Some(240),
                },
            ),
            (
                WeaponType::Sniper,
                WeaponBalance {
                    base_damage: 60.0,
                    base_cooldown: 1.4,
                    range: 1400.0,
                    projectile_speed: 1200.0,
                    projectile_size: 4.0,
                    max_ammo: Some(30),
                },
            ),
            (
                WeaponType::Minigun,
                WeaponBalance {
                    base_damage: 5.0,
                    base_cooldown: 0.06,
                    range: 500.0,
                    projectile_speed: 750.0,
                    projectile_size: 4.0,
                    max_ammo: Some(400),
                },
            ),
        ]);

        let abilities = HashMap::from([
            (
                AbilityType::Shield,
                AbilityBalance {
                    duration_secs: 4.0,
                    cooldown_secs: 20.0,
                },
            ),
            (
                AbilityType::DamageBoost,
                AbilityBalance {
                    duration_secs: 6.0,
                    cooldown_secs: 18.0,
                },
            ),
            (
                AbilityType::SpeedBoost,
                AbilityBalance {
                    duration_secs: 5.0,
                    cooldown_secs: 12.0,
                },
            ),
            (
                AbilityType::FireRing,
                AbilityBalance {
                    duration_secs: 6.0,
                    cooldown_secs: 22.0,
                },
            ),
            (
                AbilityType::TimeFreeze,
                AbilityBalance {
                    duration_secs: 3.0,
                    cooldown_secs: 25.0,
                },
            ),
        ]);

        Self {
            viewport: ViewportBalance::default(),
            waves: WaveBalance::default(),
            enemies,
            weapons,
            weapon_cooldown_multiplier: 1.0,
            attacks: AttackBalance::default(),
            abilities,
            ability_effects: AbilityEffects::default(),
            drops: DropBalance::default(),
            player: PlayerBalance::default(),
            power_ups: PowerUpBalance::default(),
        }
    }
}

impl BalanceConfig {
    /// Parse and validate a balance table from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BalanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        config.report_fallbacks();
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: format!(
                    "dimensions must be positive, got {}x{}",
                    self.viewport.width, self.viewport.height
                ),
            });
        }
        if self.weapon_cooldown_multiplier < 0.0 {
            return Err(ConfigError::Invalid {
                field: "weapon_cooldown_multiplier",
                reason: format!("must be >= 0, got {}", self.weapon_cooldown_multiplier),
            });
        }
        let chances = [
            ("drops.health_chance", self.drops.health_chance),
            ("drops.ammo_chance", self.drops.ammo_chance),
            ("drops.vest_chance", self.drops.vest_chance),
        ];
        for (field, chance) in chances {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("probability must be within [0, 1], got {chance}"),
                });
            }
        }
        if self.attacks.lazer.major_beam_kind == BeamKind::Lightning {
            return Err(ConfigError::Invalid {
                field: "attacks.lazer.major_beam_kind",
                reason: "the major attack fires an Energy or Laser beam".to_string(),
            });
        }
        Ok(())
    }

    fn report_fallbacks(&self) {
        for kind in EnemyType::ALL {
            if !self.enemies.contains_key(&kind) {
                log::warn!("balance: no entry for enemy {kind:?}, using default stats");
            }
        }
        for ability in AbilityType::ALL {
            if !self.abilities.contains_key(&ability) {
                log::warn!("balance: no entry for ability {ability:?}, using default timing");
            }
        }
    }

    /// Base stats for an enemy type, or the default stat set.
    pub fn enemy(&self, kind: EnemyType) -> EnemyBalance {
        self.enemies.get(&kind).copied().unwrap_or_default()
    }

    /// Balance entry for a weapon type, or the default stat set.
    pub fn weapon(&self, weapon_type: WeaponType) -> WeaponBalance {
        self.weapons.get(&weapon_type).copied().unwrap_or_default()
    }

    pub fn ability(&self, ability: AbilityType) -> AbilityBalance {
        self.abilities.get(&ability).copied().unwrap_or_default()
    }
}
