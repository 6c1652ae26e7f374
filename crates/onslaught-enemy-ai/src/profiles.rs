//! Type-specific behavioural profiles and wave scaling.
//!
//! Consolidates per-type parameters for the enemy FSMs and spawn factories.

use onslaught_core::components::{EnemyStats, Vitals};
use onslaught_core::config::{BalanceConfig, StrongAttackBalance, WaveBalance};
use onslaught_core::constants::*;
use onslaught_core::enums::EnemyType;

/// Behavioural traits of an enemy type.
pub struct EnemyBehaviorProfile {
    /// Grants a shield aura to nearby non-Strong enemies.
    pub shield_aura: bool,
    /// Explodes on death or contact.
    pub explodes: bool,
    /// Splits into children on death.
    pub splits: bool,
    /// Deals continuous touch damage (non-exploding enemies).
    pub contact_damage: bool,
}

pub fn get_profile(kind: EnemyType) -> EnemyBehaviorProfile {
    match kind {
        EnemyType::Weak => EnemyBehaviorProfile {
            shield_aura: false,
            explodes: true,
            splits: false,
            contact_damage: false,
        },
        EnemyType::Normal => EnemyBehaviorProfile {
            shield_aura: false,
            explodes: false,
            splits: false,
            contact_damage: true,
        },
        EnemyType::Strong => EnemyBehaviorProfile {
            shield_aura: true,
            explodes: false,
            splits: true,
            contact_damage: true,
        },
        EnemyType::Lazer => EnemyBehaviorProfile {
            shield_aura: false,
            explodes: false,
            splits: false,
            contact_damage: true,
        },
    }
}

/// Wave-scaled vitals and stats for a freshly spawned enemy.
pub fn scaled_stats(config: &BalanceConfig, kind: EnemyType, wave: u32) -> (Vitals, EnemyStats) {
    let base = config.enemy(kind);
    let waves = &config.waves;
    let health = base.health * WaveBalance::scale(waves.health_growth, wave);
    (
        Vitals {
            health,
            max_health: health,
        },
        EnemyStats {
            speed: base.speed * WaveBalance::scale(waves.speed_growth, wave),
            damage: base.damage * WaveBalance::scale(waves.damage_growth, wave),
            size: base.size,
        },
    )
}

/// Stats of a split child spawned by a Strong enemy that died in `wave`.
///
/// Children derive from the wave-scaled Normal profile: 40% health,
/// 120% speed, 50% damage.
pub fn split_child_stats(config: &BalanceConfig, wave: u32) -> (Vitals, EnemyStats) {
    let (vitals, stats) = scaled_stats(config, EnemyType::Normal, wave);
    let health = vitals.max_health * SPLIT_HEALTH_FRACTION;
    (
        Vitals {
            health,
            max_health: health,
        },
        EnemyStats {
            speed: stats.speed * SPLIT_SPEED_FRACTION,
            damage: stats.damage * SPLIT_DAMAGE_FRACTION,
            size: stats.size * SPLIT_SIZE_FRACTION,
        },
    )
}

/// Normal-enemy volley size and homing probability by wave tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volley {
    pub shots: u32,
    pub homing_chance: f64,
}

pub fn normal_volley(wave: u32) -> Volley {
    match wave {
        0..=4 => Volley {
            shots: 1,
            homing_chance: 0.0,
        },
        5..=9 => Volley {
            shots: 2,
            homing_chance: 0.2,
        },
        _ => Volley {
            shots: 3,
            homing_chance: 0.35,
        },
    }
}

/// Strong charge duration: shrinks per wave to a floor, halved in berserker mode.
pub fn strong_charge_secs(balance: &StrongAttackBalance, wave: u32, berserk: bool) -> f64 {
    let shaved = balance.charge_decay_per_wave * wave.saturating_sub(1) as f64;
    let secs = (balance.base_charge_secs - shaved).max(balance.min_charge_secs);
    if berserk {
        secs / 2.0
    } else {
        secs
    }
}

pub fn strong_cooldown_secs(balance: &StrongAttackBalance, berserk: bool) -> f64 {
    if berserk {
        balance.cooldown_secs / 2.0
    } else {
        balance.cooldown_secs
    }
}

/// Effective collision radius including berserker growth.
pub fn effective_size(stats: &EnemyStats, berserk: bool) -> f64 {
    if berserk {
        stats.size * BERSERKER_SIZE_MULTIPLIER
    } else {
        stats.size
    }
}

/// Effective movement speed including berserker boost and the global freeze multiplier.
pub fn effective_speed(stats: &EnemyStats, berserk: bool, freeze_multiplier: f64) -> f64 {
    let boost = if berserk {
        BERSERKER_SPEED_MULTIPLIER
    } else {
        1.0
    };
    stats.speed * boost * freeze_multiplier
}
