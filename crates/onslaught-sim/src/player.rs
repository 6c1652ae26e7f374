//! Player state: position, aim, stats and the damage entry point.

use onslaught_core::config::{BalanceConfig, PowerUpBalance};
use onslaught_core::constants::{MAX_COOLDOWN_REDUCTION, PLAYER_HIT_DEBOUNCE_SECS};
use onslaught_core::entities::PlayerStats;
use onslaught_core::enums::StatBoost;
use onslaught_core::events::AudioEvent;
use onslaught_core::types::Position;

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub position: Position,
    pub aim: Position,
    pub stats: PlayerStats,
    /// Last time an enemy projectile landed, for hit debouncing.
    last_projectile_hit_at: Option<f64>,
}

impl PlayerState {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            position: Position::default(),
            aim: Position::new(1.0, 0.0),
            stats: config.player.initial_stats(),
            last_projectile_hit_at: None,
        }
    }

    /// Route damage through the shield. Returns the amount absorbed by
    /// armor and health. `announce_block` emits `ShieldBlocked` for discrete hits.
    pub fn receive(
        &mut self,
        amount: f64,
        shield_active: bool,
        announce_block: bool,
        events: &mut Vec<AudioEvent>,
    ) -> f64 {
        if shield_active {
            if announce_block {
                events.push(AudioEvent::ShieldBlocked {
                    position: self.position,
                });
            }
            return 0.0;
        }
        self.stats.take_damage(amount)
    }

    /// Enemy projectile hit, debounced so one volley cannot stack in a frame.
    pub fn receive_projectile(
        &mut self,
        amount: f64,
        now: f64,
        shield_active: bool,
        events: &mut Vec<AudioEvent>,
    ) -> f64 {
        if shield_active {
            return self.receive(amount, true, true, events);
        }
        if self
            .last_projectile_hit_at
            .is_some_and(|at| now - at < PLAYER_HIT_DEBOUNCE_SECS)
        {
            return 0.0;
        }
        self.last_projectile_hit_at = Some(now);
        self.stats.take_damage(amount)
    }
}

/// Permanently apply a stat boost.
pub fn apply_stat_boost(stats: &mut PlayerStats, boost: StatBoost, balance: &PowerUpBalance) {
    match boost {
        StatBoost::MaxHealth => {
            stats.max_health += balance.max_health;
            stats.heal(balance.max_health);
        }
        StatBoost::Damage => stats.damage_multiplier += balance.damage,
        StatBoost::AttackSpeed => stats.attack_speed += balance.attack_speed,
        StatBoost::MovementSpeed => stats.movement_speed *= 1.0 + balance.movement_speed,
        StatBoost::ProjectileSize => stats.projectile_size_multiplier += balance.projectile_size,
        StatBoost::Knockback => stats.knockback += balance.knockback,
        StatBoost::CooldownReduction => {
            stats.cooldown_reduction =
                (stats.cooldown_reduction + balance.cooldown_reduction).min(MAX_COOLDOWN_REDUCTION);
        }
    }
}
