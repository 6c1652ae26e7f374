//! Mutable combat state shared by the per-tick systems.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use onslaught_core::config::BalanceConfig;
use onslaught_core::enums::{AbilityType, Rarity, WeaponType};
use onslaught_core::events::AudioEvent;

use crate::abilities::AbilityController;
use crate::pickups::PickupField;
use crate::player::PlayerState;
use crate::population::{DamageOutcome, EnemyPopulation};
use crate::projectiles::ProjectileStore;
use crate::weapons::WeaponSystem;

/// Everything a tick mutates besides the clock, RNG and event buffer.
pub struct Battlefield {
    pub player: PlayerState,
    pub weapon: WeaponSystem,
    pub population: EnemyPopulation,
    pub projectiles: ProjectileStore,
    pub pickups: PickupField,
    pub kills: u32,
}

impl Battlefield {
    pub fn new(config: &Arc<BalanceConfig>) -> Self {
        Self {
            player: PlayerState::new(config),
            weapon: WeaponSystem::new(WeaponType::default(), Rarity::default(), config),
            population: EnemyPopulation::new(Arc::clone(config)),
            projectiles: ProjectileStore::default(),
            pickups: PickupField::default(),
            kills: 0,
        }
    }

    /// Book a kill: count it, optionally roll drops, and apply a Weak
    /// explosion to the player.
    pub fn record_kill(
        &mut self,
        outcome: &DamageOutcome,
        frame: &TickFrame,
        roll_drops: bool,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<AudioEvent>,
    ) {
        self.kills += 1;
        if roll_drops {
            self.pickups.roll_drops(rng, &frame.config.drops, outcome.position);
        }
        if outcome.explosion_damage > 0.0 {
            self.player
                .receive(outcome.explosion_damage, frame.shield, true, events);
        }
    }
}

/// Per-tick values every system reads: the clock and the ability effects in force.
pub struct TickFrame<'a> {
    pub now: f64,
    pub dt: f64,
    pub config: &'a BalanceConfig,
    pub shield: bool,
    /// Multiplier on player projectile damage.
    pub damage_multiplier: f64,
    /// Multiplier on player movement speed.
    pub speed_multiplier: f64,
    /// Multiplier on enemy movement speed.
    pub freeze_multiplier: f64,
    pub fire_ring: bool,
}

impl<'a> TickFrame<'a> {
    pub fn new(now: f64, dt: f64, config: &'a BalanceConfig, abilities: &AbilityController) -> Self {
        let effects = &config.ability_effects;
        let active = |ability| abilities.is_active(ability, now);
        Self {
            now,
            dt,
            config,
            shield: active(AbilityType::Shield),
            damage_multiplier: if active(AbilityType::DamageBoost) {
                effects.damage_boost_multiplier
            } else {
                1.0
            },
            speed_multiplier: if active(AbilityType::SpeedBoost) {
                effects.speed_boost_multiplier
            } else {
                1.0
            },
            freeze_multiplier: if active(AbilityType::TimeFreeze) {
                effects.freeze_multiplier
            } else {
                1.0
            },
            fire_ring: active(AbilityType::FireRing),
        }
    }
}
