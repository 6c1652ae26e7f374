//! Fire ring: ignites enemies around the player and applies burn damage
//! at a fixed interval.

use rand_chacha::ChaCha8Rng;

use onslaught_core::events::AudioEvent;

use crate::battlefield::{Battlefield, TickFrame};
use crate::population::EnemyHit;

/// Ignite while the ring is up, then burn every burning enemy at most once
/// per `burn_tick_secs`. Returns the updated last-burn timestamp.
pub fn run(
    field: &mut Battlefield,
    frame: &TickFrame,
    last_burn_at: Option<f64>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<AudioEvent>,
) -> Option<f64> {
    let effects = &frame.config.ability_effects;
    let player = field.player.position;

    if frame.fire_ring {
        field
            .population
            .ignite(player, effects.fire_ring_radius, frame.now + effects.burn_duration_secs);
    }

    let due = last_burn_at.map_or(true, |at| frame.now - at >= effects.burn_tick_secs);
    if !due {
        return last_burn_at;
    }
    let burning = field.population.burning_ids(frame.now);
    if burning.is_empty() {
        return last_burn_at;
    }

    for enemy_id in burning {
        let hit = EnemyHit {
            enemy_id,
            amount: effects.burn_damage,
            knockback: 0.0,
            source: player,
        };
        if let Some(outcome) = field.population.damage_enemy(hit, player, rng, events) {
            if outcome.killed {
                field.record_kill(&outcome, frame, true, rng, events);
            }
        }
    }
    Some(frame.now)
}
