//! Enemy movement, stray relocation and shield auras.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::BalanceConfig;
use onslaught_core::constants::SHIELD_AURA_RADIUS;
use onslaught_core::enums::EnemyType;
use onslaught_core::events::AudioEvent;
use onslaught_core::types::Position;

use onslaught_enemy_ai::placement::{is_too_far, relocation_position};
use onslaught_enemy_ai::profiles::effective_speed;

use super::{MajorAttackArbiter, PopulationTick};

/// Steer every mobile enemy straight at the player. Charging Strongs and
/// Lazers mid-sequence hold position.
pub(super) fn run(world: &mut World, tick: &PopulationTick) {
    for (_entity, (pos, stats, status, shot, lazer)) in world.query_mut::<(
        &mut Position,
        &EnemyStats,
        &EnemyStatus,
        Option<&ChargedShot>,
        Option<&LazerState>,
    )>() {
        let charging = shot.is_some_and(|s| matches!(s.phase, ChargePhase::Charging { .. }));
        let sequencing = lazer.is_some_and(|l| l.major.is_stationary());
        if charging || sequencing {
            continue;
        }

        let distance = pos.distance_to(&tick.player);
        let step = effective_speed(stats, status.is_berserker, tick.freeze_multiplier) * tick.dt;
        let travel = step.min(distance);
        *pos = pos.offset(pos.direction_to(&tick.player) * travel);
    }
}

/// Move enemies that fell too far behind to just outside the viewport behind
/// the player, restarting their attack timers. Returns the relocated ids.
pub(super) fn relocate_strays(
    world: &mut World,
    config: &BalanceConfig,
    tick: &PopulationTick,
    rng: &mut ChaCha8Rng,
    arbiter: &mut MajorAttackArbiter,
    events: &mut Vec<AudioEvent>,
) -> Vec<u32> {
    let mut relocated = Vec::new();
    for (_entity, (enemy, pos, ranged, shot, lazer)) in world.query_mut::<(
        &Enemy,
        &mut Position,
        Option<&mut RangedAttack>,
        Option<&mut ChargedShot>,
        Option<&mut LazerState>,
    )>() {
        if !is_too_far(pos, &tick.player, &config.viewport) {
            continue;
        }
        *pos = relocation_position(rng, &tick.player, &tick.aim, &config.viewport);

        if let Some(ranged) = ranged {
            ranged.last_shot_at = Some(tick.now);
        }
        if let Some(shot) = shot {
            if matches!(shot.phase, ChargePhase::Charging { .. }) {
                events.push(AudioEvent::ChargeStopped { enemy_id: enemy.id });
            }
            shot.phase = ChargePhase::Idle;
        }
        if let Some(lazer) = lazer {
            lazer.last_lightning_at = Some(tick.now);
            lazer.major = MajorPhase::Idle;
            arbiter.release(enemy.id);
        }

        log::debug!("enemy {} relocated behind the player", enemy.id);
        relocated.push(enemy.id);
    }
    relocated
}

/// Recompute shield flags from scratch: a non-Strong enemy is shielded while
/// any Strong enemy is within the aura radius.
pub(super) fn refresh_shields(world: &mut World) {
    let emitters: Vec<Position> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| enemy.kind == EnemyType::Strong)
        .map(|(_, (_, pos))| *pos)
        .collect();

    let radius_sq = SHIELD_AURA_RADIUS * SHIELD_AURA_RADIUS;
    for (_entity, (enemy, pos, status)) in
        world.query_mut::<(&Enemy, &Position, &mut EnemyStatus)>()
    {
        status.shielded = enemy.kind != EnemyType::Strong
            && emitters
                .iter()
                .any(|emitter| pos.distance_squared_to(emitter) <= radius_sq);
    }
}
