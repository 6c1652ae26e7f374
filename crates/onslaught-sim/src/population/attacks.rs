//! Enemy attack emitters: Normal volleys, Strong charged shots, Lazer
//! lightning and major attacks.
//!
//! Each runs the matching AI transition per enemy and turns the resulting
//! action into projectile specs, beams and events.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::BalanceConfig;
use onslaught_core::entities::{Beam, BeamShape, ProjectileFlags};
use onslaught_core::enums::{BeamKind, EnemyType};
use onslaught_core::events::AudioEvent;
use onslaught_core::types::{Position, Velocity};

use onslaught_enemy_ai::fsm::*;
use onslaught_enemy_ai::placement::{behind_player, in_viewport};
use onslaught_enemy_ai::profiles::{normal_volley, strong_charge_secs, strong_cooldown_secs};

use super::{MajorAttackArbiter, PopulationTick};
use crate::projectiles::ProjectileSpec;

/// Normal enemies fire a fanned volley once per cooldown while in range.
pub(super) fn run_normal(
    world: &mut World,
    config: &BalanceConfig,
    tick: &PopulationTick,
    rng: &mut ChaCha8Rng,
    shots: &mut Vec<ProjectileSpec>,
) {
    let balance = &config.attacks.normal;
    for (_entity, (enemy, pos, stats, ranged)) in
        world.query_mut::<(&Enemy, &Position, &EnemyStats, &mut RangedAttack)>()
    {
        let distance = pos.distance_to(&tick.player);
        if !attack_ready(ranged.last_shot_at, tick.now, balance.cooldown_secs, distance, balance.range) {
            continue;
        }
        ranged.last_shot_at = Some(tick.now);

        let volley = normal_volley(enemy.level);
        let aim = pos.angle_to(&tick.player);
        let center = (volley.shots as f64 - 1.0) / 2.0;
        for i in 0..volley.shots {
            let angle = aim + (i as f64 - center) * balance.volley_spread;
            shots.push(ProjectileSpec {
                position: *pos,
                velocity: Velocity::from_angle(angle, balance.projectile_speed),
                damage: stats.damage,
                size: balance.projectile_size,
                flags: ProjectileFlags {
                    is_homing: rng.gen_bool(volley.homing_chance),
                    ..Default::default()
                },
                knockback: 0.0,
                range: balance.range * 2.0,
            });
        }
    }
}

/// Strong enemies charge, then release an indestructible shot at the
/// position captured when the charge began.
pub(super) fn run_strong(
    world: &mut World,
    config: &BalanceConfig,
    tick: &PopulationTick,
    shots: &mut Vec<ProjectileSpec>,
    events: &mut Vec<AudioEvent>,
) {
    let balance = &config.attacks.strong;
    for (_entity, (enemy, pos, stats, status, shot)) in world
        .query_mut::<(&Enemy, &Position, &EnemyStats, &EnemyStatus, &mut ChargedShot)>()
    {
        let update = evaluate_strong(&StrongContext {
            phase: shot.phase,
            now: tick.now,
            position: *pos,
            player: tick.player,
            charge_secs: strong_charge_secs(balance, enemy.level, status.is_berserker),
            cooldown_secs: strong_cooldown_secs(balance, status.is_berserker),
            range: balance.range,
        });
        shot.phase = update.new_phase;

        match update.action {
            StrongAction::None => {}
            StrongAction::StartCharge => {
                events.push(AudioEvent::ChargeStarted { enemy_id: enemy.id });
            }
            StrongAction::Fire { target } => {
                shots.push(ProjectileSpec {
                    position: *pos,
                    velocity: Velocity::from_angle(pos.angle_to(&target), balance.projectile_speed),
                    damage: stats.damage * balance.damage_multiplier,
                    size: balance.projectile_size,
                    flags: ProjectileFlags {
                        indestructible: true,
                        ..Default::default()
                    },
                    knockback: 0.0,
                    range: balance.range * 3.0,
                });
                events.push(AudioEvent::ChargedShotFired { enemy_id: enemy.id });
                events.push(AudioEvent::ChargeStopped { enemy_id: enemy.id });
            }
        }
    }
}

/// Lazer enemies run two tracks: chained lightning on its own cooldown, and
/// the major attack sequence gated by the shared arbiter.
pub(super) fn run_lazer(
    world: &mut World,
    config: &BalanceConfig,
    tick: &PopulationTick,
    arbiter: &mut MajorAttackArbiter,
    beams: &mut Vec<Beam>,
    next_beam_id: &mut u32,
    events: &mut Vec<AudioEvent>,
) {
    let balance = &config.attacks.lazer;

    // Bounce candidates: every non-Lazer enemy, read before any Lazer moves.
    let candidates: Vec<(u32, Position)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| enemy.kind != EnemyType::Lazer)
        .map(|(_, (enemy, pos))| (enemy.id, *pos))
        .collect();

    for (_entity, (enemy, pos, stats, lazer)) in
        world.query_mut::<(&Enemy, &mut Position, &EnemyStats, &mut LazerState)>()
    {
        // Lightning track.
        let distance = pos.distance_to(&tick.player);
        if attack_ready(
            lazer.last_lightning_at,
            tick.now,
            balance.lightning_cooldown_secs,
            distance,
            balance.lightning_range,
        ) {
            lazer.last_lightning_at = Some(tick.now);
            let points = lightning_path(
                *pos,
                &candidates,
                tick.player,
                balance.lightning_bounce_radius,
                balance.lightning_max_bounces,
            );
            *next_beam_id += 1;
            beams.push(Beam {
                id: *next_beam_id,
                kind: BeamKind::Lightning,
                shape: BeamShape::Path { points },
                started_at: tick.now,
                ends_at: tick.now + balance.lightning_duration_secs,
                damage: stats.damage * balance.lightning_damage_multiplier,
                owner_enemy: enemy.id,
                has_hit: false,
            });
            events.push(AudioEvent::LightningFired { enemy_id: enemy.id });
        }

        // Major-attack track.
        let update = evaluate_major(&MajorContext {
            phase: lazer.major,
            now: tick.now,
            personal_ready_at: lazer.personal_ready_at,
            in_viewport: in_viewport(pos, &tick.player, &config.viewport),
            lock_available: arbiter.is_available(tick.now),
            charge_secs: balance.major_charge_secs,
            windup_secs: balance.major_windup_secs,
            beam_secs: balance.major_beam_secs,
            personal_cooldown_secs: balance.major_personal_cooldown_secs,
        });

        match update.action {
            MajorAction::None => {}
            MajorAction::BeginCharge => {
                if !arbiter.try_acquire(enemy.id, tick.now, balance.major_global_cooldown_secs) {
                    continue;
                }
                events.push(AudioEvent::MajorAttackCharging { enemy_id: enemy.id });
            }
            MajorAction::Teleport => {
                *pos = behind_player(&tick.player, &tick.aim, balance.major_teleport_distance);
            }
            MajorAction::FireBeam => {
                *next_beam_id += 1;
                beams.push(Beam {
                    id: *next_beam_id,
                    kind: balance.major_beam_kind,
                    shape: BeamShape::Ray {
                        origin: *pos,
                        angle: pos.angle_to(&tick.player),
                    },
                    started_at: tick.now,
                    ends_at: tick.now + balance.major_beam_secs,
                    damage: stats.damage * balance.beam_dps_multiplier,
                    owner_enemy: enemy.id,
                    has_hit: false,
                });
                events.push(AudioEvent::MajorAttackFired {
                    enemy_id: enemy.id,
                    kind: balance.major_beam_kind,
                });
            }
            MajorAction::Release => {
                arbiter.release(enemy.id);
            }
        }

        lazer.major = update.new_phase;
        lazer.personal_ready_at = update.personal_ready_at;
    }
}
