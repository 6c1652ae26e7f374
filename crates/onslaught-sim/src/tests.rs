//! Tests for the simulation engine, enemy population, weapons and combat passes.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::commands::{AbilityTriggers, PlayerCommand, TickInput};
use onslaught_core::config::BalanceConfig;
use onslaught_core::constants::{DT, MAX_COOLDOWN_REDUCTION, MAX_DT, SPAWN_MARGIN};
use onslaught_core::entities::{Beam, BeamShape, ProjectileFlags};
use onslaught_core::enums::*;
use onslaught_core::events::AudioEvent;
use onslaught_core::state::FrameSnapshot;
use onslaught_core::types::{Position, Velocity};

use crate::abilities::AbilityController;
use crate::battlefield::{Battlefield, TickFrame};
use crate::engine::{SimConfig, SimulationEngine};
use crate::player::apply_stat_boost;
use crate::population::{EnemyHit, EnemyPopulation, PopulationTick};
use crate::projectiles::{ProjectileSpec, ProjectileStore};
use crate::systems::{beams, collision, zones};
use crate::waves::{get_random_power_ups, WaveDirector};
use crate::weapons::WeaponSystem;

fn engine_with(balance: BalanceConfig) -> SimulationEngine {
    SimulationEngine::new(SimConfig { seed: 7, balance })
}

/// No scheduled spawns: staged encounters only. Each wave reports
/// Completed on its first tick.
fn quiet_config() -> BalanceConfig {
    let mut config = BalanceConfig::default();
    config.waves.base_enemy_count = 0;
    config.waves.enemies_per_wave = 0;
    config
}

fn started(balance: BalanceConfig) -> SimulationEngine {
    let mut engine = engine_with(balance);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(&TickInput::default());
    engine
}

fn projectile_at(position: Position, damage: f64, flags: ProjectileFlags) -> ProjectileSpec {
    ProjectileSpec {
        position,
        velocity: Velocity::default(),
        damage,
        size: 5.0,
        flags,
        knockback: 0.0,
        range: 1000.0,
    }
}

fn has_event(snap: &FrameSnapshot, pred: impl Fn(&AudioEvent) -> bool) -> bool {
    snap.audio_events.iter().any(pred)
}

fn population_tick(now: f64, player: Position) -> PopulationTick {
    PopulationTick {
        now,
        dt: DT,
        player,
        aim: player.offset(glam::DVec2::X),
        freeze_multiplier: 1.0,
    }
}

fn population() -> EnemyPopulation {
    EnemyPopulation::new(Arc::new(BalanceConfig::default()))
}

fn kill_hit(enemy_id: u32) -> EnemyHit {
    EnemyHit {
        enemy_id,
        amount: 1e9,
        knockback: 0.0,
        source: Position::default(),
    }
}

// ---- Determinism and session flow ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for i in 0..600 {
        let input = TickInput {
            movement: (1.0, if i % 120 < 60 { 0.5 } else { -0.5 }),
            aim: Position::new(400.0, (i as f64 * 0.05).sin() * 300.0),
            firing: true,
            ..Default::default()
        };
        let json_a = serde_json::to_string(&engine_a.tick(&input)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&input)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    let mut diverged = false;
    for _ in 0..120 {
        let json_a = serde_json::to_string(&engine_a.tick(&TickInput::default())).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&TickInput::default())).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different spawns");
}

#[test]
fn test_idle_until_start() {
    let mut engine = engine_with(BalanceConfig::default());
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.enemies.is_empty());
    assert!(snap.player.stats.is_none());
}

#[test]
fn test_pause_freezes_clock() {
    let mut engine = started(BalanceConfig::default());
    let before = engine.time();

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.phase, SessionPhase::Paused);
    assert_eq!(snap.time.tick, before.tick);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.phase, SessionPhase::Active);
    assert_eq!(snap.time.tick, before.tick + 1);
}

#[test]
fn test_dt_is_clamped() {
    let mut engine = engine_with(quiet_config());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(&TickInput {
        dt: 5.0,
        ..Default::default()
    });
    assert_eq!(snap.time.elapsed_secs, MAX_DT);

    let snap = engine.tick(&TickInput {
        dt: -1.0,
        ..Default::default()
    });
    assert_eq!(snap.time.elapsed_secs, MAX_DT);

    let snap = engine.tick(&TickInput {
        dt: f64::NAN,
        ..Default::default()
    });
    assert_eq!(snap.time.elapsed_secs, MAX_DT);
}

#[test]
fn test_first_spawn_is_outside_viewport() {
    let engine = started(BalanceConfig::default());
    let viewport = engine.config().viewport;
    let views = engine.battlefield().population.views(0.0);
    assert_eq!(views.len(), 1);

    let pos = views[0].position;
    // One tick of steering at most.
    let slack = 5.0;
    let outside_x = pos.x.abs() >= viewport.half_width() + SPAWN_MARGIN - slack;
    let outside_y = pos.y.abs() >= viewport.half_height() + SPAWN_MARGIN - slack;
    assert!(outside_x || outside_y, "spawned inside the camera at {pos:?}");
}

#[test]
fn test_wave_flow_through_power_up_selection() {
    let mut config = BalanceConfig::default();
    config.waves.base_enemy_count = 1;
    config.waves.enemies_per_wave = 1;
    let mut engine = started(config);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    let views = engine.battlefield().population.views(0.0);
    assert_eq!(views.len(), 1);
    let outcome = engine
        .battlefield_mut()
        .population
        .damage_enemy(kill_hit(views[0].id), Position::default(), &mut rng, &mut events)
        .unwrap();
    assert!(outcome.killed);

    let snap = engine.tick(&TickInput::default());
    assert!(has_event(&snap, |e| matches!(e, AudioEvent::WaveCompleted { wave: 1 })));
    assert_eq!(snap.wave.state.phase, WavePhase::Completed);

    // Selecting before the offer is open does nothing.
    engine.queue_command(PlayerCommand::SelectPowerUp { index: 0 });
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.wave.state.phase, WavePhase::Completed);

    engine.queue_command(PlayerCommand::ContinueWave);
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.wave.state.phase, WavePhase::PowerUpSelection);
    assert_eq!(snap.power_up_offer.len(), 3);
    let chosen = snap.power_up_offer[0];
    let stats_before = snap.player.stats.unwrap();

    engine.queue_command(PlayerCommand::SelectPowerUp { index: 0 });
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.wave.state.current_wave, 2);
    assert_eq!(snap.wave.state.phase, WavePhase::InProgress);
    assert_eq!(snap.wave.target_count, 2);
    assert!(snap.power_up_offer.is_empty());
    match chosen {
        PowerUp::Ability(ability) => assert!(engine.abilities().owns(ability)),
        PowerUp::Stat(_) => assert_ne!(snap.player.stats.unwrap(), stats_before),
    }
}

#[test]
fn test_concurrent_cap_and_target_respected() {
    let mut engine = started(BalanceConfig::default());
    let cap = engine.config().waves.concurrent_cap(1);
    let target = engine.config().waves.target_count(1);
    for _ in 0..900 {
        let snap = engine.tick(&TickInput::default());
        assert!(snap.wave.alive_count <= cap);
        assert!(snap.wave.spawned_count <= target);
        if snap.phase == SessionPhase::GameOver {
            break;
        }
    }
}

#[test]
fn test_zero_target_wave_completes() {
    let mut engine = engine_with(quiet_config());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.wave.target_count, 0);
    assert!(has_event(&snap, |e| matches!(e, AudioEvent::WaveCompleted { wave: 1 })));
    assert_eq!(snap.wave.state.phase, WavePhase::Completed);

    engine.queue_command(PlayerCommand::ContinueWave);
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.wave.state.phase, WavePhase::PowerUpSelection);

    engine.queue_command(PlayerCommand::SelectPowerUp { index: 0 });
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.wave.state.current_wave, 2);
    assert_eq!(snap.wave.state.phase, WavePhase::Completed);
    assert!(has_event(&snap, |e| matches!(e, AudioEvent::WaveCompleted { wave: 2 })));
}

#[test]
fn test_reequip_keeps_ammo_and_cooldown() {
    let mut engine = started(quiet_config());
    engine.tick(&TickInput {
        firing: true,
        ..Default::default()
    });
    assert_eq!(engine.battlefield().weapon.ammo(), Some(119));

    engine.queue_command(PlayerCommand::EquipWeapon {
        weapon_type: WeaponType::Pistol,
        rarity: Rarity::Rare,
    });
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.player.ammo, Some(119), "re-equip refilled the magazine");

    let snap = engine.tick(&TickInput {
        firing: true,
        ..Default::default()
    });
    assert_eq!(snap.player.ammo, Some(119), "re-equip reset the cooldown");
    assert_eq!(engine.battlefield().weapon.weapon().rarity, Rarity::Rare);

    engine.queue_command(PlayerCommand::EquipWeapon {
        weapon_type: WeaponType::Shotgun,
        rarity: Rarity::Common,
    });
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.player.ammo, engine.battlefield().weapon.max_ammo());
}

#[test]
fn test_player_death_ends_session() {
    let mut engine = started(quiet_config());
    {
        let field = engine.battlefield_mut();
        field.player.stats.health = 1.0;
        let at = field.player.position;
        field.projectiles.adopt(
            ProjectileOwner::Enemy,
            [projectile_at(at, 50.0, ProjectileFlags::default())],
        );
    }
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.phase, SessionPhase::GameOver);
    assert!(has_event(&snap, |e| matches!(e, AudioEvent::PlayerDied)));

    let frozen = snap.time.tick;
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.time.tick, frozen);
    assert!(!has_event(&snap, |e| matches!(e, AudioEvent::PlayerDied)));

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(&TickInput::default());
    assert_eq!(snap.phase, SessionPhase::Active);
    assert_eq!(snap.wave.state.current_wave, 1);
    assert_eq!(snap.player.stats.unwrap().health, 100.0);
}

// ---- Shield ----

#[test]
fn test_shield_blocks_every_damage_source() {
    let mut engine = started(quiet_config());
    engine.abilities_mut().acquire(AbilityType::Shield);
    let shield_on = TickInput {
        abilities: AbilityTriggers {
            shield: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let snap = engine.tick(&shield_on);
    assert!(has_event(&snap, |e| matches!(
        e,
        AudioEvent::AbilityActivated {
            ability: AbilityType::Shield
        }
    )));

    let now = engine.time().now();
    {
        let field = engine.battlefield_mut();
        field.player.stats.armor = 40.0;
        let at = field.player.position;
        field
            .population
            .spawn_enemy(EnemyType::Normal, at, 1);
        field
            .population
            .spawn_enemy(EnemyType::Weak, at.offset(glam::DVec2::new(10.0, 0.0)), 1);
        field.projectiles.adopt(
            ProjectileOwner::Enemy,
            [projectile_at(at, 30.0, ProjectileFlags::default())],
        );
        field.population.push_beam(Beam {
            id: 900,
            kind: BeamKind::Laser,
            shape: BeamShape::Ray {
                origin: at.offset(glam::DVec2::new(-100.0, 0.0)),
                angle: 0.0,
            },
            started_at: now,
            ends_at: now + 10.0,
            damage: 50.0,
            owner_enemy: 0,
            has_hit: false,
        });
        field.population.push_beam(Beam {
            id: 902,
            kind: BeamKind::Energy,
            shape: BeamShape::Ray {
                origin: at.offset(glam::DVec2::new(-100.0, 0.0)),
                angle: 0.0,
            },
            started_at: now - 1.0,
            ends_at: now + 10.0,
            damage: 50.0,
            owner_enemy: 0,
            has_hit: false,
        });
        field.population.push_beam(Beam {
            id: 901,
            kind: BeamKind::Lightning,
            shape: BeamShape::Path {
                points: vec![at.offset(glam::DVec2::new(-200.0, 0.0)), at],
            },
            started_at: now,
            ends_at: now + 1.0,
            damage: 20.0,
            owner_enemy: 0,
            has_hit: false,
        });
    }

    let mut blocked = false;
    for _ in 0..60 {
        let snap = engine.tick(&TickInput::default());
        blocked |= has_event(&snap, |e| matches!(e, AudioEvent::ShieldBlocked { .. }));
        let stats = snap.player.stats.unwrap();
        assert_eq!(stats.health, 100.0, "shielded player lost health");
        assert_eq!(stats.armor, 40.0, "shielded player lost armor");
    }
    assert!(blocked);
}

// ---- Pickups ----

#[test]
fn test_pickups_respect_caps() {
    let mut engine = started(quiet_config());
    engine.tick(&TickInput {
        firing: true,
        ..Default::default()
    });
    assert_eq!(engine.battlefield().weapon.ammo(), Some(119));

    {
        let field = engine.battlefield_mut();
        field.player.stats.health = 90.0;
        field.player.stats.armor = 90.0;
        let at = field.player.position;
        field.pickups.spawn(PickupKind::Health, at, 25.0, 12.0);
        field.pickups.spawn(PickupKind::Vest, at, 25.0, 12.0);
        field.pickups.spawn(PickupKind::Ammo, at, 30.0, 12.0);
        field
            .pickups
            .spawn(PickupKind::Health, Position::new(5000.0, 0.0), 25.0, 12.0);
    }

    let snap = engine.tick(&TickInput::default());
    let stats = snap.player.stats.unwrap();
    assert_eq!(stats.health, stats.max_health);
    assert_eq!(stats.armor, 100.0);
    assert_eq!(snap.player.ammo, Some(120));
    assert_eq!(snap.health_pickups.len(), 1, "far pickup should remain");
    let collected = snap
        .audio_events
        .iter()
        .filter(|e| matches!(e, AudioEvent::PickupCollected { .. }))
        .count();
    assert_eq!(collected, 3);
}

// ---- Population ----

#[test]
fn test_strong_split_spawns_children_once() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut events = Vec::new();
    let player = Position::new(500.0, 500.0);

    let strong = pop.spawn_enemy(EnemyType::Strong, Position::default(), 3);
    let outcome = pop
        .damage_enemy(kill_hit(strong), player, &mut rng, &mut events)
        .unwrap();
    assert!(outcome.killed);
    assert!((2..=3).contains(&outcome.split_children));
    assert_eq!(pop.alive_count(), outcome.split_children);
    assert!(events
        .iter()
        .any(|e| matches!(e, AudioEvent::EnemySplit { .. })));

    let children = pop.views(0.0);
    assert!(children
        .iter()
        .all(|c| c.is_split_enemy && c.kind == EnemyType::Normal && c.level == 3));

    let outcome = pop
        .damage_enemy(kill_hit(children[0].id), player, &mut rng, &mut events)
        .unwrap();
    assert!(outcome.killed);
    assert_eq!(outcome.split_children, 0);
    assert_eq!(pop.alive_count(), children.len() as u32 - 1);
    // Children do not count toward the wave's spawn total.
    assert_eq!(pop.spawned_count(), 0);
}

#[test]
fn test_shield_aura_blocks_damage_but_not_knockback() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut events = Vec::new();
    let mut shots = Vec::new();
    let player = Position::new(0.0, 400.0);

    pop.spawn_enemy(EnemyType::Strong, Position::new(0.0, 0.0), 1);
    let normal = pop.spawn_enemy(EnemyType::Normal, Position::new(100.0, 0.0), 1);
    pop.update(&population_tick(0.0, player), &mut rng, &mut shots, &mut events);

    let view = pop.views(0.0).into_iter().find(|v| v.id == normal).unwrap();
    assert!(view.shielded);

    let before = pop.position_of(normal).unwrap();
    let outcome = pop
        .damage_enemy(
            EnemyHit {
                enemy_id: normal,
                amount: 25.0,
                knockback: 10.0,
                source: Position::new(0.0, 0.0),
            },
            player,
            &mut rng,
            &mut events,
        )
        .unwrap();
    assert!(outcome.blocked);
    assert!(!outcome.killed);
    let view = pop.views(0.0).into_iter().find(|v| v.id == normal).unwrap();
    assert_eq!(view.health, view.max_health);
    assert!(pop.position_of(normal).unwrap().x > before.x);
    assert!(events
        .iter()
        .any(|e| matches!(e, AudioEvent::ShieldBlocked { .. })));
}

#[test]
fn test_dead_strong_drops_its_aura_at_once() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut events = Vec::new();
    let player = Position::new(0.0, 400.0);

    let strong = pop.spawn_enemy(EnemyType::Strong, Position::new(0.0, 0.0), 1);
    let normal = pop.spawn_enemy(EnemyType::Normal, Position::new(100.0, 0.0), 1);
    pop.update(&population_tick(0.0, player), &mut rng, &mut Vec::new(), &mut events);
    assert!(pop.views(0.0).into_iter().any(|v| v.id == normal && v.shielded));

    // Same pass: no population tick between the kill and the next hit.
    let outcome = pop
        .damage_enemy(kill_hit(strong), player, &mut rng, &mut events)
        .unwrap();
    assert!(outcome.killed);
    let view = pop.views(0.0).into_iter().find(|v| v.id == normal).unwrap();
    assert!(!view.shielded);

    let outcome = pop
        .damage_enemy(
            EnemyHit {
                enemy_id: normal,
                amount: 5.0,
                knockback: 0.0,
                source: Position::default(),
            },
            player,
            &mut rng,
            &mut events,
        )
        .unwrap();
    assert!(!outcome.blocked);
    let view = pop.views(0.0).into_iter().find(|v| v.id == normal).unwrap();
    assert_eq!(view.health, view.max_health - 5.0);
}

#[test]
fn test_berserker_triggers_once() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut events = Vec::new();
    let strong = pop.spawn_enemy(EnemyType::Strong, Position::default(), 1);

    let hit = |amount| EnemyHit {
        enemy_id: strong,
        amount,
        knockback: 0.0,
        source: Position::default(),
    };
    pop.damage_enemy(hit(20.0), Position::default(), &mut rng, &mut events);
    assert!(events.is_empty());

    pop.damage_enemy(hit(40.0), Position::default(), &mut rng, &mut events);
    pop.damage_enemy(hit(10.0), Position::default(), &mut rng, &mut events);
    let triggers = events
        .iter()
        .filter(|e| matches!(e, AudioEvent::BerserkerActivated { .. }))
        .count();
    assert_eq!(triggers, 1);

    let view = &pop.views(0.0)[0];
    assert!(view.is_berserker);
    assert!(view.size > 30.0);
}

#[test]
fn test_weak_explosion_reaches_only_nearby_player() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut events = Vec::new();
    let player = Position::default();

    let near = pop.spawn_enemy(EnemyType::Weak, Position::new(50.0, 0.0), 1);
    let far = pop.spawn_enemy(EnemyType::Weak, Position::new(500.0, 0.0), 1);

    let outcome = pop.damage_enemy(kill_hit(near), player, &mut rng, &mut events).unwrap();
    assert!(outcome.exploded);
    assert_eq!(outcome.explosion_damage, 16.0);
    let outcome = pop.damage_enemy(kill_hit(far), player, &mut rng, &mut events).unwrap();
    assert!(outcome.exploded);
    assert_eq!(outcome.explosion_damage, 0.0);
    let explosions = events
        .iter()
        .filter(|e| matches!(e, AudioEvent::WeakEnemyExploded { .. }))
        .count();
    assert_eq!(explosions, 2);
    assert!(pop.damage_enemy(kill_hit(near), player, &mut rng, &mut events).is_none());
}

#[test]
fn test_detonate_ignores_non_weak() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut events = Vec::new();
    let normal = pop.spawn_enemy(EnemyType::Normal, Position::default(), 1);
    assert!(pop.detonate(normal, Position::default(), &mut rng, &mut events).is_none());
    assert!(pop.contains(normal));
}

#[test]
fn test_single_major_attack_holder() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut events = Vec::new();
    let mut shots = Vec::new();
    let player = Position::default();

    pop.spawn_enemy(EnemyType::Lazer, Position::new(250.0, 0.0), 6);
    pop.spawn_enemy(EnemyType::Lazer, Position::new(-250.0, 100.0), 6);

    let mut fired = 0;
    for i in 0..1800 {
        let now = i as f64 * DT;
        events.clear();
        pop.update(&population_tick(now, player), &mut rng, &mut shots, &mut events);

        let active: Vec<u32> = pop
            .views(now)
            .iter()
            .filter(|v| v.major.is_some_and(|m| m.is_active()))
            .map(|v| v.id)
            .collect();
        assert!(active.len() <= 1, "two Lazers in a major attack at {now}");
        if let Some(id) = active.first() {
            assert_eq!(pop.arbiter().holder(), Some(*id));
        }
        fired += events
            .iter()
            .filter(|e| matches!(e, AudioEvent::MajorAttackFired { .. }))
            .count();
    }
    assert!(fired >= 2, "expected repeated major attacks, saw {fired}");
}

#[test]
fn test_lightning_hits_at_most_once() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut events = Vec::new();
    let mut shots = Vec::new();
    let player = Position::default();

    pop.spawn_enemy(EnemyType::Lazer, Position::new(300.0, 0.0), 6);
    pop.update(&population_tick(0.0, player), &mut rng, &mut shots, &mut events);

    let beam = pop
        .beams()
        .iter()
        .find(|b| b.kind == BeamKind::Lightning)
        .cloned()
        .unwrap();
    match &beam.shape {
        BeamShape::Path { points } => assert_eq!(points.last(), Some(&player)),
        other => panic!("unexpected lightning shape {other:?}"),
    }
    assert!(pop.spend_lightning(beam.id));
    assert!(!pop.spend_lightning(beam.id));
}

#[test]
fn test_strong_fires_at_captured_position() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut events = Vec::new();
    let mut shots = Vec::new();

    pop.spawn_enemy(EnemyType::Strong, Position::new(300.0, 0.0), 1);
    pop.update(&population_tick(0.0, Position::default()), &mut rng, &mut shots, &mut events);
    assert!(events
        .iter()
        .any(|e| matches!(e, AudioEvent::ChargeStarted { .. })));

    let moved = Position::new(0.0, 200.0);
    for i in 1..=300 {
        pop.update(&population_tick(i as f64 * DT, moved), &mut rng, &mut shots, &mut events);
        if !shots.is_empty() {
            break;
        }
    }
    assert_eq!(shots.len(), 1);
    let shot = shots[0];
    assert!(shot.flags.indestructible);
    assert!(shot.velocity.x < 0.0);
    assert!(shot.velocity.y.abs() < 1e-9, "shot tracked the live player");
}

#[test]
fn test_time_freeze_slows_enemies() {
    let travel = |freeze: f64| {
        let mut pop = population();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let id = pop.spawn_enemy(EnemyType::Normal, Position::new(600.0, 0.0), 1);
        let tick = PopulationTick {
            dt: 0.1,
            freeze_multiplier: freeze,
            ..population_tick(0.0, Position::default())
        };
        pop.update(&tick, &mut rng, &mut Vec::new(), &mut Vec::new());
        600.0 - pop.position_of(id).unwrap().x
    };
    let normal = travel(1.0);
    let frozen = travel(0.25);
    assert!((normal - 8.0).abs() < 1e-9);
    assert!((frozen - 2.0).abs() < 1e-9);
}

#[test]
fn test_far_enemy_relocates_behind_player() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let viewport = BalanceConfig::default().viewport;
    let id = pop.spawn_enemy(EnemyType::Normal, Position::new(6000.0, 0.0), 1);

    pop.update(
        &population_tick(0.0, Position::default()),
        &mut rng,
        &mut Vec::new(),
        &mut Vec::new(),
    );
    let pos = pop.position_of(id).unwrap();
    assert!(pos.x < -viewport.diagonal() / 2.0);
    assert!(pos.distance_to(&Position::default()) < viewport.diagonal() * 1.5);
}

#[test]
fn test_population_spawns_under_caps() {
    let mut pop = population();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let waves = BalanceConfig::default().waves;
    pop.begin_wave(1, 0.0);

    for i in 0..1200 {
        pop.update(
            &population_tick(i as f64 * DT, Position::new(0.0, 5000.0)),
            &mut rng,
            &mut Vec::new(),
            &mut Vec::new(),
        );
        assert!(pop.alive_count() <= waves.concurrent_cap(1));
        assert!(pop.spawned_count() <= waves.target_count(1));
    }
    assert_eq!(pop.alive_count(), waves.concurrent_cap(1));
    assert!(!pop.is_wave_cleared());
}

// ---- Collision passes ----

fn battlefield() -> (Arc<BalanceConfig>, Battlefield) {
    let config = Arc::new(BalanceConfig::default());
    let field = Battlefield::new(&config);
    (config, field)
}

#[test]
fn test_piercing_projectile_hits_each_enemy_once() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let frame = TickFrame::new(0.0, DT, &config, &AbilityController::default());

    let at = Position::new(200.0, 0.0);
    let id = field.population.spawn_enemy(EnemyType::Strong, at, 1);
    let piercing = ProjectileFlags {
        piercing: true,
        ..Default::default()
    };
    field
        .projectiles
        .adopt(ProjectileOwner::Player, [projectile_at(at, 10.0, piercing)]);

    collision::hit_enemies(&mut field, &frame, &mut rng, &mut events);
    collision::hit_enemies(&mut field, &frame, &mut rng, &mut events);

    let view = field.population.views(0.0).into_iter().find(|v| v.id == id).unwrap();
    assert_eq!(view.health, 140.0);
    assert_eq!(field.projectiles.player.len(), 1);
}

#[test]
fn test_non_piercing_projectile_is_spent() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let frame = TickFrame::new(0.0, DT, &config, &AbilityController::default());

    let at = Position::new(200.0, 0.0);
    field.population.spawn_enemy(EnemyType::Weak, at, 1);
    field.projectiles.adopt(
        ProjectileOwner::Player,
        [projectile_at(at, 100.0, ProjectileFlags::default())],
    );
    collision::hit_enemies(&mut field, &frame, &mut rng, &mut events);

    assert!(field.projectiles.player.is_empty());
    assert_eq!(field.population.alive_count(), 0);
    assert_eq!(field.kills, 1);
}

#[test]
fn test_interception_skips_indestructible() {
    let (_config, mut field) = battlefield();
    let at = Position::new(300.0, 0.0);
    let indestructible = ProjectileFlags {
        indestructible: true,
        ..Default::default()
    };
    field.projectiles.adopt(
        ProjectileOwner::Enemy,
        [
            projectile_at(at, 10.0, indestructible),
            projectile_at(at, 10.0, ProjectileFlags::default()),
        ],
    );
    field.projectiles.adopt(
        ProjectileOwner::Player,
        [projectile_at(at, 10.0, ProjectileFlags::default())],
    );

    collision::intercept_enemy_projectiles(&mut field);
    assert_eq!(field.projectiles.enemy.len(), 1);
    assert!(field.projectiles.enemy[0].flags.indestructible);
    assert!(field.projectiles.player.is_empty());
}

#[test]
fn test_enemy_projectiles_debounced() {
    let (config, mut field) = battlefield();
    let mut events = Vec::new();
    let frame = TickFrame::new(0.0, DT, &config, &AbilityController::default());
    let at = field.player.position;
    field.projectiles.adopt(
        ProjectileOwner::Enemy,
        [
            projectile_at(at, 10.0, ProjectileFlags::default()),
            projectile_at(at, 10.0, ProjectileFlags::default()),
        ],
    );

    collision::hit_player(&mut field, &frame, &mut events);
    assert_eq!(field.player.stats.health, 90.0);
    assert!(field.projectiles.enemy.is_empty());
}

#[test]
fn test_armor_absorbs_first() {
    let (config, mut field) = battlefield();
    let mut events = Vec::new();
    let frame = TickFrame::new(0.0, DT, &config, &AbilityController::default());
    field.player.stats.armor = 5.0;
    let at = field.player.position;
    field.projectiles.adopt(
        ProjectileOwner::Enemy,
        [projectile_at(at, 12.0, ProjectileFlags::default())],
    );

    collision::hit_player(&mut field, &frame, &mut events);
    assert_eq!(field.player.stats.armor, 0.0);
    assert_eq!(field.player.stats.health, 93.0);
}

#[test]
fn test_contact_damage_scales_with_dt() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let frame = TickFrame::new(0.0, 0.1, &config, &AbilityController::default());
    field.population.spawn_enemy(EnemyType::Normal, field.player.position, 1);

    collision::contact(&mut field, &frame, &mut rng, &mut events);
    assert!((field.player.stats.health - (100.0 - 10.0 * 0.5 * 0.1)).abs() < 1e-9);
    assert_eq!(field.population.alive_count(), 1);
}

#[test]
fn test_weak_contact_detonates() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let frame = TickFrame::new(0.0, DT, &config, &AbilityController::default());
    field.population.spawn_enemy(EnemyType::Weak, Position::new(10.0, 0.0), 1);

    collision::contact(&mut field, &frame, &mut rng, &mut events);
    assert_eq!(field.population.alive_count(), 0);
    assert_eq!(field.player.stats.health, 84.0);
    assert_eq!(field.kills, 1);
    // Contact kills never drop pickups.
    assert!(field.pickups.items.is_empty());
}

#[test]
fn test_melee_hitbox_lasts_one_pass() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut sword = WeaponSystem::new(WeaponType::Sword, Rarity::Common, &config);
    let specs = sword.attack(0.0, Position::default(), Position::new(1.0, 0.0), &field.player.stats, &mut rng);
    assert_eq!(specs.len(), 1);
    field.projectiles.adopt(ProjectileOwner::Player, specs);

    collision::expire_instant(&mut field);
    assert!(field.projectiles.player.is_empty());
}

// ---- Beams ----

fn ray_beam(kind: BeamKind, origin: Position, damage: f64) -> Beam {
    Beam {
        id: 1,
        kind,
        shape: BeamShape::Ray { origin, angle: 0.0 },
        started_at: 0.0,
        ends_at: 10.0,
        damage,
        owner_enemy: 0,
        has_hit: false,
    }
}

#[test]
fn test_energy_beam_warmup_then_lateral_push() {
    let (config, mut field) = battlefield();
    let mut events = Vec::new();
    field.player.position = Position::new(0.0, 5.0);
    field
        .population
        .push_beam(ray_beam(BeamKind::Energy, Position::new(-100.0, 0.0), 20.0));

    let warming = TickFrame::new(0.05, DT, &config, &AbilityController::default());
    beams::run(&mut field, &warming, &mut events);
    assert_eq!(field.player.stats.health, 100.0);
    assert_eq!(field.player.position, Position::new(0.0, 5.0));

    let live = TickFrame::new(1.0, DT, &config, &AbilityController::default());
    beams::run(&mut field, &live, &mut events);
    assert!((field.player.stats.health - (100.0 - 20.0 * DT)).abs() < 1e-9);
    assert!(field.player.position.y > 5.0);
    assert!((field.player.position.x).abs() < 1e-9);
}

#[test]
fn test_energy_beam_under_shield_pushes_without_damage() {
    let (config, mut field) = battlefield();
    let mut events = Vec::new();
    field.player.position = Position::new(0.0, 5.0);
    field.player.stats.armor = 30.0;
    field
        .population
        .push_beam(ray_beam(BeamKind::Energy, Position::new(-100.0, 0.0), 20.0));

    let mut abilities = AbilityController::default();
    abilities.acquire(AbilityType::Shield);
    abilities.activate(AbilityType::Shield, 0.0, &config);
    let frame = TickFrame::new(1.0, DT, &config, &abilities);
    beams::run(&mut field, &frame, &mut events);
    assert_eq!(field.player.stats.health, 100.0);
    assert_eq!(field.player.stats.armor, 30.0);
    assert!(field.player.position.y > 5.0);
}

#[test]
fn test_laser_blocked_by_shield() {
    let (config, mut field) = battlefield();
    let mut events = Vec::new();
    field
        .population
        .push_beam(ray_beam(BeamKind::Laser, Position::new(-100.0, 0.0), 20.0));

    let mut abilities = AbilityController::default();
    abilities.acquire(AbilityType::Shield);
    abilities.activate(AbilityType::Shield, 0.0, &config);
    let frame = TickFrame::new(1.0, DT, &config, &abilities);
    beams::run(&mut field, &frame, &mut events);
    assert_eq!(field.player.stats.health, 100.0);
    assert_eq!(field.player.position, Position::default());

    let frame = TickFrame::new(1.0, DT, &config, &AbilityController::default());
    beams::run(&mut field, &frame, &mut events);
    assert!(field.player.stats.health < 100.0);
    assert!(field.player.position.x > 0.0);
}

#[test]
fn test_lightning_beam_damages_once() {
    let (config, mut field) = battlefield();
    let mut events = Vec::new();
    field.population.push_beam(Beam {
        id: 5,
        kind: BeamKind::Lightning,
        shape: BeamShape::Path {
            points: vec![Position::new(-200.0, 0.0), Position::default()],
        },
        started_at: 0.0,
        ends_at: 1.0,
        damage: 15.0,
        owner_enemy: 0,
        has_hit: false,
    });

    let frame = TickFrame::new(0.1, DT, &config, &AbilityController::default());
    beams::run(&mut field, &frame, &mut events);
    beams::run(&mut field, &frame, &mut events);
    assert_eq!(field.player.stats.health, 85.0);
}

// ---- Fire ring ----

#[test]
fn test_burn_damage_respects_tick_interval() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let id = field
        .population
        .spawn_enemy(EnemyType::Normal, Position::new(50.0, 0.0), 1);

    let mut abilities = AbilityController::default();
    abilities.acquire(AbilityType::FireRing);
    abilities.activate(AbilityType::FireRing, 0.0, &config);

    let health = |field: &Battlefield| {
        field.population.views(0.0).into_iter().find(|v| v.id == id).unwrap().health
    };

    let frame = TickFrame::new(0.0, DT, &config, &abilities);
    let last = zones::run(&mut field, &frame, None, &mut rng, &mut events);
    assert_eq!(last, Some(0.0));
    assert_eq!(health(&field), 34.0);

    let frame = TickFrame::new(0.1, DT, &config, &abilities);
    let last = zones::run(&mut field, &frame, last, &mut rng, &mut events);
    assert_eq!(last, Some(0.0));
    assert_eq!(health(&field), 34.0);

    let frame = TickFrame::new(0.5, DT, &config, &abilities);
    zones::run(&mut field, &frame, last, &mut rng, &mut events);
    assert_eq!(health(&field), 28.0);
}

#[test]
fn test_burn_continues_outside_the_ring() {
    let (config, mut field) = battlefield();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();
    let id = field
        .population
        .spawn_enemy(EnemyType::Normal, Position::new(50.0, 0.0), 1);

    let mut abilities = AbilityController::default();
    abilities.acquire(AbilityType::FireRing);
    abilities.activate(AbilityType::FireRing, 0.0, &config);
    let health = |field: &Battlefield| {
        field.population.views(0.0).into_iter().find(|v| v.id == id).unwrap().health
    };

    let frame = TickFrame::new(0.0, DT, &config, &abilities);
    let last = zones::run(&mut field, &frame, None, &mut rng, &mut events);
    assert_eq!(health(&field), 34.0);

    // The ring follows the player away from the burning enemy.
    field.player.position = Position::new(5000.0, 0.0);
    let frame = TickFrame::new(0.5, DT, &config, &abilities);
    let last = zones::run(&mut field, &frame, last, &mut rng, &mut events);
    assert_eq!(health(&field), 28.0);

    // Burn lapses two seconds after the last ignition.
    let frame = TickFrame::new(2.5, DT, &config, &abilities);
    zones::run(&mut field, &frame, last, &mut rng, &mut events);
    assert_eq!(health(&field), 28.0);
}

// ---- Weapons ----

#[test]
fn test_weapon_cooldown_gates_attacks() {
    let config = BalanceConfig::default();
    let stats = config.player.initial_stats();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut pistol = WeaponSystem::new(WeaponType::Pistol, Rarity::Common, &config);
    let (origin, aim) = (Position::default(), Position::new(1.0, 0.0));

    assert_eq!(pistol.attack(0.0, origin, aim, &stats, &mut rng).len(), 1);
    assert!(pistol.attack(0.2, origin, aim, &stats, &mut rng).is_empty());
    assert_eq!(pistol.attack(0.4, origin, aim, &stats, &mut rng).len(), 1);
    assert_eq!(pistol.ammo(), Some(118));
}

#[test]
fn test_cooldown_formula() {
    let config = BalanceConfig::default();
    let pistol = WeaponSystem::new(WeaponType::Pistol, Rarity::Common, &config);
    assert!((pistol.cooldown(0.0, 1.0) - 0.4).abs() < 1e-12);
    assert!((pistol.cooldown(0.5, 2.0) - 0.1).abs() < 1e-12);
    // Reduction beyond the cap is clamped.
    assert!((pistol.cooldown(0.95, 1.0) - 0.4 * (1.0 - MAX_COOLDOWN_REDUCTION)).abs() < 1e-12);
}

#[test]
fn test_weapon_patterns() {
    let config = BalanceConfig::default();
    let stats = config.player.initial_stats();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (origin, aim) = (Position::default(), Position::new(1.0, 0.0));

    let pellets = WeaponSystem::new(WeaponType::Shotgun, Rarity::Common, &config)
        .attack(0.0, origin, aim, &stats, &mut rng);
    assert_eq!(pellets.len(), 3);
    assert!(pellets.iter().all(|p| (p.damage - 6.0).abs() < 1e-12));

    let mut sword = WeaponSystem::new(WeaponType::Sword, Rarity::Common, &config);
    let swing = sword.attack(0.0, origin, aim, &stats, &mut rng);
    assert!(swing[0].flags.is_instant && swing[0].flags.piercing);
    assert_eq!(swing[0].velocity, Velocity::default());
    assert!(swing[0].position.x > 0.0);
    assert_eq!(sword.ammo(), None);

    let shot = WeaponSystem::new(WeaponType::Sniper, Rarity::Legendary, &config)
        .attack(0.0, origin, aim, &stats, &mut rng);
    assert!(shot[0].flags.piercing);
    assert!((shot[0].damage - 90.0).abs() < 1e-12);
}

#[test]
fn test_ammo_runs_out_and_refills_to_cap() {
    let mut config = BalanceConfig::default();
    config.weapons.get_mut(&WeaponType::Pistol).unwrap().max_ammo = Some(2);
    let stats = config.player.initial_stats();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut pistol = WeaponSystem::new(WeaponType::Pistol, Rarity::Common, &config);
    let (origin, aim) = (Position::default(), Position::new(1.0, 0.0));

    assert_eq!(pistol.attack(0.0, origin, aim, &stats, &mut rng).len(), 1);
    assert_eq!(pistol.attack(1.0, origin, aim, &stats, &mut rng).len(), 1);
    assert!(!pistol.can_attack(2.0, 0.0, 1.0));
    assert!(pistol.attack(2.0, origin, aim, &stats, &mut rng).is_empty());

    pistol.restore_ammo(5);
    assert_eq!(pistol.ammo(), Some(2));
}

// ---- Waves, power-ups, abilities ----

#[test]
fn test_power_up_offer_is_distinct() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..50 {
        let offer = get_random_power_ups(&mut rng, 3);
        assert_eq!(offer.len(), 3);
        assert_ne!(offer[0], offer[1]);
        assert_ne!(offer[0], offer[2]);
        assert_ne!(offer[1], offer[2]);
    }
}

#[test]
fn test_wave_director_rejects_out_of_order_transitions() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut director = WaveDirector::default();
    assert!(!director.open_selection(&mut rng));
    assert!(director.complete());
    assert!(!director.complete());
    assert!(director.open_selection(&mut rng));
    assert_eq!(director.select(7), None);
    assert_eq!(director.state().phase, WavePhase::PowerUpSelection);
    assert!(director.select(2).is_some());
    assert_eq!(director.state().current_wave, 2);
}

#[test]
fn test_ability_timers() {
    let config = BalanceConfig::default();
    let mut abilities = AbilityController::default();
    assert!(!abilities.activate(AbilityType::Shield, 0.0, &config));

    assert!(abilities.acquire(AbilityType::Shield));
    assert!(!abilities.acquire(AbilityType::Shield));
    assert!(abilities.activate(AbilityType::Shield, 0.0, &config));
    assert!(abilities.is_active(AbilityType::Shield, 3.9));
    assert!(!abilities.is_active(AbilityType::Shield, 4.0));
    assert!(!abilities.activate(AbilityType::Shield, 10.0, &config));
    assert!(!abilities.activate(AbilityType::Shield, 20.0, &config));
    assert!(abilities.activate(AbilityType::Shield, 24.0, &config));
}

#[test]
fn test_stat_boosts() {
    let config = BalanceConfig::default();
    let mut stats = config.player.initial_stats();
    stats.health = 50.0;

    apply_stat_boost(&mut stats, StatBoost::MaxHealth, &config.power_ups);
    assert_eq!(stats.max_health, 120.0);
    assert_eq!(stats.health, 70.0);

    for _ in 0..20 {
        apply_stat_boost(&mut stats, StatBoost::CooldownReduction, &config.power_ups);
    }
    assert_eq!(stats.cooldown_reduction, MAX_COOLDOWN_REDUCTION);
}

#[test]
fn test_projectile_store_assigns_unique_ids() {
    let mut store = ProjectileStore::default();
    let spec = projectile_at(Position::default(), 1.0, ProjectileFlags::default());
    store.adopt(ProjectileOwner::Player, [spec, spec]);
    store.adopt(ProjectileOwner::Enemy, [spec]);
    assert_ne!(store.player[0].id, store.player[1].id);
    assert_ne!(store.player[1].id, store.enemy[0].id);
    assert_eq!(store.enemy[0].owner, ProjectileOwner::Enemy);
}
