//! Enemy population: the single owner of every live enemy and enemy beam.
//!
//! Enemies are hecs entities keyed by a stable `u32` id. Collaborators never
//! hold entity handles; they go through the narrow operations here
//! (`damage_enemy`, `detonate`, `ignite`, `hitboxes`, ...), which makes
//! enemy-state writes single-owner.

mod arbiter;
mod attacks;
mod spawning;
mod steering;

use std::collections::HashMap;
use std::sync::Arc;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::BalanceConfig;
use onslaught_core::constants::WEAK_EXPLOSION_DAMAGE_FACTOR;
use onslaught_core::constants::WEAK_EXPLOSION_RADIUS;
use onslaught_core::entities::Beam;
use onslaught_core::enums::{BeamKind, EnemyType};
use onslaught_core::events::AudioEvent;
use onslaught_core::state::EnemyView;
use onslaught_core::types::Position;

use onslaught_enemy_ai::fsm::should_enter_berserker;
use onslaught_enemy_ai::profiles::{effective_size, get_profile};

use crate::projectiles::ProjectileSpec;

pub use arbiter::MajorAttackArbiter;

/// Per-tick inputs the population reads.
#[derive(Debug, Clone, Copy)]
pub struct PopulationTick {
    pub now: f64,
    pub dt: f64,
    pub player: Position,
    pub aim: Position,
    /// Enemy speed multiplier (TimeFreeze), 1.0 when inactive.
    pub freeze_multiplier: f64,
}

/// A single damage application against one enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemyHit {
    pub enemy_id: u32,
    pub amount: f64,
    /// Push distance away from `source`. Applied even when the hit is shielded.
    pub knockback: f64,
    pub source: Position,
}

/// What happened to an enemy as a result of a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub kind: EnemyType,
    /// Enemy position after knockback (the death position on a kill).
    pub position: Position,
    /// Absorbed by a shield aura.
    pub blocked: bool,
    pub killed: bool,
    /// Weak death burst. Split children never explode.
    pub exploded: bool,
    /// Number of split children spawned by this death.
    pub split_children: u32,
    /// Weak explosion damage owed to the player (zero when out of reach).
    pub explosion_damage: f64,
}

/// Collision data for one live enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemyHitbox {
    pub id: u32,
    pub kind: EnemyType,
    pub position: Position,
    /// Effective radius, berserker growth included.
    pub radius: f64,
    pub damage: f64,
}

pub struct EnemyPopulation {
    config: Arc<BalanceConfig>,
    world: World,
    index: HashMap<u32, Entity>,
    next_enemy_id: u32,
    next_beam_id: u32,
    beams: Vec<Beam>,
    arbiter: MajorAttackArbiter,
    wave: u32,
    target_count: u32,
    spawned_count: u32,
    next_spawn_at: f64,
}

impl EnemyPopulation {
    pub fn new(config: Arc<BalanceConfig>) -> Self {
        Self {
            config,
            world: World::new(),
            index: HashMap::new(),
            next_enemy_id: 0,
            next_beam_id: 0,
            beams: Vec::new(),
            arbiter: MajorAttackArbiter::default(),
            wave: 0,
            target_count: 0,
            spawned_count: 0,
            next_spawn_at: 0.0,
        }
    }

    /// Drop every enemy and beam, and forget the wave.
    pub fn reset(&mut self) {
        self.world.clear();
        self.index.clear();
        self.beams.clear();
        self.arbiter = MajorAttackArbiter::default();
        self.wave = 0;
        self.target_count = 0;
        self.spawned_count = 0;
        self.next_spawn_at = 0.0;
    }

    /// Arm the spawner for `wave`. The first spawn is due immediately.
    pub fn begin_wave(&mut self, wave: u32, now: f64) {
        self.wave = wave;
        self.target_count = self.config.waves.target_count(wave);
        self.spawned_count = 0;
        self.next_spawn_at = now;
        log::info!(
            "wave {wave} armed: {} enemies, at most {} alive",
            self.target_count,
            self.config.waves.concurrent_cap(wave)
        );
    }

    /// Run one population tick: spawning, attacks, steering, relocation,
    /// shield auras and beam expiry, in that order.
    pub fn update(
        &mut self,
        tick: &PopulationTick,
        rng: &mut ChaCha8Rng,
        shots: &mut Vec<ProjectileSpec>,
        events: &mut Vec<AudioEvent>,
    ) {
        self.spawn_due(tick, rng);

        let config = Arc::clone(&self.config);
        attacks::run_normal(&mut self.world, &config, tick, rng, shots);
        attacks::run_strong(&mut self.world, &config, tick, shots, events);
        attacks::run_lazer(
            &mut self.world,
            &config,
            tick,
            &mut self.arbiter,
            &mut self.beams,
            &mut self.next_beam_id,
            events,
        );

        steering::run(&mut self.world, tick);
        let relocated =
            steering::relocate_strays(&mut self.world, &config, tick, rng, &mut self.arbiter, events);
        for enemy_id in relocated {
            self.drop_major_beams(enemy_id);
        }
        steering::refresh_shields(&mut self.world);

        self.beams.retain(|beam| tick.now < beam.ends_at);
    }

    /// Apply a hit. Returns `None` when the enemy is already gone.
    ///
    /// Knockback always applies. A shielded enemy takes no damage. A lethal
    /// hit removes the enemy, splits an unsplit Strong and detonates a Weak.
    pub fn damage_enemy(
        &mut self,
        hit: EnemyHit,
        player: Position,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<AudioEvent>,
    ) -> Option<DamageOutcome> {
        let entity = *self.index.get(&hit.enemy_id)?;

        let (enemy, position, status, stats, killed) = {
            let (enemy, pos, vitals, status, stats) = self
                .world
                .query_one_mut::<(&Enemy, &mut Position, &mut Vitals, &mut EnemyStatus, &EnemyStats)>(entity)
                .ok()?;

            if hit.knockback > 0.0 {
                let away = hit.source.direction_to(pos);
                *pos = pos.offset(away * hit.knockback);
            }

            if status.shielded {
                events.push(AudioEvent::ShieldBlocked { position: *pos });
                return Some(DamageOutcome {
                    kind: enemy.kind,
                    position: *pos,
                    blocked: true,
                    killed: false,
                    exploded: false,
                    split_children: 0,
                    explosion_damage: 0.0,
                });
            }

            vitals.health -= hit.amount.max(0.0);
            let killed = vitals.health <= 0.0;
            if killed {
                vitals.health = 0.0;
            } else if enemy.kind == EnemyType::Strong && should_enter_berserker(vitals, status.is_berserker) {
                status.is_berserker = true;
                events.push(AudioEvent::BerserkerActivated { enemy_id: enemy.id });
                log::debug!("enemy {} went berserk", enemy.id);
            }
            (*enemy, *pos, *status, *stats, killed)
        };

        if !killed {
            return Some(DamageOutcome {
                kind: enemy.kind,
                position,
                blocked: false,
                killed: false,
                exploded: false,
                split_children: 0,
                explosion_damage: 0.0,
            });
        }

        Some(self.kill(entity, enemy, position, status, stats, player, rng, events))
    }

    /// Contact detonation of a Weak enemy: it dies regardless of shields.
    /// Returns `None` for unknown ids and non-Weak enemies.
    pub fn detonate(
        &mut self,
        enemy_id: u32,
        player: Position,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<AudioEvent>,
    ) -> Option<DamageOutcome> {
        let entity = *self.index.get(&enemy_id)?;
        let (enemy, position, status, stats) = {
            let (enemy, pos, status, stats) = self
                .world
                .query_one_mut::<(&Enemy, &Position, &EnemyStatus, &EnemyStats)>(entity)
                .ok()?;
            (*enemy, *pos, *status, *stats)
        };
        if !get_profile(enemy.kind).explodes {
            return None;
        }
        Some(self.kill(entity, enemy, position, status, stats, player, rng, events))
    }

    #[allow(clippy::too_many_arguments)]
    fn kill(
        &mut self,
        entity: Entity,
        enemy: Enemy,
        position: Position,
        status: EnemyStatus,
        stats: EnemyStats,
        player: Position,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<AudioEvent>,
    ) -> DamageOutcome {
        let profile = get_profile(enemy.kind);

        if let Ok(shot) = self.world.get::<&ChargedShot>(entity) {
            if matches!(shot.phase, ChargePhase::Charging { .. }) {
                events.push(AudioEvent::ChargeStopped { enemy_id: enemy.id });
            }
        }
        self.remove(enemy.id);

        let exploded = profile.explodes && !status.is_split_enemy;
        let mut explosion_damage = 0.0;
        if exploded {
            events.push(AudioEvent::WeakEnemyExploded { position });
            if position.distance_to(&player) <= WEAK_EXPLOSION_RADIUS {
                explosion_damage = stats.damage * WEAK_EXPLOSION_DAMAGE_FACTOR;
            }
        } else if enemy.kind == EnemyType::Normal {
            events.push(AudioEvent::NormalEnemyDied { position });
        }

        let split_children = if profile.splits && !status.is_split_enemy {
            self.spawn_split_children(position, enemy.level, rng, events)
        } else {
            0
        };
        if enemy.kind == EnemyType::Strong {
            // Its aura goes with it, mid-pass included.
            steering::refresh_shields(&mut self.world);
        }

        DamageOutcome {
            kind: enemy.kind,
            position,
            blocked: false,
            killed: true,
            exploded,
            split_children,
            explosion_damage,
        }
    }

    /// Despawn an enemy and release everything it held.
    fn remove(&mut self, enemy_id: u32) {
        if let Some(entity) = self.index.remove(&enemy_id) {
            let _ = self.world.despawn(entity);
        }
        self.arbiter.release(enemy_id);
        self.drop_major_beams(enemy_id);
    }

    /// Remove the Energy/Laser beam an enemy owns. Lightning arcs live out their duration.
    fn drop_major_beams(&mut self, enemy_id: u32) {
        self.beams
            .retain(|beam| beam.owner_enemy != enemy_id || beam.kind == BeamKind::Lightning);
    }

    /// Ignite every enemy within `radius` of `center` until `until`.
    pub fn ignite(&mut self, center: Position, radius: f64, until: f64) {
        for (_entity, (pos, status)) in self.world.query_mut::<(&Position, &mut EnemyStatus)>() {
            if pos.distance_to(&center) <= radius {
                status.burn_until = Some(status.burn_until.map_or(until, |t| t.max(until)));
            }
        }
    }

    /// Ids of enemies burning at `now`, in spawn order.
    pub fn burning_ids(&self, now: f64) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .world
            .query::<(&Enemy, &EnemyStatus)>()
            .iter()
            .filter(|(_, (_, status))| status.is_burning(now))
            .map(|(_, (enemy, _))| enemy.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Spend a lightning beam's single hit. Returns false if already spent or gone.
    pub fn spend_lightning(&mut self, beam_id: u32) -> bool {
        match self
            .beams
            .iter_mut()
            .find(|beam| beam.id == beam_id && beam.kind == BeamKind::Lightning)
        {
            Some(beam) if !beam.has_hit => {
                beam.has_hit = true;
                true
            }
            _ => false,
        }
    }

    /// Collision data for every live enemy, ordered by id.
    pub fn hitboxes(&self) -> Vec<EnemyHitbox> {
        let mut boxes: Vec<EnemyHitbox> = self
            .world
            .query::<(&Enemy, &Position, &EnemyStats, &EnemyStatus)>()
            .iter()
            .map(|(_, (enemy, pos, stats, status))| EnemyHitbox {
                id: enemy.id,
                kind: enemy.kind,
                position: *pos,
                radius: effective_size(stats, status.is_berserker),
                damage: stats.damage,
            })
            .collect();
        boxes.sort_unstable_by_key(|hitbox| hitbox.id);
        boxes
    }

    /// Renderer view of every live enemy, ordered by id.
    pub fn views(&self, now: f64) -> Vec<EnemyView> {
        let mut views: Vec<EnemyView> = self
            .world
            .query::<(
                &Enemy,
                &Position,
                &Vitals,
                &EnemyStats,
                &EnemyStatus,
                Option<&ChargedShot>,
                Option<&LazerState>,
            )>()
            .iter()
            .map(|(_, (enemy, pos, vitals, stats, status, shot, lazer))| EnemyView {
                id: enemy.id,
                kind: enemy.kind,
                level: enemy.level,
                position: *pos,
                health: vitals.health,
                max_health: vitals.max_health,
                size: effective_size(stats, status.is_berserker),
                shielded: status.shielded,
                is_berserker: status.is_berserker,
                is_split_enemy: status.is_split_enemy,
                burning: status.is_burning(now),
                charge: shot.map(|s| s.phase),
                major: lazer.map(|l| l.major),
            })
            .collect();
        views.sort_unstable_by_key(|view| view.id);
        views
    }

    pub fn contains(&self, enemy_id: u32) -> bool {
        self.index.contains_key(&enemy_id)
    }

    pub fn position_of(&self, enemy_id: u32) -> Option<Position> {
        let entity = *self.index.get(&enemy_id)?;
        self.world.get::<&Position>(entity).ok().map(|pos| *pos)
    }

    pub fn alive_count(&self) -> u32 {
        self.index.len() as u32
    }

    pub fn spawned_count(&self) -> u32 {
        self.spawned_count
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    /// Every scheduled enemy has spawned and none (children included) remain.
    /// A wave with no scheduled enemies is cleared at once.
    pub fn is_wave_cleared(&self) -> bool {
        self.spawned_count >= self.target_count && self.index.is_empty()
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn arbiter(&self) -> &MajorAttackArbiter {
        &self.arbiter
    }

    /// Inject a beam directly (tests stage beam geometry without a Lazer).
    #[cfg(test)]
    pub fn push_beam(&mut self, beam: Beam) {
        self.beams.push(beam);
    }
}
