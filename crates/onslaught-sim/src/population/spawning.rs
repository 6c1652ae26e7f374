//! Wave spawning and split-child creation.

use std::f64::consts::TAU;

use hecs::EntityBuilder;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::constants::SPLIT_RING_RADIUS;
use onslaught_core::enums::EnemyType;
use onslaught_core::events::AudioEvent;
use onslaught_core::types::Position;

use onslaught_enemy_ai::placement::{choose_enemy_type, spawn_position};
use onslaught_enemy_ai::profiles::{scaled_stats, split_child_stats};

use super::{EnemyPopulation, PopulationTick};

impl EnemyPopulation {
    /// Spawn at most one enemy when the interval elapsed and both the wave
    /// target and the concurrent cap leave room.
    pub(super) fn spawn_due(&mut self, tick: &PopulationTick, rng: &mut ChaCha8Rng) {
        if self.spawned_count >= self.target_count || tick.now < self.next_spawn_at {
            return;
        }
        let waves = &self.config.waves;
        if self.alive_count() >= waves.concurrent_cap(self.wave) {
            return;
        }

        let elites_alive = self.count_alive(EnemyType::Lazer);
        let kind = choose_enemy_type(
            rng,
            &waves.weights_for(self.wave),
            elites_alive,
            waves.max_concurrent_elites,
        );
        let position = spawn_position(rng, &tick.player, &tick.aim, &self.config.viewport);
        self.next_spawn_at = tick.now + waves.spawn_interval(self.wave);

        self.spawn_enemy(kind, position, self.wave);
        self.spawned_count += 1;
    }

    /// Spawn one enemy of `kind` scaled to `wave`. Does not count toward the
    /// wave's spawned total.
    pub fn spawn_enemy(&mut self, kind: EnemyType, position: Position, wave: u32) -> u32 {
        let (vitals, stats) = scaled_stats(&self.config, kind, wave);
        self.insert(kind, position, wave, vitals, stats, false)
    }

    /// Spawn 2-3 split children on a ring around `center`. Returns the count.
    pub(super) fn spawn_split_children(
        &mut self,
        center: Position,
        wave: u32,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<AudioEvent>,
    ) -> u32 {
        let children: u32 = rng.gen_range(2..=3);
        let phase = rng.gen_range(0.0..TAU);
        let (vitals, stats) = split_child_stats(&self.config, wave);

        for i in 0..children {
            let angle = phase + TAU * i as f64 / children as f64;
            let offset = glam::DVec2::from_angle(angle) * SPLIT_RING_RADIUS;
            self.insert(EnemyType::Normal, center.offset(offset), wave, vitals, stats, true);
        }

        events.push(AudioEvent::EnemySplit {
            position: center,
            children,
        });
        children
    }

    fn insert(
        &mut self,
        kind: EnemyType,
        position: Position,
        wave: u32,
        vitals: Vitals,
        stats: EnemyStats,
        is_split_enemy: bool,
    ) -> u32 {
        self.next_enemy_id += 1;
        let id = self.next_enemy_id;

        let mut builder = EntityBuilder::new();
        builder
            .add(Enemy {
                id,
                kind,
                level: wave,
            })
            .add(position)
            .add(vitals)
            .add(stats)
            .add(EnemyStatus {
                is_split_enemy,
                ..Default::default()
            });
        match kind {
            EnemyType::Weak => {}
            EnemyType::Normal => {
                builder.add(RangedAttack::default());
            }
            EnemyType::Strong => {
                builder.add(ChargedShot::default());
            }
            EnemyType::Lazer => {
                builder.add(LazerState::default());
            }
        }

        let entity = self.world.spawn(builder.build());
        self.index.insert(id, entity);
        id
    }

    fn count_alive(&self, kind: EnemyType) -> u32 {
        self.world
            .query::<&Enemy>()
            .iter()
            .filter(|(_, enemy)| enemy.kind == kind)
            .count() as u32
    }
}
