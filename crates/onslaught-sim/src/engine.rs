//! Simulation engine: the combat resolver that runs one ordered tick.
//!
//! `SimulationEngine` owns every piece of session state, processes queued
//! player commands at the tick boundary, runs the systems and produces
//! `FrameSnapshot`s. Headless and seeded, so identical inputs replay identically.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::commands::{PlayerCommand, TickInput};
use onslaught_core::config::BalanceConfig;
use onslaught_core::constants::MAX_DT;
use onslaught_core::enums::{PowerUp, ProjectileOwner, SessionPhase};
use onslaught_core::events::AudioEvent;
use onslaught_core::state::FrameSnapshot;
use onslaught_core::types::SimTime;

use crate::abilities::AbilityController;
use crate::battlefield::{Battlefield, TickFrame};
use crate::player::apply_stat_boost;
use crate::population::PopulationTick;
use crate::systems;
use crate::waves::WaveDirector;
use crate::weapons::WeaponSystem;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub balance: BalanceConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            balance: BalanceConfig::default(),
        }
    }
}

pub struct SimulationEngine {
    config: Arc<BalanceConfig>,
    time: SimTime,
    phase: SessionPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioEvent>,
    field: Battlefield,
    waves: WaveDirector,
    abilities: AbilityController,
    last_burn_at: Option<f64>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let balance = Arc::new(config.balance);
        Self {
            field: Battlefield::new(&balance),
            config: balance,
            time: SimTime::default(),
            phase: SessionPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            waves: WaveDirector::default(),
            abilities: AbilityController::default(),
            last_burn_at: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// `input.dt` is clamped to `[0, MAX_DT]`; the clock advances only while
    /// the session is active.
    pub fn tick(&mut self, input: &TickInput) -> FrameSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            let dt = if input.dt.is_finite() {
                input.dt.clamp(0.0, MAX_DT)
            } else {
                0.0
            };
            self.run_systems(input, dt);
            self.time.advance(dt);
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.field,
            &self.waves,
            &self.abilities,
            &self.time,
            self.phase,
            audio_events,
        )
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.field
    }

    /// Mutable access for hosts and tests that stage encounters directly.
    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    pub fn abilities(&self) -> &AbilityController {
        &self.abilities
    }

    #[cfg(test)]
    pub fn abilities_mut(&mut self) -> &mut AbilityController {
        &mut self.abilities
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if matches!(self.phase, SessionPhase::Idle | SessionPhase::GameOver) {
                    self.start_session();
                }
            }
            PlayerCommand::ContinueWave => {
                if self.phase == SessionPhase::Active && self.waves.open_selection(&mut self.rng) {
                    log::debug!("power-up offer: {:?}", self.waves.offer());
                }
            }
            PlayerCommand::SelectPowerUp { index } => {
                if self.phase != SessionPhase::Active {
                    return;
                }
                match self.waves.select(index) {
                    Some(power_up) => {
                        self.apply_power_up(power_up);
                        let wave = self.waves.state().current_wave;
                        self.field.population.begin_wave(wave, self.time.now());
                    }
                    None => log::warn!("ignored power-up selection {index}"),
                }
            }
            PlayerCommand::EquipWeapon {
                weapon_type,
                rarity,
            } => {
                let mut weapon = WeaponSystem::new(weapon_type, rarity, &self.config);
                weapon.carry_over(&self.field.weapon);
                self.field.weapon = weapon;
                log::info!("equipped {rarity:?} {weapon_type:?}");
            }
            PlayerCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                }
            }
        }
    }

    /// Fresh session at wave 1. The RNG stream continues, so a restart is
    /// still determined by the seed and the command history.
    fn start_session(&mut self) {
        let weapon = *self.field.weapon.weapon();
        self.field = Battlefield::new(&self.config);
        self.field.weapon = WeaponSystem::new(weapon.weapon_type, weapon.rarity, &self.config);
        self.waves.reset();
        self.abilities.clear();
        self.last_burn_at = None;
        self.time = SimTime::default();
        self.phase = SessionPhase::Active;
        self.field.population.begin_wave(self.waves.state().current_wave, 0.0);
        log::info!("session started");
    }

    fn apply_power_up(&mut self, power_up: PowerUp) {
        match power_up {
            PowerUp::Stat(boost) => {
                apply_stat_boost(&mut self.field.player.stats, boost, &self.config.power_ups)
            }
            PowerUp::Ability(ability) => {
                if !self.abilities.acquire(ability) {
                    log::debug!("{ability:?} already owned");
                }
            }
        }
        log::info!("power-up taken: {power_up:?}");
    }

    /// Run one tick of combat in a fixed order.
    fn run_systems(&mut self, input: &TickInput, dt: f64) {
        let now = self.time.now();
        let config = Arc::clone(&self.config);

        for ability in input.abilities.requested() {
            if self.abilities.activate(ability, now, &config) {
                self.audio_events.push(AudioEvent::AbilityActivated { ability });
            }
        }
        let frame = TickFrame::new(now, dt, &config, &self.abilities);
        let field = &mut self.field;
        let rng = &mut self.rng;
        let events = &mut self.audio_events;

        // 1. Player movement
        systems::movement::move_player(&mut field.player, input, &frame);

        // 2. Enemies and projectiles
        let mut shots = Vec::new();
        field.population.update(
            &PopulationTick {
                now,
                dt,
                player: field.player.position,
                aim: field.player.aim,
                freeze_multiplier: frame.freeze_multiplier,
            },
            rng,
            &mut shots,
            events,
        );
        field.projectiles.adopt(ProjectileOwner::Enemy, shots);
        if input.firing {
            let fired = field.weapon.attack(
                now,
                field.player.position,
                field.player.aim,
                &field.player.stats,
                rng,
            );
            if !fired.is_empty() {
                events.push(AudioEvent::ProjectileFired {
                    weapon_type: field.weapon.weapon().weapon_type,
                });
                field.projectiles.adopt(ProjectileOwner::Player, fired);
            }
        }
        systems::movement::advance_projectiles(&mut field.projectiles, field.player.position, dt);

        // 3. Player projectiles vs enemy projectiles
        systems::collision::intercept_enemy_projectiles(field);
        // 4. Player projectiles vs enemies
        systems::collision::hit_enemies(field, &frame, rng, events);
        // 5. Melee hitboxes expire
        systems::collision::expire_instant(field);
        // 6. Fire ring
        self.last_burn_at = systems::zones::run(field, &frame, self.last_burn_at, rng, events);
        // 7. Beams vs player
        systems::beams::run(field, &frame, events);
        // 8. Enemy projectiles vs player
        systems::collision::hit_player(field, &frame, events);
        // 9. Body contact
        systems::collision::contact(field, &frame, rng, events);
        // 10. Pickups
        systems::collection::run(field, &frame, events);

        // 11. Wave completion
        if field.population.is_wave_cleared() && self.waves.complete() {
            let wave = self.waves.state().current_wave;
            events.push(AudioEvent::WaveCompleted { wave });
            log::info!("wave {wave} cleared, {} kills so far", field.kills);
        }

        if field.player.stats.is_dead() {
            events.push(AudioEvent::PlayerDied);
            self.phase = SessionPhase::GameOver;
            log::info!(
                "player died on wave {} after {} kills",
                self.waves.state().current_wave,
                field.kills
            );
        }
    }
}
