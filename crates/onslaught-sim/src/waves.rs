//! Wave lifecycle and the between-wave power-up offer.
//!
//! `InProgress -> Completed -> PowerUpSelection -> InProgress (wave + 1)`.
//! Spawning itself belongs to the enemy population; this only tracks phase.

use rand::seq::SliceRandom;
use rand::Rng;

use onslaught_core::entities::WaveState;
use onslaught_core::enums::{AbilityType, PowerUp, StatBoost, WavePhase};

/// Number of candidates offered after each wave.
pub const POWER_UP_OFFER_SIZE: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct WaveDirector {
    state: WaveState,
    offer: Vec<PowerUp>,
}

impl WaveDirector {
    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn offer(&self) -> &[PowerUp] {
        &self.offer
    }

    /// Back to wave 1, in progress.
    pub fn reset(&mut self) {
        self.state = WaveState::default();
        self.offer.clear();
    }

    /// `InProgress -> Completed`. Returns false from any other phase.
    pub fn complete(&mut self) -> bool {
        if self.state.phase != WavePhase::InProgress {
            return false;
        }
        self.state.phase = WavePhase::Completed;
        true
    }

    /// `Completed -> PowerUpSelection`, drawing a fresh offer.
    pub fn open_selection<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.state.phase != WavePhase::Completed {
            return false;
        }
        self.offer = get_random_power_ups(rng, POWER_UP_OFFER_SIZE);
        self.state.phase = WavePhase::PowerUpSelection;
        true
    }

    /// Take offer `index` and advance to the next wave. `None` (and no
    /// transition) outside selection or for an out-of-range index.
    pub fn select(&mut self, index: usize) -> Option<PowerUp> {
        if self.state.phase != WavePhase::PowerUpSelection {
            return None;
        }
        let chosen = *self.offer.get(index)?;
        self.offer.clear();
        self.state.current_wave += 1;
        self.state.phase = WavePhase::InProgress;
        Some(chosen)
    }
}

/// `count` distinct candidates drawn from every stat boost and every ability.
pub fn get_random_power_ups<R: Rng>(rng: &mut R, count: usize) -> Vec<PowerUp> {
    let pool: Vec<PowerUp> = StatBoost::ALL
        .into_iter()
        .map(PowerUp::Stat)
        .chain(AbilityType::ALL.into_iter().map(PowerUp::Ability))
        .collect();
    let mut picked: Vec<PowerUp> = pool.choose_multiple(rng, count).copied().collect();
    picked.shuffle(rng);
    picked
}
