//! Owned abilities and their duration/cooldown timers.

use onslaught_core::config::BalanceConfig;
use onslaught_core::entities::ActiveAbilityState;
use onslaught_core::enums::AbilityType;

#[derive(Debug, Clone, Default)]
pub struct AbilityController {
    owned: Vec<ActiveAbilityState>,
}

impl AbilityController {
    /// Add an ability, ready to use. Already-owned abilities are left untouched.
    pub fn acquire(&mut self, ability: AbilityType) -> bool {
        if self.owns(ability) {
            return false;
        }
        self.owned.push(ActiveAbilityState {
            ability,
            active_until: 0.0,
            cooldown_until: 0.0,
        });
        true
    }

    /// Start an owned ability whose cooldown has elapsed. The cooldown runs
    /// from the end of the active window.
    pub fn activate(&mut self, ability: AbilityType, now: f64, config: &BalanceConfig) -> bool {
        let Some(state) = self.owned.iter_mut().find(|s| s.ability == ability) else {
            return false;
        };
        if now < state.cooldown_until {
            return false;
        }
        let timing = config.ability(ability);
        state.active_until = now + timing.duration_secs;
        state.cooldown_until = state.active_until + timing.cooldown_secs;
        true
    }

    pub fn is_active(&self, ability: AbilityType, now: f64) -> bool {
        self.owned
            .iter()
            .any(|s| s.ability == ability && now < s.active_until)
    }

    pub fn owns(&self, ability: AbilityType) -> bool {
        self.owned.iter().any(|s| s.ability == ability)
    }

    pub fn states(&self) -> &[ActiveAbilityState] {
        &self.owned
    }

    pub fn clear(&mut self) {
        self.owned.clear();
    }
}
