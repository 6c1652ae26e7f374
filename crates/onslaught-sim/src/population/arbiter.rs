//! Cross-enemy mutual exclusion for the Lazer major attack.
//!
//! A single holder token plus the shared global-cooldown timestamp. At most one
//! Lazer enemy runs a charge/teleport/beam sequence at any instant.

#[derive(Debug, Clone, Default)]
pub struct MajorAttackArbiter {
    holder: Option<u32>,
    /// No new sequence may start before this sim time.
    global_ready_at: f64,
}

impl MajorAttackArbiter {
    /// Lock is free and the global cooldown has elapsed.
    pub fn is_available(&self, now: f64) -> bool {
        self.holder.is_none() && now >= self.global_ready_at
    }

    /// Take the lock for `enemy_id` and start the global cooldown.
    /// Returns false (and changes nothing) when unavailable.
    pub fn try_acquire(&mut self, enemy_id: u32, now: f64, global_cooldown_secs: f64) -> bool {
        if !self.is_available(now) {
            return false;
        }
        self.holder = Some(enemy_id);
        self.global_ready_at = now + global_cooldown_secs;
        log::debug!("major attack lock taken by enemy {enemy_id}");
        true
    }

    /// Release the lock if `enemy_id` holds it. Stale releases are no-ops.
    pub fn release(&mut self, enemy_id: u32) -> bool {
        if self.holder == Some(enemy_id) {
            self.holder = None;
            log::debug!("major attack lock released by enemy {enemy_id}");
            true
        } else {
            false
        }
    }

    pub fn holder(&self) -> Option<u32> {
        self.holder
    }
}
