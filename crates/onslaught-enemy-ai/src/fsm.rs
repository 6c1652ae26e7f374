//! Enemy attack state machines.
//!
//! Pure functions that compute phase transitions for the per-enemy attack
//! tracks from a context snapshot. Operates on plain data with no ECS dependency.
//! The caller applies the returned action (spawn a projectile, teleport,
//! create a beam, take or release the major-attack lock).

use onslaught_core::components::{ChargePhase, MajorPhase, Vitals};
use onslaught_core::constants::BERSERKER_HEALTH_THRESHOLD;
use onslaught_core::types::Position;

/// True once the cooldown since `last` has elapsed and the target is within range.
/// An attack that never fired is ready immediately.
pub fn attack_ready(last: Option<f64>, now: f64, cooldown_secs: f64, distance: f64, range: f64) -> bool {
    if distance > range {
        return false;
    }
    match last {
        Some(at) => now - at >= cooldown_secs.max(0.0),
        None => true,
    }
}

/// One-way berserker trigger: first time health drops below the threshold.
pub fn should_enter_berserker(vitals: &Vitals, is_berserker: bool) -> bool {
    !is_berserker
        && vitals.health > 0.0
        && vitals.health < vitals.max_health * BERSERKER_HEALTH_THRESHOLD
}

// ---- Strong: charged shot ----

/// Input to the Strong charged-shot FSM.
pub struct StrongContext {
    pub phase: ChargePhase,
    pub now: f64,
    pub position: Position,
    /// Live player position. Read only when a charge starts.
    pub player: Position,
    /// Berserker-adjusted charge duration.
    pub charge_secs: f64,
    /// Berserker-adjusted cooldown.
    pub cooldown_secs: f64,
    pub range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrongAction {
    None,
    /// Charge began; the player position was captured.
    StartCharge,
    /// Release the charged shot toward the captured target.
    Fire { target: Position },
}

pub struct StrongUpdate {
    pub new_phase: ChargePhase,
    pub action: StrongAction,
}

pub fn evaluate_strong(ctx: &StrongContext) -> StrongUpdate {
    let hold = StrongUpdate {
        new_phase: ctx.phase,
        action: StrongAction::None,
    };

    match ctx.phase {
        ChargePhase::Idle => {
            if ctx.position.distance_to(&ctx.player) <= ctx.range {
                StrongUpdate {
                    new_phase: ChargePhase::Charging {
                        started_at: ctx.now,
                        target: ctx.player,
                    },
                    action: StrongAction::StartCharge,
                }
            } else {
                hold
            }
        }
        ChargePhase::Charging { started_at, target } => {
            if ctx.now - started_at >= ctx.charge_secs {
                StrongUpdate {
                    new_phase: ChargePhase::Cooldown {
                        until: ctx.now + ctx.cooldown_secs,
                    },
                    action: StrongAction::Fire { target },
                }
            } else {
                hold
            }
        }
        ChargePhase::Cooldown { until } => {
            if ctx.now >= until {
                StrongUpdate {
                    new_phase: ChargePhase::Idle,
                    action: StrongAction::None,
                }
            } else {
                hold
            }
        }
    }
}

// ---- Lazer: major attack ----

/// Input to the Lazer major-attack FSM.
pub struct MajorContext {
    pub phase: MajorPhase,
    pub now: f64,
    pub personal_ready_at: f64,
    /// Enemy is inside the player's camera rectangle.
    pub in_viewport: bool,
    /// No other Lazer holds the lock and the global cooldown has elapsed.
    pub lock_available: bool,
    pub charge_secs: f64,
    pub windup_secs: f64,
    pub beam_secs: f64,
    pub personal_cooldown_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorAction {
    None,
    /// Take the lock and start the global cooldown.
    BeginCharge,
    /// Jump behind the player's aim.
    Teleport,
    /// Create the beam, aimed at the player's position right now.
    FireBeam,
    /// Beam expired: release the lock.
    Release,
}

pub struct MajorUpdate {
    pub new_phase: MajorPhase,
    pub action: MajorAction,
    pub personal_ready_at: f64,
}

pub fn evaluate_major(ctx: &MajorContext) -> MajorUpdate {
    let hold = MajorUpdate {
        new_phase: ctx.phase,
        action: MajorAction::None,
        personal_ready_at: ctx.personal_ready_at,
    };

    match ctx.phase {
        MajorPhase::Idle => {
            if ctx.now >= ctx.personal_ready_at && ctx.in_viewport && ctx.lock_available {
                MajorUpdate {
                    new_phase: MajorPhase::Charging {
                        started_at: ctx.now,
                    },
                    action: MajorAction::BeginCharge,
                    ..hold
                }
            } else {
                hold
            }
        }
        MajorPhase::Charging { started_at } => {
            if ctx.now - started_at >= ctx.charge_secs {
                MajorUpdate {
                    new_phase: MajorPhase::WindUp {
                        teleported_at: ctx.now,
                    },
                    action: MajorAction::Teleport,
                    ..hold
                }
            } else {
                hold
            }
        }
        MajorPhase::WindUp { teleported_at } => {
            if ctx.now - teleported_at >= ctx.windup_secs {
                MajorUpdate {
                    new_phase: MajorPhase::Firing {
                        beam_until: ctx.now + ctx.beam_secs,
                    },
                    action: MajorAction::FireBeam,
                    ..hold
                }
            } else {
                hold
            }
        }
        MajorPhase::Firing { beam_until } => {
            if ctx.now >= beam_until {
                MajorUpdate {
                    new_phase: MajorPhase::Idle,
                    action: MajorAction::Release,
                    personal_ready_at: ctx.now + ctx.personal_cooldown_secs,
                }
            } else {
                hold
            }
        }
    }
}

// ---- Lazer: lightning ----

/// Build a lightning path: origin, then up to `max_bounces` chained hops to the
/// nearest unvisited candidate within `bounce_radius` of the current head, then
/// the player. Candidates must already exclude Lazer enemies.
pub fn lightning_path(
    origin: Position,
    candidates: &[(u32, Position)],
    player: Position,
    bounce_radius: f64,
    max_bounces: usize,
) -> Vec<Position> {
    let mut path = vec![origin];
    let mut visited: Vec<u32> = Vec::with_capacity(max_bounces);
    let mut head = origin;
    let radius_sq = bounce_radius * bounce_radius;

    for _ in 0..max_bounces {
        let next = candidates
            .iter()
            .filter(|(id, _)| !visited.contains(id))
            .map(|(id, pos)| (*id, *pos, head.distance_squared_to(pos)))
            .filter(|(_, _, d)| *d <= radius_sq)
            .min_by(|a, b| a.2.total_cmp(&b.2));

        match next {
            Some((id, pos, _)) => {
                visited.push(id);
                path.push(pos);
                head = pos;
            }
            None => break,
        }
    }

    path.push(player);
    path
}
