//! Movement integration for the player and every projectile.

use std::f64::consts::{PI, TAU};

use onslaught_core::commands::TickInput;
use onslaught_core::constants::{HOMING_TURN_RATE, PROJECTILE_CULL_DISTANCE};
use onslaught_core::entities::Projectile;
use onslaught_core::types::{Position, Velocity};

use glam::DVec2;

use crate::battlefield::TickFrame;
use crate::player::PlayerState;
use crate::projectiles::ProjectileStore;

/// Apply host input to the player: authoritative position if given,
/// otherwise integrate the normalized movement direction.
pub fn move_player(player: &mut PlayerState, input: &TickInput, frame: &TickFrame) {
    player.aim = input.aim;
    if let Some(position) = input.player_position {
        player.position = position;
        return;
    }
    let direction = DVec2::new(input.movement.0, input.movement.1).normalize_or_zero();
    let speed = player.stats.movement_speed * frame.speed_multiplier;
    player.position = player.position.offset(direction * speed * frame.dt);
}

/// Steer homing shots, integrate positions and cull expired projectiles.
pub fn advance_projectiles(store: &mut ProjectileStore, player: Position, dt: f64) {
    for projectile in store.player.iter_mut().chain(store.enemy.iter_mut()) {
        if projectile.flags.is_homing {
            steer_toward(projectile, player, dt);
        }
        let step = projectile.velocity.to_vec() * dt;
        projectile.position = projectile.position.offset(step);
        projectile.travelled += step.length();
    }

    store.player.retain(|p| !is_expired(p, player));
    store.enemy.retain(|p| !is_expired(p, player));
}

/// Rotate the velocity toward `target` by at most the homing turn rate.
fn steer_toward(projectile: &mut Projectile, target: Position, dt: f64) {
    let speed = projectile.velocity.speed();
    let heading = projectile.velocity.heading();
    let desired = projectile.position.angle_to(&target);
    let delta = (desired - heading + PI).rem_euclid(TAU) - PI;
    let max_turn = HOMING_TURN_RATE * dt;
    let turned = heading + delta.clamp(-max_turn, max_turn);
    projectile.velocity = Velocity::from_angle(turned, speed);
}

fn is_expired(projectile: &Projectile, player: Position) -> bool {
    projectile.travelled > projectile.range
        || projectile.position.distance_to(&player) > PROJECTILE_CULL_DISTANCE
}
