//! Collision passes between projectiles, enemies and the player.

use rand_chacha::ChaCha8Rng;

use onslaught_core::constants::{CONTACT_DAMAGE_FACTOR, PLAYER_RADIUS};
use onslaught_core::events::AudioEvent;
use onslaught_core::entities::Projectile;

use onslaught_enemy_ai::profiles::get_profile;

use crate::battlefield::{Battlefield, TickFrame};
use crate::population::EnemyHit;

fn overlaps(a: &Projectile, b: &Projectile) -> bool {
    let reach = a.size + b.size;
    a.position.distance_squared_to(&b.position) <= reach * reach
}

/// Player projectiles shoot down destructible enemy projectiles. A
/// non-piercing player projectile is spent by its first interception.
pub fn intercept_enemy_projectiles(field: &mut Battlefield) {
    let store = &mut field.projectiles;
    let mut destroyed = vec![false; store.enemy.len()];
    let mut spent = vec![false; store.player.len()];

    for (pi, shot) in store.player.iter().enumerate() {
        for (ei, enemy_shot) in store.enemy.iter().enumerate() {
            if destroyed[ei] || enemy_shot.flags.indestructible || !overlaps(shot, enemy_shot) {
                continue;
            }
            destroyed[ei] = true;
            if !shot.flags.piercing {
                spent[pi] = true;
                break;
            }
        }
    }

    let mut flags = destroyed.into_iter();
    store.enemy.retain(|_| !flags.next().unwrap_or(false));
    let mut flags = spent.into_iter();
    store.player.retain(|_| !flags.next().unwrap_or(false));
}

/// Player projectiles against enemies. A piercing projectile hits each enemy
/// at most once; a non-piercing one is spent on its first hit.
pub fn hit_enemies(
    field: &mut Battlefield,
    frame: &TickFrame,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<AudioEvent>,
) {
    let hitboxes = field.population.hitboxes();
    let player = field.player.position;
    let mut projectiles = std::mem::take(&mut field.projectiles.player);

    projectiles.retain_mut(|shot| {
        for hitbox in &hitboxes {
            if shot.has_hit(hitbox.id) || !field.population.contains(hitbox.id) {
                continue;
            }
            let reach = shot.size + hitbox.radius;
            if shot.position.distance_squared_to(&hitbox.position) > reach * reach {
                continue;
            }

            shot.hit_enemies.push(hitbox.id);
            let hit = EnemyHit {
                enemy_id: hitbox.id,
                amount: shot.damage * frame.damage_multiplier,
                knockback: shot.knockback,
                source: shot.position,
            };
            if let Some(outcome) = field.population.damage_enemy(hit, player, rng, events) {
                if outcome.killed {
                    field.record_kill(&outcome, frame, true, rng, events);
                }
            }
            if !shot.flags.piercing {
                return false;
            }
        }
        true
    });

    field.projectiles.player = projectiles;
}

/// Melee hitboxes exist for exactly one collision pass.
pub fn expire_instant(field: &mut Battlefield) {
    field.projectiles.player.retain(|shot| !shot.flags.is_instant);
}

/// Enemy projectiles against the player. Every touching projectile is
/// consumed; damage is shield-gated and debounced.
pub fn hit_player(field: &mut Battlefield, frame: &TickFrame, events: &mut Vec<AudioEvent>) {
    let player = &mut field.player;
    let position = player.position;
    field.projectiles.enemy.retain(|shot| {
        let reach = shot.size + PLAYER_RADIUS;
        if shot.position.distance_squared_to(&position) > reach * reach {
            return true;
        }
        player.receive_projectile(shot.damage, frame.now, frame.shield, events);
        false
    });
}

/// Body contact. Weak enemies detonate; everything else deals continuous
/// damage scaled by the tick length.
pub fn contact(
    field: &mut Battlefield,
    frame: &TickFrame,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<AudioEvent>,
) {
    let player = field.player.position;
    for hitbox in field.population.hitboxes() {
        let reach = hitbox.radius + PLAYER_RADIUS;
        if hitbox.position.distance_squared_to(&player) > reach * reach {
            continue;
        }
        let profile = get_profile(hitbox.kind);
        if profile.explodes {
            if let Some(outcome) = field.population.detonate(hitbox.id, player, rng, events) {
                field.record_kill(&outcome, frame, false, rng, events);
            }
        } else if profile.contact_damage {
            let amount = hitbox.damage * CONTACT_DAMAGE_FACTOR * frame.dt;
            field.player.receive(amount, frame.shield, false, events);
        }
    }
}
