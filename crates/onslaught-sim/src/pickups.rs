//! Dropped pickups: health, ammo and armor vests.

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::config::DropBalance;
use onslaught_core::entities::Pickup;
use onslaught_core::enums::PickupKind;
use onslaught_core::types::Position;

/// Spacing between pickups dropped by the same kill.
const DROP_SPREAD: f64 = 14.0;

#[derive(Debug, Default)]
pub struct PickupField {
    pub items: Vec<Pickup>,
    next_id: u32,
}

impl PickupField {
    /// Roll each drop independently at a kill position.
    pub fn roll_drops(&mut self, rng: &mut ChaCha8Rng, drops: &DropBalance, at: Position) {
        let table = [
            (PickupKind::Health, drops.health_chance, drops.health_restore),
            (PickupKind::Ammo, drops.ammo_chance, drops.ammo_restore),
            (PickupKind::Vest, drops.vest_chance, drops.vest_restore),
        ];
        let mut dropped = 0.0;
        for (kind, chance, restore) in table {
            if rng.gen_bool(chance.clamp(0.0, 1.0)) {
                let position = Position::new(at.x + dropped * DROP_SPREAD, at.y);
                self.spawn(kind, position, restore, drops.pickup_size);
                dropped += 1.0;
            }
        }
    }

    pub fn spawn(&mut self, kind: PickupKind, position: Position, restore: f64, size: f64) -> u32 {
        self.next_id += 1;
        self.items.push(Pickup {
            id: self.next_id,
            kind,
            position,
            restore,
            size,
            anim_phase: 0.0,
        });
        self.next_id
    }

    /// Advance the bobbing animation.
    pub fn animate(&mut self, dt: f64, speed: f64) {
        for pickup in &mut self.items {
            pickup.anim_phase = (pickup.anim_phase + dt * speed).rem_euclid(TAU);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
