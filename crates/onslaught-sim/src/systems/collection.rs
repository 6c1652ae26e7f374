//! Pickup collection.

use onslaught_core::constants::{PICKUP_ANIM_SPEED, PLAYER_RADIUS, PICKUP_REACH};
use onslaught_core::enums::PickupKind;
use onslaught_core::events::AudioEvent;

use crate::battlefield::{Battlefield, TickFrame};

/// Collect every pickup the player touches. Restores are capped by the
/// target resource's maximum.
pub fn run(field: &mut Battlefield, frame: &TickFrame, events: &mut Vec<AudioEvent>) {
    field.pickups.animate(frame.dt, PICKUP_ANIM_SPEED);

    let player = field.player.position;
    let mut collected = Vec::new();
    field.pickups.items.retain(|pickup| {
        let reach = PLAYER_RADIUS + pickup.size + PICKUP_REACH;
        if pickup.position.distance_to(&player) <= reach {
            collected.push((pickup.kind, pickup.restore));
            false
        } else {
            true
        }
    });

    for (kind, restore) in collected {
        match kind {
            PickupKind::Health => field.player.stats.heal(restore),
            PickupKind::Ammo => field.weapon.restore_ammo(restore.max(0.0).round() as u32),
            PickupKind::Vest => field.player.stats.add_armor(restore),
        }
        events.push(AudioEvent::PickupCollected { kind });
    }
}
