//! Snapshot builder: reads sim state and produces a `FrameSnapshot`.
//!
//! Read-only; never mutates anything.

use onslaught_core::entities::{Beam, Pickup};
use onslaught_core::enums::{BeamKind, PickupKind, PowerUp, SessionPhase};
use onslaught_core::events::AudioEvent;
use onslaught_core::state::{FrameSnapshot, PlayerView, WaveView};
use onslaught_core::types::SimTime;

use crate::abilities::AbilityController;
use crate::battlefield::Battlefield;
use crate::waves::WaveDirector;

fn beams_of(beams: &[Beam], kind: BeamKind) -> Vec<Beam> {
    beams.iter().filter(|b| b.kind == kind).cloned().collect()
}

fn pickups_of(pickups: &[Pickup], kind: PickupKind) -> Vec<Pickup> {
    pickups.iter().filter(|p| p.kind == kind).cloned().collect()
}

pub fn build_snapshot(
    field: &Battlefield,
    waves: &WaveDirector,
    abilities: &AbilityController,
    time: &SimTime,
    phase: SessionPhase,
    audio_events: Vec<AudioEvent>,
) -> FrameSnapshot {
    let now = time.now();
    let population = &field.population;
    let beams = population.beams();
    let pickups = &field.pickups.items;
    let started = phase != SessionPhase::Idle;

    let player = PlayerView {
        position: field.player.position,
        aim: field.player.aim,
        stats: started.then_some(field.player.stats),
        weapon: started.then(|| field.weapon.weapon().weapon_type),
        ammo: field.weapon.ammo(),
        max_ammo: field.weapon.max_ammo(),
    };

    let power_up_offer: Vec<PowerUp> = waves.offer().to_vec();

    FrameSnapshot {
        time: *time,
        phase,
        player,
        enemies: population.views(now),
        player_projectiles: field.projectiles.player.clone(),
        enemy_projectiles: field.projectiles.enemy.clone(),
        lightning_beams: beams_of(beams, BeamKind::Lightning),
        energy_beams: beams_of(beams, BeamKind::Energy),
        laser_beams: beams_of(beams, BeamKind::Laser),
        health_pickups: pickups_of(pickups, PickupKind::Health),
        ammo_pickups: pickups_of(pickups, PickupKind::Ammo),
        vest_pickups: pickups_of(pickups, PickupKind::Vest),
        wave: WaveView {
            state: waves.state(),
            target_count: population.target_count(),
            spawned_count: population.spawned_count(),
            alive_count: population.alive_count(),
            kills: field.kills,
        },
        abilities: abilities.states().to_vec(),
        power_up_offer,
        audio_events,
    }
}
