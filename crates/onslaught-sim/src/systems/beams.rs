//! Beam damage against the player.
//!
//! Lightning hits once per beam. Energy beams apply damage per second plus
//! lateral knockback after a warm-up. Laser beams apply damage per second
//! plus knockback along the beam, and the shield blocks both.

use onslaught_core::constants::PLAYER_RADIUS;
use onslaught_core::entities::{Beam, BeamShape};
use onslaught_core::enums::BeamKind;
use onslaught_core::events::AudioEvent;

use glam::DVec2;

use crate::battlefield::{Battlefield, TickFrame};
use crate::geometry::{in_ray_band, polyline_distance, ray_frame};

pub fn run(field: &mut Battlefield, frame: &TickFrame, events: &mut Vec<AudioEvent>) {
    let lazer = &frame.config.attacks.lazer;
    let live: Vec<Beam> = field
        .population
        .beams()
        .iter()
        .filter(|beam| beam.is_live(frame.now))
        .cloned()
        .collect();

    for beam in live {
        let player = field.player.position;
        match (&beam.kind, &beam.shape) {
            (BeamKind::Lightning, BeamShape::Path { points }) => {
                if beam.has_hit {
                    continue;
                }
                let touching = polyline_distance(player, points)
                    .is_some_and(|d| d <= lazer.lightning_hit_radius + PLAYER_RADIUS);
                if touching && field.population.spend_lightning(beam.id) {
                    field.player.receive(beam.damage, frame.shield, true, events);
                }
            }
            (BeamKind::Energy, BeamShape::Ray { origin, angle }) => {
                if frame.now < beam.started_at + lazer.beam_warmup_secs {
                    continue;
                }
                if !in_ray_band(*origin, *angle, player, lazer.beam_half_width + PLAYER_RADIUS) {
                    continue;
                }
                field
                    .player
                    .receive(beam.damage * frame.dt, frame.shield, false, events);
                let (_, lateral) = ray_frame(*origin, *angle, player);
                let side = if lateral < 0.0 { -1.0 } else { 1.0 };
                let push = DVec2::from_angle(*angle).perp() * side * lazer.beam_knockback * frame.dt;
                field.player.position = player.offset(push);
            }
            (BeamKind::Laser, BeamShape::Ray { origin, angle }) => {
                if frame.shield {
                    continue;
                }
                if !in_ray_band(*origin, *angle, player, lazer.beam_half_width + PLAYER_RADIUS) {
                    continue;
                }
                field
                    .player
                    .receive(beam.damage * frame.dt, false, false, events);
                let push = DVec2::from_angle(*angle) * lazer.beam_knockback * frame.dt;
                field.player.position = player.offset(push);
            }
            _ => {}
        }
    }
}
