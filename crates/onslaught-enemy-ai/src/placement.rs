//! Spawn type selection and placement geometry around the player's viewport.

use std::f64::consts::FRAC_PI_4;

use glam::DVec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use onslaught_core::config::{TypeWeights, ViewportBalance};
use onslaught_core::constants::*;
use onslaught_core::enums::EnemyType;
use onslaught_core::types::Position;

/// The 8 spawn directions, counter-clockwise from +x, 45° apart.
const DIRECTIONS: [(f64, f64); SPAWN_DIRECTIONS] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

/// Pick an enemy type from the tier weights. Lazer is excluded once
/// `elites_alive` reaches `elite_cap`. Degenerate weights yield the default type.
pub fn choose_enemy_type<R: Rng>(
    rng: &mut R,
    weights: &TypeWeights,
    elites_alive: u32,
    elite_cap: u32,
) -> EnemyType {
    let candidates: Vec<(EnemyType, f64)> = EnemyType::ALL
        .into_iter()
        .filter(|kind| *kind != EnemyType::Lazer || elites_alive < elite_cap)
        .map(|kind| (kind, weights.weight(kind).max(0.0)))
        .collect();

    match WeightedIndex::new(candidates.iter().map(|(_, w)| *w)) {
        Ok(dist) => candidates[dist.sample(rng)].0,
        Err(_) => EnemyType::default(),
    }
}

/// Unit vector of the aim direction, defaulting to +x when aim sits on the player.
pub fn aim_direction(player: &Position, aim: &Position) -> DVec2 {
    let dir = player.direction_to(aim);
    if dir == DVec2::ZERO {
        DVec2::X
    } else {
        dir
    }
}

/// Index of the spawn direction opposite the aim.
fn opposite_direction_index(player: &Position, aim: &Position) -> usize {
    let dir = aim_direction(player, aim);
    let aim_index = (dir.y.atan2(dir.x) / FRAC_PI_4).round() as i64;
    (aim_index + 4).rem_euclid(SPAWN_DIRECTIONS as i64) as usize
}

/// Spawn point strictly outside the camera rectangle (plus margin) in one of
/// the 8 directions. With probability `SPAWN_OPPOSITE_AIM_BIAS` the direction is
/// drawn from the three directions facing away from the aim.
pub fn spawn_position<R: Rng>(
    rng: &mut R,
    player: &Position,
    aim: &Position,
    viewport: &ViewportBalance,
) -> Position {
    let index = if rng.gen_bool(SPAWN_OPPOSITE_AIM_BIAS) {
        let opposite = opposite_direction_index(player, aim) as i64;
        (opposite + rng.gen_range(-1..=1)).rem_euclid(SPAWN_DIRECTIONS as i64) as usize
    } else {
        rng.gen_range(0..SPAWN_DIRECTIONS)
    };
    let (dx, dy) = DIRECTIONS[index];

    let half_w = viewport.half_width();
    let half_h = viewport.half_height();
    let x = if dx == 0.0 {
        rng.gen_range(-half_w..=half_w)
    } else {
        dx * (half_w + SPAWN_MARGIN + rng.gen_range(0.0..SPAWN_JITTER))
    };
    let y = if dy == 0.0 {
        rng.gen_range(-half_h..=half_h)
    } else {
        dy * (half_h + SPAWN_MARGIN + rng.gen_range(0.0..SPAWN_JITTER))
    };

    player.offset(DVec2::new(x, y))
}

/// The point `distance` directly behind the player relative to the aim.
pub fn behind_player(player: &Position, aim: &Position, distance: f64) -> Position {
    player.offset(-aim_direction(player, aim) * distance)
}

/// Relocation target for an enemy that strayed too far: behind the player,
/// just outside the viewport, with a random lateral offset.
pub fn relocation_position<R: Rng>(
    rng: &mut R,
    player: &Position,
    aim: &Position,
    viewport: &ViewportBalance,
) -> Position {
    let back = behind_player(player, aim, viewport.diagonal() / 2.0 + SPAWN_MARGIN);
    let lateral = aim_direction(player, aim).perp()
        * rng.gen_range(-TELEPORT_LATERAL_JITTER..=TELEPORT_LATERAL_JITTER);
    back.offset(lateral)
}

/// Inside the camera rectangle centered on the player.
pub fn in_viewport(pos: &Position, player: &Position, viewport: &ViewportBalance) -> bool {
    (pos.x - player.x).abs() <= viewport.half_width()
        && (pos.y - player.y).abs() <= viewport.half_height()
}

/// Beyond the relocation threshold (1.5× the viewport diagonal).
pub fn is_too_far(pos: &Position, player: &Position, viewport: &ViewportBalance) -> bool {
    pos.distance_to(player) > viewport.diagonal() * TELEPORT_DIAGONAL_FACTOR
}
