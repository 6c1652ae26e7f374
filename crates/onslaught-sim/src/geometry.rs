//! Hit-test geometry for beams.

use glam::DVec2;

use onslaught_core::types::Position;

/// Shortest distance from `point` to the segment `a`-`b`.
pub fn segment_distance(point: Position, a: Position, b: Position) -> f64 {
    let (p, a, b) = (point.to_vec(), a.to_vec(), b.to_vec());
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Shortest distance from `point` to any segment of a polyline.
pub fn polyline_distance(point: Position, points: &[Position]) -> Option<f64> {
    points
        .windows(2)
        .map(|pair| segment_distance(point, pair[0], pair[1]))
        .min_by(f64::total_cmp)
}

/// Coordinates of `point` in a ray's frame: distance along the ray and
/// signed lateral offset (positive to the left of the direction).
pub fn ray_frame(origin: Position, angle: f64, point: Position) -> (f64, f64) {
    let dir = DVec2::from_angle(angle);
    let rel = point.to_vec() - origin.to_vec();
    (rel.dot(dir), dir.perp_dot(rel))
}

/// Inside the directional band of half-width `half_width` ahead of the origin.
pub fn in_ray_band(origin: Position, angle: f64, point: Position, half_width: f64) -> bool {
    let (along, lateral) = ray_frame(origin, angle, point);
    along >= 0.0 && lateral.abs() <= half_width
}
