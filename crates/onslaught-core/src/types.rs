//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space (pixels). The plane is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
///
/// The clock is driven only by accumulated tick delta-time, so every timer
/// and every movement integration read the same notion of "now".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    pub fn distance_squared_to(&self, other: &Position) -> f64 {
        self.to_vec().distance_squared(other.to_vec())
    }

    /// Angle (radians, atan2 convention) pointing from `self` toward `other`.
    /// Coincident points yield 0.0.
    pub fn angle_to(&self, other: &Position) -> f64 {
        let d = other.to_vec() - self.to_vec();
        if d == DVec2::ZERO {
            return 0.0;
        }
        d.y.atan2(d.x)
    }

    /// Unit vector toward `other`, or zero when the points coincide.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        (other.to_vec() - self.to_vec()).normalize_or_zero()
    }

    pub fn offset(&self, delta: DVec2) -> Position {
        (self.to_vec() + delta).into()
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` along `angle` (radians).
    pub fn from_angle(angle: f64, speed: f64) -> Self {
        Self {
            x: angle.cos() * speed,
            y: angle.sin() * speed,
        }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        self.to_vec().length()
    }

    /// Heading in radians (atan2 convention).
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }

    /// The clock value every timer in the current tick compares against.
    pub fn now(&self) -> f64 {
        self.elapsed_secs
    }
}
