//! Fundamental geometric and simulation types.
//!
//! Screen space: x grows to the right (away from the defender), y grows downward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in arena space (pixels per step).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Width and height of a rectangular body (pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounding box. `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each step).
    pub tick: u64,
    /// Monotonic simulation clock in milliseconds.
    pub now_ms: f64,
}

/// Global multipliers applied to regular attackers as boss waves are cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub speed: f64,
    pub health: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            speed: 1.0,
            health: 1.0,
        }
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        DVec2::from(*self).distance(DVec2::from(*other))
    }

    /// Offset by a velocity for one step.
    pub fn advanced(&self, velocity: &Velocity) -> Position {
        Position::new(self.x + velocity.x, self.y + velocity.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (pixels per step).
    pub fn speed(&self) -> f64 {
        DVec2::from(*self).length()
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Uniformly scaled copy.
    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

impl Aabb {
    /// Box whose top-left corner is `pos`.
    pub fn from_top_left(pos: Position, size: Size) -> Self {
        let min = DVec2::from(pos);
        Self {
            min,
            max: min + DVec2::new(size.width, size.height),
        }
    }

    /// Box centered on `pos`.
    pub fn from_center(pos: Position, size: Size) -> Self {
        let half = DVec2::new(size.width, size.height) * 0.5;
        let center = DVec2::from(pos);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn center(&self) -> Position {
        let c = (self.min + self.max) * 0.5;
        Position::new(c.x, c.y)
    }
}

impl SimTime {
    /// Advance by one tick of `step_ms` milliseconds.
    pub fn advance(&mut self, step_ms: f64) {
        self.tick += 1;
        self.now_ms += step_ms.max(0.0);
    }

    /// Advance by one tick to an externally supplied clock reading.
    /// Readings earlier than the current time never rewind the clock.
    pub fn advance_to(&mut self, now_ms: f64) {
        self.tick += 1;
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

impl From<Velocity> for DVec2 {
    fn from(v: Velocity) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Velocity::new(v.x, v.y)
    }
}
