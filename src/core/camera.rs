use raylib::prelude::*;
use std::f32::consts::TAU;

/// Optional closed interval applied after each altitude/pitch change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }
}

/// Bounding policy. `None` on an axis leaves it unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLimits {
    pub altitude: Option<Bounds>,
    pub pitch: Option<Bounds>,
}

impl CameraLimits {
    pub const UNBOUNDED: CameraLimits = CameraLimits { altitude: None, pitch: None };
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            altitude: Some(Bounds::new(10.0, 200.0)),
            pitch: Some(Bounds::new(-200.0, 20.0)),
        }
    }
}

/// Per-tick deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRates {
    pub turn: f32,
    pub speed: f32,
    pub climb: f32,
    pub pitch: f32,
}

impl Default for MotionRates {
    fn default() -> Self {
        Self { turn: 0.05, speed: 3.0, climb: 2.0, pitch: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vector2,
    heading: f32, // radians, kept in [0, 2π)
    pub altitude: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32, heading: f32, altitude: f32, pitch: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            heading: heading.rem_euclid(TAU),
            altitude,
            pitch,
        }
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, a: f32) {
        self.heading = a.rem_euclid(TAU);
    }

    pub fn turn(&mut self, delta: f32) {
        self.set_heading(self.heading + delta);
    }

    /// Moves along the current facing. Positive `amount` goes forward.
    pub fn advance(&mut self, amount: f32) {
        self.pos.x -= self.heading.sin() * amount;
        self.pos.y -= self.heading.cos() * amount;
    }

    pub fn climb(&mut self, delta: f32, limits: &CameraLimits) {
        self.altitude += delta;
        if let Some(b) = limits.altitude {
            self.altitude = b.clamp(self.altitude);
        }
    }

    pub fn tilt(&mut self, delta: f32, limits: &CameraLimits) {
        self.pitch += delta;
        if let Some(b) = limits.pitch {
            self.pitch = b.clamp(self.pitch);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(512.0, 800.0, 0.0, 100.0, -100.0)
    }
}
