//! Logical input: edge-tracked action flags and per-tick camera updates.
use bitflags::bitflags;
use crate::core::camera::{Camera, CameraLimits, MotionRates};

bitflags! {
    /// Intents currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u8 {
        const TURN_LEFT     = 1 << 0;
        const TURN_RIGHT    = 1 << 1;
        const MOVE_FORWARD  = 1 << 2;
        const MOVE_BACKWARD = 1 << 3;
        const ASCEND        = 1 << 4;
        const DESCEND       = 1 << 5;
        const PITCH_UP      = 1 << 6;
        const PITCH_DOWN    = 1 << 7;
    }
}

/// One-shot requests that are not camera intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextMap,
    RandomMap,
}

/// What the input source delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Actions),
    Released(Actions),
    Command(Command),
}

#[derive(Debug, Default)]
pub struct InputController {
    held: Actions,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Actions {
        self.held
    }

    /// Applies one edge. Returns `true` for a press that adds a new intent.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Pressed(a) => {
                let fresh = !self.held.contains(a);
                self.held.insert(a);
                fresh && !a.is_empty()
            }
            InputEvent::Released(a) => {
                self.held.remove(a);
                false
            }
            InputEvent::Command(_) => false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.held.is_empty()
    }

    /// Moves the camera by one tick of every held intent and reports activity.
    pub fn update(&self, camera: &mut Camera, rates: &MotionRates, limits: &CameraLimits) -> bool {
        let held = self.held;
        if held.contains(Actions::TURN_LEFT) {
            camera.turn(rates.turn);
        }
        if held.contains(Actions::TURN_RIGHT) {
            camera.turn(-rates.turn);
        }
        if held.contains(Actions::MOVE_FORWARD) {
            camera.advance(rates.speed);
        }
        if held.contains(Actions::MOVE_BACKWARD) {
            camera.advance(-rates.speed);
        }
        if held.contains(Actions::ASCEND) {
            camera.climb(rates.climb, limits);
        }
        if held.contains(Actions::DESCEND) {
            camera.climb(-rates.climb, limits);
        }
        if held.contains(Actions::PITCH_UP) {
            camera.tilt(rates.pitch, limits);
        }
        if held.contains(Actions::PITCH_DOWN) {
            camera.tilt(-rates.pitch, limits);
        }
        self.is_active()
    }
}
