//! Flight HUD layout. Pure geometry and text; drawing is up to the surface.
use raylib::prelude::*;
use crate::core::camera::Camera;

pub const HUD_GREEN: Color = Color::new(0x00, 0xFF, 0x00, 255);
pub const HUD_BORDER: Color = Color::new(0x4A, 0x5B, 0x89, 255);

#[derive(Debug, Clone, PartialEq)]
pub enum HudShape {
    Line { from: (i32, i32), to: (i32, i32), color: Color },
    Rect { x: i32, y: i32, w: i32, h: i32, color: Color },
    Text { text: String, x: i32, y: i32, color: Color },
}

/// Compass label: whole degrees, zero padded to three digits.
pub fn heading_label(heading: f32) -> String {
    let deg = (heading.to_degrees() % 360.0).abs().round() as u32;
    format!("{:03}°", deg)
}

/// Angle of attack readout; 0 at the default pitch of -100.
pub fn aoa_value(pitch: f32) -> f32 {
    0.0 - (pitch + 100.0)
}

pub struct HudModel {
    pub shapes: Vec<HudShape>,
}

impl HudModel {
    /// Layout for a `width` x `height` frame, in frame pixels.
    pub fn new(camera: &Camera, width: i32, height: i32) -> Self {
        let cx = width / 2;
        let cy = height / 2;
        let mut shapes = Vec::new();
        let mut line = |x0: i32, y0: i32, x1: i32, y1: i32, color: Color| {
            shapes.push(HudShape::Line { from: (x0, y0), to: (x1, y1), color });
        };

        // flight path marker
        let marker = [(-25, 0), (-15, 0), (-8, 7), (0, -1), (8, 7), (15, 0), (25, 0)];
        for w in marker.windows(2) {
            line(cx + w[0].0, cy + w[0].1, cx + w[1].0, cy + w[1].1, HUD_GREEN);
        }

        // ladder rails + ticks
        line(cx - 180, cy - 100, cx - 180, cy + 100, HUD_GREEN);
        line(cx + 180, cy - 100, cx + 180, cy + 100, HUD_GREEN);
        for y in (cy - 100..=cy + 100).step_by(20) {
            line(cx - 184, y, cx - 180, y, HUD_GREEN);
            line(cx + 180, y, cx + 184, y, HUD_GREEN);
        }

        // heading caret
        line(cx - 3, cy - 115, cx + 2, cy - 115, HUD_GREEN);
        line(cx - 3, cy - 115, cx, cy - 112, HUD_GREEN);
        line(cx + 3, cy - 115, cx, cy - 112, HUD_GREEN);

        line(0, height, width, height, HUD_BORDER);

        shapes.push(HudShape::Rect { x: cx - 245, y: cy - 10, w: 50, h: 20, color: HUD_GREEN });
        shapes.push(HudShape::Text {
            text: format!("ALT {}", camera.altitude),
            x: cx - 240,
            y: cy - 4,
            color: HUD_GREEN,
        });
        shapes.push(HudShape::Rect { x: cx + 195, y: cy - 10, w: 50, h: 20, color: HUD_GREEN });
        shapes.push(HudShape::Text {
            text: format!("AOA {}", aoa_value(camera.pitch)),
            x: cx + 200,
            y: cy - 4,
            color: HUD_GREEN,
        });
        shapes.push(HudShape::Text {
            text: heading_label(camera.heading()),
            x: cx - 8,
            y: cy - 108,
            color: HUD_GREEN,
        });

        Self { shapes }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            HudShape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
