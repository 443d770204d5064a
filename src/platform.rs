//! raylib window: key wiring, framebuffer blit and HUD drawing.
use log::{info, warn};
use raylib::prelude::*;
use thiserror::Error;

use crate::app::Surface;
use crate::config::Config;
use crate::core::camera::Camera;
use crate::core::input::{Actions, Command, InputEvent};
use crate::render::framebuffer::Framebuffer;
use crate::render::hud::{HudModel, HudShape};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("could not create the frame texture: {0}")]
    Texture(String),
}

/// Held intents by key.
pub const KEY_BINDINGS: &[(KeyboardKey, Actions)] = &[
    (KeyboardKey::KEY_LEFT, Actions::TURN_LEFT),
    (KeyboardKey::KEY_RIGHT, Actions::TURN_RIGHT),
    (KeyboardKey::KEY_UP, Actions::MOVE_FORWARD),
    (KeyboardKey::KEY_DOWN, Actions::MOVE_BACKWARD),
    (KeyboardKey::KEY_E, Actions::ASCEND),
    (KeyboardKey::KEY_D, Actions::DESCEND),
    (KeyboardKey::KEY_W, Actions::PITCH_UP),
    (KeyboardKey::KEY_S, Actions::PITCH_DOWN),
];

pub const COMMAND_KEYS: &[(KeyboardKey, Command)] = &[
    (KeyboardKey::KEY_N, Command::NextMap),
    (KeyboardKey::KEY_R, Command::RandomMap),
];

pub struct RaylibSurface {
    rl: RaylibHandle,
    thread: RaylibThread,
    texture: Texture2D,
    scale: i32,
    width: i32,
    height: i32,
    last_camera: Camera,
}

impl RaylibSurface {
    pub fn new(cfg: &Config) -> Result<Self, SurfaceError> {
        let width = cfg.render.width as i32;
        let height = cfg.render.height as i32;
        let scale = cfg.scale as i32;

        let (mut rl, thread) = raylib::init()
            .size(width * scale, height * scale)
            .title("Voxel Space")
            .build();
        rl.set_target_fps(cfg.fps);

        let img = Image::gen_image_color(width, height, Color::BLACK);
        let texture = rl
            .load_texture_from_image(&thread, &img)
            .map_err(|e| SurfaceError::Texture(format!("{e:?}")))?;
        info!("window {}x{} (x{})", width, height, scale);

        Ok(Self { rl, thread, texture, scale, width, height, last_camera: cfg.start })
    }

    fn draw(&mut self) {
        let hud = HudModel::new(&self.last_camera, self.width, self.height);
        let s = self.scale;
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_ex(&self.texture, Vector2::new(0.0, 0.0), 0.0, s as f32, Color::WHITE);
        draw_hud(&mut d, &hud, s);
    }
}

fn draw_hud(d: &mut RaylibDrawHandle, hud: &HudModel, s: i32) {
    for shape in &hud.shapes {
        match shape {
            HudShape::Line { from, to, color } => {
                d.draw_line(from.0 * s, from.1 * s, to.0 * s, to.1 * s, *color);
            }
            HudShape::Rect { x, y, w, h, color } => {
                d.draw_rectangle_lines(x * s, y * s, w * s, h * s, *color);
            }
            HudShape::Text { text, x, y, color } => {
                d.draw_text(text, x * s, y * s, 10 * s, *color);
            }
        }
    }
}

impl Surface for RaylibSurface {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) {
        for &(key, action) in KEY_BINDINGS {
            if self.rl.is_key_pressed(key) {
                out.push(InputEvent::Pressed(action));
            }
            if self.rl.is_key_released(key) {
                out.push(InputEvent::Released(action));
            }
        }
        for &(key, cmd) in COMMAND_KEYS {
            if self.rl.is_key_pressed(key) {
                out.push(InputEvent::Command(cmd));
            }
        }
    }

    fn should_close(&self) -> bool {
        self.rl.window_should_close()
    }

    fn present(&mut self, frame: &Framebuffer, camera: &Camera) {
        if let Err(e) = frame.upload_to_texture(&mut self.texture) {
            warn!("frame upload failed: {e}");
        }
        self.last_camera = *camera;
        self.draw();
    }

    fn idle(&mut self) {
        self.draw();
    }
}
