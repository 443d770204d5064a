//! Rendering: framebuffer, column ray caster and HUD layout.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer and span sink
//! - `casters`: Heightfield column ray caster
//! - `hud`: Flight HUD shapes drawn over the presented frame

pub mod framebuffer;
pub mod casters;
pub mod hud;
