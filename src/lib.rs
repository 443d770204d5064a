//! Voxel Space style terrain renderer.
//!
//! One ray per screen column is marched over a 1024x1024 toroidal height map
//! and painted front to back into a CPU framebuffer.

pub mod app;
pub mod config;
pub mod core;
pub mod platform;
pub mod render;

pub use app::{LoopState, RenderLoop, Simulation, Surface};
pub use config::{Args, Config};
