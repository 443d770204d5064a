//! Core simulation types (data, camera, input, datasets).
//!
//! Re-exports:
//! - `terrain`: Height/color grids, palette and wrap-aware addressing
//! - `camera`: Camera state, motion rates and bounding policy
//! - `input`: Action flags and per-tick camera updates
//! - `dataset`: Map files on disk and background loading

pub mod terrain;
pub mod camera;
pub mod input;
pub mod dataset;
