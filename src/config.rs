//! Command-line options and the resolved runtime configuration.
use std::path::PathBuf;

use clap::Parser;

use crate::core::camera::{Camera, CameraLimits, MotionRates};
use crate::core::dataset::{LoadError, MapId};
use crate::render::casters::RenderConfig;

#[derive(Parser, Debug)]
#[command(name = "voxel_space", about = "Heightfield terrain flyover")]
pub struct Args {
    /// Framebuffer width in pixels.
    #[arg(long, default_value_t = 512)]
    pub width: u32,
    /// Framebuffer height in pixels.
    #[arg(long, default_value_t = 256)]
    pub height: u32,
    /// Window magnification.
    #[arg(short, long, default_value_t = 2)]
    pub scale: u32,
    /// Directory holding mapN.height / mapN.color / mapN.palette.
    #[arg(short, long, default_value = "map")]
    pub data_dir: PathBuf,
    /// Initial map; random when omitted.
    #[arg(short, long)]
    pub map: Option<u32>,
    /// Do not clamp altitude and pitch.
    #[arg(long)]
    pub unbounded: bool,
    #[arg(long, default_value_t = 60)]
    pub fps: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub render: RenderConfig,
    pub limits: CameraLimits,
    pub rates: MotionRates,
    pub start: Camera,
    pub data_dir: PathBuf,
    pub initial_map: MapId,
    pub scale: u32,
    pub fps: u32,
}

impl Config {
    /// Defaults with a fixed starting map.
    pub fn with_map(initial_map: MapId) -> Self {
        Self {
            render: RenderConfig::default(),
            limits: CameraLimits::default(),
            rates: MotionRates::default(),
            start: Camera::default(),
            data_dir: PathBuf::from("map"),
            initial_map,
            scale: 2,
            fps: 60,
        }
    }
}

impl Args {
    pub fn into_config(self) -> Result<Config, LoadError> {
        let initial_map = match self.map {
            Some(n) => MapId::new(n)?,
            None => MapId::random(&mut rand::thread_rng()),
        };
        let mut cfg = Config::with_map(initial_map);
        cfg.render.width = self.width.max(1);
        cfg.render.height = self.height.max(1);
        cfg.scale = self.scale.max(1);
        cfg.fps = self.fps;
        cfg.data_dir = self.data_dir;
        if self.unbounded {
            cfg.limits = CameraLimits::UNBOUNDED;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_view() {
        let cfg = Args::parse_from(["voxel_space", "--map", "3"]).into_config().unwrap();
        assert_eq!(cfg.initial_map.index(), 3);
        assert_eq!((cfg.render.width, cfg.render.height), (512, 256));
        assert_eq!(cfg.limits, CameraLimits::default());
        assert_eq!(cfg.data_dir, PathBuf::from("map"));
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Args::parse_from(["voxel_space", "--unbounded", "--width", "320", "-d", "data"])
            .into_config()
            .unwrap();
        assert_eq!(cfg.limits, CameraLimits::UNBOUNDED);
        assert_eq!(cfg.render.width, 320);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn out_of_range_map_is_rejected() {
        assert!(Args::parse_from(["voxel_space", "--map", "30"]).into_config().is_err());
    }
}
