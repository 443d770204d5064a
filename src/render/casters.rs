//! Column ray caster over the heightfield.
//!
//! One ray per screen column, marched front to back across the map. Each
//! sample projects to a screen row; the run between that row and the
//! occlusion bound `ymin` is painted, then `ymin` moves up. Nearer terrain
//! therefore always wins and each column costs at most `height` pixel writes.
use raylib::prelude::*;
use crate::core::camera::Camera;
use crate::core::terrain::{MapAddress, TerrainData};
use crate::render::framebuffer::SpanSink;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Distance from the camera to the view plane before scaling.
    pub far_plane: f32,
    pub fov_scale: f32,
    /// Extra lateral stretch per column.
    pub column_spread: f32,
    /// Rows per unit of height at unit distance.
    pub projection_scale: f32,
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            far_plane: 400.0,
            fov_scale: 1.5,
            column_spread: 1.5,
            projection_scale: 100.0,
            background: Color::new(0xA0, 0xA0, 0xFF, 0xCC),
        }
    }
}

/// Screen row for a sample `h` units below the camera at step `step`.
/// Not clamped; may be negative or huge.
#[inline]
pub fn project_row(h: f32, d: f32, step: u32, pitch: f32, scale: f32) -> i32 {
    let dist = d.abs() * step as f32;
    (h / dist * scale - pitch).floor() as i32
}

/// Summary of one column cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStats {
    /// Samples taken along the ray.
    pub steps: u32,
    /// Final occlusion bound; rows above it were left to the background.
    pub ymin: u32,
}

pub struct RayCaster {
    cfg: RenderConfig,
}

impl RayCaster {
    pub fn new(cfg: RenderConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    /// Un-rotated view-plane offset for `column`.
    #[inline]
    fn view_offset(&self, column: u32) -> (f32, f32) {
        let c = &self.cfg;
        let lateral = (column as f32 - c.width as f32 / 2.0) * c.column_spread * c.fov_scale;
        let forward = -c.far_plane * c.fov_scale;
        (lateral, forward)
    }

    /// Casts every column of the frame.
    pub fn cast_all<S: SpanSink>(&self, camera: &Camera, terrain: &TerrainData, sink: &mut S) {
        let (sin_a, cos_a) = camera.heading().sin_cos();
        for column in 0..self.cfg.width {
            self.cast_rotated(camera, terrain, column, sin_a, cos_a, sink);
        }
    }

    pub fn cast_column<S: SpanSink>(
        &self,
        camera: &Camera,
        terrain: &TerrainData,
        column: u32,
        sink: &mut S,
    ) -> ColumnStats {
        let (sin_a, cos_a) = camera.heading().sin_cos();
        self.cast_rotated(camera, terrain, column, sin_a, cos_a, sink)
    }

    fn cast_rotated<S: SpanSink>(
        &self,
        camera: &Camera,
        terrain: &TerrainData,
        column: u32,
        sin_a: f32,
        cos_a: f32,
        sink: &mut S,
    ) -> ColumnStats {
        let height = self.cfg.height;
        let (lx, ly) = self.view_offset(column);

        let dx = cos_a * lx + sin_a * ly;
        let dy = -sin_a * lx + cos_a * ly;
        // perspective correction for the planar view
        let d = ly / (lx * lx + ly * ly).sqrt();

        let r = (dx * dx + dy * dy).sqrt().floor() as u32;
        let mut ymin = height;
        if r == 0 {
            return ColumnStats { steps: 0, ymin };
        }
        let (sx, sy) = (dx / r as f32, dy / r as f32);

        let mut x = camera.pos.x;
        let mut y = camera.pos.y;
        let mut steps = 0;
        for i in 1..r {
            x += sx;
            y += sy;
            steps = i;

            let addr = MapAddress::from_world(x, y);
            let (elevation, index) = terrain.sample(addr);
            let h = camera.altitude - elevation as f32;
            let z = project_row(h, d, i, camera.pitch, self.cfg.projection_scale).max(0) as u32;

            if z < height {
                sink.write_span(column, z, ymin, terrain.color_of(index));
            }
            ymin = ymin.min(z);
            sink.occlusion(i, ymin);

            if ymin == 0 {
                break;
            }
        }
        ColumnStats { steps, ymin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::terrain::{ColorMap, HeightMap, Palette};
    use crate::render::framebuffer::Framebuffer;

    #[derive(Default)]
    struct Recorder {
        spans: Vec<(u32, u32, u32)>,
        bounds: Vec<u32>,
    }

    impl SpanSink for Recorder {
        fn write_span(&mut self, column: u32, start: u32, end: u32, _color: Color) {
            self.spans.push((column, start, end));
        }
        fn occlusion(&mut self, _step: u32, ymin: u32) {
            self.bounds.push(ymin);
        }
    }

    fn hilly() -> TerrainData {
        let mut heights = HeightMap::flat(0);
        let mut colors = ColorMap::uniform(0);
        for y in 0..1024 {
            for x in 0..1024 {
                let v = ((x * 7 + y * 13) % 251) as u8;
                heights.set(MapAddress::wrap(x, y), v / 2);
                colors.set(MapAddress::wrap(x, y), v);
            }
        }
        let mut src = vec![0u8; 768];
        for (i, b) in src.iter_mut().enumerate() {
            *b = (i % 256) as u8;
        }
        TerrainData::new(heights, colors, Palette::from_rgb(&src).unwrap())
    }

    #[test]
    fn level_sample_projects_to_negated_pitch() {
        for &pitch in &[-100.0f32, 0.0, 20.0, -37.5] {
            for step in 1..50 {
                let z = project_row(0.0, 0.8, step, pitch, 100.0).max(0);
                assert_eq!(z, ((-pitch).floor() as i32).max(0));
            }
        }
    }

    #[test]
    fn occlusion_bound_never_grows() {
        let terrain = hilly();
        let caster = RayCaster::new(RenderConfig::default());
        let cam = Camera::new(300.0, 200.0, 1.1, 140.0, -60.0);
        for column in [0, 100, 256, 511] {
            let mut rec = Recorder::default();
            let stats = caster.cast_column(&cam, &terrain, column, &mut rec);
            assert!(stats.steps > 0);
            assert!(rec.bounds.windows(2).all(|w| w[1] <= w[0]));
            assert_eq!(rec.bounds.last().copied(), Some(stats.ymin));
            // spans never overlap: each ends where the previous bound was
            let mut bound = caster.config().height;
            for &(c, start, end) in &rec.spans {
                assert_eq!(c, column);
                assert!(end <= bound);
                bound = bound.min(start);
            }
        }
    }

    #[test]
    fn casting_is_deterministic() {
        let terrain = hilly();
        let cfg = RenderConfig { width: 64, height: 48, ..RenderConfig::default() };
        let caster = RayCaster::new(cfg);
        let cam = Camera::new(40.5, 990.25, 4.0, 90.0, -80.0);
        let mut a = Framebuffer::new(64, 48);
        let mut b = Framebuffer::new(64, 48);
        for fb in [&mut a, &mut b] {
            fb.fill_background(cfg.background);
            caster.cast_all(&cam, &terrain, fb);
        }
        assert!(a.present() == b.present());
    }

    #[test]
    fn zero_length_ray_leaves_background() {
        let cfg = RenderConfig { width: 2, height: 8, far_plane: 0.0, ..RenderConfig::default() };
        let caster = RayCaster::new(cfg);
        let mut rec = Recorder::default();
        let stats = caster.cast_column(&Camera::default(), &TerrainData::empty(), 1, &mut rec);
        assert_eq!(stats, ColumnStats { steps: 0, ymin: 8 });
        assert!(rec.spans.is_empty());
    }
}
