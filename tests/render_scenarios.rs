//! Whole-frame scenarios over synthetic terrain.

use std::f32::consts::TAU;

use raylib::prelude::Color;
use voxel_space::core::camera::Camera;
use voxel_space::core::terrain::{ColorMap, HeightMap, MapAddress, Palette, TerrainData};
use voxel_space::render::casters::{RayCaster, RenderConfig};
use voxel_space::render::framebuffer::Framebuffer;

const GROUND: Color = Color::new(20, 160, 40, 255);
const TOWER: Color = Color::new(200, 30, 30, 255);

fn palette() -> Palette {
    let mut src = vec![0u8; 768];
    src[0..3].copy_from_slice(&[GROUND.r, GROUND.g, GROUND.b]);
    src[3..6].copy_from_slice(&[TOWER.r, TOWER.g, TOWER.b]);
    Palette::from_rgb(&src).unwrap()
}

fn flat_terrain() -> TerrainData {
    TerrainData::new(HeightMap::flat(0), ColorMap::uniform(0), palette())
}

fn render(cfg: RenderConfig, cam: &Camera, terrain: &TerrainData) -> Framebuffer {
    let mut fb = Framebuffer::new(cfg.width, cfg.height);
    fb.fill_background(cfg.background);
    RayCaster::new(cfg).cast_all(cam, terrain, &mut fb);
    fb
}

/// First row of `column` that is not background.
fn top_row(fb: &Framebuffer, column: u32) -> Option<u32> {
    fb.column(column).position(|c| c != fb.background_color).map(|y| y as u32)
}

#[test]
fn flat_ground_has_a_level_horizon() {
    let cfg = RenderConfig { width: 128, height: 64, ..RenderConfig::default() };
    let cam = Camera::new(512.0, 800.0, 0.0, 20.0, 0.0);
    let fb = render(cfg, &cam, &flat_terrain());

    let rows: Vec<u32> = (0..cfg.width).map(|c| top_row(&fb, c).unwrap()).collect();
    let min = *rows.iter().min().unwrap();
    let max = *rows.iter().max().unwrap();
    assert!(max - min <= 1, "horizon rows spread from {min} to {max}");
    // ground fills everything below the horizon
    for c in 0..cfg.width {
        assert!(fb.column(c).skip(rows[c as usize] as usize).all(|px| px == GROUND));
    }
}

#[test]
fn tower_ahead_rises_above_the_horizon_and_hides_what_is_behind() {
    let mut heights = HeightMap::flat(0);
    let mut colors = ColorMap::uniform(0);
    let cell = MapAddress::wrap(512, 750);
    heights.set(cell, 255);
    colors.set(cell, 1);
    let terrain = TerrainData::new(heights, colors, palette());

    let cfg = RenderConfig { width: 256, height: 256, ..RenderConfig::default() };
    let cam = Camera::new(512.0, 800.0, 0.0, 100.0, 0.0);
    let fb = render(cfg, &cam, &terrain);

    let center = cfg.width / 2;
    let tower_top = top_row(&fb, center).unwrap();
    let open_top = top_row(&fb, 0).unwrap();
    assert!(tower_top < open_top);
    assert_eq!(tower_top, 0);

    // tower from the top down to where nearer ground takes over, nothing else
    let col: Vec<Color> = fb.column(center).collect();
    let tower_rows = col.iter().take_while(|&&c| c == TOWER).count();
    assert!(tower_rows > 0);
    assert!(col[tower_rows..].iter().all(|&c| c == GROUND));
    assert!(!col.contains(&fb.background_color));
}

#[test]
fn full_turn_renders_the_same_frame() {
    let mut heights = HeightMap::flat(0);
    for y in 0..1024 {
        for x in 0..1024 {
            heights.set(MapAddress::wrap(x, y), ((x ^ y) & 0x3F) as u8);
        }
    }
    let terrain = TerrainData::new(heights, ColorMap::uniform(1), palette());
    let cfg = RenderConfig { width: 96, height: 64, ..RenderConfig::default() };

    let a = render(cfg, &Camera::new(100.0, 200.0, 0.0, 90.0, -40.0), &terrain);
    let b = render(cfg, &Camera::new(100.0, 200.0, TAU, 90.0, -40.0), &terrain);
    assert!(a.present() == b.present());
}

#[test]
fn unloaded_terrain_still_renders() {
    let cfg = RenderConfig { width: 32, height: 32, ..RenderConfig::default() };
    let fb = render(cfg, &Camera::default(), &TerrainData::empty());
    assert!(fb.present().iter().any(|&c| c == Color::BLACK));
}
