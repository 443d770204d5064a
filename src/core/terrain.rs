//! Terrain grids (height + color index) and the VGA-style palette.
use raylib::prelude::*;
use thiserror::Error;

/// Side length of the square map, in cells.
pub const MAP_SIZE: usize = 1024;
/// Number of cells in one grid.
pub const MAP_CELLS: usize = MAP_SIZE * MAP_SIZE;
/// Palette source: 256 RGB triples.
pub const PALETTE_SOURCE_LEN: usize = 256 * 3;

const MAP_MASK: i32 = (MAP_SIZE as i32) - 1;
const MAP_SHIFT: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerrainError {
    #[error("{what} buffer has {actual} bytes, expected {expected}")]
    Size {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Index into a map grid. Only obtainable through the wrapping constructors,
/// so every value is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapAddress(usize);

impl MapAddress {
    /// Periodic addressing: each axis keeps its low 10 bits.
    #[inline]
    pub fn wrap(x: i32, y: i32) -> Self {
        let xi = (x & MAP_MASK) as usize;
        let yi = (y & MAP_MASK) as usize;
        MapAddress((yi << MAP_SHIFT) + xi)
    }

    /// Address of the cell containing the continuous map point `(x, y)`.
    #[inline]
    pub fn from_world(x: f32, y: f32) -> Self {
        Self::wrap(x.floor() as i32, y.floor() as i32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), TerrainError> {
    if actual != expected {
        return Err(TerrainError::Size { what, expected, actual });
    }
    Ok(())
}

/// 1024x1024 elevation samples.
#[derive(Clone)]
pub struct HeightMap {
    cells: Box<[u8]>,
}

impl HeightMap {
    pub fn flat(elevation: u8) -> Self {
        Self { cells: vec![elevation; MAP_CELLS].into_boxed_slice() }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TerrainError> {
        check_len("height", MAP_CELLS, bytes.len())?;
        Ok(Self { cells: bytes.into_boxed_slice() })
    }

    #[inline]
    pub fn get(&self, addr: MapAddress) -> u8 {
        self.cells[addr.index()]
    }

    pub fn set(&mut self, addr: MapAddress, elevation: u8) {
        self.cells[addr.index()] = elevation;
    }
}

/// 1024x1024 palette indices, co-registered with [`HeightMap`].
#[derive(Clone)]
pub struct ColorMap {
    cells: Box<[u8]>,
}

impl ColorMap {
    pub fn uniform(index: u8) -> Self {
        Self { cells: vec![index; MAP_CELLS].into_boxed_slice() }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TerrainError> {
        check_len("color", MAP_CELLS, bytes.len())?;
        Ok(Self { cells: bytes.into_boxed_slice() })
    }

    #[inline]
    pub fn get(&self, addr: MapAddress) -> u8 {
        self.cells[addr.index()]
    }

    pub fn set(&mut self, addr: MapAddress, index: u8) {
        self.cells[addr.index()] = index;
    }
}

/// 256 opaque colors. Every entry is always populated (black until loaded).
#[derive(Clone)]
pub struct Palette {
    colors: [Color; 256],
}

impl Palette {
    pub fn black() -> Self {
        Self { colors: [Color::BLACK; 256] }
    }

    /// Builds the palette from 256 `(R, G, B)` triples read in order.
    pub fn from_rgb(source: &[u8]) -> Result<Self, TerrainError> {
        check_len("palette", PALETTE_SOURCE_LEN, source.len())?;
        let mut colors = [Color::BLACK; 256];
        for (c, rgb) in colors.iter_mut().zip(source.chunks_exact(3)) {
            *c = Color::new(rgb[0], rgb[1], rgb[2], 255);
        }
        Ok(Self { colors })
    }

    #[inline]
    pub fn get(&self, index: u8) -> Color {
        self.colors[index as usize]
    }
}

/// One complete, immutable dataset. Built fully before it is published.
#[derive(Clone)]
pub struct TerrainData {
    pub heights: HeightMap,
    pub colors: ColorMap,
    pub palette: Palette,
}

impl TerrainData {
    pub fn new(heights: HeightMap, colors: ColorMap, palette: Palette) -> Self {
        Self { heights, colors, palette }
    }

    /// Placeholder used before any map has loaded: zero height, index 0, black palette.
    pub fn empty() -> Self {
        Self::new(HeightMap::flat(0), ColorMap::uniform(0), Palette::black())
    }

    pub fn from_buffers(height: Vec<u8>, color: Vec<u8>, palette: &[u8]) -> Result<Self, TerrainError> {
        Ok(Self::new(
            HeightMap::from_bytes(height)?,
            ColorMap::from_bytes(color)?,
            Palette::from_rgb(palette)?,
        ))
    }

    /// Elevation and palette index of one cell.
    #[inline]
    pub fn sample(&self, addr: MapAddress) -> (u8, u8) {
        (self.heights.get(addr), self.colors.get(addr))
    }

    #[inline]
    pub fn color_of(&self, index: u8) -> Color {
        self.palette.get(index)
    }
}

impl Default for TerrainData {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_periodic_on_both_axes() {
        for &(x, y) in &[(0, 0), (5, 1023), (1023, 0), (-1, -1), (700, 311)] {
            let base = MapAddress::wrap(x, y);
            for k in -3..=3 {
                let off = 1024 * k;
                assert_eq!(MapAddress::wrap(x + off, y), base);
                assert_eq!(MapAddress::wrap(x, y + off), base);
            }
            assert!(base.index() < MAP_CELLS);
        }
    }

    #[test]
    fn wrap_layout_is_row_major() {
        assert_eq!(MapAddress::wrap(3, 2).index(), 2 * 1024 + 3);
        assert_eq!(MapAddress::wrap(-1, 0).index(), 1023);
        assert_eq!(MapAddress::wrap(0, -1).index(), 1023 * 1024);
    }

    #[test]
    fn world_coordinates_floor_before_wrapping() {
        assert_eq!(MapAddress::from_world(10.9, 4.2), MapAddress::wrap(10, 4));
        assert_eq!(MapAddress::from_world(-0.5, 0.0), MapAddress::wrap(-1, 0));
        assert_eq!(MapAddress::from_world(1024.0 + 7.5, 2048.25), MapAddress::wrap(7, 0));
    }

    #[test]
    fn palette_reads_triples_in_order() {
        let mut src = vec![0u8; PALETTE_SOURCE_LEN];
        for i in 0..256 {
            src[i * 3] = i as u8;
            src[i * 3 + 1] = 255 - i as u8;
            src[i * 3 + 2] = (i * 7 % 256) as u8;
        }
        let pal = Palette::from_rgb(&src).unwrap();
        for i in 0..256usize {
            let c = pal.get(i as u8);
            assert_eq!((c.r, c.g, c.b, c.a), (i as u8, 255 - i as u8, (i * 7 % 256) as u8, 255));
        }
    }

    #[test]
    fn wrong_sizes_are_rejected() {
        assert_eq!(
            Palette::from_rgb(&[0u8; 10]).err(),
            Some(TerrainError::Size { what: "palette", expected: 768, actual: 10 })
        );
        assert!(HeightMap::from_bytes(vec![0; MAP_CELLS - 1]).is_err());
        assert!(ColorMap::from_bytes(vec![0; MAP_CELLS + 1]).is_err());
        assert!(TerrainData::from_buffers(vec![0; MAP_CELLS], vec![0; MAP_CELLS], &[0; 768]).is_ok());
    }

    #[test]
    fn empty_terrain_is_zero_and_black() {
        let t = TerrainData::empty();
        let (h, c) = t.sample(MapAddress::wrap(512, 800));
        assert_eq!((h, c), (0, 0));
        let col = t.color_of(c);
        assert_eq!((col.r, col.g, col.b, col.a), (0, 0, 0, 255));
    }
}
