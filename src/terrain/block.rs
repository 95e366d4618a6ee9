#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of vertical levels in a region. Level 0 is the ground plane.
pub const LEVELS: usize = 4;

/// Width and length in tiles of the region stored in a single payload
pub const REGION_SIZE: usize = 64;

/// Textured overlay drawn on top of a tile's underlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Overlay {
    /// Overlay id. The modern format carries a signed 16 bit value which is
    /// kept here as its bit pattern.
    pub id: u16,

    /// Shape of the overlay within the tile
    pub shape: u8,

    /// Quarter turn rotation of the shape (0 to 3)
    pub orientation: u8,
}

/// Everything a region payload says about one (level, x, y) cell except its
/// height, which lives in the block's height lattice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    pub overlay: Option<Overlay>,

    /// Collision / settings class (0 = none)
    pub flag: u8,

    /// Underlay id (0 = none)
    pub underlay: u16,

    /// True when the height was explicit in the payload rather than derived
    pub manual_height: bool,
}

/// The decoded form of a region: four levels of tiles over a `width` by
/// `length` grid plus a `(width + 1) x (length + 1)` height lattice per level.
///
/// Coordinates are `(level, x, y)`. Tile accessors panic when the coordinate
/// lies outside the grid, height accessors when it lies outside the lattice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainBlock {
    width: usize,
    length: usize,
    tiles: Vec<Tile>,
    heights: Vec<i32>,
}

impl TerrainBlock {
    /// Creates an empty block where every tile is blank and at height 0
    pub fn new(width: usize, length: usize) -> Self {
        TerrainBlock {
            width,
            length,
            tiles: vec![Tile::default(); LEVELS * width * length],
            heights: vec![0; LEVELS * (width + 1) * (length + 1)],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if the tile coordinate lies within the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.length
    }

    #[inline]
    fn tile_index(&self, level: usize, x: usize, y: usize) -> usize {
        assert!(level < LEVELS && x < self.width && y < self.length);
        (level * self.width + x) * self.length + y
    }

    #[inline]
    fn height_index(&self, level: usize, x: usize, y: usize) -> usize {
        assert!(level < LEVELS && x <= self.width && y <= self.length);
        (level * (self.width + 1) + x) * (self.length + 1) + y
    }

    #[inline]
    pub fn tile(&self, level: usize, x: usize, y: usize) -> &Tile {
        &self.tiles[self.tile_index(level, x, y)]
    }

    #[inline]
    pub fn tile_mut(&mut self, level: usize, x: usize, y: usize) -> &mut Tile {
        let idx = self.tile_index(level, x, y);
        &mut self.tiles[idx]
    }

    /// Height in world units of a lattice point
    #[inline]
    pub fn height(&self, level: usize, x: usize, y: usize) -> i32 {
        self.heights[self.height_index(level, x, y)]
    }

    #[inline]
    pub fn set_height(&mut self, level: usize, x: usize, y: usize, height: i32) {
        let idx = self.height_index(level, x, y);
        self.heights[idx] = height;
    }

    /// Height difference between a tile and the tile directly below it. For
    /// level 0 this is the absolute height.
    pub fn relative_height(&self, level: usize, x: usize, y: usize) -> i32 {
        let height = self.height(level, x, y);
        if level == 0 {
            height
        } else {
            height.wrapping_sub(self.height(level - 1, x, y))
        }
    }

    /// Copies the last interior column and row of every level's height
    /// lattice onto the outer border, so the region edge has no artificial
    /// slope towards zero.
    pub fn pad_edges(&mut self) {
        let (width, length) = (self.width, self.length);
        if width == 0 || length == 0 {
            return;
        }

        for level in 0..LEVELS {
            for y in 0..=length {
                let height = self.height(level, width - 1, y);
                self.set_height(level, width, y, height);
            }

            for x in 0..=width {
                let height = self.height(level, x, length - 1);
                self.set_height(level, x, length, height);
            }
        }
    }
}

impl Default for TerrainBlock {
    fn default() -> Self {
        TerrainBlock::new(REGION_SIZE, REGION_SIZE)
    }
}
