//! Isometric projection between grid cells and world (screen) space
//!
//! A cell (x, y) projects to:
//! - world.x = (x - y) * tile_width / 2 + origin_x
//! - world.y = (x + y) * tile_height / 2 - height
//!
//! The view can be rotated in quarter turns; rotation is applied to grid
//! coordinates around the grid before projecting, so the inverse un-rotates
//! after un-projecting.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRID_HEIGHT, GRID_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use crate::course::GridCoord;

/// Camera rotation around the course, in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl ViewRotation {
    pub fn degrees(&self) -> u32 {
        match self {
            ViewRotation::Deg0 => 0,
            ViewRotation::Deg90 => 90,
            ViewRotation::Deg180 => 180,
            ViewRotation::Deg270 => 270,
        }
    }

    /// Next rotation clockwise
    pub fn rotated_cw(&self) -> Self {
        match self {
            ViewRotation::Deg0 => ViewRotation::Deg90,
            ViewRotation::Deg90 => ViewRotation::Deg180,
            ViewRotation::Deg180 => ViewRotation::Deg270,
            ViewRotation::Deg270 => ViewRotation::Deg0,
        }
    }
}

/// Pure grid <-> world mapping for one course grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsoProjection {
    pub grid_width: i32,
    pub grid_height: i32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub rotation: ViewRotation,
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl IsoProjection {
    pub fn new(grid_width: i32, grid_height: i32) -> Self {
        Self {
            grid_width,
            grid_height,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            rotation: ViewRotation::Deg0,
        }
    }

    pub fn with_rotation(mut self, rotation: ViewRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Horizontal screen offset that centres the diamond
    #[inline]
    fn origin_x(&self) -> f32 {
        self.grid_width as f32 * self.tile_width / 2.0
    }

    /// Rotate grid-space coordinates into view space
    fn rotate(&self, p: Vec2) -> Vec2 {
        let w = (self.grid_width - 1) as f32;
        let h = (self.grid_height - 1) as f32;
        match self.rotation {
            ViewRotation::Deg0 => p,
            ViewRotation::Deg90 => Vec2::new(h - p.y, p.x),
            ViewRotation::Deg180 => Vec2::new(w - p.x, h - p.y),
            ViewRotation::Deg270 => Vec2::new(p.y, w - p.x),
        }
    }

    /// Inverse of `rotate`
    fn unrotate(&self, v: Vec2) -> Vec2 {
        let w = (self.grid_width - 1) as f32;
        let h = (self.grid_height - 1) as f32;
        match self.rotation {
            ViewRotation::Deg0 => v,
            ViewRotation::Deg90 => Vec2::new(v.y, h - v.x),
            ViewRotation::Deg180 => Vec2::new(w - v.x, h - v.y),
            ViewRotation::Deg270 => Vec2::new(w - v.y, v.x),
        }
    }

    /// Project a (possibly fractional) grid position to world space
    pub fn grid_to_iso(&self, x: f32, y: f32, height: f32) -> Vec2 {
        let v = self.rotate(Vec2::new(x, y));
        let iso_x = (v.x - v.y) * (self.tile_width / 2.0);
        let iso_y = (v.x + v.y) * (self.tile_height / 2.0);
        Vec2::new(iso_x + self.origin_x(), iso_y - height)
    }

    /// World position of a cell centre at ground level
    #[inline]
    pub fn cell_to_world(&self, cell: GridCoord) -> Vec2 {
        self.grid_to_iso(cell.x as f32, cell.y as f32, 0.0)
    }

    /// Map a world position back to the nearest cell.
    ///
    /// With `clamp` false the result may lie outside the grid, which is how
    /// callers detect `out` terrain past the edge.
    pub fn world_to_grid(&self, world: Vec2, clamp: bool) -> GridCoord {
        let adj_x = world.x - self.origin_x();
        let half_w = self.tile_width / 2.0;
        let half_h = self.tile_height / 2.0;

        let view = Vec2::new(
            (world.y / half_h + adj_x / half_w) / 2.0,
            (world.y / half_h - adj_x / half_w) / 2.0,
        );
        let grid = self.unrotate(view);
        let mut cell = GridCoord::new(grid.x.round() as i32, grid.y.round() as i32);
        if clamp {
            cell.x = cell.x.clamp(0, (self.grid_width - 1).max(0));
            cell.y = cell.y.clamp(0, (self.grid_height - 1).max(0));
        }
        cell
    }
}
