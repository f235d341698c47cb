use crate::spatial::index::{world_to_grid, GridPos};
use macroquad::prelude::*;

const CULL_MARGIN_TILES: i32 = 1;

/// Inclusive rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    pub min: GridPos,
    pub max: GridPos,
}

impl GridWindow {
    /// Row-major walk over every cell in the window.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> {
        let GridWindow { min, max } = *self;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| GridPos::new(x, y)))
    }
}

/// Grid cells touched by a view of `view_size` pixels whose top-left corner is
/// at `offset`, padded by one tile on every side.
pub fn visible_window(offset: Vec2, view_size: Vec2, tile_size: f32) -> GridWindow {
    let mut min = world_to_grid(offset, tile_size);
    let mut max = world_to_grid(offset + view_size, tile_size);

    if min.x > max.x {
        std::mem::swap(&mut min.x, &mut max.x);
    }
    if min.y > max.y {
        std::mem::swap(&mut min.y, &mut max.y);
    }

    GridWindow {
        min: min.offset(-CULL_MARGIN_TILES, -CULL_MARGIN_TILES),
        max: max.offset(CULL_MARGIN_TILES, CULL_MARGIN_TILES),
    }
}
