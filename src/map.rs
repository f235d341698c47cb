use crate::assets::Assets;
use crate::error::{AssetError, MapError};
use crate::loader::json_loader::{decode_tilemap_str, encode_tilemap, read_tilemap, write_tilemap};
use crate::render::cull::visible_window;
use crate::render::surface::{MissingArt, Surface};
use crate::spatial::index::{dir, grid_to_world, world_to_grid, GridPos, NEIGHBOR_OFFSETS};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Tile types entities collide with.
pub const PHYSICS_TILES: [&str; 2] = ["grass", "stone"];
/// Tile types whose variant is picked by [`Tilemap::autotile`].
pub const AUTOTILE_TYPES: [&str; 2] = ["grass", "stone"];

pub fn is_physics_tile(kind: &str) -> bool {
    PHYSICS_TILES.contains(&kind)
}

/// Variant for a set of same-type orthogonal neighbours, if the set is one
/// of the nine edge/corner/centre patterns.
pub fn autotile_variant(neighbors: u8) -> Option<u32> {
    use dir::*;
    let variant = match neighbors {
        m if m == RIGHT | DOWN => 0,
        m if m == RIGHT | DOWN | LEFT => 1,
        m if m == LEFT | DOWN => 2,
        m if m == LEFT | UP | DOWN => 3,
        m if m == LEFT | UP => 4,
        m if m == LEFT | UP | RIGHT => 5,
        m if m == RIGHT | UP => 6,
        m if m == RIGHT | UP | DOWN => 7,
        m if m == RIGHT | LEFT | DOWN | UP => 8,
        _ => return None,
    };
    Some(variant)
}

/// A tile snapped to the grid; `pos` is in grid units.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTile {
    pub kind: String,
    pub variant: u32,
    pub pos: GridPos,
}

/// A freely placed tile; `pos` is in pixels, kept at full precision so
/// saved maps read back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct OffgridTile {
    pub kind: String,
    pub variant: u32,
    pub pos: DVec2,
}

impl OffgridTile {
    pub fn new(kind: impl Into<String>, variant: u32, pos: DVec2) -> Self {
        OffgridTile {
            kind: kind.into(),
            variant,
            pos,
        }
    }

    /// Position for drawing and hit-testing.
    #[inline]
    pub fn pixel_pos(&self) -> Vec2 {
        self.pos.as_vec2()
    }
}

/// Grid tiles keyed by cell plus an ordered list of decorative off-grid tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tile_size: u32,
    grid: HashMap<GridPos, GridTile>,
    offgrid: Vec<OffgridTile>,
}

impl Default for Tilemap {
    fn default() -> Self {
        Tilemap::new(16)
    }
}

impl Tilemap {
    pub fn new(tile_size: u32) -> Self {
        Tilemap {
            tile_size,
            grid: HashMap::new(),
            offgrid: Vec::new(),
        }
    }

    pub(crate) fn from_parts(tile_size: u32, grid: HashMap<GridPos, GridTile>, offgrid: Vec<OffgridTile>) -> Self {
        Tilemap {
            tile_size,
            grid,
            offgrid,
        }
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    fn tile_size_f(&self) -> f32 {
        self.tile_size as f32
    }

    pub fn grid_tile(&self, pos: GridPos) -> Option<&GridTile> {
        self.grid.get(&pos)
    }

    /// Grid tiles in arbitrary order.
    pub fn grid_tiles(&self) -> impl Iterator<Item = &GridTile> {
        self.grid.values()
    }

    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }

    /// Off-grid tiles in insertion (render) order.
    pub fn offgrid_tiles(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    pub fn set_grid_tile(&mut self, kind: impl Into<String>, variant: u32, pos: GridPos) {
        self.grid.insert(
            pos,
            GridTile {
                kind: kind.into(),
                variant,
                pos,
            },
        );
    }

    pub fn remove_grid_tile(&mut self, pos: GridPos) -> Option<GridTile> {
        self.grid.remove(&pos)
    }

    pub fn add_offgrid_tile(&mut self, kind: impl Into<String>, variant: u32, pos: DVec2) {
        self.offgrid.push(OffgridTile::new(kind, variant, pos));
    }

    /// Erases every off-grid tile whose art, placed at the tile's position,
    /// covers `point`. Tiles without art have no extent and are kept.
    pub fn remove_offgrid_tiles_containing(&mut self, point: Vec2, assets: &dyn Assets) -> usize {
        let before = self.offgrid.len();
        self.offgrid.retain(|tile| {
            let Some(frame) = assets.tile(&tile.kind, tile.variant) else {
                return true;
            };
            let origin = tile.pixel_pos();
            !Rect::new(origin.x, origin.y, frame.width, frame.height).contains(point)
        });
        before - self.offgrid.len()
    }

    /// Grid tiles in the 3x3 block of cells around the pixel position.
    pub fn neighbors(&self, pixel_pos: Vec2) -> Vec<&GridTile> {
        let center = world_to_grid(pixel_pos, self.tile_size_f());
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.grid.get(&center.offset(dx, dy)))
            .collect()
    }

    pub fn solid_tile_at(&self, pixel_pos: Vec2) -> Option<&GridTile> {
        self.grid
            .get(&world_to_grid(pixel_pos, self.tile_size_f()))
            .filter(|tile| is_physics_tile(&tile.kind))
    }

    /// One tile-sized rect per physics tile around the pixel position.
    pub fn collision_rects_near(&self, pixel_pos: Vec2) -> Vec<Rect> {
        let ts = self.tile_size_f();
        self.neighbors(pixel_pos)
            .into_iter()
            .filter(|tile| is_physics_tile(&tile.kind))
            .map(|tile| {
                let origin = grid_to_world(tile.pos, ts);
                Rect::new(origin.x, origin.y, ts, ts)
            })
            .collect()
    }

    /// Collects tiles whose `(kind, variant)` is in `pairs`, positioned in
    /// pixels. Off-grid matches come first in insertion order, then grid
    /// matches row by row. Matches are removed unless `keep` is set.
    pub fn extract(&mut self, pairs: &[(&str, u32)], keep: bool) -> Vec<OffgridTile> {
        let wanted = |kind: &str, variant: u32| pairs.iter().any(|&(k, v)| k == kind && v == variant);

        let mut matches: Vec<OffgridTile> = self
            .offgrid
            .iter()
            .filter(|t| wanted(&t.kind, t.variant))
            .cloned()
            .collect();
        if !keep {
            self.offgrid.retain(|t| !wanted(&t.kind, t.variant));
        }

        let mut cells: Vec<GridPos> = self
            .grid
            .values()
            .filter(|t| wanted(&t.kind, t.variant))
            .map(|t| t.pos)
            .collect();
        cells.sort_unstable_by_key(|p| (p.y, p.x));

        let ts = self.tile_size_f();
        for cell in cells {
            let tile = if keep {
                self.grid.get(&cell).cloned()
            } else {
                self.grid.remove(&cell)
            };
            if let Some(tile) = tile {
                matches.push(OffgridTile::new(
                    tile.kind,
                    tile.variant,
                    grid_to_world(tile.pos, ts).as_dvec2(),
                ));
            }
        }

        debug!(count = matches.len(), keep, "extracted tiles");
        matches
    }

    /// Picks edge/corner/centre variants for autotile-eligible grid tiles
    /// from their same-type orthogonal neighbours. Returns how many changed.
    pub fn autotile(&mut self) -> usize {
        let updates: Vec<(GridPos, u32)> = self
            .grid
            .values()
            .filter(|tile| AUTOTILE_TYPES.contains(&tile.kind.as_str()))
            .filter_map(|tile| {
                let mask = dir::ALL.iter().fold(0u8, |mask, &(bit, (dx, dy))| {
                    match self.grid.get(&tile.pos.offset(dx, dy)) {
                        Some(n) if n.kind == tile.kind => mask | bit,
                        _ => mask,
                    }
                });
                autotile_variant(mask)
                    .filter(|&v| v != tile.variant)
                    .map(|v| (tile.pos, v))
            })
            .collect();

        for (pos, variant) in &updates {
            if let Some(tile) = self.grid.get_mut(pos) {
                tile.variant = *variant;
            }
        }
        debug!(changed = updates.len(), "autotiled map");
        updates.len()
    }

    /// Off-grid tiles first, then the grid cells inside the padded view.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        assets: &dyn Assets,
        offset: Vec2,
        missing: MissingArt,
    ) -> Result<(), AssetError> {
        for tile in &self.offgrid {
            let frame = missing.resolve(assets.tile(&tile.kind, tile.variant), || AssetError::MissingTile {
                kind: tile.kind.clone(),
                variant: tile.variant,
            })?;
            if let Some(frame) = frame {
                surface.draw_frame(frame, tile.pixel_pos() - offset, false);
            }
        }

        let ts = self.tile_size_f();
        let window = visible_window(offset, surface.size(), ts);
        for cell in window.cells() {
            let Some(tile) = self.grid.get(&cell) else {
                continue;
            };
            let frame = missing.resolve(assets.tile(&tile.kind, tile.variant), || AssetError::MissingTile {
                kind: tile.kind.clone(),
                variant: tile.variant,
            })?;
            if let Some(frame) = frame {
                surface.draw_frame(frame, grid_to_world(tile.pos, ts) - offset, false);
            }
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        write_tilemap(self, path)?;
        info!(path = %path.display(), tiles = self.grid.len(), offgrid = self.offgrid.len(), "saved tilemap");
        Ok(())
    }

    /// Replaces the whole map with the file's contents. On error the current
    /// map is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        *self = read_tilemap(path)?;
        info!(path = %path.display(), tiles = self.grid.len(), offgrid = self.offgrid.len(), "loaded tilemap");
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        decode_tilemap_str(json, Path::new("<string>"))
    }

    pub fn to_json_string(&self) -> Result<String, MapError> {
        encode_tilemap(self)
    }
}
