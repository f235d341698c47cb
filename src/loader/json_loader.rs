// On-disk tilemap document:
// { "tile_size": 16, "tilemap": { "x;y": {type, variant, pos:[x,y]} }, "offgrid": [ {type, variant, pos:[x,y]} ] }
use crate::error::MapError;
use crate::map::{GridTile, OffgridTile, Tilemap};
use crate::spatial::index::GridPos;
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct JsonGridTile {
    #[serde(rename = "type")]
    kind: String,
    variant: u32,
    pos: [i32; 2],
}

#[derive(Serialize, Deserialize)]
struct JsonOffgridTile {
    #[serde(rename = "type")]
    kind: String,
    variant: u32,
    pos: [f64; 2],
}

#[derive(Serialize, Deserialize)]
struct JsonTilemap {
    tile_size: u32,
    tilemap: BTreeMap<String, JsonGridTile>,
    offgrid: Vec<JsonOffgridTile>,
}

fn ensure_json_path(path: &Path) -> Result<(), MapError> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::UnsupportedFormat(path.display().to_string()));
    }
    Ok(())
}

pub fn decode_tilemap_str(txt: &str, path: &Path) -> Result<Tilemap, MapError> {
    let j: JsonTilemap = serde_json::from_str(txt).map_err(|source| MapError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if j.tile_size == 0 {
        return Err(MapError::InvalidMap("tile_size must be positive".into()));
    }

    let mut grid = HashMap::with_capacity(j.tilemap.len());
    for (key, tile) in j.tilemap {
        let cell: GridPos = key
            .parse()
            .map_err(|e| MapError::InvalidMap(format!("{e}")))?;
        let pos = GridPos::new(tile.pos[0], tile.pos[1]);
        if pos != cell {
            return Err(MapError::InvalidMap(format!(
                "tile under key '{key}' claims position {pos}"
            )));
        }
        grid.insert(
            cell,
            GridTile {
                kind: tile.kind,
                variant: tile.variant,
                pos,
            },
        );
    }

    let offgrid = j
        .offgrid
        .into_iter()
        .map(|t| OffgridTile {
            kind: t.kind,
            variant: t.variant,
            pos: dvec2(t.pos[0], t.pos[1]),
        })
        .collect();

    Ok(Tilemap::from_parts(j.tile_size, grid, offgrid))
}

pub fn encode_tilemap(map: &Tilemap) -> Result<String, MapError> {
    let doc = JsonTilemap {
        tile_size: map.tile_size(),
        tilemap: map
            .grid_tiles()
            .map(|t| {
                (
                    t.pos.to_string(),
                    JsonGridTile {
                        kind: t.kind.clone(),
                        variant: t.variant,
                        pos: [t.pos.x, t.pos.y],
                    },
                )
            })
            .collect(),
        offgrid: map
            .offgrid_tiles()
            .iter()
            .map(|t| JsonOffgridTile {
                kind: t.kind.clone(),
                variant: t.variant,
                pos: [t.pos.x, t.pos.y],
            })
            .collect(),
    };
    serde_json::to_string(&doc).map_err(|e| MapError::InvalidMap(format!("cannot encode map: {e}")))
}

/// Reads and validates the whole document before handing back a map.
pub fn read_tilemap(path: &Path) -> Result<Tilemap, MapError> {
    ensure_json_path(path)?;
    let txt = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => MapError::NotFound {
            path: path.to_path_buf(),
        },
        _ => MapError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    decode_tilemap_str(&txt, path)
}

pub fn write_tilemap(map: &Tilemap, path: &Path) -> Result<(), MapError> {
    ensure_json_path(path)?;
    let txt = encode_tilemap(map)?;
    std::fs::write(path, txt).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}
