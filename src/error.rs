use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a tilemap document.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file does not exist. Callers usually treat this as "no map yet".
    #[error("map file not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// Any other I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Malformed JSON or a missing top-level key.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Well-formed JSON that breaks a tilemap invariant.
    #[error("invalid map: {0}")]
    InvalidMap(String),
    /// Non-JSON map file.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised by the asset collaborator and by strict rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("animation needs at least one image")]
    EmptyAnimation,
    #[error("animation frame duration must be at least one tick")]
    ZeroFrameDuration,
    #[error("no art for tile {kind}/{variant}")]
    MissingTile { kind: String, variant: u32 },
    #[error("no animation named {0}")]
    MissingAnimation(String),
}
