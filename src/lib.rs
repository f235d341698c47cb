//! Tile-based platformer core for Macroquad: tilemap storage and JSON
//! persistence, axis-separated tile physics, and the player/enemy state
//! machines that run on top of it.

pub mod animation;
pub mod assets;
pub mod config;
pub mod entity;
mod error;
pub mod fx;
mod loader {
    pub mod json_loader;
}
pub mod map;
pub mod render {
    pub mod cull;
    pub mod surface;
}
pub mod scene;
pub mod spatial {
    pub mod index;
}

pub use animation::Animation;
pub use assets::{AssetLibrary, Assets, Frame, FrameId};
pub use config::GameConfig;
pub use entity::enemy::{Enemy, PlayerView};
pub use entity::physics::PhysicsEntity;
pub use entity::player::Player;
pub use entity::projectile::Projectile;
pub use entity::{Action, AnimationSet, Collisions, Effect};
pub use error::{AssetError, MapError};
pub use fx::particle::{Particle, ParticleKind, ParticleSpawn};
pub use fx::spark::Spark;
pub use map::{GridTile, OffgridTile, Tilemap};
pub use render::surface::{DrawCommand, DrawList, MissingArt, ScreenSurface, Surface};
pub use scene::{Input, Scene, SceneStatus};
pub use spatial::index::GridPos;
