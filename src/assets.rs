//! Asset lookup collaborator.
//!
//! The core never touches textures. It passes around [`Frame`] handles and
//! leaves the `FrameId -> texture` mapping to whoever renders.

use crate::animation::Animation;
use crate::error::AssetError;
use macroquad::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// A drawable image: an opaque id plus its native pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub id: FrameId,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(id: FrameId, width: f32, height: f32) -> Self {
        Frame { id, width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }
}

/// Lookup of everything the simulation draws, keyed the way the map and the
/// entities name their art.
pub trait Assets {
    /// One variant of a tile group (`"grass"`, `"decor"`, ...).
    fn tile(&self, kind: &str, variant: u32) -> Option<Frame>;
    /// A standalone image (`"gun"`, `"projectile"`).
    fn image(&self, name: &str) -> Option<Frame>;
    /// An animation template (`"player/run"`, `"particle/leaf"`).
    fn animation(&self, key: &str) -> Option<&Animation>;
}

/// In-memory [`Assets`] implementation.
#[derive(Debug, Default)]
pub struct AssetLibrary {
    tiles: HashMap<String, Vec<Frame>>,
    images: HashMap<String, Frame>,
    animations: HashMap<String, Animation>,
    next_id: u32,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh frame id for an image of the given size.
    pub fn alloc_frame(&mut self, width: f32, height: f32) -> Frame {
        let frame = Frame::new(FrameId(self.next_id), width, height);
        self.next_id += 1;
        frame
    }

    pub fn insert_tiles(&mut self, kind: impl Into<String>, frames: Vec<Frame>) {
        self.tiles.insert(kind.into(), frames);
    }

    pub fn insert_image(&mut self, name: impl Into<String>, frame: Frame) {
        self.images.insert(name.into(), frame);
    }

    pub fn insert_animation(&mut self, key: impl Into<String>, animation: Animation) {
        self.animations.insert(key.into(), animation);
    }

    /// Tile group names, sorted.
    pub fn tile_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.tiles.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn require_animation(&self, key: &str) -> Result<&Animation, AssetError> {
        self.animation(key)
            .ok_or_else(|| AssetError::MissingAnimation(key.to_owned()))
    }
}

impl Assets for AssetLibrary {
    fn tile(&self, kind: &str, variant: u32) -> Option<Frame> {
        self.tiles
            .get(kind)
            .and_then(|frames| frames.get(variant as usize))
            .copied()
    }

    fn image(&self, name: &str) -> Option<Frame> {
        self.images.get(name).copied()
    }

    fn animation(&self, key: &str) -> Option<&Animation> {
        self.animations.get(key)
    }
}
