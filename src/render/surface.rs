use crate::assets::{Frame, FrameId};
use crate::error::AssetError;
use macroquad::prelude::*;

/// Drawing target the simulation renders onto.
pub trait Surface {
    /// Visible size in pixels.
    fn size(&self) -> Vec2;
    /// Blits `frame` with its top-left corner at `pos`.
    fn draw_frame(&mut self, frame: Frame, pos: Vec2, flip_x: bool);
    /// Fills a convex polygon.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}

/// What to do when saved data references art the asset library lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingArt {
    /// Abort rendering with an error (editor and tooling).
    Fail,
    /// Skip the item and keep going (the running game).
    Skip,
}

impl MissingArt {
    pub(crate) fn resolve(
        self,
        found: Option<Frame>,
        missing: impl FnOnce() -> AssetError,
    ) -> Result<Option<Frame>, AssetError> {
        match (found, self) {
            (Some(frame), _) => Ok(Some(frame)),
            (None, MissingArt::Fail) => Err(missing()),
            (None, MissingArt::Skip) => {
                tracing::debug!("skipping draw: {}", missing());
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Frame { frame: Frame, pos: Vec2, flip_x: bool },
    Polygon { points: Vec<Vec2>, color: Color },
}

/// Headless surface that records every draw call.
#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(size: Vec2) -> Self {
        DrawList {
            size,
            commands: Vec::new(),
        }
    }

    pub fn frames(&self) -> impl Iterator<Item = (Frame, Vec2, bool)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Frame { frame, pos, flip_x } => Some((*frame, *pos, *flip_x)),
            DrawCommand::Polygon { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn draw_frame(&mut self, frame: Frame, pos: Vec2, flip_x: bool) {
        self.commands.push(DrawCommand::Frame { frame, pos, flip_x });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }
}

/// Macroquad-backed surface. Textures are looked up by frame id.
pub struct ScreenSurface {
    textures: Vec<Option<Texture2D>>,
    size: Vec2,
}

impl ScreenSurface {
    pub fn new(size: Vec2) -> Self {
        ScreenSurface {
            textures: Vec::new(),
            size,
        }
    }

    pub fn register(&mut self, id: FrameId, texture: Texture2D) {
        let idx = id.0 as usize;
        if idx >= self.textures.len() {
            self.textures.resize(idx + 1, None);
        }
        texture.set_filter(FilterMode::Nearest);
        self.textures[idx] = Some(texture);
    }

    #[inline]
    fn texture(&self, id: FrameId) -> Option<&Texture2D> {
        self.textures.get(id.0 as usize).and_then(Option::as_ref)
    }
}

impl Surface for ScreenSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn draw_frame(&mut self, frame: Frame, pos: Vec2, flip_x: bool) {
        let Some(tex) = self.texture(frame.id) else {
            return;
        };
        draw_texture_ex(
            tex,
            pos.x,
            pos.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(frame.size()),
                flip_x,
                ..Default::default()
            },
        );
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        for pair in points[1..].windows(2) {
            draw_triangle(points[0], pair[0], pair[1], color);
        }
    }
}
