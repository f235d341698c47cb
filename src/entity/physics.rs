use super::{Action, AnimationSet, Collisions};
use crate::animation::Animation;
use crate::error::AssetError;
use crate::map::Tilemap;
use crate::render::surface::Surface;
use macroquad::prelude::*;
use tracing::warn;

pub const GRAVITY: f32 = 0.1;
pub const TERMINAL_VELOCITY: f32 = 5.0;
/// Sprites are drawn a few pixels up-left of the hit-box.
pub const ANIM_OFFSET: Vec2 = Vec2::new(-3.0, -3.0);

/// Strict overlap: rects that merely touch do not collide.
#[inline]
pub fn rects_collide(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

/// Hit-box, velocity, tile collision and the current animation of an entity.
#[derive(Debug, Clone)]
pub struct PhysicsEntity {
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub collisions: Collisions,
    /// Facing left.
    pub flip: bool,
    pub last_movement: Vec2,
    action: Action,
    animation: Animation,
    animations: AnimationSet,
}

impl PhysicsEntity {
    /// Fails if the set has no idle animation to start from.
    pub fn new(pos: Vec2, size: Vec2, animations: AnimationSet) -> Result<Self, AssetError> {
        let idle = animations
            .get(Action::Idle)
            .ok_or_else(|| AssetError::MissingAnimation(format!("{}/idle", animations.kind())))?
            .fresh_copy();
        Ok(PhysicsEntity {
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::default(),
            flip: false,
            last_movement: Vec2::ZERO,
            action: Action::Idle,
            animation: idle,
            animations,
        })
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Restarts playback only when the action actually changes.
    pub fn set_action(&mut self, action: Action) {
        if action == self.action {
            return;
        }
        self.action = action;
        match self.animations.get(action) {
            Some(template) => self.animation = template.fresh_copy(),
            None => warn!(
                kind = self.animations.kind(),
                action = action.name(),
                "no animation for action, keeping previous one"
            ),
        }
    }

    /// Moves by `movement + velocity`, resolving tile collisions one axis
    /// at a time, then applies gravity and advances the animation.
    pub fn update(&mut self, tilemap: &Tilemap, movement: Vec2) {
        self.collisions = Collisions::default();

        let frame_movement = movement + self.velocity;

        self.pos.x += frame_movement.x;
        let mut entity_rect = self.rect();
        for rect in tilemap.collision_rects_near(self.pos) {
            if rects_collide(&entity_rect, &rect) {
                if frame_movement.x > 0.0 {
                    entity_rect.x = rect.x - entity_rect.w;
                    self.collisions.right = true;
                }
                if frame_movement.x < 0.0 {
                    entity_rect.x = rect.x + rect.w;
                    self.collisions.left = true;
                }
                self.pos.x = entity_rect.x;
            }
        }

        self.pos.y += frame_movement.y;
        let mut entity_rect = self.rect();
        for rect in tilemap.collision_rects_near(self.pos) {
            if rects_collide(&entity_rect, &rect) {
                if frame_movement.y > 0.0 {
                    entity_rect.y = rect.y - entity_rect.h;
                    self.collisions.down = true;
                }
                if frame_movement.y < 0.0 {
                    entity_rect.y = rect.y + rect.h;
                    self.collisions.up = true;
                }
                self.pos.y = entity_rect.y;
            }
        }

        if movement.x > 0.0 {
            self.flip = false;
        }
        if movement.x < 0.0 {
            self.flip = true;
        }
        self.last_movement = movement;

        self.velocity.y = (self.velocity.y + GRAVITY).min(TERMINAL_VELOCITY);
        if self.collisions.vertical() {
            self.velocity.y = 0.0;
        }

        self.animation.advance();
    }

    pub fn render(&self, surface: &mut dyn Surface, offset: Vec2) {
        surface.draw_frame(
            self.animation.current_image(),
            self.pos - offset + ANIM_OFFSET,
            self.flip,
        );
    }
}
