use super::enemy::PlayerView;
use super::player::DASH_FAST_UNTIL;
use super::Effect;
use crate::assets::Frame;
use crate::fx::death_burst;
use crate::fx::spark::Spark;
use crate::map::Tilemap;
use crate::render::surface::Surface;
use macroquad::prelude::*;
use ::rand::Rng;
use std::f32::consts::PI;

/// Ticks a projectile lives before it fizzles out.
pub const PROJECTILE_LIFETIME: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileFate {
    Flying,
    HitWall,
    Expired,
    HitPlayer,
}

impl ProjectileFate {
    pub fn is_gone(self) -> bool {
        self != ProjectileFate::Flying
    }
}

/// Horizontal enemy shot.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Signed pixels per tick along X.
    pub speed: f32,
    pub age: u32,
}

impl Projectile {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Projectile { pos, speed, age: 0 }
    }

    pub fn update<R: Rng>(
        &mut self,
        tilemap: &Tilemap,
        player: &PlayerView,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) -> ProjectileFate {
        self.pos.x += self.speed;
        self.age += 1;

        if tilemap.solid_tile_at(self.pos).is_some() {
            let back = if self.speed > 0.0 { PI } else { 0.0 };
            for _ in 0..4 {
                effects.push(Effect::Spark(Spark::new(
                    self.pos,
                    rng.gen::<f32>() - 0.5 + back,
                    2.0 + rng.gen::<f32>(),
                )));
            }
            return ProjectileFate::HitWall;
        }
        if self.age > PROJECTILE_LIFETIME {
            return ProjectileFate::Expired;
        }
        if player.dashing.abs() < DASH_FAST_UNTIL && player.rect.contains(self.pos) {
            let center = player.rect.center();
            effects.push(Effect::PlayerDied);
            effects.push(Effect::Screenshake(16.0));
            death_burst(center, rng, effects);
            return ProjectileFate::HitPlayer;
        }
        ProjectileFate::Flying
    }

    pub fn render(&self, surface: &mut dyn Surface, image: Frame, offset: Vec2) {
        surface.draw_frame(image, self.pos - image.size() / 2.0 - offset, false);
    }
}
