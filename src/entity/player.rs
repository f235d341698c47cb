use super::physics::PhysicsEntity;
use super::{Action, AnimationSet, Effect};
use crate::error::AssetError;
use crate::fx::particle::{ParticleKind, ParticleSpawn};
use crate::map::Tilemap;
use crate::render::surface::Surface;
use macroquad::prelude::*;
use ::rand::Rng;
use std::f32::consts::TAU;

pub const PLAYER_SIZE: Vec2 = Vec2::new(8.0, 15.0);

/// Ticks airborne before the fall counts as a death.
pub const FALL_DEATH_TICKS: u32 = 120;
/// Ticks airborne before the player counts as jumping (and may wall-slide).
pub const AIRBORNE_TICKS: u32 = 4;
pub const DASH_TICKS: i32 = 60;
/// `|dashing|` above this is the fast part of the dash.
pub const DASH_FAST_UNTIL: i32 = 50;
pub const DASH_SPEED: f32 = 8.0;
pub const JUMP_VELOCITY: f32 = -3.0;
pub const WALL_JUMP_PUSH: f32 = 3.5;
pub const WALL_SLIDE_MAX_FALL: f32 = 0.5;
pub const FRICTION: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Player {
    pub body: PhysicsEntity,
    pub air_time: u32,
    pub jumps: u32,
    pub wall_slide: bool,
    /// Signed dash timer: 0 idle, sign is the direction, magnitude counts down from 60.
    pub dashing: i32,
}

impl Player {
    pub fn new(pos: Vec2, animations: AnimationSet) -> Result<Self, AssetError> {
        Ok(Player {
            body: PhysicsEntity::new(pos, PLAYER_SIZE, animations)?,
            air_time: 0,
            jumps: 1,
            wall_slide: false,
            dashing: 0,
        })
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn dash_magnitude(&self) -> i32 {
        self.dashing.abs()
    }

    /// Enemies die on contact and projectiles pass through while this holds.
    pub fn is_dash_lethal(&self) -> bool {
        self.dash_magnitude() >= DASH_FAST_UNTIL
    }

    /// Hidden during the fast part of a dash.
    pub fn is_visible(&self) -> bool {
        self.dash_magnitude() <= DASH_FAST_UNTIL
    }

    pub fn update<R: Rng>(&mut self, tilemap: &Tilemap, movement: Vec2, rng: &mut R, effects: &mut Vec<Effect>) {
        self.body.update(tilemap, movement);

        self.air_time += 1;
        if self.air_time > FALL_DEATH_TICKS {
            effects.push(Effect::Screenshake(16.0));
            effects.push(Effect::PlayerDied);
        }

        if self.body.collisions.down {
            self.air_time = 0;
            self.jumps = 1;
        }

        self.wall_slide = false;
        if self.body.collisions.horizontal() && self.air_time > AIRBORNE_TICKS {
            self.wall_slide = true;
            self.body.velocity.y = self.body.velocity.y.min(WALL_SLIDE_MAX_FALL);
            self.body.flip = !self.body.collisions.right;
            self.body.set_action(Action::WallSlide);
        }

        if !self.wall_slide {
            if self.air_time > AIRBORNE_TICKS {
                self.body.set_action(Action::Jump);
            } else if movement.x != 0.0 {
                self.body.set_action(Action::Run);
            } else {
                self.body.set_action(Action::Idle);
            }
        }

        let center = self.body.center();
        if matches!(self.dash_magnitude(), DASH_TICKS | DASH_FAST_UNTIL) {
            for _ in 0..20 {
                let angle = rng.gen::<f32>() * TAU;
                let speed = rng.gen::<f32>() * 0.5 + 0.5;
                effects.push(Effect::Particle(ParticleSpawn {
                    kind: ParticleKind::Dust,
                    pos: center,
                    velocity: vec2(angle.cos(), angle.sin()) * speed,
                    start_frame: rng.gen_range(0..=7),
                }));
            }
        }

        self.dashing -= self.dashing.signum();

        if self.dash_magnitude() > DASH_FAST_UNTIL {
            let direction = self.dashing.signum() as f32;
            self.body.velocity.x = direction * DASH_SPEED;
            if self.dash_magnitude() == DASH_FAST_UNTIL + 1 {
                self.body.velocity.x *= 0.1;
            }
            effects.push(Effect::Particle(ParticleSpawn {
                kind: ParticleKind::Dust,
                pos: center,
                velocity: vec2(direction * rng.gen::<f32>() * 3.0, 0.0),
                start_frame: rng.gen_range(0..=7),
            }));
        }

        let vx = &mut self.body.velocity.x;
        if *vx > 0.0 {
            *vx = (*vx - FRICTION).max(0.0);
        } else {
            *vx = (*vx + FRICTION).min(0.0);
        }
    }

    /// Wall-jump while sliding and pushing into the wall, otherwise a normal
    /// jump if one is left. Returns whether a jump happened.
    pub fn jump(&mut self) -> bool {
        if self.wall_slide {
            let push = if self.body.flip && self.body.last_movement.x < 0.0 {
                WALL_JUMP_PUSH
            } else if !self.body.flip && self.body.last_movement.x > 0.0 {
                -WALL_JUMP_PUSH
            } else {
                return false;
            };
            self.body.velocity = vec2(push, JUMP_VELOCITY);
            self.air_time = AIRBORNE_TICKS + 1;
            self.jumps = self.jumps.saturating_sub(1);
            return true;
        }

        if self.jumps > 0 {
            self.body.velocity.y = JUMP_VELOCITY;
            self.jumps -= 1;
            self.air_time = AIRBORNE_TICKS + 1;
            return true;
        }
        false
    }

    /// Starts a dash in the facing direction unless one is running.
    pub fn dash(&mut self) -> bool {
        if self.dashing != 0 {
            return false;
        }
        self.dashing = if self.body.flip { -DASH_TICKS } else { DASH_TICKS };
        true
    }

    pub fn render(&self, surface: &mut dyn Surface, offset: Vec2) {
        if self.is_visible() {
            self.body.render(surface, offset);
        }
    }
}
