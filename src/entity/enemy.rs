use super::physics::{rects_collide, PhysicsEntity};
use super::player::{Player, DASH_FAST_UNTIL};
use super::projectile::Projectile;
use super::{Action, AnimationSet, Effect};
use crate::assets::Frame;
use crate::error::AssetError;
use crate::fx::death_burst;
use crate::fx::spark::Spark;
use crate::map::Tilemap;
use crate::render::surface::Surface;
use macroquad::prelude::*;
use ::rand::Rng;
use std::f32::consts::PI;

pub const ENEMY_SIZE: Vec2 = Vec2::new(8.0, 15.0);
pub const WALK_SPEED: f32 = 0.5;
/// Chance per idle tick of starting to walk.
pub const WALK_CHANCE: f32 = 0.01;
/// Ground probe: this far ahead of the hit-box centre ...
const LEDGE_PROBE_AHEAD: f32 = 7.0;
/// ... and this far below the top of the hit-box.
const LEDGE_PROBE_DOWN: f32 = 23.0;
/// Vertical distance under which the player counts as level with the enemy.
const SIGHT_HEIGHT: f32 = 16.0;
const MUZZLE_OFFSET: f32 = 7.0;
const GUN_OFFSET: f32 = 4.0;

/// What an enemy needs to know about the player this tick.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub pos: Vec2,
    pub rect: Rect,
    pub dashing: i32,
}

impl PlayerView {
    pub fn of(player: &Player) -> Self {
        PlayerView {
            pos: player.body.pos,
            rect: player.rect(),
            dashing: player.dashing,
        }
    }
}

/// A gunner that patrols platforms, turns at ledges and walls, and shoots
/// along its facing when the player is level with it.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: PhysicsEntity,
    /// Remaining ticks of the current walk; 0 when standing.
    pub walking: u32,
    gun: Option<Frame>,
}

impl Enemy {
    pub fn new(pos: Vec2, animations: AnimationSet) -> Result<Self, AssetError> {
        Ok(Enemy {
            body: PhysicsEntity::new(pos, ENEMY_SIZE, animations)?,
            walking: 0,
            gun: None,
        })
    }

    pub fn with_gun(mut self, gun: Option<Frame>) -> Self {
        self.gun = gun;
        self
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Returns `true` when the enemy was killed this tick and must be removed.
    pub fn update<R: Rng>(
        &mut self,
        tilemap: &Tilemap,
        player: &PlayerView,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let mut movement = Vec2::ZERO;

        if self.walking > 0 {
            let ahead = if self.body.flip { -LEDGE_PROBE_AHEAD } else { LEDGE_PROBE_AHEAD };
            let probe = vec2(self.body.center().x + ahead, self.body.pos.y + LEDGE_PROBE_DOWN);
            if tilemap.solid_tile_at(probe).is_some() {
                if self.body.collisions.horizontal() {
                    self.body.flip = !self.body.flip;
                } else {
                    movement.x = if self.body.flip { -WALK_SPEED } else { WALK_SPEED };
                }
            } else {
                self.body.flip = !self.body.flip;
            }
            self.walking -= 1;
            if self.walking == 0 {
                self.try_shoot(player, rng, effects);
            }
        } else if rng.gen::<f32>() < WALK_CHANCE {
            self.walking = rng.gen_range(40..=110);
        }

        self.body.update(tilemap, movement);

        if movement.x != 0.0 {
            self.body.set_action(Action::Run);
        } else {
            self.body.set_action(Action::Idle);
        }

        if player.dashing.abs() >= DASH_FAST_UNTIL && rects_collide(&self.rect(), &player.rect) {
            self.burst(rng, effects);
            return true;
        }
        false
    }

    fn try_shoot<R: Rng>(&self, player: &PlayerView, rng: &mut R, effects: &mut Vec<Effect>) {
        let dis = player.pos - self.body.pos;
        if dis.y.abs() >= SIGHT_HEIGHT {
            return;
        }
        let center = self.body.center();
        let (muzzle, speed, spark_dir) = if self.body.flip && dis.x < 0.0 {
            (vec2(center.x - MUZZLE_OFFSET, center.y), -1.5, PI)
        } else if !self.body.flip && dis.x > 0.0 {
            (vec2(center.x + MUZZLE_OFFSET, center.y), 1.5, 0.0)
        } else {
            return;
        };
        effects.push(Effect::Projectile(Projectile::new(muzzle, speed)));
        for _ in 0..4 {
            effects.push(Effect::Spark(Spark::new(
                muzzle,
                rng.gen::<f32>() - 0.5 + spark_dir,
                2.0 + rng.gen::<f32>(),
            )));
        }
    }

    fn burst<R: Rng>(&self, rng: &mut R, effects: &mut Vec<Effect>) {
        let center = self.body.center();
        effects.push(Effect::Screenshake(16.0));
        death_burst(center, rng, effects);
        effects.push(Effect::Spark(Spark::new(center, 0.0, 5.0 + rng.gen::<f32>())));
        effects.push(Effect::Spark(Spark::new(center, PI, 5.0 + rng.gen::<f32>())));
    }

    pub fn render(&self, surface: &mut dyn Surface, offset: Vec2) {
        self.body.render(surface, offset);

        let Some(gun) = self.gun else {
            return;
        };
        let center = self.body.center();
        let x = if self.body.flip {
            center.x - GUN_OFFSET - gun.width
        } else {
            center.x + GUN_OFFSET
        };
        surface.draw_frame(gun, vec2(x, center.y) - offset, self.body.flip);
    }
}
