//! One playable level: owns the map, the entities and the effects, and
//! steps them once per frame in a fixed order.

use crate::animation::Animation;
use crate::assets::{Assets, Frame};
use crate::config::GameConfig;
use crate::entity::enemy::{Enemy, PlayerView};
use crate::entity::player::Player;
use crate::entity::projectile::Projectile;
use crate::entity::{AnimationSet, Effect};
use crate::error::AssetError;
use crate::fx::particle::{Particle, ParticleKind, ParticleSpawn};
use crate::fx::spark::Spark;
use crate::map::Tilemap;
use crate::render::surface::{MissingArt, Surface};
use macroquad::prelude::*;
use ::rand::rngs::SmallRng;
use ::rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

const PLAYER_START: Vec2 = Vec2::new(50.0, 50.0);
/// Ticks of the level-change wipe; the counter runs from -30 (opening) to 30 (closed).
pub const TRANSITION_TICKS: i32 = 30;
const CAMERA_EASE: f32 = 30.0;
const LEAF_SPAWN_ODDS: f32 = 49999.0;

/// Input snapshot for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Input {
    /// -1 left, 1 right, 0 none.
    pub movement_x: f32,
    pub jump: bool,
    pub dash: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    Running,
    /// Every enemy is gone and the wipe has closed.
    NextLevel,
    /// The player died and the wipe has closed.
    Restart,
}

pub struct Scene {
    pub tilemap: Tilemap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub sparks: Vec<Spark>,
    pub leaf_spawners: Vec<Rect>,
    pub scroll: Vec2,
    /// 0 while alive, then counts ticks since death.
    pub dead: u32,
    pub transition: i32,
    pub screenshake: f32,
    display: Vec2,
    particle_templates: HashMap<ParticleKind, Animation>,
    projectile_image: Option<Frame>,
    rng: SmallRng,
}

impl Scene {
    /// Builds a level from a freshly loaded map: trees become leaf spawners,
    /// spawn markers are pulled out of the map and become the player and enemies.
    pub fn new(mut tilemap: Tilemap, assets: &dyn Assets, config: &GameConfig) -> Result<Self, AssetError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let leaf_spawners: Vec<Rect> = tilemap
            .extract(&[("large_decor", 2)], true)
            .into_iter()
            .map(|tree| {
                let pos = tree.pixel_pos();
                Rect::new(4.0 + pos.x, 4.0 + pos.y, 23.0, 13.0)
            })
            .collect();

        let mut player = Player::new(PLAYER_START, AnimationSet::from_assets(assets, "player"))?;
        let enemy_anims = AnimationSet::from_assets(assets, "enemy");
        let gun = assets.image("gun");

        let mut enemies = Vec::new();
        for spawner in tilemap.extract(&[("spawners", 0), ("spawners", 1)], false) {
            if spawner.variant == 0 {
                player.body.pos = spawner.pixel_pos();
                player.air_time = 0;
            } else {
                enemies.push(Enemy::new(spawner.pixel_pos(), enemy_anims.clone())?.with_gun(gun));
            }
        }

        let mut particle_templates = HashMap::new();
        for kind in ParticleKind::ALL {
            let key = kind.asset_key();
            let template = assets
                .animation(key)
                .ok_or_else(|| AssetError::MissingAnimation(key.to_owned()))?;
            particle_templates.insert(kind, template.clone());
        }

        debug!(
            enemies = enemies.len(),
            leaf_spawners = leaf_spawners.len(),
            "level set up"
        );

        Ok(Scene {
            tilemap,
            player,
            enemies,
            projectiles: Vec::new(),
            particles: Vec::new(),
            sparks: Vec::new(),
            leaf_spawners,
            scroll: Vec2::ZERO,
            dead: 0,
            transition: -TRANSITION_TICKS,
            screenshake: 0.0,
            display: config.display_size(),
            particle_templates,
            projectile_image: assets.image("projectile"),
            rng,
        })
    }

    /// Camera offset used for drawing, truncated to whole pixels.
    pub fn render_offset(&self) -> Vec2 {
        self.scroll.trunc()
    }

    fn spawn_particle(&mut self, request: ParticleSpawn) {
        if let Some(template) = self.particle_templates.get(&request.kind) {
            self.particles.push(Particle::new(
                request.kind,
                request.pos,
                request.velocity,
                template,
                request.start_frame,
            ));
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Particle(request) => self.spawn_particle(request),
                Effect::Spark(spark) => self.sparks.push(spark),
                Effect::Projectile(projectile) => self.projectiles.push(projectile),
                Effect::Screenshake(amount) => self.screenshake = self.screenshake.max(amount),
                Effect::PlayerDied => self.dead += 1,
            }
        }
    }

    /// Advances the level by one frame.
    pub fn tick(&mut self, input: &Input) -> SceneStatus {
        self.screenshake = (self.screenshake - 1.0).max(0.0);

        if self.enemies.is_empty() {
            self.transition += 1;
            if self.transition > TRANSITION_TICKS {
                return SceneStatus::NextLevel;
            }
        }
        if self.transition < 0 {
            self.transition += 1;
        }

        if self.dead > 0 {
            self.dead += 1;
            if self.dead >= 10 {
                self.transition = (self.transition + 1).min(TRANSITION_TICKS);
            }
            if self.dead > 40 {
                return SceneStatus::Restart;
            }
        }

        let target = self.player.body.center() - self.display / 2.0;
        self.scroll += (target - self.scroll) / CAMERA_EASE;

        if input.jump {
            self.player.jump();
        }
        if input.dash {
            self.player.dash();
        }

        for i in 0..self.leaf_spawners.len() {
            let rect = self.leaf_spawners[i];
            if self.rng.gen::<f32>() * LEAF_SPAWN_ODDS < rect.w * rect.h {
                let pos = vec2(
                    rect.x + self.rng.gen::<f32>() * rect.w,
                    rect.y + self.rng.gen::<f32>() * rect.h,
                );
                let start_frame = self.rng.gen_range(0..=20);
                self.spawn_particle(ParticleSpawn {
                    kind: ParticleKind::Leaf,
                    pos,
                    velocity: vec2(-0.1, 0.3),
                    start_frame,
                });
            }
        }

        let mut effects = Vec::new();

        let view = PlayerView::of(&self.player);
        let (tilemap, rng) = (&self.tilemap, &mut self.rng);
        let before = self.enemies.len();
        self.enemies
            .retain_mut(|enemy| !enemy.update(tilemap, &view, rng, &mut effects));
        if self.enemies.len() != before {
            debug!(remaining = self.enemies.len(), "enemy killed");
        }
        self.apply(std::mem::take(&mut effects));

        if self.dead == 0 {
            let movement = vec2(input.movement_x, 0.0);
            self.player
                .update(&self.tilemap, movement, &mut self.rng, &mut effects);
            self.apply(std::mem::take(&mut effects));
        }

        let view = PlayerView::of(&self.player);
        let (tilemap, rng) = (&self.tilemap, &mut self.rng);
        self.projectiles
            .retain_mut(|p| !p.update(tilemap, &view, rng, &mut effects).is_gone());
        self.apply(effects);

        self.sparks.retain_mut(|spark| !spark.update());
        self.particles.retain_mut(|particle| !particle.update());

        SceneStatus::Running
    }

    /// Draws the level as seen from the current camera. The caller applies
    /// screenshake and the transition wipe on top.
    pub fn render(&self, surface: &mut dyn Surface, assets: &dyn Assets, missing: MissingArt) -> Result<(), AssetError> {
        let offset = self.render_offset();

        self.tilemap.render(surface, assets, offset, missing)?;

        for enemy in &self.enemies {
            enemy.render(surface, offset);
        }
        if self.dead == 0 {
            self.player.render(surface, offset);
        }
        if let Some(image) = self.projectile_image {
            for projectile in &self.projectiles {
                projectile.render(surface, image, offset);
            }
        }
        for spark in &self.sparks {
            spark.render(surface, offset);
        }
        for particle in &self.particles {
            particle.render(surface, offset);
        }
        Ok(())
    }
}
