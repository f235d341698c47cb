//! Moving things that collide with the tilemap.
//!
//! Entities never reach into the scene. Anything they want to add to the
//! world (particles, sparks, projectiles, screenshake, a player death) is
//! pushed as an [`Effect`] and applied by the owner of the frame loop.

pub mod enemy;
pub mod physics;
pub mod player;
pub mod projectile;

use crate::animation::Animation;
use crate::assets::Assets;
use crate::fx::particle::ParticleSpawn;
use crate::fx::spark::Spark;
use projectile::Projectile;
use std::collections::HashMap;

/// Contacts resolved during the current update only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Collisions {
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.up || self.down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Run,
    Jump,
    Slide,
    WallSlide,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Idle,
        Action::Run,
        Action::Jump,
        Action::Slide,
        Action::WallSlide,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Slide => "slide",
            Action::WallSlide => "wall_slide",
        }
    }
}

/// Animation templates of one entity type, keyed by action.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    kind: String,
    templates: HashMap<Action, Animation>,
}

impl AnimationSet {
    pub fn new(kind: impl Into<String>) -> Self {
        AnimationSet {
            kind: kind.into(),
            templates: HashMap::new(),
        }
    }

    /// Picks up every `"<kind>/<action>"` animation the library has.
    pub fn from_assets(assets: &dyn Assets, kind: &str) -> Self {
        let mut set = AnimationSet::new(kind);
        for action in Action::ALL {
            if let Some(anim) = assets.animation(&format!("{kind}/{}", action.name())) {
                set.insert(action, anim.clone());
            }
        }
        set
    }

    pub fn insert(&mut self, action: Action, animation: Animation) {
        self.templates.insert(action, animation);
    }

    pub fn get(&self, action: Action) -> Option<&Animation> {
        self.templates.get(&action)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Spawn request or scene-level side effect produced by an update.
#[derive(Debug, Clone)]
pub enum Effect {
    Particle(ParticleSpawn),
    Spark(Spark),
    Projectile(Projectile),
    Screenshake(f32),
    PlayerDied,
}
