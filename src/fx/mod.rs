//! Short-lived visual effects.

pub mod particle;
pub mod spark;

use crate::entity::Effect;
use macroquad::prelude::*;
use particle::{ParticleKind, ParticleSpawn};
use ::rand::Rng;
use spark::Spark;
use std::f32::consts::{PI, TAU};

/// Thirty sparks flying out and thirty dust particles drifting the opposite way.
pub fn death_burst<R: Rng>(center: Vec2, rng: &mut R, effects: &mut Vec<Effect>) {
    for _ in 0..30 {
        let angle = rng.gen::<f32>() * TAU;
        let speed = rng.gen::<f32>() * 5.0;
        effects.push(Effect::Spark(Spark::new(center, angle, 2.0 + rng.gen::<f32>())));
        effects.push(Effect::Particle(ParticleSpawn {
            kind: ParticleKind::Dust,
            pos: center,
            velocity: vec2((angle + PI).cos(), (angle + PI).sin()) * speed * 0.5,
            start_frame: rng.gen_range(0..=7),
        }));
    }
}
