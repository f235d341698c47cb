use crate::animation::Animation;
use crate::assets::Assets;
use crate::error::AssetError;
use crate::render::surface::Surface;
use macroquad::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Falling leaf from a tree, sways sideways.
    Leaf,
    /// Dash trail and death puffs.
    Dust,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 2] = [ParticleKind::Leaf, ParticleKind::Dust];

    pub fn asset_key(self) -> &'static str {
        match self {
            ParticleKind::Leaf => "particle/leaf",
            ParticleKind::Dust => "particle/particle",
        }
    }
}

/// Request to put a particle in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpawn {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub start_frame: u32,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    animation: Animation,
}

impl Particle {
    pub fn new(kind: ParticleKind, pos: Vec2, velocity: Vec2, template: &Animation, start_frame: u32) -> Self {
        let mut animation = template.fresh_copy();
        animation.seek(start_frame);
        Particle {
            kind,
            pos,
            velocity,
            animation,
        }
    }

    pub fn spawn(request: &ParticleSpawn, assets: &dyn Assets) -> Result<Self, AssetError> {
        let key = request.kind.asset_key();
        let template = assets
            .animation(key)
            .ok_or_else(|| AssetError::MissingAnimation(key.to_owned()))?;
        Ok(Particle::new(
            request.kind,
            request.pos,
            request.velocity,
            template,
            request.start_frame,
        ))
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Returns `true` when the particle should be removed: its one-shot
    /// animation had already finished before this tick.
    pub fn update(&mut self) -> bool {
        let kill = self.animation.done();

        self.pos += self.velocity;
        self.animation.advance();

        if self.kind == ParticleKind::Leaf {
            self.pos.x += (self.animation.frame() as f32 * 0.035).sin() * 0.3;
        }
        kill
    }

    pub fn render(&self, surface: &mut dyn Surface, offset: Vec2) {
        let img = self.animation.current_image();
        let half = vec2((img.width / 2.0).floor(), (img.height / 2.0).floor());
        surface.draw_frame(img, self.pos - offset - half, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetLibrary, Frame, FrameId};

    fn dust_template() -> Animation {
        let frames = (0..4).map(|i| Frame::new(FrameId(i), 5.0, 5.0)).collect();
        Animation::new(frames, 2, false).unwrap()
    }

    #[test]
    fn particle_lives_until_its_animation_finishes() {
        let template = dust_template();
        let mut p = Particle::new(ParticleKind::Dust, Vec2::ZERO, vec2(1.0, 0.5), &template, 5);
        assert!(!p.update()); // frame 6
        assert!(!p.update()); // frame 7, done
        assert!(p.update());
        assert_eq!(p.pos, vec2(3.0, 1.5));
        assert_eq!(template.frame(), 0);
    }

    #[test]
    fn render_centres_the_image() {
        use crate::render::surface::DrawList;
        let template = dust_template();
        let p = Particle::new(ParticleKind::Dust, vec2(10.0, 10.0), Vec2::ZERO, &template, 0);
        let mut surf = DrawList::new(vec2(100.0, 100.0));
        p.render(&mut surf, vec2(1.0, 1.0));
        let (_, pos, _) = surf.frames().next().unwrap();
        assert_eq!(pos, vec2(7.0, 7.0));
    }

    #[test]
    fn spawn_needs_the_particle_animation() {
        let mut lib = AssetLibrary::new();
        let request = ParticleSpawn {
            kind: ParticleKind::Leaf,
            pos: Vec2::ZERO,
            velocity: vec2(-0.1, 0.3),
            start_frame: 3,
        };
        assert!(matches!(
            Particle::spawn(&request, &lib),
            Err(AssetError::MissingAnimation(key)) if key == "particle/leaf"
        ));

        lib.insert_animation("particle/leaf", dust_template());
        let leaf = Particle::spawn(&request, &lib).unwrap();
        assert_eq!(leaf.animation().frame(), 3);
    }
}
