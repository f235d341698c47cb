use crate::render::surface::Surface;
use macroquad::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

pub const SPARK_DECAY: f32 = 0.1;

/// A white streak flying along `angle` that slows to a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
}

impl Spark {
    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Spark { pos, angle, speed }
    }

    #[inline]
    fn heading(&self, turn: f32) -> Vec2 {
        vec2((self.angle + turn).cos(), (self.angle + turn).sin())
    }

    /// Returns `true` once the spark has stopped.
    pub fn update(&mut self) -> bool {
        self.pos += self.heading(0.0) * self.speed;
        self.speed = (self.speed - SPARK_DECAY).max(0.0);
        self.speed == 0.0
    }

    /// Diamond stretched along the heading: 3x speed long, 0.5x speed wide.
    pub fn outline(&self, offset: Vec2) -> [Vec2; 4] {
        let at = |turn: f32, scale: f32| self.pos + self.heading(turn) * self.speed * scale - offset;
        [
            at(0.0, 3.0),
            at(FRAC_PI_2, 0.5),
            at(PI, 3.0),
            at(-FRAC_PI_2, 0.5),
        ]
    }

    pub fn render(&self, surface: &mut dyn Surface, offset: Vec2) {
        surface.fill_polygon(&self.outline(offset), WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spark_slows_down_and_reports_when_stopped() {
        let mut spark = Spark::new(Vec2::ZERO, 0.0, 0.35);
        assert!(!spark.update());
        assert!((spark.pos.x - 0.35).abs() < 1e-6);
        assert!(!spark.update());
        assert!(!spark.update());
        // 0.05 left, clamps to exactly zero
        assert!(spark.update());
        assert_eq!(spark.speed, 0.0);
    }

    #[test]
    fn outline_is_long_along_heading_and_narrow_across() {
        let spark = Spark::new(vec2(10.0, 10.0), 0.0, 2.0);
        let pts = spark.outline(vec2(10.0, 0.0));
        assert!((pts[0] - vec2(6.0, 10.0)).length() < 1e-4);
        assert!((pts[1] - vec2(0.0, 11.0)).length() < 1e-4);
        assert!((pts[2] - vec2(-6.0, 10.0)).length() < 1e-4);
        assert!((pts[3] - vec2(0.0, 9.0)).length() < 1e-4);
    }
}
