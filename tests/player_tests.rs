mod common;

use arthurs_escape::{Action, AnimationSet, Effect, GridPos, Player, Tilemap};
use common::{stone_row, test_assets};
use macroquad::prelude::*;
use ::rand::rngs::SmallRng;
use ::rand::SeedableRng;

fn player_at(pos: Vec2) -> Player {
    let assets = test_assets();
    Player::new(pos, AnimationSet::from_assets(&assets, "player")).expect("player")
}

fn floor_map() -> Tilemap {
    let mut map = Tilemap::new(16);
    stone_row(&mut map, -5, 40, 5);
    map
}

fn particle_count(effects: &[Effect]) -> usize {
    effects.iter().filter(|e| matches!(e, Effect::Particle(_))).count()
}

#[test]
fn second_jump_in_the_air_is_refused_until_landing() {
    let map = floor_map();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut fx = Vec::new();
    let mut p = player_at(vec2(20.0, 65.0));

    assert!(p.jump());
    assert_eq!(p.body.velocity.y, -3.0);
    assert_eq!(p.jumps, 0);
    p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    assert!(!p.jump());

    let mut landed = false;
    for _ in 0..200 {
        p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
        if p.body.collisions.down {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(p.jumps, 1);
    assert_eq!(p.air_time, 0);
    assert!(p.jump());
}

#[test]
fn airborne_player_switches_to_the_jump_action() {
    let map = Tilemap::new(16);
    let mut rng = SmallRng::seed_from_u64(2);
    let mut fx = Vec::new();
    let mut p = player_at(Vec2::ZERO);

    p.update(&map, vec2(1.0, 0.0), &mut rng, &mut fx);
    assert_eq!(p.body.action(), Action::Run);
    for _ in 0..4 {
        p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    }
    assert_eq!(p.body.action(), Action::Jump);
}

#[test]
fn pushing_into_a_wall_mid_air_slides_and_allows_a_wall_jump() {
    let mut map = Tilemap::new(16);
    for y in 0..=10 {
        map.set_grid_tile("stone", 0, GridPos::new(3, y));
    }
    let mut rng = SmallRng::seed_from_u64(3);
    let mut fx = Vec::new();
    let mut p = player_at(vec2(39.0, 40.0));
    p.air_time = 10;
    p.jumps = 0;

    p.update(&map, vec2(1.0, 0.0), &mut rng, &mut fx);
    assert!(!p.wall_slide);

    p.body.velocity.y = 2.0;
    p.update(&map, vec2(1.0, 0.0), &mut rng, &mut fx);
    assert!(p.body.collisions.right);
    assert!(p.wall_slide);
    assert!(!p.body.flip);
    assert_eq!(p.body.velocity.y, 0.5);
    assert_eq!(p.body.action(), Action::WallSlide);

    assert!(p.jump());
    assert_eq!(p.body.velocity, vec2(-3.5, -3.0));
    assert_eq!(p.air_time, 5);
}

#[test]
fn wall_sliding_without_pushing_into_the_wall_cannot_jump() {
    let mut p = player_at(Vec2::ZERO);
    p.wall_slide = true;
    p.body.flip = false;
    p.body.last_movement = vec2(-1.0, 0.0);
    p.jumps = 1;

    assert!(!p.jump());
    assert_eq!(p.jumps, 1);
    assert_eq!(p.body.velocity, Vec2::ZERO);
}

#[test]
fn dash_runs_fast_then_hands_control_back() {
    let map = floor_map();
    let mut rng = SmallRng::seed_from_u64(4);
    let mut p = player_at(vec2(20.0, 65.0));

    assert!(p.dash());
    assert!(!p.dash());
    assert_eq!(p.dashing, 60);

    let mut fx = Vec::new();
    p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    assert_eq!(particle_count(&fx), 21);
    assert_eq!(p.dashing, 59);
    assert!((p.body.velocity.x - 7.9).abs() < 1e-5);
    assert!(!p.is_visible());
    assert!(p.is_dash_lethal());

    for _ in 0..8 {
        p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    }
    assert_eq!(p.dashing, 51);
    assert!((p.body.velocity.x - 0.7).abs() < 1e-5);

    p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    assert_eq!(p.dashing, 50);
    assert!(p.is_visible());
    assert!(p.is_dash_lethal());

    fx.clear();
    p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    assert_eq!(p.dashing, 49);
    assert_eq!(particle_count(&fx), 20);
    assert!(!p.is_dash_lethal());

    for _ in 0..49 {
        p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    }
    assert_eq!(p.dashing, 0);
    assert!(p.dash());
}

#[test]
fn dash_follows_facing() {
    let mut p = player_at(Vec2::ZERO);
    p.body.flip = true;
    assert!(p.dash());
    assert_eq!(p.dashing, -60);
}

#[test]
fn friction_brings_horizontal_speed_to_rest() {
    let map = floor_map();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut fx = Vec::new();
    let mut p = player_at(vec2(20.0, 65.0));
    p.body.velocity.x = 0.25;

    for _ in 0..3 {
        p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    }
    assert_eq!(p.body.velocity.x, 0.0);
}

#[test]
fn falling_for_too_long_reports_death() {
    let map = Tilemap::new(16);
    let mut rng = SmallRng::seed_from_u64(6);
    let mut fx = Vec::new();
    let mut p = player_at(Vec2::ZERO);

    for _ in 0..120 {
        p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    }
    assert!(!fx.iter().any(|e| matches!(e, Effect::PlayerDied)));

    p.update(&map, Vec2::ZERO, &mut rng, &mut fx);
    assert!(fx.iter().any(|e| matches!(e, Effect::PlayerDied)));
    assert!(fx.iter().any(|e| matches!(e, Effect::Screenshake(s) if *s == 16.0)));
}
