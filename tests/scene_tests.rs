mod common;

use arthurs_escape::{
    AssetError, AssetLibrary, DrawList, GameConfig, GridPos, Input, MissingArt, Projectile, Scene, SceneStatus,
    Tilemap,
};
use common::{stone_row, test_assets};
use macroquad::prelude::*;

fn config() -> GameConfig {
    GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    }
}

/// Player marker on the main floor, one enemy on a lower ledge well out of
/// shooting height, and a tree.
fn level() -> Tilemap {
    let mut map = Tilemap::new(16);
    stone_row(&mut map, 0, 20, 5);
    stone_row(&mut map, 14, 18, 10);
    map.add_offgrid_tile("spawners", 0, dvec2(40.0, 65.0));
    map.set_grid_tile("spawners", 1, GridPos::new(15, 8));
    map.add_offgrid_tile("large_decor", 2, dvec2(100.0, 20.0));
    map
}

#[test]
fn markers_become_entities_and_trees_become_leaf_spawners() {
    let assets = test_assets();
    let scene = Scene::new(level(), &assets, &config()).expect("scene");

    assert_eq!(scene.player.body.pos, vec2(40.0, 65.0));
    assert_eq!(scene.enemies.len(), 1);
    assert_eq!(scene.enemies[0].body.pos, vec2(240.0, 128.0));
    assert_eq!(scene.leaf_spawners, vec![Rect::new(104.0, 24.0, 23.0, 13.0)]);

    assert!(scene.tilemap.grid_tile(GridPos::new(15, 8)).is_none());
    assert!(scene.tilemap.offgrid_tiles().iter().all(|t| t.kind != "spawners"));
    assert!(scene.tilemap.offgrid_tiles().iter().any(|t| t.kind == "large_decor"));
    assert_eq!(scene.transition, -30);
}

#[test]
fn missing_animations_fail_scene_setup() {
    let assets = AssetLibrary::new();
    let err = Scene::new(level(), &assets, &config()).err().expect("no player art");
    assert_eq!(err, AssetError::MissingAnimation("player/idle".into()));
}

#[test]
fn dash_kill_removes_the_enemy_in_the_same_tick() {
    let assets = test_assets();
    let mut map = Tilemap::new(16);
    stone_row(&mut map, 0, 10, 5);
    map.add_offgrid_tile("spawners", 0, dvec2(40.0, 65.0));
    map.add_offgrid_tile("spawners", 1, dvec2(42.0, 65.0));
    let mut scene = Scene::new(map, &assets, &config()).expect("scene");
    assert_eq!(scene.enemies.len(), 1);

    scene.player.dashing = 51;
    assert_eq!(scene.tick(&Input::default()), SceneStatus::Running);
    assert!(scene.enemies.is_empty());
    assert_eq!(scene.screenshake, 16.0);
    assert!(!scene.sparks.is_empty());
}

#[test]
fn level_completes_once_the_wipe_closes() {
    let assets = test_assets();
    let mut map = Tilemap::new(16);
    stone_row(&mut map, 0, 10, 5);
    map.add_offgrid_tile("spawners", 0, dvec2(40.0, 65.0));
    let mut scene = Scene::new(map, &assets, &config()).expect("scene");

    for _ in 0..45 {
        assert_eq!(scene.tick(&Input::default()), SceneStatus::Running);
    }
    assert_eq!(scene.transition, 30);
    assert_eq!(scene.tick(&Input::default()), SceneStatus::NextLevel);
}

#[test]
fn projectile_hit_kills_the_player_and_restarts_the_level() {
    let assets = test_assets();
    let mut scene = Scene::new(level(), &assets, &config()).expect("scene");
    scene.projectiles.push(Projectile::new(vec2(42.0, 70.0), 1.5));

    assert_eq!(scene.tick(&Input::default()), SceneStatus::Running);
    assert_eq!(scene.dead, 1);
    assert!(scene.projectiles.is_empty());
    assert_eq!(scene.screenshake, 16.0);

    let frozen = scene.player.body.pos;
    let mut status = SceneStatus::Running;
    let mut ticks = 0;
    while status == SceneStatus::Running && ticks < 100 {
        status = scene.tick(&Input::default());
        ticks += 1;
    }
    assert_eq!(status, SceneStatus::Restart);
    assert_eq!(ticks, 40);
    assert_eq!(scene.player.body.pos, frozen);
    assert!(scene.transition > 0);
}

#[test]
fn jump_input_reaches_the_player() {
    let assets = test_assets();
    let mut scene = Scene::new(level(), &assets, &config()).expect("scene");
    scene.tick(&Input::default());
    scene.tick(&Input::default());
    assert_eq!(scene.player.air_time, 0);

    scene.tick(&Input {
        jump: true,
        ..Input::default()
    });
    assert!(scene.player.body.velocity.y < 0.0);
    assert_eq!(scene.player.jumps, 0);
}

#[test]
fn camera_eases_toward_the_player() {
    let assets = test_assets();
    let mut scene = Scene::new(level(), &assets, &config()).expect("scene");
    let target = scene.player.body.center() - config().display_size() / 2.0;

    scene.tick(&Input::default());
    assert_eq!(scene.scroll, target / 30.0);
    assert_eq!(scene.render_offset(), scene.scroll.trunc());
}

#[test]
fn render_draws_tiles_and_entities_and_honours_the_missing_art_policy() {
    let assets = test_assets();
    let mut scene = Scene::new(level(), &assets, &config()).expect("scene");
    scene.scroll = Vec2::ZERO;

    let mut list = DrawList::new(vec2(320.0, 240.0));
    scene.render(&mut list, &assets, MissingArt::Fail).expect("render");
    let drawn: Vec<_> = list.frames().map(|(f, _, _)| f).collect();
    assert!(drawn.contains(&scene.player.body.animation().current_image()));
    assert!(drawn.contains(&scene.enemies[0].body.animation().current_image()));

    scene.tilemap.set_grid_tile("mystery", 0, GridPos::new(1, 1));
    list.clear();
    let err = scene.render(&mut list, &assets, MissingArt::Fail).expect_err("unknown kind");
    assert!(matches!(err, AssetError::MissingTile { .. }));
    list.clear();
    scene.render(&mut list, &assets, MissingArt::Skip).expect("skipped");
}
