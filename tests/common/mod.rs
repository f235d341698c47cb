#![allow(dead_code)]

use arthurs_escape::{Animation, AssetLibrary, Frame, GridPos, Tilemap};

pub fn frames(lib: &mut AssetLibrary, n: usize, w: f32, h: f32) -> Vec<Frame> {
    (0..n).map(|_| lib.alloc_frame(w, h)).collect()
}

/// Every asset key the game looks up, with tiny placeholder frames.
pub fn test_assets() -> AssetLibrary {
    let mut lib = AssetLibrary::new();

    for kind in ["grass", "stone"] {
        let tiles = frames(&mut lib, 9, 16.0, 16.0);
        lib.insert_tiles(kind, tiles);
    }
    let decor = frames(&mut lib, 4, 8.0, 8.0);
    lib.insert_tiles("decor", decor);
    let large = frames(&mut lib, 3, 32.0, 32.0);
    lib.insert_tiles("large_decor", large);
    let spawners = frames(&mut lib, 2, 16.0, 16.0);
    lib.insert_tiles("spawners", spawners);

    for kind in ["player", "enemy"] {
        for action in ["idle", "run", "jump", "slide", "wall_slide"] {
            let imgs = frames(&mut lib, 2, 14.0, 18.0);
            let anim = Animation::new(imgs, 5, true).expect("animation");
            lib.insert_animation(format!("{kind}/{action}"), anim);
        }
    }

    let leaf = frames(&mut lib, 3, 5.0, 5.0);
    lib.insert_animation("particle/leaf", Animation::new(leaf, 20, false).expect("leaf"));
    let dust = frames(&mut lib, 4, 3.0, 3.0);
    lib.insert_animation("particle/particle", Animation::new(dust, 6, false).expect("dust"));

    let gun = lib.alloc_frame(7.0, 4.0);
    lib.insert_image("gun", gun);
    let projectile = lib.alloc_frame(5.0, 2.0);
    lib.insert_image("projectile", projectile);

    lib
}

/// A row of stone tiles from `x0` to `x1` (inclusive) at grid row `y`.
pub fn stone_row(map: &mut Tilemap, x0: i32, x1: i32, y: i32) {
    for x in x0..=x1 {
        map.set_grid_tile("stone", 0, GridPos::new(x, y));
    }
}
