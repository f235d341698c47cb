use anyhow::{Context, Result};
use arthurs_escape::{
    Animation, AssetLibrary, Frame, GameConfig, Input, MissingArt, Scene, SceneStatus, ScreenSurface, Surface,
    Tilemap,
};
use macroquad::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "arthurs_escape.json";

fn window_conf() -> Conf {
    let config = GameConfig::load(CONFIG_PATH).unwrap_or_default();
    Conf {
        window_title: config.window_title,
        window_width: config.window_width,
        window_height: config.window_height,
        ..Default::default()
    }
}

/// Loads PNGs into the asset library and hands their textures to the screen surface.
struct ArtLoader {
    root: PathBuf,
    library: AssetLibrary,
    surface: ScreenSurface,
}

impl ArtLoader {
    async fn image(&mut self, rel: &str) -> Result<Frame> {
        let path = self.root.join(rel);
        self.load_frame(&path).await
    }

    async fn load_frame(&mut self, path: &Path) -> Result<Frame> {
        let tex: Texture2D = load_texture(&path.to_string_lossy())
            .await
            .with_context(|| format!("Loading texture {}", path.display()))?;
        let frame = self.library.alloc_frame(tex.width(), tex.height());
        self.surface.register(frame.id, tex);
        Ok(frame)
    }

    /// Every PNG of a folder, in file-name order.
    async fn images(&mut self, rel: &str) -> Result<Vec<Frame>> {
        let dir = self.root.join(rel);
        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
            .with_context(|| format!("Listing images in {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        files.sort();

        let mut frames = Vec::with_capacity(files.len());
        for file in files {
            frames.push(self.load_frame(&file).await?);
        }
        Ok(frames)
    }

    async fn animation(&mut self, key: &str, rel: &str, frame_duration: u32, looping: bool) -> Result<()> {
        let frames = self.images(rel).await?;
        let anim = Animation::new(frames, frame_duration, looping).with_context(|| format!("Animation {key}"))?;
        self.library.insert_animation(key, anim);
        Ok(())
    }
}

async fn load_art(config: &GameConfig) -> Result<(AssetLibrary, ScreenSurface, Option<Frame>)> {
    let mut loader = ArtLoader {
        root: config.images_dir.clone(),
        library: AssetLibrary::new(),
        surface: ScreenSurface::new(config.display_size()),
    };

    for kind in ["decor", "grass", "large_decor", "stone", "spawners"] {
        let frames = loader.images(&format!("tiles/{kind}")).await?;
        loader.library.insert_tiles(kind, frames);
    }

    loader.animation("enemy/idle", "entities/enemy/idle", 6, true).await?;
    loader.animation("enemy/run", "entities/enemy/run", 4, true).await?;
    loader.animation("player/idle", "entities/player/idle", 6, true).await?;
    loader.animation("player/run", "entities/player/run", 4, true).await?;
    for action in ["jump", "slide", "wall_slide"] {
        loader
            .animation(&format!("player/{action}"), &format!("entities/player/{action}"), 5, true)
            .await?;
    }
    loader.animation("particle/leaf", "particles/leaf", 20, false).await?;
    loader.animation("particle/particle", "particles/particle", 6, false).await?;

    let gun = loader.image("gun.png").await?;
    loader.library.insert_image("gun", gun);
    let projectile = loader.image("projectile.png").await?;
    loader.library.insert_image("projectile", projectile);
    let background = loader.image("background.png").await.ok();

    loader.library.require_animation("player/idle")?;
    info!(tiles = ?loader.library.tile_kinds(), "art loaded");
    Ok((loader.library, loader.surface, background))
}

fn load_scene(config: &GameConfig, level: usize, library: &AssetLibrary) -> Result<Scene> {
    let path = config.map_path(level);
    let mut map = Tilemap::new(config.tile_size);
    map.load(&path)
        .with_context(|| format!("Loading level {level}"))?;
    Ok(Scene::new(map, library, config)?)
}

fn read_input() -> Input {
    let mut movement_x = 0.0;
    if is_key_down(KeyCode::Left) {
        movement_x -= 1.0;
    }
    if is_key_down(KeyCode::Right) {
        movement_x += 1.0;
    }
    Input {
        movement_x,
        jump: is_key_pressed(KeyCode::Up),
        dash: is_key_pressed(KeyCode::X),
    }
}

/// Blacks out everything outside a circle that shrinks as `|transition|` approaches 30.
fn draw_wipe(display: Vec2, transition: i32) {
    const SEGMENTS: usize = 48;
    let center = display / 2.0;
    let inner = ((30 - transition.abs()) * 8) as f32;
    let outer = display.length();
    let step = std::f32::consts::TAU / SEGMENTS as f32;
    for i in 0..SEGMENTS {
        let a = Vec2::from_angle(i as f32 * step);
        let b = Vec2::from_angle((i + 1) as f32 * step);
        let (a_in, a_out) = (center + a * inner, center + a * outer);
        let (b_in, b_out) = (center + b * inner, center + b * outer);
        draw_triangle(a_in, a_out, b_out, BLACK);
        draw_triangle(a_in, b_out, b_in, BLACK);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        error!("{err:#}");
    }
}

async fn run() -> Result<()> {
    let config = GameConfig::load(CONFIG_PATH)?;
    let (library, mut surface, background) = load_art(&config).await?;

    let level_count = config.level_count().max(1);
    let mut level = config.start_level.min(level_count - 1);
    let mut scene = load_scene(&config, level, &library)?;
    info!(level, level_count, "game started");

    let display = config.display_size();
    let target = render_target(config.display_width, config.display_height);
    target.texture.set_filter(FilterMode::Nearest);
    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, display.x, display.y));
    camera.render_target = Some(target.clone());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        match scene.tick(&read_input()) {
            SceneStatus::Running => {}
            SceneStatus::NextLevel => {
                level = (level + 1).min(level_count - 1);
                info!(level, "next level");
                scene = load_scene(&config, level, &library)?;
            }
            SceneStatus::Restart => {
                info!(level, "restarting level");
                scene = load_scene(&config, level, &library)?;
            }
        }

        set_camera(&camera);
        clear_background(BLACK);
        if let Some(bg) = background {
            surface.draw_frame(bg, Vec2::ZERO, false);
        }
        scene.render(&mut surface, &library, MissingArt::Skip)?;
        if scene.transition != 0 {
            draw_wipe(display, scene.transition);
        }

        set_default_camera();
        clear_background(BLACK);
        let shake = scene.screenshake;
        let jitter = vec2(
            macroquad::rand::gen_range(0.0, 1.0) * shake - shake / 2.0,
            macroquad::rand::gen_range(0.0, 1.0) * shake - shake / 2.0,
        );
        draw_texture_ex(
            &target.texture,
            jitter.x,
            jitter.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                flip_y: true,
                ..Default::default()
            },
        );

        next_frame().await;
    }
    Ok(())
}
