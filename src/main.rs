use log::{error, info, warn};

mod animation;
mod arcade;
mod assets;
mod collision;
mod config;
mod error;
mod gui;
mod input_system;
mod render;
mod scene;
mod sprite;
mod text;

use assets::{AssetManifest, TextureStore};
use config::{AutoCenter, GameConfig, DEFAULT_CONFIG_PATH};
use error::{GameError, GameResult};
use gui::GameOverBanner;
use input_system::{CursorKeys, HostAction, InputSystem};
use render::render_frame;
use scene::{run_frame, SabermanScene, Scene, SceneContext};

/// Fixed simulation step, one frame at 60 FPS
const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// Pick the window zoom that fits the main monitor
fn calculate_window_zoom(video_subsystem: &sdl2::VideoSubsystem, config: &GameConfig) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as u32;
            let usable_h = (display_mode.h as f32 * 0.9) as u32;
            config.window_zoom(usable_w, usable_h)
        }
        Err(e) => {
            warn!("Could not detect monitor size ({}), using {}x zoom", e, config.zoom);
            config.zoom
        }
    }
}

fn run() -> GameResult<()> {
    let config = GameConfig::load_or_default(DEFAULT_CONFIG_PATH)?;
    let background = config.background()?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let zoom = calculate_window_zoom(&video_subsystem, &config);
    let window_width = config.width * zoom;
    let window_height = config.height * zoom;
    info!("Window zoom: {}x (window: {}x{})", zoom, window_width, window_height);

    let mut window_builder = video_subsystem.window(&config.title, window_width, window_height);
    if config.auto_center == AutoCenter::Both {
        window_builder.position_centered();
    }
    let window = window_builder
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;

    let mut canvas = window
        .into_canvas()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;

    // Logical size letterboxes and scales the game to whatever the window is
    canvas
        .set_logical_size(config.width, config.height)
        .map_err(|e| GameError::Sdl(e.to_string()))?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let mut scene = SabermanScene::new();
    let mut manifest = AssetManifest::new();
    scene.preload(&mut manifest);

    let mut textures = TextureStore::load(&texture_creator, &manifest)?;

    let mut ctx = SceneContext::new(
        config.width as f32,
        config.height as f32,
        config.gravity_y,
        textures.catalog().clone(),
    );
    scene.create(&mut ctx)?;

    let input = InputSystem::new();
    let mut banner = GameOverBanner::new();
    let mut debug_draw = config.debug;

    info!("{} started", config.title);

    'running: loop {
        for action in input.poll_events(&mut event_pump) {
            match action {
                HostAction::Quit => break 'running,
                HostAction::ToggleDebugDraw => {
                    debug_draw = !debug_draw;
                    info!("Debug draw: {}", if debug_draw { "on" } else { "off" });
                }
            }
        }

        let keys = CursorKeys::from_keyboard(&event_pump.keyboard_state());
        run_frame(&mut scene, &mut ctx, &keys, FRAME_SECONDS)?;

        if scene.is_over() && !banner.is_visible() {
            banner.show(scene.score());
        }

        render_frame(&mut canvas, &mut textures, &ctx, background, debug_draw)?;
        banner.render(&mut canvas)?;
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    info!("Final score: {}", scene.score());
    Ok(())
}

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run().inspect_err(|e| error!("{}", e))
}
