//! Scenes and the per-frame driver
//!
//! A scene implements the lifecycle callbacks; the host calls them in order:
//!
//! 1. `preload` once, to declare assets
//! 2. `create` once, after every asset is loaded
//! 3. `run_frame` every frame, which calls `update`, steps the world, and
//!    hands contact events to `on_contact`
//!
//! # Example Usage
//!
//! ```ignore
//! let mut scene = SabermanScene::new();
//! let mut manifest = AssetManifest::new();
//! scene.preload(&mut manifest);
//! // ...load textures, build a SceneContext...
//! scene.create(&mut ctx)?;
//! loop {
//!     run_frame(&mut scene, &mut ctx, &keys, FRAME_SECONDS)?;
//! }
//! ```

pub mod context;
pub mod display;
pub mod saberman;

pub use context::SceneContext;
pub use display::DisplayEntry;
pub use saberman::SabermanScene;

use crate::arcade::ContactEvent;
use crate::assets::AssetManifest;
use crate::error::GameResult;
use crate::input_system::CursorKeys;

/// Lifecycle callbacks invoked by the host.
///
/// Every callback that can fail returns `GameResult`; the host treats any
/// error as fatal.
pub trait Scene {
    /// Declare the assets this scene needs
    fn preload(&mut self, load: &mut AssetManifest);

    /// Build the scene's entities, animations, and contact pairs
    fn create(&mut self, ctx: &mut SceneContext) -> GameResult<()>;

    /// Per-frame input handling, runs before the physics step
    fn update(&mut self, ctx: &mut SceneContext, keys: &CursorKeys) -> GameResult<()>;

    /// Called once per contact event reported by the physics step
    fn on_contact(&mut self, ctx: &mut SceneContext, event: &ContactEvent) -> GameResult<()>;

    /// True once the scene reached a terminal state
    fn is_over(&self) -> bool {
        false
    }
}

/// Runs one frame: input → physics → contact handlers → animations.
pub fn run_frame(
    scene: &mut dyn Scene,
    ctx: &mut SceneContext,
    keys: &CursorKeys,
    dt_seconds: f32,
) -> GameResult<()> {
    scene.update(ctx, keys)?;

    let events = ctx.world.step(dt_seconds);
    for event in &events {
        scene.on_contact(ctx, event)?;
    }

    ctx.update_animations(dt_seconds * 1000.0);
    Ok(())
}
