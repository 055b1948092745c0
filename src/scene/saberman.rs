//! The Saberman scene
//!
//! Collect the twelve stars, dodge the bombs. Every time the last star is
//! collected the whole set drops again and one more bomb joins in. Touching a
//! bomb freezes the world and ends the game for good.
//!
//! # Game Rules
//!
//! - Each star is worth `SCORE_PER_STAR` points
//! - Left beats right when both are held; neither means stand still
//! - Jump (up or space) only works while standing on something
//! - Down while airborne is a fast-fall

use super::{Scene, SceneContext};
use crate::animation::{generate_frame_numbers, AnimationClip, REPEAT_FOREVER};
use crate::arcade::{BodyId, ContactEvent, GroupId, PairId};
use crate::assets::AssetManifest;
use crate::error::GameResult;
use crate::input_system::CursorKeys;
use crate::scene::display::TextId;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdl2::pixels::Color;

pub const SCORE_PER_STAR: u32 = 10;
pub const STAR_COUNT: usize = 12;

const RUN_SPEED: f32 = 160.0;
const JUMP_VELOCITY: f32 = -400.0;
const FAST_FALL_VELOCITY: f32 = 300.0;

const PLAYER_START: (f32, f32) = (100.0, 450.0);
const PLAYER_BOUNCE: f32 = 0.2;

const STAR_START_X: f32 = 12.0;
const STAR_STEP_X: f32 = 70.0;

const BOMB_SPAWN_Y: f32 = 16.0;
const BOMB_MAX_SPEED_X: i32 = 200;
const BOMB_FALL_SPEED: f32 = 20.0;

const GROUND: (f32, f32) = (400.0, 568.0);
const LEDGES: [(f32, f32); 3] = [(600.0, 400.0), (50.0, 250.0), (750.0, 220.0)];

/// Handles to everything `create` builds
#[derive(Debug, Clone, Copy)]
struct SceneEntities {
    player: BodyId,
    stars: GroupId,
    bombs: GroupId,
    score_text: TextId,
    collect_star: PairId,
    hit_bomb: PairId,
}

pub struct SabermanScene {
    score: u32,
    game_over: bool,
    entities: Option<SceneEntities>,
    rng: StdRng,
}

impl SabermanScene {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic scene for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        SabermanScene {
            score: 0,
            game_over: false,
            entities: None,
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player(&self) -> Option<BodyId> {
        self.entities.map(|e| e.player)
    }

    pub fn stars(&self) -> Option<GroupId> {
        self.entities.map(|e| e.stars)
    }

    pub fn bombs(&self) -> Option<GroupId> {
        self.entities.map(|e| e.bombs)
    }

    pub fn score_text(&self) -> Option<TextId> {
        self.entities.map(|e| e.score_text)
    }

    fn animations() -> Vec<AnimationClip> {
        vec![
            AnimationClip {
                key: "left".to_string(),
                texture: "saberman".to_string(),
                frames: generate_frame_numbers(0, 3),
                frame_rate: 10.0,
                repeat: REPEAT_FOREVER,
            },
            AnimationClip {
                key: "turn".to_string(),
                texture: "saberman".to_string(),
                frames: vec![4],
                frame_rate: 20.0,
                repeat: 0,
            },
            AnimationClip {
                key: "right".to_string(),
                texture: "saberman".to_string(),
                frames: generate_frame_numbers(5, 8),
                frame_rate: 10.0,
                repeat: REPEAT_FOREVER,
            },
        ]
    }

    /// Player touched a star: bank it, and refill the sky once it's empty
    fn collect_star(
        &mut self,
        ctx: &mut SceneContext,
        entities: SceneEntities,
        star: BodyId,
    ) -> GameResult<()> {
        if !ctx.world.body(star).enabled {
            return Ok(());
        }

        ctx.world.disable_body(star, true);
        self.score += SCORE_PER_STAR;
        ctx.display
            .set_text(entities.score_text, format!("Score: {}", self.score));
        debug!("Star collected, score {}", self.score);

        if ctx.world.count_active(entities.stars) == 0 {
            self.refill_stars(ctx, entities);
            self.spawn_bomb(ctx, entities)?;
        }

        Ok(())
    }

    /// Brings every star back at the top of the screen, same column
    fn refill_stars(&mut self, ctx: &mut SceneContext, entities: SceneEntities) {
        let stars = ctx.world.members(entities.stars).to_vec();
        for star in stars {
            let x = ctx.world.body(star).x;
            ctx.world.enable_body(star, x, 0.0);
        }
        debug!("All stars collected, refilled {}", STAR_COUNT);
    }

    /// Drops a bomb on the half of the screen the player isn't on
    fn spawn_bomb(&mut self, ctx: &mut SceneContext, entities: SceneEntities) -> GameResult<BodyId> {
        let half_width = (ctx.world.bounds().width / 2.0) as i32;
        let full_width = ctx.world.bounds().width as i32;
        let player_x = ctx.world.body(entities.player).x;

        let x = if player_x < half_width as f32 {
            self.rng.gen_range(half_width..full_width)
        } else {
            self.rng.gen_range(0..half_width)
        };
        let velocity_x = self.rng.gen_range(-BOMB_MAX_SPEED_X..=BOMB_MAX_SPEED_X);

        let bomb = ctx.add_sprite_with(Some(entities.bombs), "bomb", x as f32, BOMB_SPAWN_Y, |body| {
            body.with_bounce(1.0, 1.0)
                .with_world_bounds()
                .with_velocity(velocity_x as f32, BOMB_FALL_SPEED)
        })?;

        debug!("Bomb spawned at x={} with velocity_x={}", x, velocity_x);
        Ok(bomb)
    }

    /// Player touched a bomb: freeze everything, game over
    fn hit_bomb(&mut self, ctx: &mut SceneContext, entities: SceneEntities) -> GameResult<()> {
        ctx.world.pause();
        ctx.set_tint(entities.player, Color::RGB(255, 0, 0))?;
        ctx.play(entities.player, "turn", false)?;
        self.game_over = true;
        info!("Game over! Final score: {}", self.score);
        Ok(())
    }
}

impl Default for SabermanScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SabermanScene {
    fn preload(&mut self, load: &mut AssetManifest) {
        load.image("sky", "assets/sky.png");
        load.image("ground", "assets/platform.png");
        load.image("star", "assets/star.png");
        load.image("bomb", "assets/bomb.png");
        load.spritesheet("saberman", "assets/saberman.png", 32, 48);
    }

    fn create(&mut self, ctx: &mut SceneContext) -> GameResult<()> {
        ctx.add_image("sky", 400.0, 300.0)?;

        let platforms = ctx.world.create_group();
        ctx.add_static_sprite(Some(platforms), "ground", GROUND.0, GROUND.1, 2.0)?;
        for (x, y) in LEDGES {
            ctx.add_static_sprite(Some(platforms), "ground", x, y, 1.0)?;
        }

        let player = ctx.add_sprite_with(None, "saberman", PLAYER_START.0, PLAYER_START.1, |body| {
            body.with_bounce(PLAYER_BOUNCE, PLAYER_BOUNCE).with_world_bounds()
        })?;

        for clip in Self::animations() {
            ctx.create_animation(clip)?;
        }

        ctx.world.add_collider(player, platforms);

        let stars = ctx.world.create_group();
        for i in 0..STAR_COUNT {
            let x = STAR_START_X + STAR_STEP_X * i as f32;
            let bounce_y = self.rng.gen_range(0.4..0.8);
            ctx.add_sprite_with(Some(stars), "star", x, 0.0, |body| body.with_bounce(0.0, bounce_y))?;
        }

        ctx.world.add_collider(stars, platforms);
        let collect_star = ctx.world.add_overlap(player, stars);

        let score_text = ctx.add_text(16, 16, "score: 0", 32, Color::RGB(0, 0, 0));

        let bombs = ctx.world.create_group();
        ctx.world.add_collider(bombs, platforms);
        let hit_bomb = ctx.world.add_collider_with_events(player, bombs);

        self.entities = Some(SceneEntities {
            player,
            stars,
            bombs,
            score_text,
            collect_star,
            hit_bomb,
        });

        info!(
            "Scene created: {} stars, {} platforms, {} animations",
            STAR_COUNT,
            LEDGES.len() + 1,
            ctx.anims.len()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, keys: &CursorKeys) -> GameResult<()> {
        if self.game_over {
            return Ok(());
        }
        let Some(entities) = self.entities else {
            return Ok(());
        };
        let player = entities.player;

        if keys.left {
            ctx.world.body_mut(player).velocity_x = -RUN_SPEED;
            ctx.play(player, "left", true)?;
        } else if keys.right {
            ctx.world.body_mut(player).velocity_x = RUN_SPEED;
            ctx.play(player, "right", true)?;
        } else {
            ctx.world.body_mut(player).velocity_x = 0.0;
            ctx.play(player, "turn", false)?;
        }

        let body = ctx.world.body_mut(player);
        let on_ground = body.touching.down;

        if keys.jump() && on_ground {
            body.velocity_y = JUMP_VELOCITY;
        }

        if keys.down && !on_ground {
            body.velocity_y = FAST_FALL_VELOCITY;
        }

        Ok(())
    }

    fn on_contact(&mut self, ctx: &mut SceneContext, event: &ContactEvent) -> GameResult<()> {
        if self.game_over {
            return Ok(());
        }
        let Some(entities) = self.entities else {
            return Ok(());
        };

        if event.pair == entities.collect_star {
            self.collect_star(ctx, entities, event.b)
        } else if event.pair == entities.hit_bomb {
            self.hit_bomb(ctx, entities)
        } else {
            Ok(())
        }
    }

    fn is_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, TextureCatalog, TextureInfo};
    use crate::scene::run_frame;

    const DT: f32 = 1.0 / 60.0;

    fn catalog() -> TextureCatalog {
        let mut catalog = TextureCatalog::new();
        catalog.insert("sky", TextureInfo::image(800, 600));
        catalog.insert("ground", TextureInfo::image(400, 32));
        catalog.insert("star", TextureInfo::image(24, 22));
        catalog.insert("bomb", TextureInfo::image(14, 14));
        catalog.insert("saberman", TextureInfo::spritesheet(288, 48, 32, 48));
        catalog
    }

    fn created_scene(seed: u64) -> (SabermanScene, SceneContext) {
        let mut scene = SabermanScene::with_seed(seed);
        let mut ctx = SceneContext::new(800.0, 600.0, 300.0, catalog());
        scene.create(&mut ctx).unwrap();
        (scene, ctx)
    }

    fn star_ids(scene: &SabermanScene, ctx: &SceneContext) -> Vec<BodyId> {
        ctx.world.members(scene.stars().unwrap()).to_vec()
    }

    fn collect(scene: &mut SabermanScene, ctx: &mut SceneContext, star: BodyId) {
        let entities = scene.entities.unwrap();
        let event = ContactEvent {
            pair: entities.collect_star,
            a: entities.player,
            b: star,
        };
        scene.on_contact(ctx, &event).unwrap();
    }

    fn land_player(scene: &SabermanScene, ctx: &mut SceneContext) {
        // Drop onto the ground with no input until resting
        for _ in 0..120 {
            ctx.world.step(DT);
        }
        assert!(ctx.world.body(scene.player().unwrap()).touching.down);
    }

    #[test]
    fn test_preload_declares_all_assets() {
        let mut scene = SabermanScene::with_seed(1);
        let mut manifest = AssetManifest::new();
        scene.preload(&mut manifest);

        let paths: Vec<(&str, &str)> = manifest
            .requests()
            .iter()
            .map(|r| (r.key.as_str(), r.path.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("sky", "assets/sky.png"),
                ("ground", "assets/platform.png"),
                ("star", "assets/star.png"),
                ("bomb", "assets/bomb.png"),
                ("saberman", "assets/saberman.png"),
            ]
        );
        assert_eq!(
            manifest.get("saberman").unwrap().kind,
            AssetKind::SpriteSheet {
                frame_width: 32,
                frame_height: 48
            }
        );
    }

    #[test]
    fn test_create_builds_initial_state() {
        let (scene, ctx) = created_scene(1);

        assert_eq!(scene.score(), 0);
        assert!(!scene.is_game_over());
        assert_eq!(ctx.display.text(scene.score_text().unwrap()).text, "score: 0");

        let stars = star_ids(&scene, &ctx);
        assert_eq!(stars.len(), STAR_COUNT);
        assert_eq!(ctx.world.count_active(scene.stars().unwrap()), STAR_COUNT);
        for (i, star) in stars.iter().enumerate() {
            let body = ctx.world.body(*star);
            assert_eq!(body.x, 12.0 + 70.0 * i as f32);
            assert_eq!(body.y, 0.0);
            assert!((0.4..0.8).contains(&body.bounce_y));
        }

        assert!(ctx.world.members(scene.bombs().unwrap()).is_empty());

        let platforms = ctx.world.bodies().filter(|(_, b)| b.is_static()).count();
        assert_eq!(platforms, 4);

        for key in ["left", "turn", "right"] {
            assert!(ctx.anims.get(key).is_some());
        }
        assert_eq!(ctx.anims.get("turn").unwrap().frames, vec![4]);
    }

    #[test]
    fn test_create_fails_without_assets() {
        let mut scene = SabermanScene::with_seed(1);
        let mut ctx = SceneContext::new(800.0, 600.0, 300.0, TextureCatalog::new());
        assert!(scene.create(&mut ctx).is_err());
    }

    #[test]
    fn test_each_star_is_worth_ten() {
        let (mut scene, mut ctx) = created_scene(1);
        let stars = star_ids(&scene, &ctx);

        collect(&mut scene, &mut ctx, stars[0]);
        assert_eq!(scene.score(), 10);
        assert_eq!(ctx.display.text(scene.score_text().unwrap()).text, "Score: 10");
        assert!(!ctx.world.body(stars[0]).enabled);
        assert!(!ctx.world.body(stars[0]).visible);

        // A star that's already gone can't be collected twice
        collect(&mut scene, &mut ctx, stars[0]);
        assert_eq!(scene.score(), 10);
    }

    #[test]
    fn test_full_set_scores_120_and_refills_once() {
        let (mut scene, mut ctx) = created_scene(7);
        let stars = star_ids(&scene, &ctx);
        let bombs = scene.bombs().unwrap();

        for (i, star) in stars.iter().enumerate() {
            // Stars fall before they get picked up
            ctx.world.body_mut(*star).y = 500.0;
            collect(&mut scene, &mut ctx, *star);
            if i < STAR_COUNT - 1 {
                assert!(ctx.world.members(bombs).is_empty());
            }
        }

        assert_eq!(scene.score(), 120);
        assert_eq!(ctx.world.count_active(scene.stars().unwrap()), STAR_COUNT);
        assert_eq!(ctx.world.members(bombs).len(), 1);

        for (i, star) in stars.iter().enumerate() {
            let body = ctx.world.body(*star);
            assert!(body.visible);
            assert_eq!(body.x, 12.0 + 70.0 * i as f32);
            assert_eq!(body.y, 0.0);
        }

        let bomb = ctx.world.body(ctx.world.members(bombs)[0]);
        assert_eq!(bomb.y, 16.0);
        assert_eq!(bomb.velocity_y, 20.0);
        assert!((-200.0..=200.0).contains(&bomb.velocity_x));
        assert_eq!((bomb.bounce_x, bomb.bounce_y), (1.0, 1.0));
        assert!(bomb.collide_world_bounds);
    }

    #[test]
    fn test_bomb_spawns_on_the_other_half() {
        for seed in 0..20 {
            let (mut scene, mut ctx) = created_scene(seed);
            let entities = scene.entities.unwrap();

            // Player on the left half: bomb lands on the right
            ctx.world.body_mut(entities.player).x = 100.0;
            let bomb = scene.spawn_bomb(&mut ctx, entities).unwrap();
            let x = ctx.world.body(bomb).x;
            assert!((400.0..800.0).contains(&x), "seed {} gave x={}", seed, x);

            // Exactly at the midpoint counts as the right half
            ctx.world.body_mut(entities.player).x = 400.0;
            let bomb = scene.spawn_bomb(&mut ctx, entities).unwrap();
            let x = ctx.world.body(bomb).x;
            assert!((0.0..400.0).contains(&x), "seed {} gave x={}", seed, x);
        }
    }

    #[test]
    fn test_bomb_contact_ends_the_game() {
        let (mut scene, mut ctx) = created_scene(3);
        let entities = scene.entities.unwrap();
        let bomb = scene.spawn_bomb(&mut ctx, entities).unwrap();

        let event = ContactEvent {
            pair: entities.hit_bomb,
            a: entities.player,
            b: bomb,
        };
        scene.on_contact(&mut ctx, &event).unwrap();

        assert!(scene.is_game_over());
        assert!(scene.is_over());
        assert!(ctx.world.is_paused());
        assert_eq!(ctx.current_animation(entities.player), Some("turn"));
        assert_eq!(
            ctx.display.sprite(entities.player).unwrap().tint,
            Some(Color::RGB(255, 0, 0))
        );
    }

    #[test]
    fn test_game_over_is_sticky() {
        let (mut scene, mut ctx) = created_scene(3);
        let entities = scene.entities.unwrap();
        let bomb = scene.spawn_bomb(&mut ctx, entities).unwrap();
        scene
            .on_contact(
                &mut ctx,
                &ContactEvent {
                    pair: entities.hit_bomb,
                    a: entities.player,
                    b: bomb,
                },
            )
            .unwrap();

        let before = (
            ctx.world.body(entities.player).velocity_x,
            ctx.world.body(entities.player).velocity_y,
        );
        let keys = CursorKeys {
            left: true,
            up: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..10 {
            run_frame(&mut scene, &mut ctx, &keys, DT).unwrap();
        }

        let body = ctx.world.body(entities.player);
        assert_eq!((body.velocity_x, body.velocity_y), before);
        assert_eq!(ctx.current_animation(entities.player), Some("turn"));
        assert!(scene.is_game_over());

        // Stars can't be collected after the game ended
        let star = star_ids(&scene, &ctx)[0];
        collect(&mut scene, &mut ctx, star);
        assert_eq!(scene.score(), 0);
    }

    #[test]
    fn test_left_beats_right() {
        let (mut scene, mut ctx) = created_scene(1);
        let player = scene.player().unwrap();
        let keys = CursorKeys {
            left: true,
            right: true,
            ..Default::default()
        };

        scene.update(&mut ctx, &keys).unwrap();

        assert_eq!(ctx.world.body(player).velocity_x, -160.0);
        assert_eq!(ctx.current_animation(player), Some("left"));
    }

    #[test]
    fn test_horizontal_input() {
        let (mut scene, mut ctx) = created_scene(1);
        let player = scene.player().unwrap();

        let right = CursorKeys {
            right: true,
            ..Default::default()
        };
        scene.update(&mut ctx, &right).unwrap();
        assert_eq!(ctx.world.body(player).velocity_x, 160.0);
        assert_eq!(ctx.current_animation(player), Some("right"));

        scene.update(&mut ctx, &CursorKeys::default()).unwrap();
        assert_eq!(ctx.world.body(player).velocity_x, 0.0);
        assert_eq!(ctx.current_animation(player), Some("turn"));
    }

    #[test]
    fn test_jump_only_from_the_ground() {
        let (mut scene, mut ctx) = created_scene(1);
        let player = scene.player().unwrap();
        let jump = CursorKeys {
            up: true,
            ..Default::default()
        };

        // Spawned in mid-air: no jump
        scene.update(&mut ctx, &jump).unwrap();
        assert_ne!(ctx.world.body(player).velocity_y, -400.0);

        land_player(&scene, &mut ctx);
        scene.update(&mut ctx, &jump).unwrap();
        assert_eq!(ctx.world.body(player).velocity_y, -400.0);

        // Airborne after one step; holding jump doesn't re-apply the impulse
        ctx.world.step(DT);
        assert!(!ctx.world.body(player).touching.down);
        let rising = ctx.world.body(player).velocity_y;
        scene.update(&mut ctx, &jump).unwrap();
        assert_eq!(ctx.world.body(player).velocity_y, rising);
        assert!(rising > -400.0);
    }

    #[test]
    fn test_space_also_jumps() {
        let (mut scene, mut ctx) = created_scene(1);
        let player = scene.player().unwrap();
        land_player(&scene, &mut ctx);

        let keys = CursorKeys {
            space: true,
            ..Default::default()
        };
        scene.update(&mut ctx, &keys).unwrap();
        assert_eq!(ctx.world.body(player).velocity_y, -400.0);
    }

    #[test]
    fn test_fast_fall_only_in_the_air() {
        let (mut scene, mut ctx) = created_scene(1);
        let player = scene.player().unwrap();
        let down = CursorKeys {
            down: true,
            ..Default::default()
        };

        scene.update(&mut ctx, &down).unwrap();
        assert_eq!(ctx.world.body(player).velocity_y, 300.0);

        land_player(&scene, &mut ctx);
        let resting = ctx.world.body(player).velocity_y;
        scene.update(&mut ctx, &down).unwrap();
        assert_eq!(ctx.world.body(player).velocity_y, resting);
    }

    #[test]
    fn test_run_frame_collects_overlapping_star() {
        let (mut scene, mut ctx) = created_scene(1);
        let player = scene.player().unwrap();
        let star = star_ids(&scene, &ctx)[1];

        // Park the star on top of the player
        let (px, py) = (ctx.world.body(player).x, ctx.world.body(player).y);
        ctx.world.body_mut(star).set_position(px, py);

        run_frame(&mut scene, &mut ctx, &CursorKeys::default(), DT).unwrap();

        assert_eq!(scene.score(), 10);
        assert!(!ctx.world.body(star).enabled);
    }
}
