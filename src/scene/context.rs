// SceneContext: the services a scene works against
//
// Bundles the arcade world, the animation registry, the display list, and
// the texture catalog. The host owns one and lends it to the scene for every
// callback; tests build one directly with a hand-made catalog, no window needed.

use super::display::{DisplayList, ImageObject, SpriteObject, TextId, TextLabel};
use crate::animation::{AnimationClip, AnimationRegistry};
use crate::arcade::{ArcadeWorld, Body, BodyId, GroupId};
use crate::assets::TextureCatalog;
use crate::error::{GameError, GameResult};
use sdl2::pixels::Color;

pub struct SceneContext {
    pub world: ArcadeWorld,
    pub anims: AnimationRegistry,
    pub display: DisplayList,
    textures: TextureCatalog,
}

impl SceneContext {
    pub fn new(width: f32, height: f32, gravity_y: f32, textures: TextureCatalog) -> Self {
        SceneContext {
            world: ArcadeWorld::new(width, height, gravity_y),
            anims: AnimationRegistry::new(),
            display: DisplayList::new(),
            textures,
        }
    }

    /// Adds a decorative image centered on `(x, y)`
    pub fn add_image(&mut self, texture: &str, x: f32, y: f32) -> GameResult<()> {
        self.textures.get(texture)?;
        self.display.add_image(ImageObject {
            texture: texture.to_string(),
            x,
            y,
        });
        Ok(())
    }

    /// Adds an immovable sprite sized to its texture times `scale`
    pub fn add_static_sprite(
        &mut self,
        group: Option<GroupId>,
        texture: &str,
        x: f32,
        y: f32,
        scale: f32,
    ) -> GameResult<BodyId> {
        let (width, height) = self.textures.get(texture)?.frame_size();
        let body = Body::fixed(x, y, width as f32 * scale, height as f32 * scale);
        let id = self.world.add(body, group);
        self.display.add_sprite(id, SpriteObject::new(texture));
        Ok(id)
    }

    /// Adds a dynamic sprite whose body matches one texture frame
    pub fn add_sprite(
        &mut self,
        group: Option<GroupId>,
        texture: &str,
        x: f32,
        y: f32,
    ) -> GameResult<BodyId> {
        self.add_sprite_with(group, texture, x, y, |body| body)
    }

    /// Like `add_sprite`, with a chance to tweak the body before it's added
    ///
    /// ```ignore
    /// ctx.add_sprite_with(Some(bombs), "bomb", x, 16.0, |body| {
    ///     body.with_bounce(1.0, 1.0).with_world_bounds()
    /// })?;
    /// ```
    pub fn add_sprite_with(
        &mut self,
        group: Option<GroupId>,
        texture: &str,
        x: f32,
        y: f32,
        configure: impl FnOnce(Body) -> Body,
    ) -> GameResult<BodyId> {
        let (width, height) = self.textures.get(texture)?.frame_size();
        let body = configure(Body::dynamic(x, y, width as f32, height as f32));
        let id = self.world.add(body, group);
        self.display.add_sprite(id, SpriteObject::new(texture));
        Ok(id)
    }

    pub fn add_text(&mut self, x: i32, y: i32, text: &str, font_size: u32, color: Color) -> TextId {
        self.display.add_text(TextLabel {
            x,
            y,
            text: text.to_string(),
            font_size,
            color,
        })
    }

    /// Registers a clip after checking its spritesheet was preloaded
    pub fn create_animation(&mut self, clip: AnimationClip) -> GameResult<()> {
        let info = self.textures.get(&clip.texture)?;
        if info.sheet.is_none() {
            return Err(GameError::UnknownTexture(format!(
                "{} is not a spritesheet",
                clip.texture
            )));
        }
        self.anims.create(clip);
        Ok(())
    }

    pub fn play(&mut self, body: BodyId, key: &str, ignore_if_playing: bool) -> GameResult<()> {
        let sprite = sprite_mut(&mut self.display, body)?;
        sprite.anim.play(&self.anims, key, ignore_if_playing)
    }

    pub fn set_tint(&mut self, body: BodyId, tint: Color) -> GameResult<()> {
        sprite_mut(&mut self.display, body)?.tint = Some(tint);
        Ok(())
    }

    /// Name of the clip a sprite is playing, if any
    pub fn current_animation(&self, body: BodyId) -> Option<&str> {
        self.display.sprite(body)?.anim.current_key()
    }

    /// Advances every sprite's animation by `delta_ms`
    pub fn update_animations(&mut self, delta_ms: f32) {
        let anims = &self.anims;
        for sprite in self.display.sprites_mut() {
            sprite.anim.update(anims, delta_ms);
        }
    }

    pub fn textures(&self) -> &TextureCatalog {
        &self.textures
    }
}

fn sprite_mut(display: &mut DisplayList, body: BodyId) -> GameResult<&mut SpriteObject> {
    display
        .sprite_mut(body)
        .ok_or_else(|| GameError::UnknownTexture(format!("no sprite for {:?}", body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::generate_frame_numbers;
    use crate::assets::TextureInfo;

    fn context() -> SceneContext {
        let mut catalog = TextureCatalog::new();
        catalog.insert("ground", TextureInfo::image(400, 32));
        catalog.insert("saberman", TextureInfo::spritesheet(288, 48, 32, 48));
        SceneContext::new(800.0, 600.0, 300.0, catalog)
    }

    #[test]
    fn test_static_sprite_scales_body() {
        let mut ctx = context();
        let ground = ctx.add_static_sprite(None, "ground", 400.0, 568.0, 2.0).unwrap();

        let body = ctx.world.body(ground);
        assert!(body.is_static());
        assert_eq!((body.width, body.height), (800.0, 64.0));
    }

    #[test]
    fn test_sprite_body_uses_frame_size() {
        let mut ctx = context();
        let player = ctx.add_sprite(None, "saberman", 100.0, 450.0).unwrap();

        let body = ctx.world.body(player);
        assert_eq!((body.width, body.height), (32.0, 48.0));
    }

    #[test]
    fn test_configured_sprite() {
        let mut ctx = context();
        let player = ctx
            .add_sprite_with(None, "saberman", 100.0, 450.0, |body| {
                body.with_bounce(0.2, 0.2).with_world_bounds()
            })
            .unwrap();

        let body = ctx.world.body(player);
        assert_eq!((body.bounce_x, body.bounce_y), (0.2, 0.2));
        assert!(body.collide_world_bounds);
        assert!(!body.is_static());
    }

    #[test]
    fn test_unknown_texture_fails() {
        let mut ctx = context();
        assert!(matches!(
            ctx.add_image("sky", 400.0, 300.0),
            Err(GameError::UnknownTexture(_))
        ));
    }

    #[test]
    fn test_animation_needs_a_spritesheet() {
        let mut ctx = context();
        let clip = AnimationClip {
            key: "left".to_string(),
            texture: "ground".to_string(),
            frames: generate_frame_numbers(0, 3),
            frame_rate: 10.0,
            repeat: -1,
        };
        assert!(ctx.create_animation(clip).is_err());
        assert!(ctx.anims.get("left").is_none());
    }

    #[test]
    fn test_play_and_tint() {
        let mut ctx = context();
        let player = ctx.add_sprite(None, "saberman", 100.0, 450.0).unwrap();
        ctx.create_animation(AnimationClip {
            key: "turn".to_string(),
            texture: "saberman".to_string(),
            frames: vec![4],
            frame_rate: 20.0,
            repeat: 0,
        })
        .unwrap();

        ctx.play(player, "turn", false).unwrap();
        ctx.set_tint(player, Color::RGB(255, 0, 0)).unwrap();

        assert_eq!(ctx.current_animation(player), Some("turn"));
        assert_eq!(
            ctx.display.sprite(player).unwrap().tint,
            Some(Color::RGB(255, 0, 0))
        );
    }
}
