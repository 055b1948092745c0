// Display list: everything the renderer draws, in draw order
//
// Images and text labels live here entirely. Sprites are split: position and
// visibility come from their physics body, the rest (texture, animation,
// tint) is stored here keyed by the body's id.

use crate::animation::AnimationPlayer;
use crate::arcade::BodyId;
use sdl2::pixels::Color;
use std::collections::HashMap;

/// Handle to a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextId(usize);

/// A decorative image with no body, positioned by its center
#[derive(Debug, Clone, PartialEq)]
pub struct ImageObject {
    pub texture: String,
    pub x: f32,
    pub y: f32,
}

/// Visual half of a physics-backed sprite
#[derive(Debug, Clone)]
pub struct SpriteObject {
    pub texture: String,
    /// Color multiplied into the texture, `None` draws it untouched
    pub tint: Option<Color>,
    pub anim: AnimationPlayer,
}

impl SpriteObject {
    pub fn new(texture: &str) -> Self {
        SpriteObject {
            texture: texture.to_string(),
            tint: None,
            anim: AnimationPlayer::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub font_size: u32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEntry {
    Image(usize),
    Sprite(BodyId),
    Text(TextId),
}

#[derive(Debug, Default)]
pub struct DisplayList {
    entries: Vec<DisplayEntry>,
    images: Vec<ImageObject>,
    sprites: HashMap<BodyId, SpriteObject>,
    texts: Vec<TextLabel>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, image: ImageObject) {
        self.images.push(image);
        self.entries.push(DisplayEntry::Image(self.images.len() - 1));
    }

    pub fn add_sprite(&mut self, body: BodyId, sprite: SpriteObject) {
        self.sprites.insert(body, sprite);
        self.entries.push(DisplayEntry::Sprite(body));
    }

    pub fn add_text(&mut self, label: TextLabel) -> TextId {
        self.texts.push(label);
        let id = TextId(self.texts.len() - 1);
        self.entries.push(DisplayEntry::Text(id));
        id
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn image(&self, index: usize) -> &ImageObject {
        &self.images[index]
    }

    pub fn sprite(&self, body: BodyId) -> Option<&SpriteObject> {
        self.sprites.get(&body)
    }

    pub fn sprite_mut(&mut self, body: BodyId) -> Option<&mut SpriteObject> {
        self.sprites.get_mut(&body)
    }

    pub fn sprites_mut(&mut self) -> impl Iterator<Item = &mut SpriteObject> {
        self.sprites.values_mut()
    }

    pub fn text(&self, id: TextId) -> &TextLabel {
        &self.texts[id.0]
    }

    pub fn set_text(&mut self, id: TextId, text: String) {
        self.texts[id.0].text = text;
    }
}
