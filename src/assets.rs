//! Asset loading
//!
//! Loading happens in two phases. The scene's `preload` only *declares* what
//! it needs in an `AssetManifest`. The host then loads every entry through
//! SDL2_image into a `TextureStore` before the scene's `create` runs. The
//! store's `TextureCatalog` (sizes and frame layouts, no SDL2 handles) is what
//! the scene gets to see.

use crate::error::{GameError, GameResult};
use crate::sprite::SpriteSheet;
use log::info;
use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    SpriteSheet { frame_width: u32, frame_height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: String,
    pub path: String,
    pub kind: AssetKind,
}

/// Named asset requests, in declaration order
#[derive(Debug, Default)]
pub struct AssetManifest {
    requests: Vec<AssetRequest>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&mut self, key: &str, path: &str) {
        self.push(key, path, AssetKind::Image);
    }

    pub fn spritesheet(&mut self, key: &str, path: &str, frame_width: u32, frame_height: u32) {
        self.push(
            key,
            path,
            AssetKind::SpriteSheet {
                frame_width,
                frame_height,
            },
        );
    }

    fn push(&mut self, key: &str, path: &str, kind: AssetKind) {
        // Re-declaring a key replaces the old request
        self.requests.retain(|request| request.key != key);
        self.requests.push(AssetRequest {
            key: key.to_string(),
            path: path.to_string(),
            kind,
        });
    }

    pub fn requests(&self) -> &[AssetRequest] {
        &self.requests
    }

    pub fn get(&self, key: &str) -> Option<&AssetRequest> {
        self.requests.iter().find(|request| request.key == key)
    }
}

/// Size and frame layout of a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub sheet: Option<SpriteSheet>,
}

impl TextureInfo {
    pub fn image(width: u32, height: u32) -> Self {
        TextureInfo {
            width,
            height,
            sheet: None,
        }
    }

    pub fn spritesheet(width: u32, height: u32, frame_width: u32, frame_height: u32) -> Self {
        TextureInfo {
            width,
            height,
            sheet: Some(SpriteSheet::new(frame_width, frame_height, width, height)),
        }
    }

    /// Size of one drawable frame (the whole image for plain images)
    pub fn frame_size(&self) -> (u32, u32) {
        match self.sheet {
            Some(sheet) => (sheet.frame_width, sheet.frame_height),
            None => (self.width, self.height),
        }
    }
}

/// Texture metadata by key
#[derive(Debug, Clone, Default)]
pub struct TextureCatalog {
    entries: HashMap<String, TextureInfo>,
}

impl TextureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, info: TextureInfo) {
        self.entries.insert(key.to_string(), info);
    }

    pub fn get(&self, key: &str) -> GameResult<&TextureInfo> {
        self.entries
            .get(key)
            .ok_or_else(|| GameError::UnknownTexture(key.to_string()))
    }
}

/// Loaded SDL2 textures plus their catalog
pub struct TextureStore<'a> {
    textures: HashMap<String, Texture<'a>>,
    catalog: TextureCatalog,
}

impl<'a> TextureStore<'a> {
    /// Loads every request in the manifest. The first failure aborts loading.
    pub fn load(
        texture_creator: &'a TextureCreator<WindowContext>,
        manifest: &AssetManifest,
    ) -> GameResult<Self> {
        let mut textures = HashMap::new();
        let mut catalog = TextureCatalog::new();

        for request in manifest.requests() {
            let texture = texture_creator
                .load_texture(&request.path)
                .map_err(|reason| GameError::MissingAsset {
                    key: request.key.clone(),
                    path: request.path.clone(),
                    reason,
                })?;

            let query = texture.query();
            let info = match request.kind {
                AssetKind::Image => TextureInfo::image(query.width, query.height),
                AssetKind::SpriteSheet {
                    frame_width,
                    frame_height,
                } => TextureInfo::spritesheet(query.width, query.height, frame_width, frame_height),
            };

            info!(
                "Loaded '{}' from {} ({}x{})",
                request.key, request.path, query.width, query.height
            );

            catalog.insert(&request.key, info);
            textures.insert(request.key.clone(), texture);
        }

        Ok(TextureStore { textures, catalog })
    }

    pub fn catalog(&self) -> &TextureCatalog {
        &self.catalog
    }

    /// Mutable access, needed for per-draw color modulation (tints)
    pub fn texture_mut(&mut self, key: &str) -> Option<&mut Texture<'a>> {
        self.textures.get_mut(key)
    }
}
