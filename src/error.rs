//! Error types for Saberman
//!
//! Every failure the game can hit is fatal: a missing asset, a broken config
//! file, or an SDL2 call that refuses to cooperate. Errors bubble up to `main`
//! with `?` and the process exits after logging them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// SDL2 reports errors as plain strings
    #[error("SDL2 error: {0}")]
    Sdl(String),

    #[error("Failed to load asset '{key}' from {path}: {reason}")]
    MissingAsset {
        key: String,
        path: String,
        reason: String,
    },

    /// A display object or clip referenced a texture key that was never preloaded
    #[error("Unknown texture key: {0}")]
    UnknownTexture(String),

    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<String> for GameError {
    fn from(err: String) -> Self {
        GameError::Sdl(err)
    }
}

pub type GameResult<T> = Result<T, GameError>;
