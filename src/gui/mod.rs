//! Screen-Space GUI
//!
//! Overlays drawn in logical screen coordinates on top of the scene, with
//! SDL2 primitives and the bitmap font.
//!
//! # Available Components
//!
//! - [`GameOverBanner`] - Dimmed overlay with the final score

pub mod game_over;

pub use game_over::GameOverBanner;
