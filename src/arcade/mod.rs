//! Arcade physics for the Saberman scene
//!
//! Just enough simulation for a platformer: gravity, velocity integration,
//! bounce, world-edge clamping, and box-vs-box contacts.
//!
//! # Available Types
//!
//! - [`Body`] - an axis-aligned box with velocity and contact flags
//! - [`ArcadeWorld`] - owns all bodies, groups, and contact pairs
//! - [`ContactEvent`] - reported by `ArcadeWorld::step` for notifying pairs

pub mod body;
pub mod world;

pub use body::{Body, BodyId, BodyKind, GroupId};
pub use world::{ArcadeWorld, ContactEvent, PairId};
