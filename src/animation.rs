use crate::error::{GameError, GameResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Repeat count meaning "loop forever"
pub const REPEAT_FOREVER: i32 = -1;

/// A named run of spritesheet frames.
///
/// `repeat` follows the usual arcade convention: `-1` loops forever, `0`
/// plays once, `n` plays `n + 1` times in total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub key: String,
    /// Spritesheet texture key the frame indices refer to
    pub texture: String,
    pub frames: Vec<u32>,
    pub frame_rate: f32,
    #[serde(default)]
    pub repeat: i32,
}

impl AnimationClip {
    pub fn frame_duration_ms(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1000.0 / self.frame_rate
        } else {
            f32::INFINITY
        }
    }

    pub fn loops(&self) -> bool {
        self.repeat < 0
    }
}

/// Frame indices `start..=end` of a spritesheet
pub fn generate_frame_numbers(start: u32, end: u32) -> Vec<u32> {
    (start..=end).collect()
}

/// Global clip table, keyed by clip name
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a clip. The first clip registered under a key wins.
    pub fn create(&mut self, clip: AnimationClip) -> bool {
        if self.clips.contains_key(&clip.key) {
            warn!("Animation '{}' already exists, keeping the first one", clip.key);
            return false;
        }
        self.clips.insert(clip.key.clone(), clip);
        true
    }

    pub fn get(&self, key: &str) -> Option<&AnimationClip> {
        self.clips.get(key)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }
}

/// Per-sprite playback state.
///
/// Game Dev Pattern: the player only stores *which* clip is running and how far
/// along it is; clip data stays in the shared registry.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    current: Option<String>,
    frame_index: usize,
    elapsed_ms: f32,
    plays_done: u32,
    is_playing: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `key` from its first frame.
    ///
    /// With `ignore_if_playing`, asking for the clip that's already running
    /// does nothing, so held input doesn't keep restarting a walk cycle.
    pub fn play(
        &mut self,
        registry: &AnimationRegistry,
        key: &str,
        ignore_if_playing: bool,
    ) -> GameResult<()> {
        if registry.get(key).is_none() {
            return Err(GameError::UnknownAnimation(key.to_string()));
        }

        if ignore_if_playing && self.is_playing && self.current.as_deref() == Some(key) {
            return Ok(());
        }

        self.current = Some(key.to_string());
        self.frame_index = 0;
        self.elapsed_ms = 0.0;
        self.plays_done = 0;
        self.is_playing = true;
        Ok(())
    }

    pub fn update(&mut self, registry: &AnimationRegistry, delta_ms: f32) {
        if !self.is_playing {
            return;
        }
        let Some(clip) = self.current.as_deref().and_then(|key| registry.get(key)) else {
            return;
        };
        if clip.frames.is_empty() {
            self.is_playing = false;
            return;
        }

        let frame_duration = clip.frame_duration_ms();
        self.elapsed_ms += delta_ms;

        while self.is_playing && self.elapsed_ms >= frame_duration {
            self.elapsed_ms -= frame_duration;
            self.advance_frame(clip);
        }
    }

    fn advance_frame(&mut self, clip: &AnimationClip) {
        if self.frame_index + 1 < clip.frames.len() {
            self.frame_index += 1;
            return;
        }

        // End of a pass through the clip
        self.plays_done += 1;
        if clip.loops() || (self.plays_done as i64) <= clip.repeat as i64 {
            self.frame_index = 0;
        } else {
            // Hold the last frame
            self.is_playing = false;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Spritesheet frame index to draw right now
    pub fn current_frame(&self, registry: &AnimationRegistry) -> Option<u32> {
        let clip = registry.get(self.current.as_deref()?)?;
        clip.frames.get(self.frame_index).copied()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}
