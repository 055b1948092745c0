use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use sdl2::EventPump;

/// Pressed state of the five keys the scene reads, sampled once per frame.
///
/// The scene never sees SDL2 types; it only gets this snapshot. Tests build
/// one by hand to drive `update()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub space: bool,
}

impl CursorKeys {
    /// Samples the arrow keys and space bar
    pub fn from_keyboard(keyboard_state: &KeyboardState) -> Self {
        CursorKeys {
            left: keyboard_state.is_scancode_pressed(Scancode::Left),
            right: keyboard_state.is_scancode_pressed(Scancode::Right),
            up: keyboard_state.is_scancode_pressed(Scancode::Up),
            down: keyboard_state.is_scancode_pressed(Scancode::Down),
            space: keyboard_state.is_scancode_pressed(Scancode::Space),
        }
    }

    /// Up arrow or space bar
    pub fn jump(&self) -> bool {
        self.up || self.space
    }
}

/// Window-level actions, separate from in-game movement
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Quit,
    ToggleDebugDraw,
}

/// InputSystem turns SDL2 window events into `HostAction`s.
///
/// Movement keys are not events here: the scene reads them as held state via
/// `CursorKeys`, so a key held across frames keeps acting every frame.
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }

    /// Drains pending SDL2 events and returns the actions they map to
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<HostAction> {
        event_pump
            .poll_iter()
            .filter_map(|event| self.translate(&event))
            .collect()
    }

    fn translate(&self, event: &Event) -> Option<HostAction> {
        match event {
            Event::Quit { .. } => Some(HostAction::Quit),
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => self.handle_keydown(*key),
            _ => None,
        }
    }

    fn handle_keydown(&self, key: Keycode) -> Option<HostAction> {
        match key {
            Keycode::Escape => Some(HostAction::Quit),
            Keycode::F3 => Some(HostAction::ToggleDebugDraw),
            _ => None,
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
