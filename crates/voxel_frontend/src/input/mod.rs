//! Input state consumed by the GUI and the HUD
//!
//! The windowing layer owns the devices; it feeds events into an
//! [`InputState`] and calls [`InputState::end_frame`] once the frame has been
//! processed. Everything in the frontend reads input through this snapshot.

pub mod collision;

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;

use crate::foundation::math::Vec2;

/// Binding that toggles the player inventory
pub const BIND_HUD_INVENTORY: &str = "hud.inventory";

/// Keys the frontend reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape
    Escape,
    /// Enter / return
    Enter,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Left control
    LeftControl,
    /// Left alt
    LeftAlt,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Top-row digit 0-9
    Num(u8),
    /// Letter key, stored uppercase
    Char(char),
}

impl KeyCode {
    /// Digit key for `n` (0-9)
    pub fn digit(n: u8) -> Self {
        KeyCode::Num(n % 10)
    }
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags! {
    /// Modifier keys held during an event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 0b0001;
        /// Control key
        const CONTROL = 0b0010;
        /// Alt key
        const ALT = 0b0100;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BindingState {
    active: bool,
    just_activated: bool,
}

/// Per-frame input snapshot
#[derive(Debug, Clone)]
pub struct InputState {
    held_keys: HashSet<KeyCode>,
    pressed_keys: Vec<KeyCode>,
    held_buttons: HashSet<MouseButton>,
    pressed_buttons: HashSet<MouseButton>,
    released_buttons: HashSet<MouseButton>,
    bindings: HashMap<String, BindingState>,
    typed: Vec<char>,
    /// Wheel delta accumulated this frame (positive = away from the user)
    pub scroll: i32,
    /// Cursor position in window pixels (top-left origin)
    pub cursor: Vec2,
    /// Cursor movement since the previous frame
    pub cursor_delta: Vec2,
    /// Window size in pixels
    pub window_size: Vec2,
    cursor_locked: bool,
}

impl InputState {
    /// Create an empty snapshot for a window of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            held_keys: HashSet::new(),
            pressed_keys: Vec::new(),
            held_buttons: HashSet::new(),
            pressed_buttons: HashSet::new(),
            released_buttons: HashSet::new(),
            bindings: HashMap::new(),
            typed: Vec::new(),
            scroll: 0,
            cursor: Vec2::zeros(),
            cursor_delta: Vec2::zeros(),
            window_size: Vec2::new(width, height),
            cursor_locked: false,
        }
    }

    /// Record a key state change
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            if self.held_keys.insert(key) {
                self.pressed_keys.push(key);
            }
        } else {
            self.held_keys.remove(&key);
        }
    }

    /// Record a mouse button state change
    pub fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        if down {
            if self.held_buttons.insert(button) {
                self.pressed_buttons.insert(button);
            }
        } else if self.held_buttons.remove(&button) {
            self.released_buttons.insert(button);
        }
    }

    /// Record a new cursor position
    pub fn move_cursor(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        self.cursor_delta += position - self.cursor;
        self.cursor = position;
    }

    /// Record a text input character
    pub fn type_char(&mut self, c: char) {
        self.typed.push(c);
    }

    /// Record wheel movement
    pub fn add_scroll(&mut self, delta: i32) {
        self.scroll += delta;
    }

    /// Record a window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window_size = Vec2::new(width, height);
    }

    /// Set the state of a named binding
    pub fn set_binding(&mut self, name: &str, active: bool) {
        let state = self.bindings.entry(name.to_string()).or_default();
        state.just_activated |= active && !state.active;
        state.active = active;
    }

    /// Key went down this frame
    pub fn jpressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Key is held
    pub fn pressed(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Mouse button went down this frame
    pub fn jclicked(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Mouse button is held
    pub fn clicked(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// Mouse button went up this frame
    pub fn jreleased(&self, button: MouseButton) -> bool {
        self.released_buttons.contains(&button)
    }

    /// Binding became active this frame
    pub fn jactive(&self, name: &str) -> bool {
        self.bindings.get(name).is_some_and(|state| state.just_activated)
    }

    /// Binding is active
    pub fn active(&self, name: &str) -> bool {
        self.bindings.get(name).is_some_and(|state| state.active)
    }

    /// Characters typed this frame
    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    /// Keys that went down this frame, in the order they were pressed
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.pressed_keys.iter().copied()
    }

    /// Modifier keys currently held
    pub fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        if self.pressed(KeyCode::LeftShift) || self.pressed(KeyCode::RightShift) {
            modifiers |= Modifiers::SHIFT;
        }
        if self.pressed(KeyCode::LeftControl) {
            modifiers |= Modifiers::CONTROL;
        }
        if self.pressed(KeyCode::LeftAlt) {
            modifiers |= Modifiers::ALT;
        }
        modifiers
    }

    /// Whether the cursor is captured by the game camera
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Flip cursor capture
    pub fn toggle_cursor(&mut self) {
        self.cursor_locked = !self.cursor_locked;
        log::debug!("Cursor {}", if self.cursor_locked { "locked" } else { "released" });
    }

    /// Clear per-frame data (call after the frame was processed)
    pub fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.pressed_buttons.clear();
        self.released_buttons.clear();
        self.typed.clear();
        self.scroll = 0;
        self.cursor_delta = Vec2::zeros();
        for state in self.bindings.values_mut() {
            state.just_activated = false;
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
