//! Input adapter
//!
//! Pointer and keyboard events land here between frames. The frame driver
//! reads a `TickInput` snapshot once per tick, so an event never takes
//! effect mid-tick.

use crate::sim::TickInput;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// Paddle control state shared between event handlers and the frame loop
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last pointer x relative to the surface; cleared when a key takes over
    pointer_x: Option<f32>,
    left: bool,
    right: bool,
    autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved; `client_x` and `surface_left` are page coordinates
    pub fn pointer_moved(&mut self, client_x: f32, surface_left: f32) {
        self.pointer_x = Some(client_x - surface_left);
    }

    /// Returns true if the key is one the game handles
    pub fn key_down(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(Key::Left) => {
                self.left = true;
                self.pointer_x = None;
            }
            Some(Key::Right) => {
                self.right = true;
                self.pointer_x = None;
            }
            Some(Key::Autopilot) => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            None => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(Key::Left) => self.left = false,
            Some(Key::Right) => self.right = false,
            Some(Key::Autopilot) => {}
            None => return false,
        }
        true
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Immutable view for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            pointer_x: self.pointer_x,
            left: self.left,
            right: self.right,
            autopilot: self.autopilot,
        }
    }
}
