//! Keyboard/pointer snapshots and key bindings

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{FrameInput, PaddleControls};

/// Keys the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Slash,
    Period,
    Space,
    Escape,
    W,
    A,
    S,
    D,
    Q,
    E,
    I,
    J,
    K,
    L,
}

/// One pointer motion event in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerMotion {
    pub x: f32,
    pub y: f32,
    /// Whether the orbit button was held during the motion
    #[serde(default)]
    pub button_held: bool,
}

/// Input state sampled once at the start of a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: HashSet<Key>,
    /// Pointer motions since the previous frame, oldest first
    pub pointer: Vec<PointerMotion>,
    /// Window close request
    pub quit_requested: bool,
}

impl InputSnapshot {
    pub fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Keys for one paddle, named by screen direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleBindings {
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    pub toggle_spin: Key,
}

impl PaddleBindings {
    fn sample(&self, input: &InputSnapshot) -> PaddleControls {
        PaddleControls {
            left: input.is_held(self.left),
            right: input.is_held(self.right),
            up: input.is_held(self.up),
            down: input.is_held(self.down),
            toggle_spin: input.is_held(self.toggle_spin),
        }
    }
}

/// Full key map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Paddle 0 plays from the right of the screen, paddle 1 from the left
    pub paddles: [PaddleBindings; 2],
    pub quit: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            paddles: [
                PaddleBindings {
                    left: Key::Left,
                    right: Key::Right,
                    up: Key::Up,
                    down: Key::Down,
                    toggle_spin: Key::Slash,
                },
                PaddleBindings {
                    left: Key::A,
                    right: Key::D,
                    up: Key::W,
                    down: Key::S,
                    toggle_spin: Key::Q,
                },
            ],
            quit: Key::Escape,
        }
    }
}

impl KeyBindings {
    /// Translate held keys into simulation input
    pub fn sample(&self, input: &InputSnapshot) -> FrameInput {
        FrameInput {
            paddles: [
                self.paddles[0].sample(input),
                self.paddles[1].sample(input),
            ],
        }
    }

    pub fn wants_quit(&self, input: &InputSnapshot) -> bool {
        input.quit_requested || input.is_held(self.quit)
    }
}
