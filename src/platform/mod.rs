//! Platform layer
//!
//! Handles the host-facing side of the frame loop:
//! - Input snapshots and key bindings
//! - Wall-clock frame timing
//! - Scripted input for headless runs

pub mod clock;
pub mod input;
pub mod replay;

pub use clock::FrameClock;
pub use input::{InputSnapshot, Key, KeyBindings, PaddleBindings, PointerMotion};
pub use replay::{InputScript, ScriptedFrame};
