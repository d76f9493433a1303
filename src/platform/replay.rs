//! Scripted input for headless runs
//!
//! A script is a JSON list of frames, each with its held keys and an
//! optional elapsed time; frames without one run on the wall clock.
//! `repeat` holds a frame's input for several consecutive frames.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::input::{InputSnapshot, Key, PointerMotion};

fn one() -> u32 {
    1
}

/// One scripted frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedFrame {
    /// Seconds since the previous frame (`None` = measure it)
    #[serde(default)]
    pub elapsed: Option<f32>,
    #[serde(default)]
    pub held: Vec<Key>,
    #[serde(default)]
    pub pointer: Vec<PointerMotion>,
    #[serde(default)]
    pub quit: bool,
    #[serde(default = "one")]
    pub repeat: u32,
}

impl ScriptedFrame {
    fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.iter().copied().collect(),
            pointer: self.pointer.clone(),
            quit_requested: self.quit,
        }
    }
}

/// A recorded input sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub frames: Vec<ScriptedFrame>,
}

impl InputScript {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid input script")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input script {}", path.display()))?;
        let script = Self::from_json(&json).with_context(|| format!("in {}", path.display()))?;
        log::info!(
            "Loaded input script {} ({} frames)",
            path.display(),
            script.frame_count()
        );
        Ok(script)
    }

    /// Total frames after expanding repeats
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }

    /// Expanded (input, elapsed) pairs in order
    ///
    /// Pointer motions and quit only fire on the first frame of a repeat.
    pub fn snapshots(&self) -> impl Iterator<Item = (InputSnapshot, Option<f32>)> + '_ {
        self.frames.iter().flat_map(|frame| {
            let first = frame.snapshot();
            let held = InputSnapshot {
                held: first.held.clone(),
                ..Default::default()
            };
            (0..frame.repeat).map(move |i| {
                let input = if i == 0 { first.clone() } else { held.clone() };
                (input, frame.elapsed)
            })
        })
    }
}
