//! Game settings
//!
//! Read from `spin_settings.json` in the working directory when present.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::platform::KeyBindings;

/// What happens to the previous win banner when a new round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BannerPolicy {
    /// Every win adds a banner; nothing is ever removed
    #[default]
    Accumulate,
    /// Reuse the existing banner object for the latest winner
    ReplacePrevious,
}

impl BannerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerPolicy::Accumulate => "Accumulate",
            BannerPolicy::ReplacePrevious => "ReplacePrevious",
        }
    }
}

/// Window size and title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Spin".to_string(),
            width: 1024,
            height: 512,
        }
    }
}

impl WindowSettings {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Projection and starting orbit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fovy_degrees: f32,
    pub near: f32,
    pub orbit: CameraRig,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fovy_degrees: 40.0,
            near: 0.01,
            orbit: CameraRig::default(),
        }
    }
}

/// Asset blob locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub meshes: PathBuf,
    pub scene: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            meshes: PathBuf::from("meshes_spin.blob"),
            scene: PathBuf::from("scene_spin.blob"),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub assets: AssetPaths,
    pub bindings: KeyBindings,
    pub banner_policy: BannerPolicy,

    // === Timing ===
    /// Cap on a single frame's elapsed seconds (`None` = uncapped)
    pub max_frame_elapsed: Option<f32>,

    // === Headless ===
    /// Input script to drive the game when there is no window
    pub input_script: Option<PathBuf>,
}

impl Settings {
    /// Settings file name
    const FILE_NAME: &'static str = "spin_settings.json";

    /// Load from the working directory, falling back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            log::info!("Using default settings");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Vertical field of view in radians
    pub fn fovy(&self) -> f32 {
        self.camera.fovy_degrees.to_radians()
    }
}
