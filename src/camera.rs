//! Orbit camera rig
//!
//! The eye sits on a sphere around `target`; dragging with the pointer button
//! held changes elevation and azimuth.

use glam::{Mat3, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::Transform;

/// Radians of orbit per unit of normalized pointer travel
pub const DRAG_SENSITIVITY: f32 = 2.0;

/// Orbit parameters around a target point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRig {
    pub radius: f32,
    pub elevation: f32,
    pub azimuth: f32,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            radius: 6.5,
            elevation: 0.38 * std::f32::consts::PI,
            azimuth: 0.5 * std::f32::consts::PI,
            target: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Eye position on the orbit sphere
    pub fn eye(&self) -> Vec3 {
        let (se, ce) = self.elevation.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(ce * ca, ce * sa, se)
    }

    /// Orbit by a pointer delta in normalized [-1,1] coordinates
    pub fn drag(&mut self, delta: Vec2) {
        self.elevation -= DRAG_SENSITIVITY * delta.y;
        self.azimuth -= DRAG_SENSITIVITY * delta.x;
    }

    /// Camera orientation looking at the target with +z as world up
    ///
    /// Columns are (right, up, back); the camera looks down its local -z.
    pub fn rotation(&self) -> Quat {
        let eye = self.eye();
        let forward = (self.target - eye).normalize_or_zero();
        let back = -forward;
        let up = (Vec3::Z - Vec3::Z.dot(forward) * forward).normalize_or_zero();
        let right = up.cross(back);
        Quat::from_mat3(&Mat3::from_cols(right, up, back))
    }

    /// Full camera transform (unit scale)
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.eye(),
            rotation: self.rotation(),
            scale: Vec3::ONE,
        }
    }
}

/// Tracks the pointer in normalized coordinates for drag-to-orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    viewport: Vec2,
    last: Vec2,
}

impl PointerTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Vec2::new(width.max(1) as f32, height.max(1) as f32),
            last: Vec2::ZERO,
        }
    }

    /// Map a pixel position to [-1,1] with +y up
    pub fn normalize(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x + 0.5) / self.viewport.x * 2.0 - 1.0,
            (y + 0.5) / self.viewport.y * -2.0 + 1.0,
        )
    }

    /// Record a pointer motion; returns the normalized delta
    pub fn motion(&mut self, x: f32, y: f32) -> Vec2 {
        let now = self.normalize(x, y);
        let delta = now - self.last;
        self.last = now;
        delta
    }
}
