//! Spin Table - two spinning paddles knock a ball between two pillars
//!
//! Core modules:
//! - `sim`: Per-frame simulation (paddle motion, spin, collisions, friction, win check)
//! - `camera`: Orbit camera rig driven by pointer drags
//! - `scene`: Presentation contract (objects, camera, asset blobs)
//! - `renderer`: Render submission and vertex layout
//! - `platform`: Input snapshots, frame clock, scripted input
//! - `game`: Wires the simulation to scene objects once per frame

pub mod camera;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::{FrameOutcome, Game};
pub use settings::{BannerPolicy, Settings};

/// Table geometry and hand-tuned gameplay constants
///
/// Tuned against variable-timestep forward Euler integration; changing the
/// integration scheme means re-deriving these.
pub mod consts {
    use glam::Vec3;

    /// Paddle travel speed (units/s)
    pub const PADDLE_SPEED: f32 = 1.2;
    /// Paddle spin rate (radians/s)
    pub const SPIN_RATE: f32 = 5.0;
    /// Movement is only attempted while the paddle is inside these limits
    pub const PADDLE_X_LIMIT: f32 = 2.95;
    pub const PADDLE_Y_LIMIT: f32 = 1.4;

    /// Pillar centres at paddle height
    pub const PILLAR_CENTERS: [Vec3; 2] = [Vec3::new(2.0, 0.0, 0.16), Vec3::new(-2.0, 0.0, 0.16)];
    /// Pillar centres at ball height (bounce checks)
    pub const PILLAR_BALL_CENTERS: [Vec3; 2] = [Vec3::new(2.0, 0.0, 0.2), Vec3::new(-2.0, 0.0, 0.2)];
    /// Paddle centre must stay at least this far from a pillar centre
    pub const PADDLE_PILLAR_CLEARANCE: f32 = 0.38;
    /// Minimum distance between the two paddle centres
    pub const PADDLE_SEPARATION: f32 = 0.55;
    /// Ball bounces off a pillar inside this radius
    pub const BALL_PILLAR_RADIUS: f32 = 0.2;
    /// Energy kept by the ball on a pillar bounce
    pub const PILLAR_RESTITUTION: f32 = 0.8;

    /// Striking edge quadrilateral: half thickness and length
    pub const EDGE_HALF_THICKNESS: f32 = 0.005;
    pub const EDGE_LENGTH: f32 = 0.32;
    /// Contact holds while summed distances to the long edges stay within this
    pub const EDGE_LONG_SUM: f32 = 0.2;
    /// Bound on summed distances to the short edges (non-binding at table scale)
    pub const EDGE_SHORT_SUM: f32 = 3.0;
    /// Velocity change applied on contact entry
    pub const IMPULSE: f32 = 2.6;

    /// Radius of the slow-friction centre region
    pub const CENTER_REGION_RADIUS: f32 = 1.0;
    /// Per-frame speed decrement and stop threshold inside the centre region
    pub const CENTER_FRICTION: f32 = 0.003;
    pub const CENTER_STOP: f32 = 0.001;
    /// Per-frame speed decrement and stop threshold elsewhere
    pub const OUTER_FRICTION: f32 = 0.02;
    pub const OUTER_STOP: f32 = 0.01;

    /// Side walls
    pub const WALL_Y: f32 = 1.52;
    /// Ball past this |x| ends the round
    pub const GOAL_X: f32 = 3.1;
    /// Where the ball is parked after a round ends
    pub const BALL_RESET: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    /// Starting transforms
    pub const PADDLE_STARTS: [Vec3; 2] = [Vec3::new(-1.2, 0.0, 0.16), Vec3::new(1.2, 0.0, 0.16)];
    pub const BALL_START: Vec3 = Vec3::new(0.0, 0.0, 0.2);
    pub const PADDLE_SCALE: f32 = 0.05;
    pub const BALL_SCALE: f32 = 0.08;
}

/// Wrap a spin angle into (-2π, 2π]
///
/// A long frame can add several turns at once. Non-finite input resets to 0.
#[inline]
pub fn wrap_spin_angle(mut angle: f32) -> f32 {
    use std::f32::consts::TAU;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle > TAU {
        angle -= TAU;
    }
    while angle <= -TAU {
        angle += TAU;
    }
    angle
}
