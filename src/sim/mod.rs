//! Table simulation
//!
//! All gameplay rules live here. This module has no rendering or platform
//! dependencies:
//! - Variable timestep (wall-clock elapsed, forward Euler)
//! - Fixed update order: paddles, spin, strikes, friction, bounces, goals
//! - Total over its inputs; degenerate geometry is skipped, never NaN

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{
    EdgeDistances, StrikingEdge, ball_pillar_contact, paddle_ball_collision, paddles_collide,
    pillar_collision,
};
pub use geometry::{Segment, closest_point_on_segment, point_segment_distance};
pub use state::{Ball, GameEvent, Paddle, Side, SimulationState, Spin, ToggleState};
pub use tick::{FrameInput, PaddleControls, Simulation};
