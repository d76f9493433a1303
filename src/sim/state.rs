//! Paddle and ball state owned by the simulation

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::wrap_spin_angle;

/// Spin direction of a paddle about the table normal (+z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spin {
    /// Angle decreases over time
    Clockwise,
    /// Angle increases over time
    CounterClockwise,
}

impl Spin {
    /// -1 for clockwise, +1 for counterclockwise
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Spin::Clockwise => -1.0,
            Spin::CounterClockwise => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Spin::Clockwise => Spin::CounterClockwise,
            Spin::CounterClockwise => Spin::Clockwise,
        }
    }
}

/// Edge detector for a paddle's spin-toggle key
///
/// `Idle --down--> Pressed` fires once; holding stays in `Pressed`;
/// releasing always returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToggleState {
    #[default]
    Idle,
    Pressed,
}

impl ToggleState {
    /// Feed this frame's key state; returns true on the press transition only
    pub fn update(&mut self, held: bool) -> bool {
        match (*self, held) {
            (ToggleState::Idle, true) => {
                *self = ToggleState::Pressed;
                true
            }
            (ToggleState::Pressed, true) => false,
            (_, false) => {
                *self = ToggleState::Idle;
                false
            }
        }
    }
}

/// A player-controlled spinning paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub position: Vec3,
    /// Spin angle about +z (radians, kept within [-2π, 2π])
    pub angle: f32,
    pub spin: Spin,
    pub toggle: ToggleState,
    /// Whether the ball was touching the striking edge last frame
    pub last_hit_ball: bool,
    /// Outward direction of the striking edge, refreshed every spin update
    pub face_normal: Vec3,
}

impl Paddle {
    pub fn new(position: Vec3, angle: f32, spin: Spin) -> Self {
        let mut paddle = Self {
            position,
            angle,
            spin,
            toggle: ToggleState::Idle,
            last_hit_ball: false,
            face_normal: Vec3::ZERO,
        };
        paddle.face_normal = paddle.compute_face_normal();
        paddle
    }

    /// Orientation about the table normal
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::Z, self.angle)
    }

    /// Rotated local -x axis; the striking edge lies along its in-plane tangent
    pub fn edge_direction(&self) -> Vec3 {
        (self.rotation() * Vec3::NEG_X).normalize_or_zero()
    }

    /// Face normal flips with the spin so it always points along the edge's sweep
    pub fn compute_face_normal(&self) -> Vec3 {
        -self.spin.sign() * self.edge_direction()
    }

    /// Advance the spin by `elapsed` seconds and refresh the face normal
    pub fn spin_by(&mut self, elapsed: f32) {
        self.angle = wrap_spin_angle(self.angle + SPIN_RATE * self.spin.sign() * elapsed);
        self.face_normal = self.compute_face_normal();
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Ball {
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }

    /// Park the ball off the table with no velocity
    pub fn park(&mut self) {
        self.position = BALL_RESET;
        self.velocity = Vec3::ZERO;
    }
}

/// Which player won a round
///
/// Named from the players' point of view: the ball leaving through +x is a
/// point for the player on the right of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Things that happened during a step, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A paddle's toggle key flipped its spin
    SpinReversed { paddle: usize, spin: Spin },
    /// A paddle's striking edge made contact and pushed the ball
    BallStruck { paddle: usize, impulse: Vec3 },
    /// The ball left the table; it has been parked
    RoundWon { winner: Side },
}

/// All mutable simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub paddles: [Paddle; 2],
    pub ball: Ball,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            paddles: [
                Paddle::new(PADDLE_STARTS[0], 0.0, Spin::Clockwise),
                Paddle::new(PADDLE_STARTS[1], std::f32::consts::PI, Spin::Clockwise),
            ],
            ball: Ball::at_rest(BALL_START),
        }
    }
}
