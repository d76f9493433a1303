//! Collision predicates for paddles, pillars and the ball
//!
//! All checks are stateless distance tests against fixed table geometry.
//! The paddle's striking edge is a thin quadrilateral hanging off the paddle
//! centre; the ball touches it when it sits between the two long edges.

use glam::Vec3;

use super::geometry::{Segment, plane_tangent};
use super::state::Paddle;
use crate::consts::*;

/// True if the paddle centre is inside either pillar's clearance radius
pub fn pillar_collision(paddle: &Paddle) -> bool {
    PILLAR_CENTERS
        .iter()
        .any(|c| paddle.position.distance(*c) < PADDLE_PILLAR_CLEARANCE)
}

/// True if the two paddle centres are closer than the separation distance
pub fn paddles_collide(a: &Paddle, b: &Paddle) -> bool {
    a.position.distance(b.position) < PADDLE_SEPARATION
}

/// The striking edge of a paddle as four corners
///
/// ```text
///  p1 ---------------- p2     (+n side)
///  |  pos                |
///  p4 ---------------- p3     (-n side)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikingEdge {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    pub p4: Vec3,
}

impl StrikingEdge {
    pub fn of(paddle: &Paddle) -> Self {
        let n = paddle.edge_direction();
        let v = plane_tangent(n);
        let p1 = paddle.position + EDGE_HALF_THICKNESS * n;
        let p2 = p1 + EDGE_LENGTH * v;
        let p3 = p2 - 2.0 * EDGE_HALF_THICKNESS * n;
        let p4 = paddle.position - EDGE_HALF_THICKNESS * n;
        Self { p1, p2, p3, p4 }
    }

    /// Distances from `point` to each of the four edges
    pub fn distances(&self, point: Vec3) -> EdgeDistances {
        EdgeDistances {
            d12: Segment::new(self.p1, self.p2).distance_to(point),
            d34: Segment::new(self.p3, self.p4).distance_to(point),
            d14: Segment::new(self.p1, self.p4).distance_to(point),
            d23: Segment::new(self.p2, self.p3).distance_to(point),
        }
    }
}

/// Point-to-edge distances for a striking edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistances {
    pub d12: f32,
    pub d34: f32,
    pub d14: f32,
    pub d23: f32,
}

impl EdgeDistances {
    /// Contact test; the short-edge bound is kept even though it rarely binds
    #[inline]
    pub fn in_contact(&self) -> bool {
        self.d12 + self.d34 <= EDGE_LONG_SUM && self.d14 + self.d23 <= EDGE_SHORT_SUM
    }
}

/// True if the ball centre touches the paddle's striking edge
pub fn paddle_ball_collision(paddle: &Paddle, ball_position: Vec3) -> bool {
    StrikingEdge::of(paddle).distances(ball_position).in_contact()
}

/// Centre of the pillar the ball is bouncing off, if any
///
/// The +x pillar is checked first.
pub fn ball_pillar_contact(ball_position: Vec3) -> Option<Vec3> {
    PILLAR_BALL_CENTERS
        .iter()
        .copied()
        .find(|c| ball_position.distance(*c) < BALL_PILLAR_RADIUS)
}
