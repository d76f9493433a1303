//! Point/segment helpers used by the collision predicates

use glam::Vec3;

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec3,
    pub b: Vec3,
}

impl Segment {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    /// Closest point on the segment to `p`
    ///
    /// A degenerate (zero-length) segment collapses to its start point.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        closest_point_on_segment(p, self.a, self.b)
    }

    /// Distance from `p` to the segment
    #[inline]
    pub fn distance_to(&self, p: Vec3) -> f32 {
        p.distance(self.closest_point(p))
    }
}

/// Closest point on segment `a..b` to `p`
pub fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq < 1e-12 {
        return a;
    }
    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Distance from `p` to segment `a..b`
#[inline]
pub fn point_segment_distance(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Unit vector in the direction of `v`, or `None` for a zero/non-finite vector
///
/// Callers skip their update on `None` instead of letting NaN leak into state.
#[inline]
pub fn direction(v: Vec3) -> Option<Vec3> {
    v.try_normalize()
}

/// In-plane tangent of a table-plane normal: `(-n.y, n.x, 0)`
#[inline]
pub fn plane_tangent(n: Vec3) -> Vec3 {
    Vec3::new(-n.y, n.x, 0.0)
}
