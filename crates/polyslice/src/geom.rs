//! Small 2D helpers on top of `nalgebra::Vector2<f64>`.
//!
//! Purpose
//! - Collect the handful of planar primitives the mesh and slicer need:
//!   2D cross product, interpolation, line-crossing parameter,
//!   shoelace area and area centroid.
//! - Everything is plain IEEE-754 `f64`; no tolerances are applied here.

use nalgebra::Vector2;

/// 2D point/vector used throughout the crate.
pub type Vec2 = Vector2<f64>;

/// Signed area of the parallelogram spanned by `a` and `b` (2D determinant).
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Linear interpolation `a + (b - a) t`.
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

/// Parameter `t` along `p0→p1` at which the infinite line through `p2, p3` is crossed:
/// `t = cross(p2 − p0, p3 − p2) / cross(p1 − p0, p3 − p2)`.
///
/// Returns `None` for parallel lines (zero or non-finite denominator).
#[inline]
pub fn line_cross_param(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<f64> {
    let d = p3 - p2;
    let t = cross(p2 - p0, d) / cross(p1 - p0, d);
    t.is_finite().then_some(t)
}

/// Shoelace signed area; positive for counterclockwise loops.
pub fn signed_area(pts: &[Vec2]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..n {
        a += cross(pts[i], pts[(i + 1) % n]);
    }
    0.5 * a
}

/// Area centroid of a simple polygon. `None` for degenerate (near-zero area) loops.
pub fn area_centroid(pts: &[Vec2]) -> Option<Vec2> {
    if pts.len() < 3 {
        return None;
    }
    let mut a: f64 = 0.0;
    let mut cx: f64 = 0.0;
    let mut cy: f64 = 0.0;
    for i in 0..pts.len() {
        let p = pts[i];
        let q = pts[(i + 1) % pts.len()];
        let c = p.x * q.y - q.x * p.y;
        a += c;
        cx += (p.x + q.x) * c;
        cy += (p.y + q.y) * c;
    }
    a *= 0.5;
    if a.abs() < 1e-18 {
        return None;
    }
    Some(Vec2::new(cx / (6.0 * a), cy / (6.0 * a)))
}
