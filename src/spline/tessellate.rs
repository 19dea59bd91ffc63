//! Tessellation of the supported segment curves into point sequences.
//!
//! Every generator produces points for `i = 0, 1, ..` while `i < step_count`,
//! evaluated at the parameter `i / step_count`. The terminal point of the curve
//! is never emitted; [`PathData::flatten`](crate::path::PathData::flatten)
//! appends it afterwards together with the duplicate check.

use bevy::prelude::*;

/// Smallest step count a generator will use.
pub const MIN_STEP_COUNT: f32 = 1.0;

/// Largest step count a generator will use.
pub const MAX_STEP_COUNT: f32 = 4096.0;

/// Knot spans shorter than this are treated as degenerate.
const KNOT_EPSILON: f32 = 1e-6;

/// Clamp a step count to a usable loop bound in
/// `MIN_STEP_COUNT..=MAX_STEP_COUNT`. Non-finite counts map to the minimum.
pub fn clamp_step_count(step_count: f32) -> f32 {
    if !step_count.is_finite() {
        return MIN_STEP_COUNT;
    }
    step_count.clamp(MIN_STEP_COUNT, MAX_STEP_COUNT)
}

/// Iterate the normalized parameters `i / step_count` for `i < step_count`.
fn step_parameters(step_count: f32) -> impl Iterator<Item = f32> {
    let count = clamp_step_count(step_count);
    (0u32..)
        .map(|i| i as f32)
        .take_while(move |i| *i < count)
        .map(move |i| i / count)
}

/// Points along the line from `p0` toward `p1`, excluding `p1`.
pub fn straight_line(p0: Vec3, p1: Vec3, step_count: f32) -> Vec<Vec3> {
    step_parameters(step_count).map(|t| p0.lerp(p1, t)).collect()
}

/// Evaluate a cubic Bézier curve at `t`.
pub fn bezier_point(p0: Vec3, cp1: Vec3, cp2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    let tt = t * t;
    let uu = u * u;

    p0 * (uu * u) + cp1 * (3.0 * uu * t) + cp2 * (3.0 * u * tt) + p3 * (tt * t)
}

/// Points along the cubic Bézier curve from `p0` to `p3`, excluding `p3`.
pub fn bezier(p0: Vec3, cp1: Vec3, cp2: Vec3, p3: Vec3, step_count: f32) -> Vec<Vec3> {
    step_parameters(step_count)
        .map(|t| bezier_point(p0, cp1, cp2, p3, t))
        .collect()
}

/// Next knot value of a Catmull-Rom parameterization: `t + |p1 - p0|^alpha`.
pub fn catmull_rom_knot(t: f32, p0: Vec3, p1: Vec3, alpha: f32) -> f32 {
    p0.distance(p1).powf(alpha) + t
}

/// Blend `a` and `b` over the knot interval `[ta, tb]`.
///
/// A collapsed interval resolves to whichever end `t` has reached.
fn knot_lerp(a: Vec3, b: Vec3, ta: f32, tb: f32, t: f32) -> Vec3 {
    let span = tb - ta;
    if span.abs() < KNOT_EPSILON {
        return if t >= tb { b } else { a };
    }
    a * ((tb - t) / span) + b * ((t - ta) / span)
}

/// Points along the Catmull-Rom span from `p1` to `p2`, excluding `p2`.
///
/// `p0` and `p3` only shape the curve. `alpha = 0.5` yields the centripetal
/// variant, `0.0` the uniform and `1.0` the chordal one.
pub fn catmull_rom_spline(
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    step_count: f32,
    alpha: f32,
) -> Vec<Vec3> {
    let t0 = 0.0;
    let t1 = catmull_rom_knot(t0, p0, p1, alpha);
    let t2 = catmull_rom_knot(t1, p1, p2, alpha);
    let t3 = catmull_rom_knot(t2, p2, p3, alpha);

    if t2 - t1 < KNOT_EPSILON {
        return Vec::new();
    }

    step_parameters(step_count)
        .map(|s| {
            let t = t1 + (t2 - t1) * s;

            let a1 = knot_lerp(p0, p1, t0, t1, t);
            let a2 = knot_lerp(p1, p2, t1, t2, t);
            let a3 = knot_lerp(p2, p3, t2, t3, t);

            let b1 = knot_lerp(a1, a2, t0, t2, t);
            let b2 = knot_lerp(a2, a3, t1, t3, t);

            knot_lerp(b1, b2, t1, t2, t)
        })
        .collect()
}
