//! Planar geometry helpers for path playback.
//!
//! Paths live in the XY plane. Facing is a rotation about +Z where the
//! identity rotation looks along +Y ("up").

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

/// Axis mirroring applied to a path before it is anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub struct PathMirror {
    /// Negate X components.
    pub x: bool,
    /// Negate Y components.
    pub y: bool,
}

impl PathMirror {
    pub const NONE: Self = Self { x: false, y: false };

    pub fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }

    /// Apply the mirroring to a point. Z is never touched.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            if self.x { -point.x } else { point.x },
            if self.y { -point.y } else { point.y },
            point.z,
        )
    }
}

/// Mirror `points` and translate them so the first one lands on `anchor`.
///
/// Only X and Y are translated; each point keeps its own Z.
pub fn anchor_points(points: &[Vec3], mirror: PathMirror, anchor: Vec3) -> Vec<Vec3> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let origin = mirror.apply(first);

    points
        .iter()
        .map(|&point| {
            let local = mirror.apply(point) - origin;
            Vec3::new(anchor.x + local.x, anchor.y + local.y, point.z)
        })
        .collect()
}

/// Facing angle (radians about +Z) for travelling from `from` toward `to`.
pub fn facing_angle(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x) - FRAC_PI_2
}

/// Rotation that makes an up-facing entity look from `from` toward `to`.
pub fn facing_rotation(from: Vec3, to: Vec3) -> Quat {
    Quat::from_rotation_z(facing_angle(from, to))
}
