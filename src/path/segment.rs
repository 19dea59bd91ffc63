use bevy::prelude::*;

use crate::spline::{bezier, catmull_rom_spline, straight_line};

/// Default Catmull-Rom shape parameter (centripetal).
pub const DEFAULT_ALPHA: f32 = 0.5;

/// Default tessellation density for new segments.
pub const DEFAULT_STEP_COUNT: f32 = 10.0;

/// Offset along X applied to the endpoints when control points are reset.
const CONTROL_POINT_OFFSET: f32 = 1.0;

/// How the points between a segment's endpoints are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum SegmentKind {
    /// Literal point list supplied by the author.
    Fixed,
    /// Straight line between the endpoints.
    #[default]
    Straight,
    /// Cubic Bézier curve; the control points are the two handles.
    BezierCurve,
    /// Catmull-Rom span between the endpoints; the control points are the
    /// exterior points that shape it.
    CatmullRomSpline,
}

impl SegmentKind {
    /// Whether segments of this kind use their control points.
    pub fn is_curve(self) -> bool {
        matches!(self, Self::BezierCurve | Self::CatmullRomSpline)
    }
}

/// Identifies one of the two control points of a curve segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPoint {
    First,
    Second,
}

/// One directional edge of a path.
///
/// Control points are only read for curve kinds. They are kept (possibly stale)
/// for the other kinds so that switching kinds back and forth is lossless.
#[derive(Debug, Clone, PartialEq, Reflect)]
#[reflect(Default)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub start: Vec3,
    pub end: Vec3,
    pub control_point_1: Vec3,
    pub control_point_2: Vec3,
    /// Tessellation density. Real valued; used as a loop bound.
    pub step_count: f32,
    /// Catmull-Rom shape parameter in `0..=1`.
    pub alpha: f32,
    /// Explicit points, only meaningful for [`SegmentKind::Fixed`].
    pub fixed_points: Vec<Vec3>,
}

impl Default for PathSegment {
    fn default() -> Self {
        Self {
            kind: SegmentKind::Straight,
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            control_point_1: Vec3::ZERO,
            control_point_2: Vec3::ZERO,
            step_count: DEFAULT_STEP_COUNT,
            alpha: DEFAULT_ALPHA,
            fixed_points: Vec::new(),
        }
    }
}

impl PathSegment {
    /// Create a segment from a literal point list.
    pub fn fixed(points: Vec<Vec3>) -> Self {
        let mut segment = Self::default();
        segment.set_as_fixed(points);
        segment
    }

    /// Create a straight segment.
    pub fn straight(start: Vec3, end: Vec3, step_count: f32) -> Self {
        let mut segment = Self::default();
        segment.set_as_straight(start, end, step_count);
        segment
    }

    /// Create a cubic Bézier segment.
    pub fn bezier(start: Vec3, cp1: Vec3, cp2: Vec3, end: Vec3, step_count: f32) -> Self {
        let mut segment = Self::default();
        segment.set_as_bezier(start, cp1, cp2, end, step_count);
        segment
    }

    /// Create a Catmull-Rom segment. Arguments follow curve order:
    /// `cp1` precedes `start`, `cp2` follows `end`.
    pub fn catmull_rom(
        cp1: Vec3,
        start: Vec3,
        end: Vec3,
        cp2: Vec3,
        step_count: f32,
        alpha: f32,
    ) -> Self {
        let mut segment = Self::default();
        segment.set_as_catmull_rom(cp1, start, end, cp2, step_count, alpha);
        segment
    }

    /// Turn this segment into a literal point list.
    ///
    /// The endpoints follow the first and last literal point.
    pub fn set_as_fixed(&mut self, points: Vec<Vec3>) {
        self.kind = SegmentKind::Fixed;
        self.start = points.first().copied().unwrap_or(Vec3::ZERO);
        self.end = points.last().copied().unwrap_or(Vec3::ZERO);
        self.fixed_points = points;
    }

    pub fn set_as_straight(&mut self, start: Vec3, end: Vec3, step_count: f32) {
        self.kind = SegmentKind::Straight;
        self.step_count = step_count;
        self.start = start;
        self.end = end;
    }

    pub fn set_as_bezier(&mut self, start: Vec3, cp1: Vec3, cp2: Vec3, end: Vec3, step_count: f32) {
        self.kind = SegmentKind::BezierCurve;
        self.step_count = step_count;
        self.start = start;
        self.end = end;
        self.control_point_1 = cp1;
        self.control_point_2 = cp2;
    }

    pub fn set_as_catmull_rom(
        &mut self,
        cp1: Vec3,
        start: Vec3,
        end: Vec3,
        cp2: Vec3,
        step_count: f32,
        alpha: f32,
    ) {
        self.kind = SegmentKind::CatmullRomSpline;
        self.step_count = step_count;
        self.start = start;
        self.end = end;
        self.control_point_1 = cp1;
        self.control_point_2 = cp2;
        self.alpha = alpha;
    }

    /// Build the segment that continues `other` from its end to `new_end`.
    pub fn derive_next_from(other: &PathSegment, new_end: Vec3) -> Self {
        let mut segment = Self {
            kind: other.kind,
            start: other.end,
            end: new_end,
            step_count: other.step_count,
            alpha: other.alpha,
            ..default()
        };
        segment.reset_control_points(true);
        segment
    }

    /// Build the segment that leads from `new_start` into the start of `other`.
    pub fn derive_prev_from(other: &PathSegment, new_start: Vec3) -> Self {
        let mut segment = Self {
            kind: other.kind,
            start: new_start,
            end: other.start,
            step_count: other.step_count,
            alpha: other.alpha,
            ..default()
        };
        segment.reset_control_points(true);
        segment
    }

    /// Whether this segment uses its control points.
    pub fn is_curve(&self) -> bool {
        self.kind.is_curve()
    }

    pub fn is_near_start(&self, point: Vec3, max_distance: f32) -> bool {
        point.distance(self.start) < max_distance
    }

    pub fn is_near_end(&self, point: Vec3, max_distance: f32) -> bool {
        point.distance(self.end) < max_distance
    }

    pub fn is_near_control_point_1(&self, point: Vec3, max_distance: f32) -> bool {
        self.is_curve() && point.distance(self.control_point_1) < max_distance
    }

    pub fn is_near_control_point_2(&self, point: Vec3, max_distance: f32) -> bool {
        self.is_curve() && point.distance(self.control_point_2) < max_distance
    }

    /// Which control point, if any, lies within `max_distance` of `point`.
    /// The first control point wins when both are in range.
    pub fn is_near_control_point(&self, point: Vec3, max_distance: f32) -> Option<ControlPoint> {
        if self.is_near_control_point_1(point, max_distance) {
            Some(ControlPoint::First)
        } else if self.is_near_control_point_2(point, max_distance) {
            Some(ControlPoint::Second)
        } else {
            None
        }
    }

    /// Tessellate the segment. The end point is not part of the result except
    /// for fixed segments, which return their literal list.
    pub fn generate_steps(&self) -> Vec<Vec3> {
        match self.kind {
            SegmentKind::Fixed => self.fixed_points.clone(),
            SegmentKind::Straight => straight_line(self.start, self.end, self.step_count),
            SegmentKind::BezierCurve => bezier(
                self.start,
                self.control_point_1,
                self.control_point_2,
                self.end,
                self.step_count,
            ),
            SegmentKind::CatmullRomSpline => catmull_rom_spline(
                self.control_point_1,
                self.start,
                self.end,
                self.control_point_2,
                self.step_count,
                self.alpha,
            ),
        }
    }

    /// Whether any tessellated step lies within `max_distance` of `point`.
    pub fn point_near_generated_steps(&self, point: Vec3, max_distance: f32) -> bool {
        self.generate_steps()
            .iter()
            .any(|step| point.distance(*step) < max_distance)
    }

    /// Move the start point. Curves drag their first control point along.
    pub fn update_start(&mut self, new_start: Vec3) {
        if self.is_curve() {
            self.control_point_1 += new_start - self.start;
        }
        self.start = new_start;
    }

    /// Move the end point. Curves drag their second control point along.
    pub fn update_end(&mut self, new_end: Vec3) {
        if self.is_curve() {
            self.control_point_2 += new_end - self.end;
        }
        self.end = new_end;
    }

    /// Place the control points one unit before the start and one unit past
    /// the end along X. Only curves are touched unless `force` is set.
    pub fn reset_control_points(&mut self, force: bool) {
        if self.is_curve() || force {
            self.control_point_1 = self.start - Vec3::X * CONTROL_POINT_OFFSET;
            self.control_point_2 = self.end + Vec3::X * CONTROL_POINT_OFFSET;
        }
    }

    /// Reverse the segment's direction.
    pub fn swap_endpoints(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> PathSegment {
        PathSegment::bezier(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(4.0, 2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            8.0,
        )
    }

    #[test]
    fn test_is_curve() {
        assert!(curve().is_curve());
        assert!(PathSegment::catmull_rom(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE, 4.0, 0.5).is_curve());
        assert!(!PathSegment::straight(Vec3::ZERO, Vec3::X, 4.0).is_curve());
        assert!(!PathSegment::fixed(vec![Vec3::ZERO]).is_curve());
    }

    #[test]
    fn test_proximity_is_strict() {
        let segment = PathSegment::straight(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 5.0);
        let probe = Vec3::new(0.0, 1.0, 0.0);

        assert!(!segment.is_near_start(probe, 1.0));
        assert!(segment.is_near_start(probe, 1.01));
        assert!(segment.is_near_end(Vec3::new(10.0, 0.5, 0.0), 1.0));
    }

    #[test]
    fn test_control_point_proximity_requires_curve() {
        let mut segment = curve();
        let probe = Vec3::new(0.0, 2.1, 0.0);
        assert!(segment.is_near_control_point_1(probe, 0.5));
        assert_eq!(segment.is_near_control_point(probe, 0.5), Some(ControlPoint::First));
        assert_eq!(
            segment.is_near_control_point(Vec3::new(4.0, 2.0, 0.0), 0.5),
            Some(ControlPoint::Second)
        );

        // Stale control points on a straight segment are ignored
        segment.kind = SegmentKind::Straight;
        assert!(!segment.is_near_control_point_1(probe, 0.5));
        assert_eq!(segment.is_near_control_point(probe, 0.5), None);
    }

    #[test]
    fn test_generate_steps_dispatch() {
        let straight = PathSegment::straight(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 4.0);
        assert_eq!(straight.generate_steps().len(), 4);

        let points = vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)];
        let fixed = PathSegment::fixed(points.clone());
        assert_eq!(fixed.generate_steps(), points);
        assert_eq!(fixed.start, Vec3::ZERO);
        assert_eq!(fixed.end, Vec3::new(1.0, 1.0, 0.0));

        assert_eq!(curve().generate_steps()[0], Vec3::ZERO);
    }

    #[test]
    fn test_point_near_generated_steps() {
        let segment = PathSegment::straight(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 10.0);
        assert!(segment.point_near_generated_steps(Vec3::new(5.0, 0.2, 0.0), 0.5));
        assert!(!segment.point_near_generated_steps(Vec3::new(5.0, 3.0, 0.0), 0.5));
    }

    #[test]
    fn test_update_endpoints_shift_control_points() {
        let mut segment = curve();
        segment.update_start(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(segment.start, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(segment.control_point_1, Vec3::new(1.0, 3.0, 0.0));

        segment.update_end(Vec3::new(4.0, -2.0, 0.0));
        assert_eq!(segment.control_point_2, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_update_endpoints_straight_keeps_control_points() {
        let mut segment = PathSegment::straight(Vec3::ZERO, Vec3::X, 2.0);
        segment.control_point_1 = Vec3::new(7.0, 7.0, 0.0);
        segment.update_start(Vec3::Y);
        assert_eq!(segment.control_point_1, Vec3::new(7.0, 7.0, 0.0));
    }

    #[test]
    fn test_reset_control_points() {
        let mut straight = PathSegment::straight(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 2.0);
        straight.reset_control_points(false);
        assert_eq!(straight.control_point_1, Vec3::ZERO);

        straight.reset_control_points(true);
        assert_eq!(straight.control_point_1, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(straight.control_point_2, Vec3::new(4.0, 0.0, 0.0));

        let mut bezier = curve();
        bezier.reset_control_points(false);
        assert_eq!(bezier.control_point_1, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(bezier.control_point_2, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_derive_next_and_prev() {
        let base = PathSegment::catmull_rom(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            6.0,
            0.25,
        );

        let next = PathSegment::derive_next_from(&base, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(next.kind, SegmentKind::CatmullRomSpline);
        assert_eq!(next.start, base.end);
        assert_eq!(next.end, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(next.step_count, 6.0);
        assert_eq!(next.alpha, 0.25);
        assert_eq!(next.control_point_1, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(next.control_point_2, Vec3::new(5.0, 2.0, 0.0));

        let prev = PathSegment::derive_prev_from(&base, Vec3::new(-3.0, 1.0, 0.0));
        assert_eq!(prev.start, Vec3::new(-3.0, 1.0, 0.0));
        assert_eq!(prev.end, base.start);
        assert_eq!(prev.control_point_1, Vec3::new(-4.0, 1.0, 0.0));
    }

    #[test]
    fn test_swap_endpoints() {
        let mut segment = PathSegment::straight(Vec3::ZERO, Vec3::X, 1.0);
        segment.swap_endpoints();
        assert_eq!(segment.start, Vec3::X);
        assert_eq!(segment.end, Vec3::ZERO);
    }
}
