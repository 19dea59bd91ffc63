use bevy::prelude::*;

use crate::error::PathError;

use super::segment::PathSegment;

/// Tolerance used by [`PathData::delete_point`] to match a joint.
pub const DELETE_POINT_TOLERANCE: f32 = 0.5;

/// Name given to paths created without one.
pub const DEFAULT_PATH_NAME: &str = "new_path";

/// An ordered list of segments forming one continuous path.
///
/// Insertion order is traversal order. Consecutive segments are expected to
/// share their joint (`end` of one equals `start` of the next); the authoring
/// operations keep this true and [`PathData::validate_adjacency`] checks it.
///
/// A path is read-only while travellers are playing it: travellers copy the
/// flattened points when they start, so edits only take effect on the next play.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component, Default)]
pub struct PathData {
    /// Human readable name of the path.
    pub name: String,
    segments: Vec<PathSegment>,
}

impl Default for PathData {
    fn default() -> Self {
        Self::named(DEFAULT_PATH_NAME)
    }
}

impl PathData {
    /// Create an empty path with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// Create a path from an ordered segment list.
    pub fn from_segments(name: impl Into<String>, segments: Vec<PathSegment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    pub fn segment_mut(&mut self, index: usize) -> Option<&mut PathSegment> {
        self.segments.get_mut(index)
    }

    pub fn first_segment(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Remove every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Append a segment to the tail of the path.
    pub fn append_segment(&mut self, segment: PathSegment) -> &mut PathSegment {
        self.segments.push(segment);
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }

    /// Insert a segment at the head of the path.
    ///
    /// When the path was empty, the segment's endpoints are swapped: a path
    /// grown by prepending is authored backwards from its first point.
    pub fn prepend_segment(&mut self, segment: PathSegment) -> &mut PathSegment {
        let was_empty = self.segments.is_empty();
        self.segments.insert(0, segment);
        let head = &mut self.segments[0];
        if was_empty {
            head.swap_endpoints();
        }
        head
    }

    fn add_segment(&mut self, segment: PathSegment, to_head: bool) -> &mut PathSegment {
        if to_head {
            self.prepend_segment(segment)
        } else {
            self.append_segment(segment)
        }
    }

    pub fn add_fixed_segment(&mut self, points: Vec<Vec3>, to_head: bool) -> &mut PathSegment {
        self.add_segment(PathSegment::fixed(points), to_head)
    }

    pub fn add_straight_segment(
        &mut self,
        start: Vec3,
        end: Vec3,
        step_count: f32,
        to_head: bool,
    ) -> &mut PathSegment {
        self.add_segment(PathSegment::straight(start, end, step_count), to_head)
    }

    pub fn add_bezier_segment(
        &mut self,
        start: Vec3,
        end: Vec3,
        cp1: Vec3,
        cp2: Vec3,
        step_count: f32,
        to_head: bool,
    ) -> &mut PathSegment {
        self.add_segment(PathSegment::bezier(start, cp1, cp2, end, step_count), to_head)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_catmull_rom_segment(
        &mut self,
        start: Vec3,
        end: Vec3,
        cp1: Vec3,
        cp2: Vec3,
        step_count: f32,
        alpha: f32,
        to_head: bool,
    ) -> &mut PathSegment {
        self.add_segment(
            PathSegment::catmull_rom(cp1, start, end, cp2, step_count, alpha),
            to_head,
        )
    }

    /// Concatenate all segments into one ordered point list.
    ///
    /// Each segment contributes its start, its tessellated steps and its end.
    /// A point exactly equal to the previously added one is skipped at the
    /// start, the first step and the end of every segment.
    pub fn flatten(&self) -> Vec<Vec3> {
        let mut points: Vec<Vec3> = Vec::new();

        for segment in &self.segments {
            push_unless_repeated(&mut points, segment.start);

            for (i, step) in segment.generate_steps().into_iter().enumerate() {
                if i == 0 {
                    push_unless_repeated(&mut points, step);
                } else {
                    points.push(step);
                }
            }

            push_unless_repeated(&mut points, segment.end);
        }

        points
    }

    /// First segment whose tessellated steps come within `max_distance` of `point`.
    ///
    /// With `exclude_near_ends`, the search gives up as soon as a visited
    /// segment has `point` near its start or end, so clicks on a joint are not
    /// mistaken for clicks on a segment body.
    pub fn find_segment_near_point(
        &self,
        max_distance: f32,
        point: Vec3,
        exclude_near_ends: bool,
    ) -> Option<&PathSegment> {
        self.find_segment_index_near_point(max_distance, point, exclude_near_ends)
            .map(|index| &self.segments[index])
    }

    /// Index form of [`PathData::find_segment_near_point`].
    pub fn find_segment_index_near_point(
        &self,
        max_distance: f32,
        point: Vec3,
        exclude_near_ends: bool,
    ) -> Option<usize> {
        for (index, segment) in self.segments.iter().enumerate() {
            if exclude_near_ends
                && (segment.is_near_end(point, max_distance)
                    || segment.is_near_start(point, max_distance))
            {
                return None;
            }

            if segment.point_near_generated_steps(point, max_distance) {
                return Some(index);
            }
        }
        None
    }

    /// Indices of the segment(s) holding an endpoint within `distance` of `point`.
    ///
    /// Returns at most two indices. Checks run in order and the first hit wins:
    /// a lone segment, then each adjacent pair (end of the first, start of the
    /// second), then the last segment and finally the first segment.
    pub fn find_segments_sharing_point(&self, point: Vec3, distance: f32) -> Vec<usize> {
        let count = self.segments.len();
        if count == 0 {
            return Vec::new();
        }

        let holds = |index: usize| {
            let segment = &self.segments[index];
            segment.is_near_start(point, distance) || segment.is_near_end(point, distance)
        };

        if count == 1 && holds(0) {
            return vec![0];
        }

        for index in 0..count - 1 {
            let mut found = Vec::with_capacity(2);
            if self.segments[index].is_near_end(point, distance) {
                found.push(index);
            }
            if self.segments[index + 1].is_near_start(point, distance) {
                found.push(index + 1);
            }
            if !found.is_empty() {
                return found;
            }
        }

        if holds(count - 1) {
            return vec![count - 1];
        }
        if holds(0) {
            return vec![0];
        }
        Vec::new()
    }

    /// Remove the endpoint nearest `point`.
    ///
    /// A point held by one segment removes that segment. A joint shared by two
    /// segments welds them: the first keeps its start and takes the second's end
    /// (and, for curves, its far control point), the second is removed.
    /// Returns whether anything was deleted.
    pub fn delete_point(&mut self, point: Vec3) -> bool {
        if self.segments.is_empty() {
            return false;
        }

        let shared = self.find_segments_sharing_point(point, DELETE_POINT_TOLERANCE);
        match *shared.as_slice() {
            [index] => {
                self.segments.remove(index);
                true
            }
            [first, second] => {
                let removed = self.segments.remove(second);
                let survivor = &mut self.segments[first];
                survivor.end = removed.end;
                if survivor.is_curve() && removed.is_curve() {
                    survivor.control_point_2 = removed.control_point_2;
                }
                true
            }
            _ => false,
        }
    }

    /// Extend the path at its tail with a segment ending at `new_point`,
    /// continuing the last segment's settings. `None` when the path is empty.
    pub fn add_point_continuing_from_last(&mut self, new_point: Vec3) -> Option<&PathSegment> {
        let Some(last) = self.segments.last() else {
            debug!("path '{}' has no segment to continue from", self.name);
            return None;
        };
        let segment = PathSegment::derive_next_from(last, new_point);
        Some(&*self.append_segment(segment))
    }

    /// Extend the path at its head with a segment starting at `new_point`,
    /// continuing the first segment's settings. `None` when the path is empty.
    pub fn add_point_continuing_from_first(&mut self, new_point: Vec3) -> Option<&PathSegment> {
        let Some(first) = self.segments.first() else {
            debug!("path '{}' has no first segment to continue from", self.name);
            return None;
        };
        let segment = PathSegment::derive_prev_from(first, new_point);
        Some(&*self.prepend_segment(segment))
    }

    /// Whether `point` is within `max_distance` (inclusive) of any segment
    /// endpoint or, when `check_control_points` is set, of a curve's control point.
    pub fn point_controls_segment(
        &self,
        max_distance: f32,
        point: Vec3,
        check_control_points: bool,
    ) -> bool {
        self.segments.iter().any(|segment| {
            let near = |target: Vec3| point.distance(target) <= max_distance;
            near(segment.start)
                || near(segment.end)
                || (check_control_points
                    && segment.is_curve()
                    && (near(segment.control_point_1) || near(segment.control_point_2)))
        })
    }

    /// Check that every joint is shared exactly.
    pub fn validate_adjacency(&self) -> Result<(), PathError> {
        for (index, pair) in self.segments.windows(2).enumerate() {
            if pair[0].end != pair[1].start {
                return Err(PathError::BrokenJoint {
                    index,
                    end: pair[0].end,
                    start: pair[1].start,
                });
            }
        }
        Ok(())
    }
}

fn push_unless_repeated(points: &mut Vec<Vec3>, point: Vec3) {
    if points.last() != Some(&point) {
        points.push(point);
    }
}
