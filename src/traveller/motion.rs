//! Playback state machine of [`PathTraveller`].

use bevy::prelude::*;

use crate::error::TravellerError;
use crate::geometry::{anchor_points, facing_rotation, PathMirror};
use crate::path::PathData;

use super::{
    EndpointBehavior, PathEndpoint, PathTraveller, PlayRequest, StepDirection, TravellerState,
    MIN_MOVE_SPEED,
};

/// Legs shorter than this complete instantly.
const MIN_LEG_DISTANCE: f32 = f32::EPSILON;

impl PathTraveller {
    /// Play a path from its first point, moving forward.
    ///
    /// With `Some(path)` the path is flattened and cached. With `None` the
    /// cached points are re-anchored at the current [`anchor`](Self::anchor).
    /// Paths with fewer than two points are cached but leave the traveller idle.
    pub fn play(&mut self, path: Option<&PathData>) -> Result<(), TravellerError> {
        match path {
            Some(path) => self.set_path(path),
            None if self.run.source.is_some() => self.reanchor(),
            None => return Err(TravellerError::NoPath),
        }

        self.run.current_index = 0;
        self.run.direction = StepDirection::Forward;
        if self.run.points.len() < 2 {
            warn!(
                "path has {} point(s), nothing to travel",
                self.run.points.len()
            );
            self.run.state = TravellerState::Idle;
            return Ok(());
        }

        self.run.position = self.run.points[0];
        // Moving away from index 0 never runs past an end.
        let _ = self.move_to_next_step();
        self.run.state = TravellerState::Moving;
        Ok(())
    }

    /// Cache the flattened points of `path` and anchor them. Resets to the
    /// first point without changing the motion state.
    pub fn set_path(&mut self, path: &PathData) {
        self.run.source = Some(path.flatten());
        self.reanchor();
        self.run.current_index = 0;
        debug!(
            "traveller took path '{}' with {} points",
            path.name,
            self.run.points.len()
        );
    }

    /// Set the mirroring used the next time the path is anchored.
    pub fn set_mirror(&mut self, x: bool, y: bool) {
        self.mirror = PathMirror::new(x, y);
    }

    /// Remember where the path should start from.
    pub fn cache_start_position(&mut self, position: Vec3) {
        self.anchor = position;
    }

    /// Halt in place. The current leg is kept so [`resume`](Self::resume)
    /// continues from the same spot.
    pub fn stop(&mut self) {
        self.run.state = TravellerState::Idle;
    }

    /// Continue moving from where the traveller stopped.
    pub fn resume(&mut self) {
        if self.run.points.len() >= 2 {
            self.run.state = TravellerState::Moving;
        }
    }

    /// Make the next step start from the first point. The motion state is kept.
    pub fn reset_to_start(&mut self) {
        self.run.current_index = 0;
    }

    /// Ask the traveller systems to play the cached path, falling back to the
    /// default [`path`](Self::path) entity when nothing is cached. The anchor is
    /// taken from the entity's `Transform`.
    pub fn request_play(&mut self) {
        self.run.play_request = Some(PlayRequest::Current);
    }

    /// Ask the traveller systems to play the path held by `path`.
    pub fn request_play_path(&mut self, path: Entity) {
        self.run.play_request = Some(PlayRequest::Path(path));
    }

    pub(crate) fn take_play_request(&mut self) -> Option<PlayRequest> {
        self.run.play_request.take()
    }

    /// Whether a path has been cached by a previous play.
    pub fn has_path(&self) -> bool {
        self.run.source.is_some()
    }

    pub fn is_moving(&self) -> bool {
        self.run.state == TravellerState::Moving
    }

    pub fn state(&self) -> TravellerState {
        self.run.state
    }

    /// Current interpolated position.
    pub fn position(&self) -> Vec3 {
        self.run.position
    }

    /// Current facing.
    pub fn rotation(&self) -> Quat {
        self.run.rotation
    }

    /// Index of the point the current leg is heading to.
    pub fn current_index(&self) -> usize {
        self.run.current_index
    }

    pub fn direction(&self) -> StepDirection {
        self.run.direction
    }

    /// Anchored points being walked.
    pub fn points(&self) -> &[Vec3] {
        &self.run.points
    }

    /// Advance playback by `delta` seconds.
    ///
    /// Returns the endpoint reached during this frame, if any.
    pub fn advance(&mut self, delta: f32) -> Option<PathEndpoint> {
        self.advance_with(delta, |_, _| {})
    }

    /// Advance playback by `delta` seconds, calling `on_endpoint` as soon as an
    /// end of the path is reached. The callback sees the traveller after the
    /// endpoint behavior has been applied.
    ///
    /// At most one point is passed per call.
    pub fn advance_with<F>(&mut self, delta: f32, mut on_endpoint: F) -> Option<PathEndpoint>
    where
        F: FnMut(&PathTraveller, PathEndpoint),
    {
        if !self.is_moving() || self.run.points.len() < 2 {
            return None;
        }

        self.run.leg_elapsed += delta;
        let speed = self.move_speed.max(MIN_MOVE_SPEED);
        let travelled = self.run.leg_elapsed * speed;
        let fraction = if self.run.segment_distance < MIN_LEG_DISTANCE {
            1.0
        } else {
            travelled / self.run.segment_distance
        };

        self.run.rotation_fraction += delta * self.rotation_catch_up;

        self.run.position = self
            .run
            .segment_start
            .lerp(self.run.segment_target, fraction.clamp(0.0, 1.0));
        self.run.rotation = self
            .run
            .start_rotation
            .slerp(self.run.target_rotation, self.run.rotation_fraction.clamp(0.0, 1.0));

        if fraction < 1.0 {
            return None;
        }

        let endpoint = self.move_to_next_step();
        if let Some(endpoint) = endpoint {
            on_endpoint(&*self, endpoint);
        }
        endpoint
    }

    /// Rebuild the anchored points from the cached source.
    fn reanchor(&mut self) {
        let points = match &self.run.source {
            Some(source) => anchor_points(source, self.mirror, self.anchor),
            None => Vec::new(),
        };
        self.run.points = points;
    }

    /// Set up the leg leaving the current point, applying the endpoint
    /// behavior when the next index falls outside the path.
    fn move_to_next_step(&mut self) -> Option<PathEndpoint> {
        let count = self.run.points.len();
        if count < 2 {
            return None;
        }

        let current = self.run.current_index.min(count - 1);
        let mut next = current as isize + self.run.direction.step();
        self.run.leg_elapsed = 0.0;

        let mut reached = None;
        if next < 0 || next >= count as isize {
            let endpoint = if next < 0 {
                PathEndpoint::Start
            } else {
                PathEndpoint::End
            };

            match self.endpoint_behavior {
                EndpointBehavior::Stop => {
                    self.stop();
                    return Some(endpoint);
                }
                EndpointBehavior::Reverse => {
                    self.run.direction = self.run.direction.reversed();
                    next = current as isize + self.run.direction.step();
                }
                EndpointBehavior::ReturnToOpposite => {
                    next = match self.run.direction {
                        StepDirection::Forward => 0,
                        StepDirection::Backward => count as isize - 1,
                    };
                }
            }
            reached = Some(endpoint);
        }

        let next = next.clamp(0, count as isize - 1) as usize;
        let from = self.run.points[current];
        let to = self.run.points[next];

        self.run.segment_start = from;
        self.run.segment_target = to;
        self.run.segment_distance = from.distance(to);
        self.run.target_rotation = facing_rotation(from, to);
        self.run.start_rotation = self.run.rotation;

        // Leaving the first point snaps straight to the new facing.
        if current == 0 {
            self.run.start_rotation = self.run.target_rotation;
            self.run.rotation = self.run.target_rotation;
        }

        self.run.rotation_fraction = 0.0;
        self.run.current_index = next;
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_point_path() -> PathData {
        let mut path = PathData::named("line");
        path.add_straight_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, false);
        path
    }

    fn traveller(behavior: EndpointBehavior) -> PathTraveller {
        PathTraveller::default()
            .with_speed(10.0)
            .with_endpoint_behavior(behavior)
    }

    #[test]
    fn test_play_without_path_is_an_error() {
        let mut traveller = PathTraveller::default();
        assert_eq!(traveller.play(None), Err(TravellerError::NoPath));
        assert!(!traveller.is_moving());
    }

    #[test]
    fn test_play_empty_path_is_a_no_op() {
        let mut traveller = traveller(EndpointBehavior::Stop);
        assert_eq!(traveller.play(Some(&PathData::default())), Ok(()));
        assert!(!traveller.is_moving());
        assert_eq!(traveller.advance(1.0), None);

        traveller.resume();
        assert!(!traveller.is_moving());
    }

    #[test]
    fn test_stop_policy() {
        let mut traveller = traveller(EndpointBehavior::Stop);
        traveller.play(Some(&two_point_path())).expect("play");
        assert!(traveller.is_moving());
        assert_eq!(traveller.current_index(), 1);

        let mut calls = 0;
        let half = traveller.advance_with(0.5, |_, _| calls += 1);
        assert_eq!(half, None);
        assert!((traveller.position() - Vec3::new(5.0, 0.0, 0.0)).length() < 0.001);

        let reached = traveller.advance_with(0.5, |t, endpoint| {
            calls += 1;
            assert!(!t.is_moving());
            assert_eq!(endpoint, PathEndpoint::End);
        });
        assert_eq!(reached, Some(PathEndpoint::End));
        assert_eq!(traveller.state(), TravellerState::Idle);
        assert_eq!(traveller.position(), Vec3::new(10.0, 0.0, 0.0));

        // Idle travellers do not move or fire again
        assert_eq!(traveller.advance_with(1.0, |_, _| calls += 1), None);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_reverse_policy_bounces() {
        let mut traveller = traveller(EndpointBehavior::Reverse);
        traveller.play(Some(&two_point_path())).expect("play");

        assert_eq!(traveller.advance(1.0), Some(PathEndpoint::End));
        assert_eq!(traveller.direction(), StepDirection::Backward);
        assert_eq!(traveller.current_index(), 0);
        assert!(traveller.is_moving());

        assert!(traveller.advance(0.5).is_none());
        assert!((traveller.position() - Vec3::new(5.0, 0.0, 0.0)).length() < 0.001);

        assert_eq!(traveller.advance(0.5), Some(PathEndpoint::Start));
        assert_eq!(traveller.direction(), StepDirection::Forward);
        assert_eq!(traveller.current_index(), 1);

        assert_eq!(traveller.advance(1.0), Some(PathEndpoint::End));
        assert_eq!(traveller.direction(), StepDirection::Backward);
    }

    #[test]
    fn test_return_to_opposite_wraps_forward() {
        let mut traveller = traveller(EndpointBehavior::ReturnToOpposite);
        traveller.play(Some(&two_point_path())).expect("play");

        assert_eq!(traveller.advance(1.0), Some(PathEndpoint::End));
        assert_eq!(traveller.current_index(), 0);
        assert_eq!(traveller.direction(), StepDirection::Forward);
        assert_eq!(traveller.position(), Vec3::new(10.0, 0.0, 0.0));

        // The next leg runs from the end straight back toward the start
        traveller.advance(0.25);
        assert!((traveller.position() - Vec3::new(7.5, 0.0, 0.0)).length() < 0.001);

        // Back at index 0 the traveller carries on forward
        assert_eq!(traveller.advance(0.75), None);
        assert_eq!(traveller.current_index(), 1);
    }

    #[test]
    fn test_stop_and_resume_keep_progress() {
        let mut traveller = traveller(EndpointBehavior::Stop);
        traveller.play(Some(&two_point_path())).expect("play");

        traveller.advance(0.3);
        traveller.stop();
        let parked = traveller.position();
        assert!((parked - Vec3::new(3.0, 0.0, 0.0)).length() < 0.001);

        // Time passing while idle does not move the traveller
        traveller.advance(5.0);
        assert_eq!(traveller.position(), parked);

        traveller.resume();
        traveller.advance(0.2);
        assert!((traveller.position() - Vec3::new(5.0, 0.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_reset_to_start_keeps_state() {
        let mut path = PathData::default();
        path.add_straight_segment(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 3.0, false);
        let mut traveller = traveller(EndpointBehavior::Stop);
        traveller.play(Some(&path)).expect("play");
        traveller.advance(0.15);
        assert_eq!(traveller.current_index(), 2);

        traveller.reset_to_start();
        assert_eq!(traveller.current_index(), 0);
        assert!(traveller.is_moving());
    }

    #[test]
    fn test_play_anchors_and_mirrors() {
        let mut path = PathData::default();
        path.add_straight_segment(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0, false);

        let mut traveller = PathTraveller::default().with_mirror(true, false);
        traveller.cache_start_position(Vec3::new(5.0, 5.0, 0.0));
        traveller.play(Some(&path)).expect("play");

        assert_eq!(traveller.points(), &[Vec3::new(5.0, 5.0, 0.0), Vec3::new(4.0, 5.0, 0.0)]);
    }

    #[test]
    fn test_replay_reanchors_cached_path() {
        let mut traveller = traveller(EndpointBehavior::Stop);
        traveller.play(Some(&two_point_path())).expect("play");

        traveller.cache_start_position(Vec3::new(0.0, 3.0, 0.0));
        traveller.set_mirror(true, false);
        traveller.play(None).expect("replay");

        assert!(traveller.has_path());
        assert_eq!(traveller.points(), &[Vec3::new(0.0, 3.0, 0.0), Vec3::new(-10.0, 3.0, 0.0)]);
        assert_eq!(traveller.current_index(), 1);
    }

    #[test]
    fn test_first_step_snaps_facing() {
        let mut path = PathData::default();
        path.add_straight_segment(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 1.0, false);
        path.add_straight_segment(Vec3::new(0.0, 4.0, 0.0), Vec3::new(4.0, 4.0, 0.0), 1.0, false);

        let mut traveller = PathTraveller::default().with_speed(4.0);
        traveller.play(Some(&path)).expect("play");
        // Heading up: identity facing, applied immediately
        assert!(traveller.rotation().angle_between(Quat::IDENTITY) < 0.001);

        // Turning right blends toward the new facing instead of snapping
        traveller.advance(1.0);
        assert_eq!(traveller.current_index(), 2);
        let turned = Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2);
        traveller.advance(0.05);
        let partial = traveller.rotation();
        assert!(partial.angle_between(Quat::IDENTITY) > 0.01);
        assert!(partial.angle_between(turned) > 0.01);

        // The facing catches up well before the position leg completes
        traveller.advance(0.1);
        assert!(traveller.rotation().angle_between(turned) < 0.001);
        assert!(traveller.position().x < 4.0);
    }

    #[test]
    fn test_coincident_points_arrive_instantly() {
        let mut path = PathData::default();
        path.add_fixed_segment(vec![Vec3::ZERO, Vec3::ZERO, Vec3::X], false);

        let mut traveller = traveller(EndpointBehavior::Stop);
        traveller.play(Some(&path)).expect("play");
        assert_eq!(traveller.points().len(), 3);

        traveller.advance(0.0);
        assert_eq!(traveller.current_index(), 2);
    }

    #[test]
    fn test_non_positive_speed_is_clamped() {
        let mut traveller = traveller(EndpointBehavior::Stop).with_speed(0.0);
        traveller.play(Some(&two_point_path())).expect("play");
        traveller.advance(1.0);
        assert!(traveller.position().is_finite());
        assert!(traveller.is_moving());
    }

    #[test]
    fn test_long_bounce_keeps_moving_at_frame_rate() {
        let mut traveller = traveller(EndpointBehavior::Reverse);
        traveller.play(Some(&two_point_path())).expect("play");

        // A million seconds of bouncing
        for _ in 0..1_000_000 {
            traveller.advance(1.0);
        }
        assert!(traveller.is_moving());

        let before = traveller.position();
        for _ in 0..6 {
            traveller.advance(1.0 / 60.0);
        }
        assert!((traveller.position() - before).length() > 0.5);
    }
}
