use bevy::prelude::*;

use crate::geometry::PathMirror;

/// Smallest move speed a traveller will use.
pub const MIN_MOVE_SPEED: f32 = 1e-4;

/// Default rate (per second) at which the facing blend catches up.
pub const DEFAULT_ROTATION_CATCH_UP: f32 = 10.0;

/// What a traveller does when it runs past either end of its path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum EndpointBehavior {
    /// Stop moving.
    Stop,
    /// Turn around and head back toward the other end (ping-pong).
    Reverse,
    /// Head straight for the opposite end: the start when moving forward,
    /// the end when moving backward.
    #[default]
    ReturnToOpposite,
}

/// Current motion state of a traveller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum TravellerState {
    #[default]
    Idle,
    Moving,
}

/// Direction in which the step index advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum StepDirection {
    #[default]
    Forward,
    Backward,
}

impl StepDirection {
    /// Signed index increment for this direction.
    pub fn step(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Which end of the path a traveller ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEndpoint {
    /// The step index went below zero.
    Start,
    /// The step index went past the last point.
    End,
}

/// Deferred play request, resolved by the traveller systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayRequest {
    /// Replay the cached path, or the default path when nothing is cached.
    Current,
    /// Play the path held by this entity.
    Path(Entity),
}

/// Per-run playback state. Rebuilt whenever a path is played.
#[derive(Debug, Clone, Default)]
pub(crate) struct TravelRun {
    /// Flattened points as authored, before mirroring and anchoring.
    pub source: Option<Vec<Vec3>>,
    /// Anchored points being walked.
    pub points: Vec<Vec3>,
    pub current_index: usize,
    pub direction: StepDirection,
    pub state: TravellerState,
    /// Seconds spent on the current leg while moving.
    pub leg_elapsed: f32,
    pub segment_start: Vec3,
    pub segment_target: Vec3,
    pub segment_distance: f32,
    pub start_rotation: Quat,
    pub target_rotation: Quat,
    pub rotation_fraction: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub play_request: Option<PlayRequest>,
}

/// Component that walks an entity along a flattened [`PathData`](crate::path::PathData).
///
/// The traveller moves from point to point at a constant speed and faces the
/// direction of travel. Each frame the traveller systems advance it and copy
/// its position and rotation into the entity's [`Transform`].
///
/// Paths are anchored: the first point of the path is placed at
/// [`anchor`](Self::anchor), so one path can drive many entities spawned at
/// different places, optionally mirrored.
#[derive(Component, Debug, Clone, Reflect)]
#[require(Transform)]
#[reflect(Component, Default)]
pub struct PathTraveller {
    /// Entity holding the default [`PathData`](crate::path::PathData).
    pub path: Option<Entity>,

    /// Movement speed in world units per second.
    pub move_speed: f32,

    /// Start playing the default path as soon as the component is added.
    pub auto_start: bool,

    /// What to do when an end of the path is reached.
    pub endpoint_behavior: EndpointBehavior,

    /// Mirroring applied to the path before anchoring.
    pub mirror: PathMirror,

    /// World position the path starts from.
    pub anchor: Vec3,

    /// How fast (per second) the facing catches up with the direction of
    /// travel. Independent of the position blend.
    pub rotation_catch_up: f32,

    #[reflect(ignore)]
    pub(crate) run: TravelRun,
}

impl Default for PathTraveller {
    fn default() -> Self {
        Self {
            path: None,
            move_speed: 1.0,
            auto_start: false,
            endpoint_behavior: EndpointBehavior::default(),
            mirror: PathMirror::NONE,
            anchor: Vec3::ZERO,
            rotation_catch_up: DEFAULT_ROTATION_CATCH_UP,
            run: TravelRun::default(),
        }
    }
}

impl PathTraveller {
    /// Create a traveller for the path held by `path`.
    pub fn new(path: Entity) -> Self {
        Self {
            path: Some(path),
            ..default()
        }
    }

    /// Set the movement speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the endpoint behavior.
    pub fn with_endpoint_behavior(mut self, behavior: EndpointBehavior) -> Self {
        self.endpoint_behavior = behavior;
        self
    }

    /// Set the path mirroring.
    pub fn with_mirror(mut self, x: bool, y: bool) -> Self {
        self.mirror = PathMirror::new(x, y);
        self
    }

    /// Start automatically once spawned.
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Set the rotation catch-up rate.
    pub fn with_rotation_catch_up(mut self, rate: f32) -> Self {
        self.rotation_catch_up = rate;
        self
    }
}

/// Message emitted when a traveller runs into an end of its path.
#[derive(Message, Debug, Clone)]
pub struct TravellerEvent {
    /// The entity with the [`PathTraveller`] component.
    pub entity: Entity,
    /// Which end was reached.
    pub endpoint: PathEndpoint,
    /// The behavior that was applied.
    pub behavior: EndpointBehavior,
}

/// Global playback settings, shared by [`PathTraveller`]s and
/// [`MoveToLocation`](super::MoveToLocation) movers.
#[derive(Resource, Debug, Clone)]
pub struct TravellerSettings {
    /// Whether travellers and movers advance at all.
    pub enabled: bool,
    /// Multiplier applied to the frame delta.
    pub time_scale: f32,
}

impl Default for TravellerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            time_scale: 1.0,
        }
    }
}

impl TravellerSettings {
    /// Pause or unpause every traveller and mover.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}
