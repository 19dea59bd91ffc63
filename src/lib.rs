//! # bevy_path_maker
//!
//! A Bevy plugin for authoring composable 2D paths and moving entities along them.
//!
//! ## Features
//!
//! - Segment kinds: fixed point lists, straight lines, cubic Bézier curves and
//!   centripetal Catmull-Rom spans
//! - Authoring operations: extend from either end, weld on delete, proximity lookups
//! - Paths stored as RON records that round-trip exactly
//! - Travellers that walk a path at constant speed, face the direction of travel
//!   and stop, reverse or wrap at the ends
//! - One path can drive many travellers, each anchored at its own position and
//!   optionally mirrored
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_path_maker::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PathPlugin)
//!         .add_plugins(PathTravellerPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn(Camera2d);
//!
//!     let mut path = PathData::named("dive");
//!     path.add_bezier_segment(
//!         Vec3::ZERO,
//!         Vec3::new(200.0, -200.0, 0.0),
//!         Vec3::new(0.0, -150.0, 0.0),
//!         Vec3::new(200.0, -50.0, 0.0),
//!         24.0,
//!         false,
//!     );
//!     let path = commands.spawn(path).id();
//!
//!     commands.spawn((
//!         Transform::from_xyz(-100.0, 200.0, 0.0),
//!         PathTraveller::new(path).with_speed(150.0).with_auto_start(true),
//!     ));
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`PathPlugin`]: Path type registration (required)
//! - [`PathTravellerPlugin`]: Travellers, one-shot movers and their messages

pub mod error;
pub mod geometry;
pub mod path;
pub mod spline;
pub mod traveller;

pub use path::PathPlugin;
pub use traveller::PathTravellerPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::error::{PathError, StorageError, TravellerError};
    pub use crate::geometry::PathMirror;
    pub use crate::path::{ControlPoint, PathData, PathPlugin, PathRecord, PathSegment, SegmentKind};
    pub use crate::traveller::{
        EndpointBehavior, MoveCompleted, MoveToLocation, PathEndpoint, PathTraveller,
        PathTravellerPlugin, StepDirection, TravellerEvent, TravellerSettings, TravellerState,
    };
}
