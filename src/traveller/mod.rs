//! Path playback plugin for moving entities along authored paths.
//!
//! A [`PathTraveller`] walks the flattened points of a
//! [`PathData`](crate::path::PathData) at a constant speed, turning smoothly
//! toward the direction of travel, and applies one of the
//! [`EndpointBehavior`]s when it runs past either end.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_path_maker::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     let mut path = PathData::named("swoop");
//!     path.add_straight_segment(Vec3::ZERO, Vec3::new(0.0, -200.0, 0.0), 10.0, false);
//!     path.add_point_continuing_from_last(Vec3::new(150.0, -300.0, 0.0));
//!     let path_entity = commands.spawn(path).id();
//!
//!     // The path starts wherever the traveller is spawned
//!     commands.spawn((
//!         Transform::from_xyz(-100.0, 250.0, 0.0),
//!         PathTraveller::new(path_entity)
//!             .with_speed(120.0)
//!             .with_auto_start(true)
//!             .with_endpoint_behavior(EndpointBehavior::Reverse),
//!     ));
//! }
//! ```

mod components;
mod motion;
mod move_to;
mod systems;

pub use components::*;
pub use move_to::{update_move_to_location, MoveCompleted, MoveToLocation};
pub use systems::{auto_start_path_travellers, start_path_travellers, update_path_travellers};

use bevy::prelude::*;

use crate::geometry::PathMirror;

/// Plugin that moves [`PathTraveller`] and [`MoveToLocation`] entities each frame.
///
/// Requires `PathPlugin` for path type registration.
pub struct PathTravellerPlugin;

impl Plugin for PathTravellerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PathTraveller>()
            .register_type::<EndpointBehavior>()
            .register_type::<TravellerState>()
            .register_type::<StepDirection>()
            .register_type::<PathMirror>()
            .register_type::<MoveToLocation>()
            .init_resource::<TravellerSettings>()
            .add_message::<TravellerEvent>()
            .add_message::<MoveCompleted>()
            .add_systems(
                Update,
                (
                    (
                        systems::auto_start_path_travellers,
                        systems::start_path_travellers,
                        systems::update_path_travellers,
                    )
                        .chain(),
                    move_to::update_move_to_location,
                ),
            );
    }
}
