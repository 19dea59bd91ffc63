//! Path authoring: segments and the ordered segment lists built from them.

mod data;
mod segment;
mod storage;

pub use data::*;
pub use segment::*;
pub use storage::*;

use bevy::prelude::*;

/// Plugin that registers path types for reflection/serialization.
/// Playback lives in [`PathTravellerPlugin`](crate::traveller::PathTravellerPlugin).
pub struct PathPlugin;

impl Plugin for PathPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SegmentKind>()
            .register_type::<PathSegment>()
            .register_type::<PathData>();
    }
}
