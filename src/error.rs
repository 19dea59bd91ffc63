//! Error types surfaced by path authoring, storage and playback.

use bevy::math::Vec3;
use thiserror::Error;

/// Structural problems found in a [`PathData`](crate::path::PathData).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// Two consecutive segments do not share their joint point.
    #[error("segment {index} ends at {end} but the next segment starts at {start}")]
    BrokenJoint {
        /// Index of the segment whose end does not match.
        index: usize,
        /// End point of segment `index`.
        end: Vec3,
        /// Start point of segment `index + 1`.
        start: Vec3,
    },
}

/// Failures while encoding or decoding a stored path.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to encode path: {0}")]
    Encode(#[from] ron::Error),
    #[error("failed to decode path: {0}")]
    Decode(#[from] ron::error::SpannedError),
    /// A stored segment carries a value no segment can be built from.
    #[error("segment {index} has a non-finite {field}: {value}")]
    InvalidSegment {
        index: usize,
        field: &'static str,
        value: f32,
    },
}

/// Playback configuration problems reported by a [`PathTraveller`](crate::traveller::PathTraveller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TravellerError {
    /// `play` was called without a path and nothing is cached.
    #[error("traveller has no path to follow")]
    NoPath,
}
