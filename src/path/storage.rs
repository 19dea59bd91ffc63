//! Serializable records for path assets.
//!
//! A [`PathData`] maps onto a [`PathRecord`] holding one [`SegmentRecord`] per
//! segment, in order. Records use plain arrays so the stored format does not
//! depend on the math library. RON is used as the text encoding, matching
//! Bevy's scene files.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

use super::{PathData, PathSegment, SegmentKind};

/// Stored form of [`SegmentKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKindRecord {
    Fixed,
    Straight,
    BezierCurve,
    CatmullRomSpline,
}

impl From<SegmentKind> for SegmentKindRecord {
    fn from(kind: SegmentKind) -> Self {
        match kind {
            SegmentKind::Fixed => Self::Fixed,
            SegmentKind::Straight => Self::Straight,
            SegmentKind::BezierCurve => Self::BezierCurve,
            SegmentKind::CatmullRomSpline => Self::CatmullRomSpline,
        }
    }
}

impl From<SegmentKindRecord> for SegmentKind {
    fn from(kind: SegmentKindRecord) -> Self {
        match kind {
            SegmentKindRecord::Fixed => Self::Fixed,
            SegmentKindRecord::Straight => Self::Straight,
            SegmentKindRecord::BezierCurve => Self::BezierCurve,
            SegmentKindRecord::CatmullRomSpline => Self::CatmullRomSpline,
        }
    }
}

/// Stored form of a [`PathSegment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub kind: SegmentKindRecord,
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub control_point_1: [f32; 3],
    pub control_point_2: [f32; 3],
    pub step_count: f32,
    pub alpha: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_points: Vec<[f32; 3]>,
}

impl From<&PathSegment> for SegmentRecord {
    fn from(segment: &PathSegment) -> Self {
        Self {
            kind: segment.kind.into(),
            start: segment.start.to_array(),
            end: segment.end.to_array(),
            control_point_1: segment.control_point_1.to_array(),
            control_point_2: segment.control_point_2.to_array(),
            step_count: segment.step_count,
            alpha: segment.alpha,
            fixed_points: segment.fixed_points.iter().map(|p| p.to_array()).collect(),
        }
    }
}

impl From<&SegmentRecord> for PathSegment {
    fn from(record: &SegmentRecord) -> Self {
        Self {
            kind: record.kind.into(),
            start: Vec3::from_array(record.start),
            end: Vec3::from_array(record.end),
            control_point_1: Vec3::from_array(record.control_point_1),
            control_point_2: Vec3::from_array(record.control_point_2),
            step_count: record.step_count,
            alpha: record.alpha,
            fixed_points: record.fixed_points.iter().copied().map(Vec3::from_array).collect(),
        }
    }
}

/// Stored form of a [`PathData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub name: String,
    pub segments: Vec<SegmentRecord>,
}

impl PathData {
    /// Convert to the stored record form.
    pub fn to_record(&self) -> PathRecord {
        PathRecord {
            name: self.name.clone(),
            segments: self.segments().iter().map(SegmentRecord::from).collect(),
        }
    }

    /// Rebuild a path from its stored record.
    ///
    /// Fails when a segment's `step_count` or `alpha` is NaN or infinite.
    pub fn from_record(record: &PathRecord) -> Result<Self, StorageError> {
        for (index, segment) in record.segments.iter().enumerate() {
            for (field, value) in [("step_count", segment.step_count), ("alpha", segment.alpha)] {
                if !value.is_finite() {
                    return Err(StorageError::InvalidSegment {
                        index,
                        field,
                        value,
                    });
                }
            }
        }

        Ok(Self::from_segments(
            record.name.clone(),
            record.segments.iter().map(PathSegment::from).collect(),
        ))
    }

    /// Encode the path as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String, StorageError> {
        let text = ron::ser::to_string_pretty(&self.to_record(), ron::ser::PrettyConfig::default())?;
        Ok(text)
    }

    /// Decode a path from RON text.
    pub fn from_ron(text: &str) -> Result<Self, StorageError> {
        let record: PathRecord = ron::from_str(text)?;
        Self::from_record(&record)
    }
}
