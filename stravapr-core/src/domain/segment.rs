use super::ids::{ActivityId, EffortId, SegmentId};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// A segment as returned by the segment endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub name: String,
    /// Meters.
    pub distance: f64,
    /// Whether the viewing athlete has starred this segment.
    pub starred: bool,
}

/// The summary of a segment embedded in an effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRef {
    pub id: SegmentId,
    pub name: String,
    pub distance: f64,
}

/// One attempt at a segment, as part of an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEffort {
    pub id: EffortId,
    pub segment: SegmentRef,
    pub activity_id: ActivityId,
    pub elapsed_time: TimeDelta,
}
