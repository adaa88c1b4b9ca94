use super::ids::{ActivityId, GearId};
use super::segment::SegmentEffort;
use chrono::{NaiveDateTime, TimeDelta};

/// Activity sport type. Only rides matter for the summary report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Ride,
    Other(String),
}

impl ActivityType {
    pub fn from_api(s: &str) -> Self {
        match s {
            "Ride" => ActivityType::Ride,
            other => ActivityType::Other(other.to_string()),
        }
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, ActivityType::Ride)
    }
}

/// A recorded activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub activity_type: ActivityType,
    /// Local start time as shown in the athlete's feed.
    pub start_date: NaiveDateTime,
    /// Meters.
    pub distance: f64,
    pub elapsed_time: TimeDelta,
    pub moving_time: TimeDelta,
    pub gear_id: Option<GearId>,
    /// `None` until the activity is fetched with all efforts.
    pub segment_efforts: Option<Vec<SegmentEffort>>,
}

impl Activity {
    /// True when this snapshot carries its segment efforts.
    pub fn is_detailed(&self) -> bool {
        self.segment_efforts.is_some()
    }

    pub fn efforts(&self) -> &[SegmentEffort] {
        self.segment_efforts.as_deref().unwrap_or(&[])
    }
}
