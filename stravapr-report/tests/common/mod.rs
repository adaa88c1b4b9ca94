//! In-memory Strava API for driving the assemblers.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeDelta};
use std::cell::RefCell;
use std::collections::HashMap;
use stravapr_core::api::{ApiError, ApiIter, StravaApi};
use stravapr_core::domain::{
    Activity, ActivityId, ActivityType, Athlete, AthleteId, EffortId, GearId, Segment,
    SegmentEffort, SegmentId, SegmentRef,
};

/// Calls made against the fake, by endpoint.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Calls {
    pub athlete: usize,
    pub activities: usize,
    pub activity: Vec<(ActivityId, bool)>,
    pub segment: Vec<SegmentId>,
    pub segment_efforts: Vec<SegmentId>,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.athlete
            + self.activities
            + self.activity.len()
            + self.segment.len()
            + self.segment_efforts.len()
    }
}

#[derive(Default)]
pub struct FakeStrava {
    pub athlete: Option<Athlete>,
    /// Listing order, most recent first. Stored without efforts.
    pub listing: Vec<Activity>,
    /// Detailed versions, returned by `activity(id, _)`.
    pub detailed: HashMap<ActivityId, Activity>,
    pub segments: HashMap<SegmentId, Segment>,
    /// Best efforts per segment, fastest first.
    pub top_efforts: HashMap<SegmentId, Vec<SegmentEffort>>,
    /// Listing index after which `activities` yields an error.
    pub fail_listing_after: Option<usize>,
    pub calls: RefCell<Calls>,
}

impl FakeStrava {
    pub fn new(athlete: Athlete) -> Self {
        Self {
            athlete: Some(athlete),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.borrow().clone()
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        let mut summary = activity.clone();
        summary.segment_efforts = None;
        self.listing.push(summary);
        self.detailed.insert(activity.id, activity);
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.insert(segment.id, segment);
        self
    }

    pub fn with_top_effort(mut self, effort: SegmentEffort) -> Self {
        self.top_efforts
            .entry(effort.segment.id)
            .or_default()
            .push(effort);
        self
    }
}

impl StravaApi for FakeStrava {
    fn athlete(&self) -> Result<Athlete, ApiError> {
        self.calls.borrow_mut().athlete += 1;
        self.athlete
            .clone()
            .ok_or_else(|| ApiError::Unauthorized("no athlete".into()))
    }

    fn activities(&self, limit: Option<usize>) -> ApiIter<'_, Activity> {
        self.calls.borrow_mut().activities += 1;
        let fail_after = self.fail_listing_after;
        let items = self.listing.iter().cloned().enumerate().map(move |(i, a)| {
            match fail_after {
                Some(n) if i >= n => Err(ApiError::Network("connection reset".into())),
                _ => Ok(a),
            }
        });
        Box::new(items.take(limit.unwrap_or(usize::MAX)))
    }

    fn activity(&self, id: ActivityId, include_all_efforts: bool) -> Result<Activity, ApiError> {
        self.calls
            .borrow_mut()
            .activity
            .push((id, include_all_efforts));
        self.detailed
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/activities/{id}")))
    }

    fn segment(&self, id: SegmentId) -> Result<Segment, ApiError> {
        self.calls.borrow_mut().segment.push(id);
        self.segments
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/segments/{id}")))
    }

    fn segment_efforts(
        &self,
        segment_id: SegmentId,
        _athlete_id: AthleteId,
        limit: Option<usize>,
    ) -> ApiIter<'_, SegmentEffort> {
        self.calls.borrow_mut().segment_efforts.push(segment_id);
        let efforts = self
            .top_efforts
            .get(&segment_id)
            .cloned()
            .unwrap_or_default();
        Box::new(
            efforts
                .into_iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(Ok),
        )
    }
}

// ─── Builders ───────────────────────────────────────────────────────

pub fn athlete() -> Athlete {
    Athlete::new(AthleteId(1)).with_bike("1", "Road Bike")
}

pub fn ride(id: u64, gear: Option<&str>, meters: f64) -> Activity {
    activity(id, ActivityType::Ride, gear, meters)
}

pub fn activity(id: u64, kind: ActivityType, gear: Option<&str>, meters: f64) -> Activity {
    Activity {
        id: ActivityId(id),
        name: format!("Activity {id}"),
        activity_type: kind,
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 5, 42)
            .unwrap(),
        distance: meters,
        elapsed_time: TimeDelta::seconds(3600),
        moving_time: TimeDelta::seconds(3000),
        gear_id: gear.map(GearId::new),
        segment_efforts: Some(Vec::new()),
    }
}

pub fn segment(id: u64, name: &str, meters: f64, starred: bool) -> Segment {
    Segment {
        id: SegmentId(id),
        name: name.to_string(),
        distance: meters,
        starred,
    }
}

pub fn effort(id: u64, segment: &Segment, activity: u64, secs: i64) -> SegmentEffort {
    SegmentEffort {
        id: EffortId(id),
        segment: SegmentRef {
            id: segment.id,
            name: segment.name.clone(),
            distance: segment.distance,
        },
        activity_id: ActivityId(activity),
        elapsed_time: TimeDelta::seconds(secs),
    }
}
