//! Row views over domain snapshots.
//!
//! Each report has its own row type with a fixed column list; a row renders
//! itself as an ordered record matching that list.

use stravapr_core::bikes::BikeRegistry;
use stravapr_core::domain::{Activity, Segment, SegmentEffort, SegmentId};
use stravapr_core::units::{self, UnitError};

/// Start time format for the ride list.
///
/// The minutes slot repeats `%S`, so `07:30:15` renders as `07:15`. This is
/// what existing exports contain and is kept until someone decides otherwise.
pub const RIDE_DATE_FORMAT: &str = "%Y-%m-%d %H:%S";

/// A row that can be written as one CSV record.
pub trait CsvRecord {
    /// Column names, in record order.
    const HEADER: &'static [&'static str];

    fn record(&self) -> Result<Vec<String>, UnitError>;
}

/// The three reports and their column lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    List,
    Summary,
    Ride,
}

impl ReportKind {
    pub fn header(self) -> &'static [&'static str] {
        match self {
            ReportKind::List => RideRow::HEADER,
            ReportKind::Summary => SummaryRow::HEADER,
            ReportKind::Ride => SegmentRow::HEADER,
        }
    }
}

// ─── Ride list ──────────────────────────────────────────────────────

/// One activity in the ride list.
pub struct RideRow<'a> {
    bikes: &'a BikeRegistry,
    activity: &'a Activity,
}

impl<'a> RideRow<'a> {
    pub fn new(bikes: &'a BikeRegistry, activity: &'a Activity) -> Self {
        Self { bikes, activity }
    }

    pub fn date(&self) -> String {
        self.activity.start_date.format(RIDE_DATE_FORMAT).to_string()
    }

    pub fn name(&self) -> &str {
        &self.activity.name
    }

    pub fn bike(&self) -> &str {
        self.bikes.lookup(self.activity.gear_id.as_ref())
    }

    pub fn distance(&self) -> Result<String, UnitError> {
        units::distance_miles(self.activity.distance)
    }

    pub fn elapsed_time(&self) -> i64 {
        units::seconds_as_number(&self.activity.elapsed_time)
    }

    pub fn moving_time(&self) -> i64 {
        units::seconds_as_number(&self.activity.moving_time)
    }
}

impl CsvRecord for RideRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "date",
        "name",
        "bike",
        "distance",
        "elapsed_time",
        "moving_time",
    ];

    fn record(&self) -> Result<Vec<String>, UnitError> {
        Ok(vec![
            self.date(),
            self.name().to_string(),
            self.bike().to_string(),
            self.distance()?,
            self.elapsed_time().to_string(),
            self.moving_time().to_string(),
        ])
    }
}

// ─── Bike summary ───────────────────────────────────────────────────

/// Accumulated rides for one bike.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub bike: String,
    /// Total meters.
    pub meters: f64,
    pub rides: u32,
}

impl SummaryRow {
    pub fn distance(&self) -> Result<String, UnitError> {
        units::distance_miles_summary(self.meters)
    }
}

impl CsvRecord for SummaryRow {
    const HEADER: &'static [&'static str] = &["bike", "distance", "rides"];

    fn record(&self) -> Result<Vec<String>, UnitError> {
        Ok(vec![
            self.bike.clone(),
            self.distance()?,
            self.rides.to_string(),
        ])
    }
}

// ─── Segment comparison ─────────────────────────────────────────────

/// One segment of a ride compared with the athlete's best effort on it.
///
/// `activity` is the activity that owns the top effort, so `bike` names the
/// bike the best time was set on.
pub struct SegmentRow<'a> {
    bikes: &'a BikeRegistry,
    activity: &'a Activity,
    this_effort: &'a SegmentEffort,
    top_effort: &'a SegmentEffort,
    segment: &'a Segment,
}

impl<'a> SegmentRow<'a> {
    pub fn new(
        bikes: &'a BikeRegistry,
        activity: &'a Activity,
        this_effort: &'a SegmentEffort,
        top_effort: &'a SegmentEffort,
        segment: &'a Segment,
    ) -> Self {
        Self {
            bikes,
            activity,
            this_effort,
            top_effort,
            segment,
        }
    }

    pub fn id(&self) -> SegmentId {
        self.segment.id
    }

    pub fn name(&self) -> &str {
        &self.segment.name
    }

    pub fn starred(&self) -> &'static str {
        if self.segment.starred {
            "*"
        } else {
            ""
        }
    }

    pub fn bike(&self) -> &str {
        self.bikes.lookup(self.activity.gear_id.as_ref())
    }

    pub fn distance(&self) -> Result<String, UnitError> {
        units::distance_miles(self.segment.distance)
    }

    pub fn time(&self) -> i64 {
        units::seconds_as_number(&self.this_effort.elapsed_time)
    }

    pub fn pr(&self) -> i64 {
        units::seconds_as_number(&self.top_effort.elapsed_time)
    }

    /// Seconds between the best effort and this one. Negative when this effort
    /// was slower.
    pub fn diff(&self) -> i64 {
        units::seconds_as_number(&(self.top_effort.elapsed_time - self.this_effort.elapsed_time))
    }
}

impl CsvRecord for SegmentRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "id", "name", "starred", "bike", "distance", "time", "pr", "diff",
    ];

    fn record(&self) -> Result<Vec<String>, UnitError> {
        Ok(vec![
            self.id().to_string(),
            self.name().to_string(),
            self.starred().to_string(),
            self.bike().to_string(),
            self.distance()?,
            self.time().to_string(),
            self.pr().to_string(),
            self.diff().to_string(),
        ])
    }
}
