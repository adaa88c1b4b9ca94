//! Domain types for strava-pr.
//!
//! Everything here is a read-only snapshot of what the Strava API returned.

pub mod activity;
pub mod athlete;
pub mod ids;
pub mod segment;

pub use activity::{Activity, ActivityType};
pub use athlete::{Athlete, Bike};
pub use ids::{ActivityId, AthleteId, EffortId, GearId, SegmentId};
pub use segment::{Segment, SegmentEffort, SegmentRef};
