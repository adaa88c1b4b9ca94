//! The Strava API seen from the report layer.
//!
//! [`StravaApi`] abstracts over the HTTP client so the assemblers can be driven
//! by an in-memory fake in tests. Listing endpoints return lazy iterators that
//! fetch one page at a time; a sequence is consumed once and cannot be restarted.

use crate::domain::{Activity, ActivityId, Athlete, AthleteId, Segment, SegmentEffort, SegmentId};
use thiserror::Error;

/// Errors from talking to the Strava API.
///
/// Every variant is fatal to the current command; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("access token rejected by Strava (HTTP 401): {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("response format changed: {0}")]
    Decode(String),
}

/// A lazily paginated sequence of API results.
pub type ApiIter<'a, T> = Box<dyn Iterator<Item = Result<T, ApiError>> + 'a>;

/// Read-only view of the Strava API used by the reports.
pub trait StravaApi {
    /// The authenticated athlete, including their bikes.
    fn athlete(&self) -> Result<Athlete, ApiError>;

    /// The athlete's activities, most recent first. `None` means all of them.
    fn activities(&self, limit: Option<usize>) -> ApiIter<'_, Activity>;

    /// A single activity. With `include_all_efforts` the result carries every
    /// segment effort of the ride.
    fn activity(&self, id: ActivityId, include_all_efforts: bool) -> Result<Activity, ApiError>;

    fn segment(&self, id: SegmentId) -> Result<Segment, ApiError>;

    /// Efforts on a segment by one athlete, fastest first.
    fn segment_efforts(
        &self,
        segment_id: SegmentId,
        athlete_id: AthleteId,
        limit: Option<usize>,
    ) -> ApiIter<'_, SegmentEffort>;
}
