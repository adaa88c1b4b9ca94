//! Blocking HTTP client for the Strava v3 API.
//!
//! Requests are sent one at a time on the calling thread. Failures are mapped to
//! [`ApiError`] and returned as-is; there is no retry or rate-limit handling.

use crate::api::{ApiError, ApiIter, StravaApi};
use crate::domain::{
    Activity, ActivityId, ActivityType, Athlete, AthleteId, Bike, EffortId, GearId, Segment,
    SegmentEffort, SegmentId, SegmentRef,
};
use crate::pagination::Pages;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::blocking::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Strava API client authenticated with a bearer token.
pub struct StravaClient {
    http: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

impl StravaClient {
    pub fn new(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("strava-pr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> RequestBuilder {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.access_token);
        if query.is_empty() {
            request
        } else {
            request.query(query)
        }
    }

    fn athlete_request(&self) -> RequestBuilder {
        self.get("/athlete", &[])
    }

    fn activities_request(&self, page: usize, per_page: usize) -> RequestBuilder {
        self.get(
            "/athlete/activities",
            &[("page", page.to_string()), ("per_page", per_page.to_string())],
        )
    }

    fn activity_request(&self, id: ActivityId, include_all_efforts: bool) -> RequestBuilder {
        self.get(
            &format!("/activities/{id}"),
            &[("include_all_efforts", include_all_efforts.to_string())],
        )
    }

    fn segment_request(&self, id: SegmentId) -> RequestBuilder {
        self.get(&format!("/segments/{id}"), &[])
    }

    /// With `athlete_id` set the endpoint orders efforts by elapsed time.
    fn segment_efforts_request(
        &self,
        segment_id: SegmentId,
        athlete_id: AthleteId,
        page: usize,
        per_page: usize,
    ) -> RequestBuilder {
        self.get(
            &format!("/segments/{segment_id}/all_efforts"),
            &[
                ("athlete_id", athlete_id.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::Network(format!("invalid request: {e}")))?;
        let url = request.url().to_string();
        debug!(%url, "GET");

        let resp = self
            .http
            .execute(request)
            .map_err(|e| ApiError::Network(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ApiError::Network(format!("failed to read body from {url}: {e}")))?;

        if let Some(err) = status_error(status, &url, &body) {
            return Err(err);
        }

        debug!(%url, bytes = body.len(), "response");
        decode(&url, &body)
    }
}

/// Map a non-success status to its [`ApiError`]. `None` for 2xx.
fn status_error(status: StatusCode, url: &str, body: &str) -> Option<ApiError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(body.to_string()),
        StatusCode::NOT_FOUND => ApiError::NotFound(url.to_string()),
        _ => ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body: body.to_string(),
        },
    })
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("{url}: {e}")))
}

impl StravaApi for StravaClient {
    fn athlete(&self) -> Result<Athlete, ApiError> {
        let athlete: StravaAthlete = self.send_json(self.athlete_request())?;
        Ok(athlete.into())
    }

    fn activities(&self, limit: Option<usize>) -> ApiIter<'_, Activity> {
        Box::new(Pages::new(limit, move |page, per_page| {
            let batch: Vec<StravaActivity> =
                self.send_json(self.activities_request(page, per_page))?;
            Ok(batch.into_iter().map(Activity::from).collect())
        }))
    }

    fn activity(&self, id: ActivityId, include_all_efforts: bool) -> Result<Activity, ApiError> {
        let activity: StravaActivity =
            self.send_json(self.activity_request(id, include_all_efforts))?;
        Ok(activity.into())
    }

    fn segment(&self, id: SegmentId) -> Result<Segment, ApiError> {
        let segment: StravaSegment = self.send_json(self.segment_request(id))?;
        Ok(segment.into())
    }

    fn segment_efforts(
        &self,
        segment_id: SegmentId,
        athlete_id: AthleteId,
        limit: Option<usize>,
    ) -> ApiIter<'_, SegmentEffort> {
        Box::new(Pages::new(limit, move |page, per_page| {
            let batch: Vec<StravaEffort> = self.send_json(
                self.segment_efforts_request(segment_id, athlete_id, page, per_page),
            )?;
            Ok(batch.into_iter().map(SegmentEffort::from).collect())
        }))
    }
}

// ─── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StravaAthlete {
    id: u64,
    #[serde(default)]
    bikes: Option<Vec<StravaGear>>,
}

#[derive(Debug, Deserialize)]
struct StravaGear {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StravaActivity {
    id: u64,
    name: String,
    #[serde(rename = "type")]
    activity_type: String,
    start_date_local: DateTime<Utc>,
    #[serde(default)]
    distance: f64,
    elapsed_time: i64,
    moving_time: i64,
    gear_id: Option<String>,
    #[serde(default)]
    segment_efforts: Option<Vec<StravaEffort>>,
}

#[derive(Debug, Deserialize)]
struct StravaEffort {
    id: u64,
    elapsed_time: i64,
    segment: StravaSegmentSummary,
    activity: StravaMetaActivity,
}

#[derive(Debug, Deserialize)]
struct StravaSegmentSummary {
    id: u64,
    name: String,
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct StravaMetaActivity {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct StravaSegment {
    id: u64,
    name: String,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    starred: bool,
}

impl From<StravaAthlete> for Athlete {
    fn from(strava: StravaAthlete) -> Self {
        Self {
            id: AthleteId(strava.id),
            bikes: strava
                .bikes
                .unwrap_or_default()
                .into_iter()
                .map(|g| Bike {
                    name: g.name.unwrap_or_default(),
                    id: GearId(g.id),
                })
                .collect(),
        }
    }
}

impl From<StravaActivity> for Activity {
    fn from(strava: StravaActivity) -> Self {
        Self {
            id: ActivityId(strava.id),
            name: strava.name,
            activity_type: ActivityType::from_api(&strava.activity_type),
            // Strava encodes the local wall-clock time with a `Z` suffix.
            start_date: strava.start_date_local.naive_utc(),
            distance: strava.distance,
            elapsed_time: TimeDelta::seconds(strava.elapsed_time),
            moving_time: TimeDelta::seconds(strava.moving_time),
            gear_id: strava.gear_id.map(GearId),
            segment_efforts: strava
                .segment_efforts
                .map(|efforts| efforts.into_iter().map(SegmentEffort::from).collect()),
        }
    }
}

impl From<StravaEffort> for SegmentEffort {
    fn from(strava: StravaEffort) -> Self {
        Self {
            id: EffortId(strava.id),
            segment: SegmentRef {
                id: SegmentId(strava.segment.id),
                name: strava.segment.name,
                distance: strava.segment.distance,
            },
            activity_id: ActivityId(strava.activity.id),
            elapsed_time: TimeDelta::seconds(strava.elapsed_time),
        }
    }
}

impl From<StravaSegment> for Segment {
    fn from(strava: StravaSegment) -> Self {
        Self {
            id: SegmentId(strava.id),
            name: strava.name,
            distance: strava.distance,
            starred: strava.starred,
        }
    }
}
