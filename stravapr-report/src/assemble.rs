//! Report assembly.
//!
//! A [`ReportContext`] holds what a single command needs: the API handle, the
//! athlete and their bikes, and the per-run caches. Each report method writes a
//! header followed by its rows into a [`CsvSink`]. Any API error ends the
//! report immediately; rows already written stay in the sink.

use crate::error::ReportError;
use crate::row::{ReportKind, RideRow, SegmentRow, SummaryRow};
use crate::sink::CsvSink;
use std::collections::HashMap;
use stravapr_core::bikes::BikeRegistry;
use stravapr_core::cache::EntityCaches;
use stravapr_core::domain::{ActivityId, Athlete, GearId};
use stravapr_core::StravaApi;
use tracing::{debug, info, warn};

/// Which ride the segment report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideSelection {
    /// The athlete's most recent activity.
    MostRecent,
    Ride(ActivityId),
}

impl RideSelection {
    /// Accepts zero or one ride id. More is a usage error.
    pub fn from_ids(ids: &[u64]) -> Result<Self, ReportError> {
        match ids {
            [] => Ok(RideSelection::MostRecent),
            [id] => Ok(RideSelection::Ride(ActivityId(*id))),
            _ => Err(ReportError::Usage(format!(
                "ride takes at most one RIDE_ID, got {}",
                ids.len()
            ))),
        }
    }
}

pub struct ReportContext<'a> {
    api: &'a dyn StravaApi,
    athlete: Athlete,
    bikes: BikeRegistry,
    caches: EntityCaches,
}

impl<'a> ReportContext<'a> {
    /// Fetch the athlete profile and start with empty caches.
    pub fn new(api: &'a dyn StravaApi) -> Result<Self, ReportError> {
        let athlete = api.athlete()?;
        info!(athlete = %athlete.id, bikes = athlete.bikes.len(), "loaded athlete");
        Ok(Self::with_athlete(api, athlete))
    }

    pub fn with_athlete(api: &'a dyn StravaApi, athlete: Athlete) -> Self {
        let bikes = BikeRegistry::build(&athlete);
        Self {
            api,
            athlete,
            bikes,
            caches: EntityCaches::new(),
        }
    }

    pub fn caches(&self) -> &EntityCaches {
        &self.caches
    }

    /// One row per activity, in the order the API returns them.
    pub fn list_rides(
        &mut self,
        limit: Option<usize>,
        sink: &mut CsvSink,
    ) -> Result<(), ReportError> {
        sink.write_header(ReportKind::List.header())?;
        for activity in self.api.activities(limit) {
            let activity = activity?;
            sink.write_record(&RideRow::new(&self.bikes, &activity))?;
        }
        info!(rows = sink.rows_written(), "list complete");
        Ok(())
    }

    /// Total ride distance and ride count per bike.
    ///
    /// Only activities of type `Ride` count. Bikes appear in the order they
    /// are first seen, which is most recently used first.
    pub fn summarize_bikes(&mut self, sink: &mut CsvSink) -> Result<(), ReportError> {
        sink.write_header(ReportKind::Summary.header())?;

        let mut order: Vec<Option<GearId>> = Vec::new();
        let mut totals: HashMap<Option<GearId>, (f64, u32)> = HashMap::new();
        for activity in self.api.activities(None) {
            let activity = activity?;
            if !activity.activity_type.is_ride() {
                continue;
            }
            let entry = totals.entry(activity.gear_id.clone()).or_insert_with(|| {
                order.push(activity.gear_id.clone());
                (0.0, 0)
            });
            entry.0 += activity.distance;
            entry.1 += 1;
        }

        for gear_id in &order {
            let (meters, rides) = totals[gear_id];
            let row = SummaryRow {
                bike: self.bikes.summary_label(gear_id.as_ref()),
                meters,
                rides,
            };
            sink.write_record(&row)?;
        }
        info!(bikes = order.len(), "summary complete");
        Ok(())
    }

    /// Each segment effort of a ride next to the athlete's best time on that
    /// segment.
    ///
    /// Efforts on segments with no recorded best for the athlete are skipped.
    pub fn ride_segments(
        &mut self,
        selection: RideSelection,
        sink: &mut CsvSink,
    ) -> Result<(), ReportError> {
        sink.write_header(ReportKind::Ride.header())?;
        let api = self.api;

        let ride_id = match selection {
            RideSelection::Ride(id) => id,
            RideSelection::MostRecent => match api.activities(Some(1)).next() {
                Some(latest) => {
                    let latest = latest?;
                    let id = latest.id;
                    self.caches.activities.insert(id, latest);
                    id
                }
                None => {
                    warn!("athlete has no activities");
                    return Ok(());
                }
            },
        };

        let efforts = self
            .caches
            .activities
            .get_or_fetch_detailed(ride_id, |id| api.activity(id, true))?
            .efforts()
            .to_vec();
        info!(ride = %ride_id, efforts = efforts.len(), "comparing segment efforts");

        for effort in &efforts {
            let segment_id = effort.segment.id;
            let segment = self
                .caches
                .segments
                .get_or_fetch(segment_id, |id| api.segment(id))?;

            let top = match api
                .segment_efforts(segment_id, self.athlete.id, Some(1))
                .next()
            {
                Some(top) => top?,
                None => {
                    warn!(segment = %segment_id, "no recorded effort for athlete, skipping");
                    continue;
                }
            };
            debug!(segment = %segment_id, top_activity = %top.activity_id, "top effort");

            let owner = self
                .caches
                .activities
                .get_or_fetch(top.activity_id, |id| api.activity(id, false))?;

            let row = SegmentRow::new(&self.bikes, owner, effort, &top, segment);
            sink.write_record(&row)?;
        }
        Ok(())
    }
}
