//! strava-pr core — domain types, unit formatting, caches, bike registry,
//! and the Strava API client.
//!
//! This crate holds everything below the reports:
//! - Domain snapshots (athlete, bikes, activities, segments, efforts)
//! - Meter/second to report-unit conversion
//! - Per-run entity caches keyed by id
//! - The [`api::StravaApi`] trait and its blocking HTTP implementation
//! - Config file and environment loading

pub mod api;
pub mod bikes;
pub mod cache;
pub mod config;
pub mod domain;
pub mod pagination;
pub mod strava;
pub mod units;

pub use api::{ApiError, ApiIter, StravaApi};
pub use bikes::BikeRegistry;
pub use cache::{EntityCache, EntityCaches};
pub use config::{Config, ConfigError};
pub use strava::StravaClient;
pub use units::UnitError;
