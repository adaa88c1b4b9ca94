//! strava-pr reports — row views, CSV sink, and the three report assemblers.
//!
//! Reports:
//! - `list`: one row per activity
//! - `summary`: ride distance and count per bike
//! - `ride`: each segment of one ride against the athlete's best effort

pub mod assemble;
pub mod error;
pub mod row;
pub mod sink;

pub use assemble::{ReportContext, RideSelection};
pub use error::ReportError;
pub use row::{CsvRecord, ReportKind, RideRow, SegmentRow, SummaryRow};
pub use sink::{flush_report, CsvSink};
