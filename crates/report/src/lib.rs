mod aggregate;
mod config;
mod error;
mod locate;
mod metric;
mod prune;
mod run;

pub use aggregate::{Aggregation, aggregate_archive};
pub use config::ReportConfig;
pub use error::{ApiError, ReportError, Result};
pub use locate::{LocatedReport, locate_latest};
pub use metric::{CurColumns, DEFAULT_METRIC, metric_value};
pub use prune::prune_old_reports;
pub use run::run_report;
