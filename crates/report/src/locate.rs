use tracing::debug;

use cur_store::ObjectStore;

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};

/// The newest export chain: month partition, report partition inside it,
/// and the archive key inside that.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedReport {
    pub month_prefix: String,
    pub report_prefix: String,
    pub report_timestamp: String,
    pub archive_key: String,
}

/// Walk the three partition levels, taking the lexicographically greatest
/// entry at each. Correctness rests on the export producer naming
/// partitions so that lexicographic order is chronological order.
pub async fn locate_latest(
    store: &dyn ObjectStore,
    config: &ReportConfig,
) -> Result<LocatedReport> {
    let delimiter = config.delimiter.as_str();

    let months = store.list(&config.prefix, Some(delimiter)).await?;
    let month_prefix = months
        .common_prefixes
        .into_iter()
        .max()
        .ok_or(ReportError::NoMonthPartitions)?;

    let reports = store.list(&month_prefix, Some(delimiter)).await?;
    let report_prefix = reports
        .common_prefixes
        .into_iter()
        .max()
        .ok_or(ReportError::NoReportPartitions)?;
    let report_timestamp = final_segment(&report_prefix, delimiter).to_string();

    let objects = store.list(&report_prefix, None).await?;
    let archive_key = objects
        .keys
        .into_iter()
        .filter(|key| key.ends_with(&config.archive_suffix))
        .max()
        .ok_or(ReportError::NoArchiveFound)?;

    debug!(%month_prefix, %report_prefix, %archive_key, "located latest report");
    Ok(LocatedReport {
        month_prefix,
        report_prefix,
        report_timestamp,
        archive_key,
    })
}

fn final_segment<'a>(prefix: &'a str, delimiter: &str) -> &'a str {
    let trimmed = prefix.trim_end_matches(delimiter);
    trimmed.rsplit(delimiter).next().unwrap_or(trimmed)
}
