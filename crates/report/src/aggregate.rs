use std::io::{BufReader, Cursor};

use tracing::debug;
use zip::ZipArchive;

use cur_core::DailyTotals;
use cur_store::ObjectStore;

use crate::error::{ReportError, Result};
use crate::metric::{CurColumns, metric_value};

/// Running totals produced from one archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub total_spend: f64,
    pub daily_totals: DailyTotals,
}

/// Fetch the archive, open its first member as headered CSV, and fold every
/// record into a running total plus per-day totals for the given metric.
///
/// The compressed archive is buffered whole; the CSV member itself is
/// streamed record by record. Rows without a usage-start date still count
/// toward the total but not toward any day.
pub async fn aggregate_archive(
    store: &dyn ObjectStore,
    archive_key: &str,
    metric: &str,
) -> Result<Aggregation> {
    let bytes = store.get(archive_key).await?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    if archive.is_empty() {
        return Err(ReportError::ArchiveEmpty);
    }

    let member = archive.by_index(0)?;
    debug!(archive_key, member = %member.name(), metric, "aggregating archive member");

    let mut reader = csv::Reader::from_reader(BufReader::new(member));
    let columns = CurColumns::from_headers(reader.headers()?);

    let mut aggregation = Aggregation::default();
    for record in reader.records() {
        let record = record?;
        let value = metric_value(&columns, &record, metric);
        aggregation.total_spend += value;
        if let Some(day) = columns.usage_day(&record) {
            aggregation.daily_totals.add(day, value);
        }
    }

    Ok(aggregation)
}
