use cur_core::RunReport;
use cur_store::ObjectStore;

use crate::aggregate::aggregate_archive;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::locate::locate_latest;
use crate::prune::prune_old_reports;

/// Run the full pipeline: locate the newest archive, aggregate it by
/// `metric`, pick the last complete day, and prune superseded report
/// partitions when configured to.
pub async fn run_report(
    store: &dyn ObjectStore,
    config: &ReportConfig,
    metric: &str,
) -> Result<RunReport> {
    let located = locate_latest(store, config).await?;
    let aggregation = aggregate_archive(store, &located.archive_key, metric).await?;

    let (latest_day, last_day_spend) = match aggregation.daily_totals.last_complete_day() {
        Some((day, value)) => (Some(day.to_string()), value),
        None => (None, 0.0),
    };

    let old_reports_deleted = if config.delete_old_reports {
        prune_old_reports(store, config, &located.month_prefix).await?
    } else {
        Vec::new()
    };

    Ok(RunReport {
        total_spend: rounded(aggregation.total_spend, 2),
        last_day_spend: rounded(last_day_spend, 3),
        latest_day,
        metric_used: metric.to_string(),
        latest_report: located.archive_key,
        report_timestamp: located.report_timestamp,
        old_reports_deleted,
        message: "Processed latest CUR report successfully".to_string(),
    })
}

fn rounded(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::rounded;

    #[test]
    fn rounds_to_requested_places() {
        assert_eq!(rounded(3.14159, 2), 3.14);
        assert_eq!(rounded(1.2399, 3), 1.24);
        assert_eq!(rounded(-3.14159, 2), -3.14);
        assert_eq!(rounded(2.0, 2), 2.0);
    }
}
