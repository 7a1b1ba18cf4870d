use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-day accumulated metric values, keyed by `YYYY-MM-DD`.
///
/// ISO date keys make the `BTreeMap` ordering chronological, so "most
/// recent" is always the last entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals(BTreeMap<String, f64>);

impl DailyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, day: &str, value: f64) {
        *self.0.entry(day.to_string()).or_insert(0.0) += value;
    }

    pub fn get(&self, day: &str) -> Option<f64> {
        self.0.get(day).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last fully closed billing day and its accumulated value.
    ///
    /// The most recent day in an export is typically still accumulating, so
    /// with two or more days present the second-most-recent wins. With a
    /// single day there is nothing better to offer, so it is returned as-is.
    pub fn last_complete_day(&self) -> Option<(&str, f64)> {
        let mut days = self.0.iter().rev();
        let newest = days.next()?;
        let (day, value) = days.next().unwrap_or(newest);
        Some((day.as_str(), *value))
    }
}

impl<const N: usize> From<[(&str, f64); N]> for DailyTotals {
    fn from(entries: [(&str, f64); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(day, value)| (day.to_string(), value))
                .collect(),
        )
    }
}

/// Result of one report run, serialized to the caller as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub total_spend: f64,
    pub last_day_spend: f64,
    pub latest_day: Option<String>,
    pub metric_used: String,
    pub latest_report: String,
    pub report_timestamp: String,
    pub old_reports_deleted: Vec<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::DailyTotals;

    #[test]
    fn last_complete_day_prefers_second_most_recent() {
        let totals = DailyTotals::from([("2025-09-01", 10.0), ("2025-09-02", 5.0)]);
        assert_eq!(totals.last_complete_day(), Some(("2025-09-01", 10.0)));
    }

    #[test]
    fn last_complete_day_falls_back_to_single_day() {
        let totals = DailyTotals::from([("2025-09-01", 7.5)]);
        assert_eq!(totals.last_complete_day(), Some(("2025-09-01", 7.5)));
    }

    #[test]
    fn last_complete_day_is_none_when_empty() {
        let totals = DailyTotals::new();
        assert!(totals.is_empty());
        assert_eq!(totals.last_complete_day(), None);
    }

    #[test]
    fn add_accumulates_per_day() {
        let mut totals = DailyTotals::new();
        totals.add("2025-09-01", 1.5);
        totals.add("2025-09-01", 2.0);
        totals.add("2025-09-02", 4.0);
        assert!(!totals.is_empty());
        assert_eq!(totals.get("2025-09-01"), Some(3.5));
        assert_eq!(totals.get("2025-09-02"), Some(4.0));
        assert_eq!(totals.len(), 2);
    }
}
