use csv::StringRecord;

pub const DEFAULT_METRIC: &str = "unblendedcost";

/// Column positions of the CUR fields the metrics read, resolved once from
/// the header row so the per-record loop stays index lookups.
#[derive(Debug, Clone, Default)]
pub struct CurColumns {
    usage_start: Option<usize>,
    unblended_cost: Option<usize>,
    usage_amount: Option<usize>,
    unblended_rate: Option<usize>,
    public_on_demand_cost: Option<usize>,
    amortized_cost: Option<usize>,
    blended_cost: Option<usize>,
}

impl CurColumns {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|header| header == name);
        Self {
            usage_start: position("lineItem/UsageStartDate"),
            unblended_cost: position("lineItem/UnblendedCost"),
            usage_amount: position("lineItem/UsageAmount"),
            unblended_rate: position("lineItem/UnblendedRate"),
            public_on_demand_cost: position("pricing/publicOnDemandCost"),
            amortized_cost: position("lineItem/AmortizedCost"),
            blended_cost: position("lineItem/BlendedCost"),
        }
    }

    /// Date portion of the row's usage-start timestamp: everything before
    /// the first `T`. `None` when the column is missing or the field empty.
    pub fn usage_day<'a>(&self, record: &'a StringRecord) -> Option<&'a str> {
        let raw = self.usage_start.and_then(|idx| record.get(idx))?;
        if raw.is_empty() {
            return None;
        }
        Some(raw.split('T').next().unwrap_or(raw))
    }
}

fn numeric(record: &StringRecord, column: Option<usize>) -> f64 {
    column
        .and_then(|idx| record.get(idx))
        .and_then(|field| field.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// One row's contribution for the requested metric. Missing fields and
/// unparsable numbers count as zero; unknown metric names are not an error
/// and contribute zero.
pub fn metric_value(columns: &CurColumns, record: &StringRecord, metric: &str) -> f64 {
    match metric {
        "unblendedcost" => numeric(record, columns.unblended_cost),
        "UnblendedRateCalc" => {
            numeric(record, columns.usage_amount) * numeric(record, columns.unblended_rate)
        }
        "pricing/publicOnDemandCost" => numeric(record, columns.public_on_demand_cost),
        "AmortizedCost" => numeric(record, columns.amortized_cost),
        "BlendedCost" => numeric(record, columns.blended_cost),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::{CurColumns, metric_value};
    use csv::StringRecord;

    fn fixture() -> (CurColumns, StringRecord) {
        let headers = StringRecord::from(vec![
            "lineItem/UsageStartDate",
            "lineItem/UnblendedCost",
            "lineItem/UsageAmount",
            "lineItem/UnblendedRate",
            "pricing/publicOnDemandCost",
            "lineItem/AmortizedCost",
            "lineItem/BlendedCost",
        ]);
        let record = StringRecord::from(vec![
            "2025-09-01T00:00:00Z",
            "1.25",
            "4",
            "0.5",
            "3.5",
            "1.1",
            "1.3",
        ]);
        (CurColumns::from_headers(&headers), record)
    }

    #[test]
    fn recognized_metrics_follow_their_formulas() {
        let (columns, record) = fixture();
        assert_eq!(metric_value(&columns, &record, "unblendedcost"), 1.25);
        assert_eq!(metric_value(&columns, &record, "UnblendedRateCalc"), 2.0);
        assert_eq!(
            metric_value(&columns, &record, "pricing/publicOnDemandCost"),
            3.5
        );
        assert_eq!(metric_value(&columns, &record, "AmortizedCost"), 1.1);
        assert_eq!(metric_value(&columns, &record, "BlendedCost"), 1.3);
    }

    #[test]
    fn unknown_metric_is_zero() {
        let (columns, record) = fixture();
        assert_eq!(metric_value(&columns, &record, "NetAmortizedCost"), 0.0);
        assert_eq!(metric_value(&columns, &record, ""), 0.0);
    }

    #[test]
    fn unparsable_values_are_zero() {
        let headers = StringRecord::from(vec!["lineItem/UnblendedCost"]);
        let columns = CurColumns::from_headers(&headers);
        for field in ["", "abc", "1.2.3"] {
            let record = StringRecord::from(vec![field]);
            assert_eq!(metric_value(&columns, &record, "unblendedcost"), 0.0);
        }
    }

    #[test]
    fn missing_columns_are_zero() {
        let headers = StringRecord::from(vec!["identity/LineItemId"]);
        let columns = CurColumns::from_headers(&headers);
        let record = StringRecord::from(vec!["abc123"]);
        assert_eq!(metric_value(&columns, &record, "unblendedcost"), 0.0);
        assert_eq!(metric_value(&columns, &record, "UnblendedRateCalc"), 0.0);
    }

    #[test]
    fn usage_day_truncates_at_time_separator() {
        let (columns, record) = fixture();
        assert_eq!(columns.usage_day(&record), Some("2025-09-01"));

        let headers = StringRecord::from(vec!["lineItem/UsageStartDate"]);
        let columns = CurColumns::from_headers(&headers);
        assert_eq!(columns.usage_day(&StringRecord::from(vec![""])), None);
        assert_eq!(
            columns.usage_day(&StringRecord::from(vec!["2025-09-01"])),
            Some("2025-09-01")
        );
    }
}
