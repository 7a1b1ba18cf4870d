use serde::{Deserialize, Serialize};

/// Pipeline settings, fixed at startup.
///
/// The export layout is `{prefix}{month}/{report-timestamp}/{archive}` with
/// partitions named so that lexicographic order matches chronological order.
/// That naming contract belongs to the export producer; nothing here
/// verifies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Root prefix the export cycle partitions live under.
    pub prefix: String,
    /// Hierarchy delimiter in the key namespace.
    pub delimiter: String,
    /// Suffix identifying archive artifacts inside a report partition.
    pub archive_suffix: String,
    /// Whether superseded report partitions are pruned after a run.
    pub delete_old_reports: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            delimiter: "/".to_string(),
            archive_suffix: ".zip".to_string(),
            delete_old_reports: true,
        }
    }
}
