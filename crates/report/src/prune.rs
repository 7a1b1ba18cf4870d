use tracing::{debug, warn};

use cur_store::ObjectStore;

use crate::config::ReportConfig;
use crate::error::Result;

/// Delete every report partition under `month_prefix` except the
/// lexicographically last one, which is the partition the current run just
/// processed (barring a newer export landing between locate and prune).
///
/// Pruning is best-effort: a failed per-object delete is logged and
/// iteration continues. Returns the pruned partition prefixes in sorted
/// order; a partition is reported once its deletions have been initiated,
/// not re-verified afterwards.
pub async fn prune_old_reports(
    store: &dyn ObjectStore,
    config: &ReportConfig,
    month_prefix: &str,
) -> Result<Vec<String>> {
    let listing = store
        .list(month_prefix, Some(config.delimiter.as_str()))
        .await?;
    let mut partitions = listing.common_prefixes;
    partitions.sort();

    let Some((_latest, stale)) = partitions.split_last() else {
        return Ok(Vec::new());
    };

    let mut pruned = Vec::with_capacity(stale.len());
    for partition in stale {
        let objects = store.list(partition, None).await?;
        debug!(partition = %partition, objects = objects.keys.len(), "pruning stale report partition");
        for key in &objects.keys {
            if let Err(err) = store.delete(key).await {
                warn!(key = %key, error = %err, "failed to delete stale report object");
            }
        }
        pruned.push(partition.clone());
    }

    Ok(pruned)
}
