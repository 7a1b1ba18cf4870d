use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Listing, ObjectStore, Result, StoreError};

/// In-memory store used by tests. Keys live in a `BTreeMap`, so listings
/// come back already sorted, matching S3's lexicographic key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, content: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .expect("memory store lock")
            .insert(key.to_string(), content.into());
    }

    /// Remaining keys, sorted. Test helper.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .expect("memory store lock")
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str, delimiter: Option<&str>) -> Result<Listing> {
        let objects = self.objects.lock().expect("memory store lock");
        let mut listing = Listing::default();
        let mut groups = BTreeSet::new();

        for key in objects.keys() {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            match delimiter {
                Some(delim) => match rest.find(delim) {
                    Some(pos) => {
                        groups.insert(key[..prefix.len() + pos + delim.len()].to_string());
                    }
                    None => listing.keys.push(key.clone()),
                },
                None => listing.keys.push(key.clone()),
            }
        }

        listing.common_prefixes = groups.into_iter().collect();
        Ok(listing)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .lock()
            .expect("memory store lock")
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.objects.lock().expect("memory store lock").remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::ObjectStore;

    #[tokio::test]
    async fn list_groups_keys_by_delimiter() {
        let store = MemoryStore::new();
        store.insert("reports/2025-09/a/data.zip", "x");
        store.insert("reports/2025-09/b/data.zip", "x");
        store.insert("reports/2025-09/manifest.json", "x");

        let listing = store.list("reports/2025-09/", Some("/")).await.expect("list");
        assert_eq!(
            listing.common_prefixes,
            vec![
                "reports/2025-09/a/".to_string(),
                "reports/2025-09/b/".to_string()
            ]
        );
        assert_eq!(listing.keys, vec!["reports/2025-09/manifest.json".to_string()]);
    }

    #[tokio::test]
    async fn list_without_delimiter_returns_all_keys() {
        let store = MemoryStore::new();
        store.insert("reports/a/1.zip", "x");
        store.insert("reports/a/2.zip", "x");
        store.insert("other/3.zip", "x");

        let listing = store.list("reports/", None).await.expect("list");
        assert_eq!(
            listing.keys,
            vec!["reports/a/1.zip".to_string(), "reports/a/2.zip".to_string()]
        );
        assert!(listing.common_prefixes.is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        store.insert("reports/a/1.zip", "x");
        store.delete("reports/a/1.zip").await.expect("delete");
        store.delete("reports/a/1.zip").await.expect("delete again");
        assert!(store.keys().is_empty());
    }
}
