mod memory;
mod s3;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use s3::{S3Config, S3Store};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// One page of listing results: grouped common prefixes (when a delimiter
/// was given) and plain object keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub common_prefixes: Vec<String>,
    pub keys: Vec<String>,
}

/// The object-store seam the report pipeline runs against.
///
/// Only the three operations the pipeline needs: hierarchical listing,
/// whole-object fetch, and single-key delete.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List keys under `prefix`. With a delimiter, keys are grouped into
    /// common prefixes up to the next delimiter occurrence, like S3's
    /// `list-objects-v2 --delimiter`.
    async fn list(&self, prefix: &str, delimiter: Option<&str>) -> Result<Listing>;

    /// Fetch an object's full content.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Delete one object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
