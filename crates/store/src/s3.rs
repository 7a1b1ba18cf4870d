use async_trait::async_trait;
use tracing::debug;

use crate::{Listing, ObjectStore, Result, StoreError};

/// Connection settings for the S3 backend. `endpoint` and
/// `force_path_style` exist for S3-compatible services (MinIO, R2, …).
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
}

pub struct S3Store {
    bucket: String,
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub async fn new(config: S3Config) -> Self {
        let mut sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            sdk_config = sdk_config.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = sdk_config.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            s3_config = s3_config.endpoint_url(endpoint);
        }
        if config.force_path_style {
            s3_config = s3_config.force_path_style(true);
        }

        Self {
            bucket: config.bucket,
            client: aws_sdk_s3::Client::from_conf(s3_config.build()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list(&self, prefix: &str, delimiter: Option<&str>) -> Result<Listing> {
        debug!(bucket = %self.bucket, prefix, delimiter, "listing objects");
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .set_delimiter(delimiter.map(str::to_string))
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        Ok(Listing {
            common_prefixes: response
                .common_prefixes()
                .iter()
                .filter_map(|group| group.prefix().map(str::to_string))
                .collect(),
            keys: response
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect(),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        debug!(bucket = %self.bucket, key, "fetching object");
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    StoreError::NotFound(key.to_string())
                } else {
                    StoreError::Backend(service_err.to_string())
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!(bucket = %self.bucket, key, "deleting object");
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        Ok(())
    }
}
