//! S3-compatible listing backend.
//!
//! Uses the `object_store` crate for S3, MinIO, and other S3-compatible
//! services.
//!
//! # Configuration
//!
//! ```toml
//! [storage.s3]
//! region = "us-east-1"
//!
//! # Optional: For MinIO or other S3-compatible services
//! endpoint = "http://localhost:9000"
//! force_path_style = true
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{Result, StorageError};
use crate::traits::{ObjectSummary, PartitionLister};

/// One page of the underlying listing call.
const PAGE_LIMIT: usize = 1_000;

/// Connection settings shared by every bucket the lister touches.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// AWS region
    pub region: String,
    /// Optional custom endpoint (for MinIO, etc.)
    pub endpoint: Option<String>,
    /// Use path-style requests (required for MinIO)
    pub force_path_style: bool,
    /// Allow HTTP (non-HTTPS) connections
    pub allow_http: bool,
    /// Optional access key (if not using IAM/env credentials)
    pub access_key_id: Option<String>,
    /// Optional secret key
    pub secret_access_key: Option<String>,
}

impl S3Config {
    /// Create a new S3 configuration for AWS.
    pub fn aws(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint: None,
            force_path_style: false,
            allow_http: false,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Create configuration for MinIO or other S3-compatible services.
    pub fn minio(endpoint: impl Into<String>) -> Self {
        Self {
            region: "us-east-1".to_string(),
            endpoint: Some(endpoint.into()),
            force_path_style: true,
            allow_http: true,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Set explicit credentials.
    ///
    /// When credentials are not set the default provider chain (environment,
    /// instance profile) applies.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }
}

/// S3-compatible listing backend.
///
/// `object_store` binds one bucket per store handle while queries name their
/// bucket per request, so handles are built lazily from the shared config and
/// cached per bucket for the lifetime of the lister.
pub struct S3Lister {
    config: S3Config,
    stores: RwLock<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl S3Lister {
    /// Create a new S3 listing backend from configuration.
    pub fn new(config: S3Config) -> Self {
        Self {
            config,
            stores: RwLock::new(HashMap::new()),
        }
    }

    fn store_for(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        if let Some(store) = self.stores.read().get(bucket) {
            return Ok(store.clone());
        }

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(&self.config.region)
            .with_allow_http(self.config.allow_http);

        if let Some(endpoint) = &self.config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        if self.config.force_path_style {
            builder = builder.with_virtual_hosted_style_request(false);
        }

        if let (Some(key_id), Some(secret)) =
            (&self.config.access_key_id, &self.config.secret_access_key)
        {
            builder = builder
                .with_access_key_id(key_id)
                .with_secret_access_key(secret);
        }

        let store: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| StorageError::Config(e.to_string()))?,
        );

        self.stores
            .write()
            .insert(bucket.to_string(), store.clone());
        Ok(store)
    }
}

impl std::fmt::Debug for S3Lister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Lister")
            .field("region", &self.config.region)
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}

#[async_trait]
impl PartitionLister for S3Lister {
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectSummary>> {
        let store = self.store_for(bucket)?;
        let obj_prefix = ObjectPath::from(prefix);
        debug!("Listing s3://{}/{}", bucket, prefix);

        let mut results = Vec::new();
        let mut stream = store.list(Some(&obj_prefix));

        while let Some(meta) = stream.try_next().await.map_err(StorageError::from)? {
            if results.len() == PAGE_LIMIT {
                warn!(
                    "Listing of s3://{}/{} truncated at {} keys, totals may undercount",
                    bucket, prefix, PAGE_LIMIT
                );
                break;
            }
            results.push(ObjectSummary {
                key: meta.location.to_string(),
                size: meta.size as i64,
            });
        }

        Ok(results)
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_config_aws() {
        let config = S3Config::aws("us-west-2");
        assert_eq!(config.region, "us-west-2");
        assert!(!config.force_path_style);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_s3_config_minio() {
        let config = S3Config::minio("http://localhost:9000");
        assert!(config.force_path_style);
        assert!(config.allow_http);
        assert_eq!(config.endpoint, Some("http://localhost:9000".to_string()));
    }

    #[test]
    fn test_s3_config_credentials() {
        let config = S3Config::aws("us-east-1").with_credentials("key", "secret");
        assert_eq!(config.access_key_id, Some("key".to_string()));
        assert_eq!(config.secret_access_key, Some("secret".to_string()));
    }

    #[test]
    fn test_store_handles_cached_per_bucket() {
        let lister = S3Lister::new(
            S3Config::minio("http://localhost:9000").with_credentials("minioadmin", "minioadmin"),
        );

        lister.store_for("bucket-a").unwrap();
        lister.store_for("bucket-a").unwrap();
        lister.store_for("bucket-b").unwrap();

        assert_eq!(lister.stores.read().len(), 2);
    }

    // Integration tests require actual S3/MinIO - run with:
    // cargo test -p tidemark-storage -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_s3_integration() {
        let lister = S3Lister::new(
            S3Config::minio("http://localhost:9000").with_credentials("minioadmin", "minioadmin"),
        );

        let objects = lister
            .list_objects("test-bucket", "client=1000/2021-02-10")
            .await
            .unwrap();
        assert!(objects.iter().all(|o| o.key.starts_with("client=1000")));
    }
}
