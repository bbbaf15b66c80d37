//! In-memory listing backend for tests and local development.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::traits::{ObjectSummary, PartitionLister};

/// In-memory object listing backend.
///
/// Objects are held per bucket in a sorted map so listings come back in key
/// order, matching how S3 returns keys.
#[derive(Debug, Default)]
pub struct MemoryLister {
    buckets: RwLock<BTreeMap<String, BTreeMap<String, i64>>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, creating the bucket on first use.
    pub fn put_object(&self, bucket: &str, key: &str, size: i64) {
        self.buckets
            .write()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), size);
    }

    /// Number of objects in a bucket.
    pub fn object_count(&self, bucket: &str) -> usize {
        self.buckets
            .read()
            .get(bucket)
            .map(|objects| objects.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl PartitionLister for MemoryLister {
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectSummary>> {
        let buckets = self.buckets.read();
        let Some(objects) = buckets.get(bucket) else {
            return Ok(Vec::new());
        };

        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, size)| ObjectSummary {
                key: key.clone(),
                size: *size,
            })
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
