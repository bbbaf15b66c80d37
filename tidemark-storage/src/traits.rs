//! Core listing trait definition.
//!
//! The `PartitionLister` trait is the seam between the query engine and the
//! object store: the engine renders a concrete prefix per polling step and
//! asks the lister for everything underneath it.

use async_trait::async_trait;

use crate::error::Result;

/// One object under a listed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Full object key
    pub key: String,
    /// Size in bytes
    pub size: i64,
}

/// Read-only listing interface over an object store.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`; independent sub-queries run
/// concurrently against the same lister.
///
/// # Semantics
///
/// Listing is treated as a pure, idempotent, side-effect-free read. A failed
/// call is fatal to the query that issued it, so implementations should not
/// mask errors by returning partial results.
#[async_trait]
pub trait PartitionLister: Send + Sync {
    /// List the objects in `bucket` whose key starts with `prefix`.
    ///
    /// Results are capped at one page of the underlying listing call, so
    /// very large partitions may undercount.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectSummary>>;

    /// Get a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_summary_debug() {
        let object = ObjectSummary {
            key: "client=1000/2021-02-10/part-00000.parquet".to_string(),
            size: 1024,
        };
        let debug = format!("{:?}", object);
        assert!(debug.contains("client=1000"));
        assert!(debug.contains("1024"));
    }
}
