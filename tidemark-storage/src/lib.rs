//! Object-storage listing backends for tidemark.
//!
//! This crate provides the `PartitionLister` trait that the query engine
//! uses to fetch per-prefix statistics. A *partition* is the set of objects
//! whose key starts with one concrete rendered prefix; the engine only ever
//! needs the keys and sizes under a prefix, never object contents, so the
//! trait is a pure read-only listing interface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Query Engine                            │
//! │            ┌──────────────────┐          │
//! │            │ PartitionLister  │  ← trait │
//! │            └────────┬─────────┘          │
//! │            ┌────────┴─────────┐          │
//! │            ▼                  ▼          │
//! │      ┌──────────┐      ┌──────────┐      │
//! │      │   S3     │      │  Memory  │      │
//! │      └──────────┘      └──────────┘      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use tidemark_storage::{PartitionLister, S3Config, S3Lister};
//!
//! # async fn example() -> tidemark_storage::Result<()> {
//! // AWS S3: S3Lister::new(S3Config::aws("us-east-1"))
//! // MinIO / S3-compatible:
//! let lister = S3Lister::new(
//!     S3Config::minio("http://localhost:9000")
//!         .with_credentials("minioadmin", "minioadmin"),
//! );
//!
//! let objects = lister.list_objects("metrics", "client=1000/2021-02-10").await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod s3;
mod traits;

pub use error::{Result, StorageError};
pub use memory::MemoryLister;
pub use s3::{S3Config, S3Lister};
pub use traits::{ObjectSummary, PartitionLister};
