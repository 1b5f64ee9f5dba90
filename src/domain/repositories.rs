//! Data source interfaces for the list screens
//!
//! The list engine works on fully fetched, in-memory collections. Where those
//! collections come from (REST calls, a mock adapter, fixtures) is hidden
//! behind [`EntitySource`].

use anyhow::Result;
use async_trait::async_trait;

/// Provider of the complete collection for one entity type. The entity type
/// parameter selects which collection is fetched.
#[async_trait]
pub trait EntitySource<T>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>>;
}
