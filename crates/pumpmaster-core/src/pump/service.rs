//! Data-source traits the list orchestrator depends on.

use crate::error::Result;
use crate::list::{FilterOptions, ListQuery, PumpPage};
use async_trait::async_trait;

/// Pump list data source.
///
/// Implementations resolve queries against whatever backs the fleet:
/// the in-repo fixture backend, or a real service.
#[async_trait]
pub trait PumpService: Send + Sync {
    /// Fetches one page of pumps matching `query`.
    ///
    /// # Returns
    /// - `Ok(PumpPage)`: the matching rows plus pagination metadata. A
    ///   page beyond the last one resolves to an empty `pumps` vec with
    ///   truthful totals, not an error.
    /// - `Err(_)`: the fetch failed.
    async fn fetch_page(&self, query: &ListQuery) -> Result<PumpPage>;

    /// Deletes the pumps with the given ids.
    ///
    /// # Returns
    /// - `Ok(removed)`: ids actually removed. All-or-nothing: if any id
    ///   is unknown the whole call fails.
    /// - `Err(_)`: nothing was deleted.
    async fn delete_pumps(&self, ids: &[String]) -> Result<Vec<String>>;
}

/// Optional dedicated source for the full filter-option universe.
///
/// Preferred over deriving options from a loaded page, which only sees
/// the current page's values.
#[async_trait]
pub trait FilterOptionsSource: Send + Sync {
    /// # Returns
    /// - `Ok(options)`: distinct values per dimension, sorted.
    /// - `Err(_)`: the source is unavailable; callers keep their
    ///   page-derived fallback.
    async fn filter_options(&self) -> Result<FilterOptions>;
}
