//! Fixture pump service.
//!
//! Serves pages of the seeded dataset, applying search and filters before
//! paginating the way the real backend would. Deletion mutates the
//! in-memory dataset so subsequent fetches see the new totals.

use async_trait::async_trait;
use pumpmaster_core::error::{PumpMasterError, Result};
use pumpmaster_core::list::{FilterOptions, FilterParams, ListQuery, PageInfo, PumpPage};
use pumpmaster_core::pump::{FilterOptionsSource, PumpDevice, PumpService};
use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::fixture::pumps::seeded_pumps;

/// Pump service backed by the seeded dataset.
pub struct FixturePumpService {
    dataset: RwLock<Vec<PumpDevice>>,
    latency: bool,
}

impl FixturePumpService {
    /// Creates the service over a fresh copy of the seeded pumps.
    pub fn new(latency: bool) -> Self {
        Self {
            dataset: RwLock::new(seeded_pumps()),
            latency,
        }
    }

    async fn simulate_delay(&self) {
        if !self.latency {
            return;
        }
        // 200-700ms, drawn before the await so the rng is not held across it
        let millis = rand::thread_rng().gen_range(200..=700);
        tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
    }

    /// Case-insensitive substring match over name, type and area.
    fn matches_search(pump: &PumpDevice, query: &str) -> bool {
        let needle = query.to_lowercase();
        pump.name.to_lowercase().contains(&needle)
            || pump.pump_type.to_lowercase().contains(&needle)
            || pump.area_block.to_lowercase().contains(&needle)
    }

    fn matches_filters(pump: &PumpDevice, filters: &FilterParams) -> bool {
        if let Some(types) = &filters.types
            && !types.is_empty()
            && !types.contains(&pump.pump_type)
        {
            return false;
        }
        if let Some(areas) = &filters.areas
            && !areas.is_empty()
            && !areas.contains(&pump.area_block)
        {
            return false;
        }
        true
    }
}

#[async_trait]
impl PumpService for FixturePumpService {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PumpPage> {
        self.simulate_delay().await;

        let dataset = self.dataset.read().await;
        let mut matched: Vec<&PumpDevice> = dataset.iter().collect();

        if let Some(search) = &query.search_query
            && !search.is_empty()
        {
            matched.retain(|p| Self::matches_search(p, search));
        }
        if let Some(filters) = &query.filters {
            matched.retain(|p| Self::matches_filters(p, filters));
        }

        let total = matched.len();
        let page_size = query.page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        let start = query.page.saturating_sub(1) * page_size;
        let pumps: Vec<PumpDevice> = matched
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        debug!(
            "[FixturePumpService] Page {}/{} ({} matching)",
            query.page, total_pages, total
        );

        Ok(PumpPage {
            pumps,
            pagination: PageInfo {
                page: query.page,
                page_size: query.page_size,
                total,
                total_pages,
            },
        })
    }

    async fn delete_pumps(&self, ids: &[String]) -> Result<Vec<String>> {
        self.simulate_delay().await;

        let mut dataset = self.dataset.write().await;

        // All-or-nothing: verify every id before touching the dataset
        for id in ids {
            if !dataset.iter().any(|p| &p.id == id) {
                return Err(PumpMasterError::not_found("pump", id.clone()));
            }
        }
        dataset.retain(|p| !ids.contains(&p.id));

        info!("[FixturePumpService] Deleted {} pumps", ids.len());
        Ok(ids.to_vec())
    }
}

#[async_trait]
impl FilterOptionsSource for FixturePumpService {
    async fn filter_options(&self) -> Result<FilterOptions> {
        let dataset = self.dataset.read().await;
        Ok(FilterOptions::from_pumps(&dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> FixturePumpService {
        FixturePumpService::new(false)
    }

    fn query(page: usize, page_size: usize) -> ListQuery {
        ListQuery {
            page,
            page_size,
            search_query: None,
            filters: None,
        }
    }

    fn ids(page: &PumpPage) -> Vec<&str> {
        page.pumps.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_first_page_slices_dataset() {
        let page = service().fetch_page(&query(1, 3)).await.expect("Should fetch");

        assert_eq!(ids(&page), vec!["pump-001", "pump-002", "pump-003"]);
        assert_eq!(page.pagination.total, 10);
        assert_eq!(page.pagination.total_pages, 4);
    }

    #[tokio::test]
    async fn test_page_beyond_range_is_empty_with_truthful_totals() {
        let page = service().fetch_page(&query(9, 5)).await.expect("Should fetch");

        assert!(page.pumps.is_empty());
        assert_eq!(page.pagination.total, 10);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_search_matches_name_type_and_area() {
        let svc = service();

        let mut by_name = query(1, 20);
        by_name.search_query = Some("pump 1".to_string());
        let page = svc.fetch_page(&by_name).await.expect("Should fetch");
        assert_eq!(ids(&page), vec!["pump-001", "pump-010"]);

        let mut by_type = query(1, 20);
        by_type.search_query = Some("CENTRIFUGAL".to_string());
        let page = svc.fetch_page(&by_type).await.expect("Should fetch");
        assert_eq!(ids(&page), vec!["pump-001", "pump-006"]);

        let mut by_area = query(1, 20);
        by_area.search_query = Some("area j".to_string());
        let page = svc.fetch_page(&by_area).await.expect("Should fetch");
        assert_eq!(ids(&page), vec!["pump-010"]);
    }

    #[tokio::test]
    async fn test_type_and_area_filters_intersect() {
        let mut q = query(1, 20);
        q.filters = Some(FilterParams {
            types: Some(vec!["Centrifugal".to_string()]),
            areas: Some(vec!["Area F".to_string()]),
        });

        let page = service().fetch_page(&q).await.expect("Should fetch");
        assert_eq!(ids(&page), vec!["pump-006"]);
    }

    #[tokio::test]
    async fn test_search_and_filters_apply_before_pagination() {
        // Two submersibles in the dataset, one per page at size 1
        let mut q = query(2, 1);
        q.filters = Some(FilterParams {
            types: Some(vec!["Submersible".to_string()]),
            areas: None,
        });

        let page = service().fetch_page(&q).await.expect("Should fetch");
        assert_eq!(ids(&page), vec!["pump-007"]);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_delete_removes_from_subsequent_fetches() {
        let svc = service();
        let removed = svc
            .delete_pumps(&["pump-001".to_string(), "pump-002".to_string()])
            .await
            .expect("Should delete");
        assert_eq!(removed.len(), 2);

        let page = svc.fetch_page(&query(1, 20)).await.expect("Should fetch");
        assert_eq!(page.pagination.total, 8);
        assert!(!page.pumps.iter().any(|p| p.id == "pump-001"));
    }

    #[tokio::test]
    async fn test_delete_with_missing_id_changes_nothing() {
        let svc = service();
        let err = svc
            .delete_pumps(&["pump-001".to_string(), "pump-999".to_string()])
            .await
            .expect_err("Should fail");
        assert!(err.is_not_found());

        let page = svc.fetch_page(&query(1, 20)).await.expect("Should fetch");
        assert_eq!(page.pagination.total, 10);
    }

    #[tokio::test]
    async fn test_filter_options_are_distinct_and_sorted() {
        let options = service().filter_options().await.expect("Should load");

        assert_eq!(
            options.types,
            vec![
                "Centrifugal",
                "Diaphragm",
                "Peristaltic",
                "Rotary",
                "Submersible"
            ]
        );
        assert_eq!(options.areas.len(), 10);
        assert_eq!(options.areas[0], "Area A");
        assert_eq!(options.areas[9], "Area J");
    }
}
