//! The derived list query and the page shape it resolves to.

use crate::list::filter::{FilterParams, FilterState};
use crate::list::pagination::PaginationState;
use crate::list::search::SearchState;
use crate::pump::model::PumpDevice;
use serde::{Deserialize, Serialize};

/// Query for one page of pumps.
///
/// Never stored; recomputed from the pagination, search, and filter
/// state whenever any of them changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: usize,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterParams>,
}

impl ListQuery {
    /// Composes the effective query from the three contributing dimensions.
    pub fn compose(
        pagination: &PaginationState,
        filters: &FilterState,
        search: &SearchState,
    ) -> Self {
        Self {
            page: pagination.current_page(),
            page_size: pagination.page_size(),
            search_query: search.has_query().then(|| search.query().to_string()),
            filters: filters.query_params(),
        }
    }
}

/// Pagination metadata echoed back with every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One resolved page of pumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpPage {
    #[serde(rename = "data")]
    pub pumps: Vec<PumpDevice>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::filter::FilterDimension;

    #[test]
    fn test_compose_plain_query() {
        let pagination = PaginationState::new(20);
        let query = ListQuery::compose(&pagination, &FilterState::new(), &SearchState::new());

        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
        assert!(query.search_query.is_none());
        assert!(query.filters.is_none());
    }

    #[test]
    fn test_compose_carries_all_dimensions() {
        let mut pagination = PaginationState::new(10);
        pagination.go_to_page(3);

        let mut filters = FilterState::new();
        filters.toggle(FilterDimension::Type, "Rotary");

        let mut search = SearchState::new();
        search.submit("Pump");

        let query = ListQuery::compose(&pagination, &filters, &search);
        assert_eq!(query.page, 3);
        assert_eq!(query.search_query.as_deref(), Some("Pump"));
        assert_eq!(
            query.filters.unwrap().types.unwrap(),
            vec!["Rotary".to_string()]
        );
    }

    #[test]
    fn test_query_serializes_camel_case_without_empty_keys() {
        let query = ListQuery {
            page: 2,
            page_size: 50,
            search_query: None,
            filters: None,
        };
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"page":2,"pageSize":50}"#);
    }

    #[test]
    fn test_page_deserializes_data_field() {
        let json = r#"{
            "data": [],
            "pagination": { "page": 1, "pageSize": 10, "total": 0, "totalPages": 0 }
        }"#;
        let page: PumpPage = serde_json::from_str(json).unwrap();
        assert!(page.pumps.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
    }
}
