//! Pump list orchestration use case.
//!
//! This module provides the `PumpListUseCase` which composes the list
//! controllers (pagination, filters, search, selection, mode) into one
//! consistent unit of state, drives refetches against the `PumpService`
//! collaborator, and reconciles pagination and selection after deletes.

use pumpmaster_core::error::{PumpMasterError, Result};
use pumpmaster_core::list::{
    FilterDimension, FilterState, ListMode, ListQuery, PaginationState, SearchState, Selection,
};
use pumpmaster_core::pump::{FilterOptionsSource, PumpDevice, PumpService};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// The list controllers, locked together so every transition observes a
/// consistent combination of dimensions.
struct ListState {
    pumps: Vec<PumpDevice>,
    pagination: PaginationState,
    filters: FilterState,
    search: SearchState,
    selection: Selection<PumpDevice>,
    mode: ListMode,
}

/// A point-in-time copy of the list state, for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub pumps: Vec<PumpDevice>,
    pub pagination: PaginationState,
    pub filters: FilterState,
    pub search: SearchState,
    pub mode: ListMode,
    pub selected_keys: Vec<String>,
}

/// Use case for browsing and mutating the pump list.
///
/// # Responsibilities
///
/// - Recomputing the effective `ListQuery` whenever pagination, search, or
///   filter state changes, and fetching the matching page
/// - Discarding stale fetch results via last-request-wins sequencing
/// - Enforcing the Normal/Edit/Delete mode machine
/// - Clearing the selection on page, size, and Delete-mode boundaries
/// - Running the bulk-delete flow and settling pagination afterwards
///
/// # Thread Safety
///
/// All state lives behind one `RwLock`; the fetch sequence counter is a
/// lock-free `AtomicU64` so overlapping fetches can race safely.
pub struct PumpListUseCase {
    /// Data source for pages and deletions
    pump_service: Arc<dyn PumpService>,
    /// Optional dedicated source for filter options
    options_source: Option<Arc<dyn FilterOptionsSource>>,
    state: RwLock<ListState>,
    /// Monotonic fetch sequence; a result is applied only while its
    /// number is still the latest issued
    fetch_seq: AtomicU64,
}

impl PumpListUseCase {
    pub fn new(
        pump_service: Arc<dyn PumpService>,
        options_source: Option<Arc<dyn FilterOptionsSource>>,
        page_size: usize,
    ) -> Self {
        Self {
            pump_service,
            options_source,
            state: RwLock::new(ListState {
                pumps: Vec::new(),
                pagination: PaginationState::new(page_size),
                filters: FilterState::new(),
                search: SearchState::new(),
                selection: Selection::new(|pump: &PumpDevice| pump.id.clone()),
                mode: ListMode::Normal,
            }),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Fetches the page described by the current state.
    ///
    /// Overlapping calls are resolved last-request-wins: a result whose
    /// sequence number is no longer the latest is discarded without
    /// touching state, including its error.
    ///
    /// # Errors
    ///
    /// A failed fetch empties the list and zeroes the totals, then
    /// propagates the error for display. Nothing is retried.
    pub async fn refresh(&self) -> Result<()> {
        let query = {
            let state = self.state.read().await;
            ListQuery::compose(&state.pagination, &state.filters, &state.search)
        };
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            "[PumpListUseCase] Fetching page {} (size {}, seq {})",
            query.page,
            query.page_size,
            seq
        );

        let outcome = self.pump_service.fetch_page(&query).await;

        let mut state = self.state.write().await;
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!("[PumpListUseCase] Discarding stale fetch result (seq {})", seq);
            return Ok(());
        }

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    "[PumpListUseCase] Page {} loaded: {} pump(s) of {}",
                    page.pagination.page,
                    page.pumps.len(),
                    page.pagination.total
                );
                state.pagination.set_total(page.pagination.total);
                state.pagination.set_total_pages(page.pagination.total_pages);
                state.filters.absorb_page(&page.pumps);
                state.pumps = page.pumps;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[PumpListUseCase] Fetch failed: {}", e);
                state.pumps.clear();
                state.pagination.set_total(0);
                state.pagination.set_total_pages(0);
                Err(e)
            }
        }
    }

    /// Loads filter options from the dedicated source, when one is
    /// configured. On absence or failure the page-derived fallback stays
    /// in effect; nothing propagates.
    pub async fn load_filter_options(&self) {
        let Some(source) = &self.options_source else {
            tracing::debug!("[PumpListUseCase] No filter options source configured");
            return;
        };
        match source.filter_options().await {
            Ok(options) => {
                tracing::debug!(
                    "[PumpListUseCase] Loaded filter options ({} types, {} areas)",
                    options.types.len(),
                    options.areas.len()
                );
                self.state.write().await.filters.set_static_options(options);
            }
            Err(e) => {
                tracing::warn!(
                    "[PumpListUseCase] Filter options load failed, keeping page-derived fallback: {}",
                    e
                );
            }
        }
    }

    /// Navigates to `page`. Range validity is owned by the data source;
    /// the selection is always cleared.
    pub async fn go_to_page(&self, page: usize) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.pagination.go_to_page(page);
            state.selection.clear();
        }
        self.refresh().await
    }

    /// Changes the page size, returning to the first page and clearing
    /// the selection.
    pub async fn set_page_size(&self, page_size: usize) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.pagination.set_page_size(page_size);
            state.selection.clear();
        }
        self.refresh().await
    }

    /// Toggles one filter value. Page and selection are left alone; only
    /// the displayed rows change.
    pub async fn toggle_filter(&self, dimension: FilterDimension, value: &str) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.filters.toggle(dimension, value);
            tracing::debug!(
                "[PumpListUseCase] Filter toggled ({}: {}), {} active",
                dimension,
                value,
                state.filters.active_filter_count()
            );
        }
        self.refresh().await
    }

    pub async fn clear_filters(&self) -> Result<()> {
        self.state.write().await.filters.clear_all();
        self.refresh().await
    }

    pub async fn open_search_modal(&self) {
        self.state.write().await.search.open_modal();
    }

    pub async fn stage_search(&self, text: &str) {
        self.state.write().await.search.stage(text);
    }

    /// Closes the search modal without committing; the committed query
    /// stays active and no refetch happens.
    pub async fn cancel_search(&self) {
        self.state.write().await.search.cancel();
    }

    /// Commits a search query, returns to the first page, and refetches.
    pub async fn submit_search(&self, query: &str) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.search.submit(query);
            state.pagination.go_to_page(1);
            state.selection.clear();
            tracing::debug!(
                "[PumpListUseCase] Search committed: {:?}",
                state.search.query()
            );
        }
        self.refresh().await
    }

    /// Clears the committed search query, returns to the first page, and
    /// refetches.
    pub async fn clear_search(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.search.clear();
            state.pagination.go_to_page(1);
            state.selection.clear();
        }
        self.refresh().await
    }

    /// Enters Edit mode.
    ///
    /// # Errors
    ///
    /// Rejected with `ModeTransition` from Delete mode; callers must exit
    /// to Normal first so Delete's selection cleanup runs.
    pub async fn enter_edit_mode(&self) -> Result<()> {
        let mut state = self.state.write().await;
        match state.mode {
            ListMode::Edit => Ok(()),
            ListMode::Normal => {
                state.mode = ListMode::Edit;
                tracing::info!("[PumpListUseCase] Entered edit mode");
                Ok(())
            }
            ListMode::Delete => Err(PumpMasterError::mode_transition(
                ListMode::Delete.as_str(),
                ListMode::Edit.as_str(),
            )),
        }
    }

    /// Enters Delete mode, clearing any prior selection.
    ///
    /// # Errors
    ///
    /// Rejected with `ModeTransition` from Edit mode.
    pub async fn enter_delete_mode(&self) -> Result<()> {
        let mut state = self.state.write().await;
        match state.mode {
            ListMode::Delete => Ok(()),
            ListMode::Normal => {
                state.selection.clear();
                state.mode = ListMode::Delete;
                tracing::info!("[PumpListUseCase] Entered delete mode");
                Ok(())
            }
            ListMode::Edit => Err(PumpMasterError::mode_transition(
                ListMode::Edit.as_str(),
                ListMode::Delete.as_str(),
            )),
        }
    }

    /// Returns to Normal mode. Leaving Delete clears the selection.
    pub async fn exit_mode(&self) {
        let mut state = self.state.write().await;
        if state.mode == ListMode::Delete {
            state.selection.clear();
        }
        if state.mode != ListMode::Normal {
            tracing::info!("[PumpListUseCase] Left {} mode", state.mode);
            state.mode = ListMode::Normal;
        }
    }

    /// Toggles selection of the pump with the given id on the current
    /// page.
    ///
    /// # Returns
    /// - `Ok(true)`: the pump is now selected.
    /// - `Ok(false)`: the pump is now deselected.
    /// - `Err(NotFound)`: no such id among the visible rows.
    pub async fn toggle_select(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let pump = state
            .pumps
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PumpMasterError::not_found("pump", id))?;
        state.selection.toggle(&pump);
        Ok(state.selection.is_selected(&pump))
    }

    /// Tri-state "select all": `checked` selects every visible row,
    /// unchecked clears the selection.
    pub async fn select_all_visible(&self, checked: bool) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.selection.handle_select_all(checked, &state.pumps);
    }

    /// Deletes the selected pumps.
    ///
    /// On success the selection empties, the mode returns to Normal, and
    /// pagination settles: when the current page falls beyond the shrunken
    /// page count, navigation moves to the last page before the refetch.
    ///
    /// # Returns
    /// - `Ok(n)`: `n` pumps were deleted (0 for an empty selection, which
    ///   performs no collaborator call).
    /// - `Err(_)`: the mutation failed; mode and selection are untouched.
    pub async fn delete_selected(&self) -> Result<usize> {
        let keys = { self.state.read().await.selection.keys() };
        if keys.is_empty() {
            tracing::debug!("[PumpListUseCase] Delete requested with empty selection");
            return Ok(0);
        }

        tracing::info!("[PumpListUseCase] Deleting {} pump(s)", keys.len());
        let removed = match self.pump_service.delete_pumps(&keys).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!("[PumpListUseCase] Delete failed: {}", e);
                return Err(e);
            }
        };

        {
            let mut state = self.state.write().await;
            state.selection.clear();
            state.mode = ListMode::Normal;

            let remaining = state.pagination.total().saturating_sub(removed.len());
            let page_size = state.pagination.page_size().max(1);
            let new_total_pages = remaining.div_ceil(page_size);
            if state.pagination.current_page() > new_total_pages && new_total_pages > 0 {
                tracing::debug!(
                    "[PumpListUseCase] Page count shrank to {}, navigating back",
                    new_total_pages
                );
                state.pagination.go_to_page(new_total_pages);
            }
        }

        self.refresh().await?;
        Ok(removed.len())
    }

    pub async fn mode(&self) -> ListMode {
        self.state.read().await.mode
    }

    pub async fn selected_keys(&self) -> Vec<String> {
        self.state.read().await.selection.keys()
    }

    /// A consistent copy of every dimension, for rendering.
    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.read().await;
        ListSnapshot {
            pumps: state.pumps.clone(),
            pagination: state.pagination.clone(),
            filters: state.filters.clone(),
            search: state.search.clone(),
            mode: state.mode,
            selected_keys: state.selection.keys(),
        }
    }
}
