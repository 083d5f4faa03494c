//! List-browsing state: pagination, filtering, selection, search, mode.

pub mod filter;
pub mod mode;
pub mod pagination;
pub mod query;
pub mod search;
pub mod selection;

pub use filter::{FilterDimension, FilterOptions, FilterParams, FilterState};
pub use mode::ListMode;
pub use pagination::{MAX_VISIBLE_PAGES, PaginationState};
pub use query::{ListQuery, PageInfo, PumpPage};
pub use search::SearchState;
pub use selection::Selection;
