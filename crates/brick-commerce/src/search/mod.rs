//! Product query engine.
//!
//! Pure functions over borrowed products: facet filtering, sorting,
//! pagination, free-text search and related-product lookup. None of them
//! fail; bad input gives an empty result.

mod filter;
mod query;
mod results;
mod text;

pub use filter::{filter_by_criteria, ProductFilters};
pub use query::{sort_by, ProductQuery, SortOption};
pub use results::{paginate, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use text::{collation_key, related_to, search, MIN_QUERY_LEN};
