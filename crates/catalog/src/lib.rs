//! Search domain for the Vitrine product catalog.
//!
//! This crate holds the pure core of the faceted catalog:
//!
//! - **Criteria**: the per-request filter/page state and its
//!   query-string round-trip
//! - **Composition**: criteria to SQL predicates plus orderings
//! - **Results**: pagination, price-range aggregate, result pages
//! - **Fragments**: the three-part JSON wire contract for in-place
//!   updates
//!
//! No I/O happens here; the server executes composed statements and
//! the client consumes the wire contract.
//!
//! # Example
//!
//! ```
//! use vitrine_catalog::prelude::*;
//!
//! let criteria = SearchCriteria::from_query_str("q=lamp&min=10&categories%5B%5D=3");
//! let composed = compose(&criteria);
//! let (sql, args) = composed.build_page_sql(criteria.page);
//! assert!(sql.contains("LIMIT 9"));
//! assert_eq!(args.len(), 3);
//! ```

pub mod compose;
pub mod criteria;
pub mod fragments;
pub mod ids;
pub mod product;
pub mod results;

pub use compose::{compose, ComposedQuery, Ordering, Predicate, SqlArg};
pub use criteria::{SearchCriteria, AJAX_PARAM, PAGE_SIZE};
pub use fragments::FragmentResponse;
pub use ids::{CategoryId, ProductId};
pub use product::{Category, Product};
pub use results::{Pagination, PriceRange, ResultPage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::compose::{compose, ComposedQuery, Ordering, Predicate, SqlArg};
    pub use crate::criteria::{SearchCriteria, AJAX_PARAM, PAGE_SIZE};
    pub use crate::fragments::FragmentResponse;
    pub use crate::ids::{CategoryId, ProductId};
    pub use crate::product::{Category, Product};
    pub use crate::results::{Pagination, PriceRange, ResultPage};
}
