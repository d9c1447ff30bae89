//! # Filtering, Ordering & Pagination
//!
//! Turns a sparse [`SearchCriteria`](crate::criteria::SearchCriteria) into a
//! single filter expression, and describes how results are ordered and
//! windowed.
//!
//! ## Main Components
//!
//! - **[`Predicate`]**: executor-neutral filter tree
//! - **[`build_predicates`]**: one optional predicate per criterion
//! - **[`combine`]**: AND of the present predicates, `Predicate::All` when none are
//! - **[`SortKey`]** / **[`parse_sorting`]**: ordering keys with an `id` tie-break
//! - **[`PageRequest`]** / **[`PageResult`]** / **[`PageMode`]**: windowing and totals
//!
//! ## Example
//!
//! ```rust,ignore
//! let criteria = SearchCriteria::new().username("  ").min_age(20);
//! // blank username is ignored, so only the age bound remains
//! assert_eq!(apply_filters(&criteria)?, Predicate::Gte(Field::Age, Value::Int(20)));
//! ```

pub mod conditions;
pub mod pagination;
pub mod predicate;
pub mod sort;

// Re-export commonly used items
pub use conditions::{age_goe, age_loe, apply_filters, build_predicates, combine, group_name_eq, username_eq};
pub use pagination::{MAX_WINDOW_VALUE, PageMode, PageRequest, PageResult};
pub use predicate::{Field, Predicate, Value};
pub use sort::{Direction, SortField, SortKey, parse_sorting, with_tie_break};
