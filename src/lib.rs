//! Dynamic member search with optional filters and offset/limit pagination.
//!
//! A search takes a sparse [`SearchCriteria`], turns each present value into
//! a predicate, combines them with AND over `members LEFT JOIN teams`, and
//! runs the composed query on a [`QueryExecutor`] the caller passes in.
//!
//! ```rust,ignore
//! let executor = SeaOrmExecutor::new(db);
//! let criteria = SearchCriteria::new().group_name("teamA").min_age(20);
//! let page = PageRequest::new(0, 10)?.sorted_by(SortKey::desc(SortField::Age));
//!
//! let result = search_page(&executor, &criteria, &page, PageMode::Exact).await?;
//! println!("{}", result.content_range("members"));
//! ```

pub mod config;
pub mod criteria;
pub mod entities;
pub mod errors;
pub mod executor;
pub mod filtering;
pub mod models;
pub mod operations;
pub mod query;

pub use config::SearchConfig;
pub use criteria::SearchCriteria;
pub use errors::SearchError;
pub use executor::{MemoryExecutor, QueryExecutor, SeaOrmExecutor};
pub use filtering::{Direction, PageMode, PageRequest, PageResult, SortField, SortKey};
pub use models::{RawRow, ResultRow, SearchParams, SearchRequest};
pub use operations::{search, search_page};
pub use query::{ComposedQuery, CountQuery, compose, compose_count};
