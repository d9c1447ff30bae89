//! # Query Executors
//!
//! The search core never talks to a database itself. It composes a
//! [`ComposedQuery`] / [`CountQuery`] and hands them to a [`QueryExecutor`]
//! supplied by the caller on every call.
//!
//! - [`SeaOrmExecutor`]: runs the query as SQL through a Sea-ORM connection
//! - [`MemoryExecutor`]: evaluates it over rows held in memory
//!
//! Implementations must honour filter, join, ordering, offset and limit
//! exactly in `run_query`, and the filter alone in `run_count`. Connection
//! pooling, isolation and timeouts are the implementation's business.

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::models::RawRow;
use crate::query::{ComposedQuery, CountQuery};

pub mod database;
pub mod memory;

pub use database::SeaOrmExecutor;
pub use memory::MemoryExecutor;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Rows of `members LEFT JOIN teams` matching the filter, ordered and windowed.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying store.
    async fn run_query(&self, query: &ComposedQuery) -> Result<Vec<RawRow>, DbErr>;

    /// Number of joined rows matching the filter, ignoring order and window.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying store.
    async fn run_count(&self, query: &CountQuery) -> Result<u64, DbErr>;
}
