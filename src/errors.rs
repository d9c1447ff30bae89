//! # Search Errors
//!
//! Two kinds of failure leave the search core:
//!
//! - **Invalid request**: the caller handed us something that cannot be a
//!   meaningful query (`limit == 0`, a negative offset, `minAge > maxAge`).
//!   These are detected before anything reaches the executor.
//! - **Execution failure**: the [`QueryExecutor`](crate::executor::QueryExecutor)
//!   reported an error. It is passed through untouched so callers can decide
//!   whether a retry makes sense ([`SearchError::is_transient`]).
//!
//! An empty match set is not an error; it is an `Ok` with no rows.
//!
//! ## Logging
//!
//! Internal details are logged through `tracing`. The operations in
//! [`crate::operations`] call [`SearchError::log_internal`] before returning
//! an error, so nothing extra is needed at the call site beyond installing a
//! subscriber:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt().with_target(false).compact().init();
//! ```

use sea_orm::DbErr;
use std::fmt;

/// Error returned by every search operation.
#[derive(Debug)]
pub enum SearchError {
    /// The request was rejected before any query was composed.
    InvalidRequest {
        /// Caller-facing description of what was wrong
        message: String,
    },

    /// The query executor failed while running the composed query.
    Execution {
        /// Executor error, kept intact for the caller
        internal: DbErr,
    },
}

impl SearchError {
    /// Create an invalid-request error
    ///
    /// # Example
    /// ```rust,ignore
    /// return Err(SearchError::invalid_request("limit must be greater than 0"));
    /// ```
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Wrap an executor failure
    ///
    /// # Example
    /// ```rust,ignore
    /// let rows = executor.run_query(&query).await.map_err(SearchError::execution)?;
    /// ```
    pub fn execution(err: DbErr) -> Self {
        Self::Execution { internal: err }
    }

    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Only connection-level executor failures count as transient. Invalid
    /// requests and query/type errors fail the same way every time.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::InvalidRequest { .. } => false,
            Self::Execution { internal } => {
                matches!(internal, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
            }
        }
    }

    /// Log error details (executor errors at error level, rejected input at debug)
    pub fn log_internal(&self) {
        match self {
            Self::Execution { internal } => {
                tracing::error!(
                    error = ?internal,
                    transient = self.is_transient(),
                    "Search query execution failed"
                );
            }
            Self::InvalidRequest { message } => {
                tracing::debug!(message = %message, "Search request rejected");
            }
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { message } => write!(f, "Invalid search request: {message}"),
            Self::Execution { internal } => write!(f, "Search query execution failed: {internal}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Execution { internal } => Some(internal),
            Self::InvalidRequest { .. } => None,
        }
    }
}

/// Every `DbErr` is an execution failure; the executor is the only source of them.
impl From<DbErr> for SearchError {
    fn from(err: DbErr) -> Self {
        Self::execution(err)
    }
}
