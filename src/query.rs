//! Query composition.
//!
//! A [`ComposedQuery`] is everything an executor needs to produce one result
//! page in a single round-trip: the combined filter over the member/team left
//! join, a total ordering, and an optional window. The projection is fixed:
//! member id, username and age plus team id and name.

use crate::criteria::SearchCriteria;
use crate::errors::SearchError;
use crate::filtering::{PageRequest, Predicate, SortKey, apply_filters, with_tie_break};

/// Offset/limit applied after filtering and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Filtered, ordered and optionally windowed select over `members LEFT JOIN teams`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    pub filter: Predicate,
    /// Always ends in an `id` key, so ties cannot reorder between calls.
    pub order: Vec<SortKey>,
    pub window: Option<Window>,
}

/// Count of rows matching a filter over the same join, without order or window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    pub filter: Predicate,
}

impl ComposedQuery {
    /// The matching count query for this select.
    #[must_use]
    pub fn count(&self) -> CountQuery {
        CountQuery {
            filter: self.filter.clone(),
        }
    }
}

/// Compose the select for `criteria`, windowed when `page` is given.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRequest`] when the criteria are inconsistent.
pub fn compose(
    criteria: &SearchCriteria,
    page: Option<&PageRequest>,
) -> Result<ComposedQuery, SearchError> {
    let filter = apply_filters(criteria)?;
    let (order, window) = match page {
        Some(page) => (
            with_tie_break(page.sort()),
            Some(Window {
                offset: page.offset(),
                limit: page.limit(),
            }),
        ),
        None => (with_tie_break(&[]), None),
    };

    tracing::trace!(filter = %filter, ?window, "Composed member search query");

    Ok(ComposedQuery {
        filter,
        order,
        window,
    })
}

/// Count query for `criteria` alone, for callers that only need the total.
///
/// # Errors
///
/// Same as [`compose`].
pub fn compose_count(criteria: &SearchCriteria) -> Result<CountQuery, SearchError> {
    Ok(CountQuery {
        filter: apply_filters(criteria)?,
    })
}
