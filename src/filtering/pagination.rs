use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::SearchError;

use super::sort::SortKey;

/// Largest offset or limit accepted; SQL backends bind both as signed 64-bit integers.
pub const MAX_WINDOW_VALUE: u64 = i64::MAX.unsigned_abs();

/// How the total of a page is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    /// Total is the number of rows in the returned page.
    ///
    /// One query, but the total is only a lower bound of the real count:
    /// it cannot be used to compute a page count.
    Simple,
    /// Total comes from a separate count over the unwindowed filter.
    #[default]
    Exact,
}

/// Offset/limit window with optional ordering.
///
/// `limit` is always greater than zero; neither `offset` nor `limit` exceeds
/// [`MAX_WINDOW_VALUE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
    sort: Vec<SortKey>,
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] when `limit` is 0 or either
    /// value exceeds [`MAX_WINDOW_VALUE`].
    pub fn new(offset: u64, limit: u64) -> Result<Self, SearchError> {
        if limit == 0 {
            return Err(SearchError::invalid_request("limit must be greater than 0"));
        }
        if offset > MAX_WINDOW_VALUE {
            return Err(SearchError::invalid_request(format!(
                "offset must not exceed {MAX_WINDOW_VALUE}"
            )));
        }
        if limit > MAX_WINDOW_VALUE {
            return Err(SearchError::invalid_request(format!(
                "limit must not exceed {MAX_WINDOW_VALUE}"
            )));
        }
        Ok(Self {
            offset,
            limit,
            sort: Vec::new(),
        })
    }

    /// Zero-based page of `size` rows.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] when `size` is 0 or the
    /// resulting offset overflows or exceeds [`MAX_WINDOW_VALUE`].
    pub fn of_page(page: u64, size: u64) -> Result<Self, SearchError> {
        let offset = page
            .checked_mul(size)
            .ok_or_else(|| SearchError::invalid_request("page offset overflows"))?;
        Self::new(offset, size)
    }

    /// Validate signed input, as decoded from a query string.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] for a negative offset or a
    /// limit that is not positive.
    pub fn from_signed(offset: i64, limit: i64) -> Result<Self, SearchError> {
        let offset = u64::try_from(offset)
            .map_err(|_| SearchError::invalid_request("offset must not be negative"))?;
        let limit = u64::try_from(limit)
            .map_err(|_| SearchError::invalid_request("limit must be greater than 0"))?;
        Self::new(offset, limit)
    }

    /// Add an ordering key; keys apply in the order they are added.
    #[must_use]
    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }
}

/// One page of results.
///
/// `content.len() <= limit` always holds. When `exact` is false the total is
/// the page size only, see [`PageMode::Simple`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    content: Vec<T>,
    total_count: u64,
    offset: u64,
    limit: u64,
    exact: bool,
}

impl<T> PageResult<T> {
    pub(crate) fn new(mut content: Vec<T>, total_count: u64, request: &PageRequest, exact: bool) -> Self {
        // an executor returning more than asked for must not break the invariant
        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
        content.truncate(limit);
        Self {
            content,
            total_count,
            offset: request.offset,
            limit: request.limit,
            exact,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether `total_count` is the true number of matching rows.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages of `limit` rows, or `None` for a simple-mode page.
    #[must_use]
    pub fn total_pages(&self) -> Option<u64> {
        self.exact.then(|| self.total_count.div_ceil(self.limit))
    }

    /// Whether rows may exist past this page.
    ///
    /// Exact pages know; simple pages guess `true` whenever the page is full.
    #[must_use]
    pub fn has_next(&self) -> bool {
        let seen = self.offset.saturating_add(self.content.len() as u64);
        if self.exact {
            seen < self.total_count
        } else {
            self.content.len() as u64 == self.limit
        }
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
            exact: self.exact,
        }
    }

    /// Content-Range style description: `members 1-2/4`, or `members */4` when empty.
    #[must_use]
    pub fn content_range(&self, resource_name: &str) -> String {
        let name = sanitize_resource_name(resource_name);
        let total = self.total_count;
        if self.content.is_empty() {
            return format!("{name} */{total}");
        }
        let last = self.offset.saturating_add(self.content.len() as u64 - 1);
        format!("{name} {}-{last}/{total}", self.offset)
    }
}

/// Sanitize resource name by removing control characters
fn sanitize_resource_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}
