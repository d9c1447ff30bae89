use serde::Deserialize;

/// Sparse set of optional member search criteria.
///
/// Every field is independent; an unset field imposes no constraint.
/// Values are fixed at construction, and the builder methods consume `self`.
///
/// ```rust,ignore
/// let criteria = SearchCriteria::new().group_name("teamB").min_age(25);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    username: Option<String>,
    group_name: Option<String>,
    min_age: Option<i32>,
    max_age: Option<i32>,
}

impl SearchCriteria {
    /// Criteria with nothing set, matching every member.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    /// Inclusive lower age bound.
    #[must_use]
    pub fn min_age(mut self, min_age: i32) -> Self {
        self.min_age = Some(min_age);
        self
    }

    /// Inclusive upper age bound.
    #[must_use]
    pub fn max_age(mut self, max_age: i32) -> Self {
        self.max_age = Some(max_age);
        self
    }

    #[must_use]
    pub fn username_filter(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn group_name_filter(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    #[must_use]
    pub fn min_age_bound(&self) -> Option<i32> {
        self.min_age
    }

    #[must_use]
    pub fn max_age_bound(&self) -> Option<i32> {
        self.max_age
    }
}
