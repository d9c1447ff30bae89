use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::SearchConfig;
use crate::criteria::SearchCriteria;
use crate::errors::SearchError;
use crate::filtering::{PageMode, PageRequest, parse_sorting};

/// One row of `members LEFT JOIN teams` as the executor returns it.
///
/// Column aliases match the field names, see
/// [`SeaOrmExecutor`](crate::executor::SeaOrmExecutor).
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct RawRow {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Flat search result: a member with its team denormalized inline.
///
/// `team_id` and `team_name` are both `None` for a member without a team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl From<RawRow> for ResultRow {
    fn from(row: RawRow) -> Self {
        Self {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

/// Query parameters for a member search, as a transport layer decodes them.
///
/// # Filtering
/// - `username`: exact username
/// - `teamName`: exact team name
/// - `ageGoe` / `ageLoe`: inclusive age bounds
///
/// Blank text values are ignored.
///
/// # Pagination
/// Two formats are supported, `page` taking precedence:
/// - **Page format:** `page=0&size=20` (zero-based page number)
/// - **Window format:** `offset=40&limit=20`
///
/// # Sorting
/// `sort` is a JSON array `["age", "DESC"]` or a bare column name.
///
/// # Totals
/// `exact=false` skips the count query; the returned total is then only the page size.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    #[param(example = "member1")]
    pub username: Option<String>,
    #[serde(alias = "groupName")]
    #[param(example = "teamA")]
    pub team_name: Option<String>,
    #[param(example = 10)]
    pub age_goe: Option<i32>,
    #[param(example = 40)]
    pub age_loe: Option<i32>,
    #[param(example = 0)]
    pub offset: Option<i64>,
    #[param(example = 20)]
    pub limit: Option<i64>,
    #[param(example = 0)]
    pub page: Option<i64>,
    #[param(example = 20)]
    pub size: Option<i64>,
    #[param(example = r#"["age", "DESC"]"#)]
    pub sort: Option<String>,
    #[param(example = true)]
    pub exact: Option<bool>,
}

/// Decoded [`SearchParams`], ready for [`search_page`](crate::operations::search_page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub criteria: SearchCriteria,
    pub page: PageRequest,
    pub mode: PageMode,
}

impl SearchParams {
    /// Validate the parameters against `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] for a negative offset or page,
    /// a non-positive limit, a limit above `config.max_limit`, or an
    /// unparseable sort.
    pub fn into_request(self, config: &SearchConfig) -> Result<SearchRequest, SearchError> {
        let mut page = match self.page {
            Some(page) => {
                let page = u64::try_from(page)
                    .map_err(|_| SearchError::invalid_request("page must not be negative"))?;
                let size = checked_limit(self.size, config)?;
                PageRequest::of_page(page, size)?
            }
            None => {
                let limit = checked_limit(self.limit, config)?;
                PageRequest::from_signed(
                    self.offset.unwrap_or(0),
                    i64::try_from(limit).unwrap_or(i64::MAX),
                )?
            }
        };

        if let Some(sort) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            page = page.sorted_by(parse_sorting(sort)?);
        }

        let mut criteria = SearchCriteria::new();
        if let Some(username) = self.username {
            criteria = criteria.username(username);
        }
        if let Some(team_name) = self.team_name {
            criteria = criteria.group_name(team_name);
        }
        if let Some(age) = self.age_goe {
            criteria = criteria.min_age(age);
        }
        if let Some(age) = self.age_loe {
            criteria = criteria.max_age(age);
        }

        let mode = match self.exact {
            Some(true) => PageMode::Exact,
            Some(false) => PageMode::Simple,
            None => config.default_mode,
        };

        Ok(SearchRequest {
            criteria,
            page,
            mode,
        })
    }
}

fn checked_limit(limit: Option<i64>, config: &SearchConfig) -> Result<u64, SearchError> {
    let Some(limit) = limit else {
        return Ok(config.default_limit);
    };
    let limit = u64::try_from(limit)
        .ok()
        .filter(|l| *l > 0)
        .ok_or_else(|| SearchError::invalid_request("limit must be greater than 0"))?;
    if limit > config.max_limit {
        return Err(SearchError::invalid_request(format!(
            "limit {limit} exceeds the maximum of {}",
            config.max_limit
        )));
    }
    Ok(limit)
}
