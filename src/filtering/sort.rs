use crate::errors::SearchError;

// Shared default values
const DEFAULT_SORT_ORDER: &str = "ASC";

/// Column a result page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// `members.id`, the tie-breaker
    Id,
    Username,
    Age,
    /// `teams.name`
    GroupName,
}

impl SortField {
    /// Look a field up by its parameter name (`teamName` is accepted for `groupName`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "username" => Some(Self::Username),
            "age" => Some(Self::Age),
            "groupName" | "group_name" | "teamName" | "team_name" => Some(Self::GroupName),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One ordering key.
///
/// Without `nulls_last`, nulls sort first ascending and last descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
    pub nulls_last: bool,
}

impl SortKey {
    #[must_use]
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
            nulls_last: false,
        }
    }

    #[must_use]
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
            nulls_last: false,
        }
    }

    #[must_use]
    pub fn nulls_last(mut self) -> Self {
        self.nulls_last = true;
        self
    }
}

/// Caller ordering plus an `id ASC` tie-break, so the order is total.
///
/// If the caller already orders by id the list is returned unchanged.
#[must_use]
pub fn with_tie_break(keys: &[SortKey]) -> Vec<SortKey> {
    let mut order = keys.to_vec();
    if !order.iter().any(|k| k.field == SortField::Id) {
        order.push(SortKey::asc(SortField::Id));
    }
    order
}

/// Convert sort order string to [`Direction`]
fn parse_order(sort_order: &str) -> Direction {
    if sort_order.eq_ignore_ascii_case("DESC") {
        Direction::Desc
    } else {
        Direction::Asc
    }
}

/// Parse a sort parameter.
///
/// Accepts the JSON-array form `["age", "DESC"]` or a bare column name,
/// which sorts ascending. A direction suffix `NULLS_LAST` may follow in the
/// array form: `["username", "ASC", "NULLS_LAST"]`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRequest`] for malformed JSON or unknown columns.
pub fn parse_sorting(sort: &str) -> Result<SortKey, SearchError> {
    let parts: Vec<String> = if sort.trim_start().starts_with('[') {
        serde_json::from_str(sort)
            .map_err(|e| SearchError::invalid_request(format!("Invalid sort parameter: {e}")))?
    } else {
        vec![sort.trim().to_string()]
    };

    let column = parts
        .first()
        .ok_or_else(|| SearchError::invalid_request("Sort parameter names no column"))?;
    let field = SortField::from_name(column)
        .ok_or_else(|| SearchError::invalid_request(format!("Cannot sort by '{column}'")))?;
    let direction = parse_order(parts.get(1).map_or(DEFAULT_SORT_ORDER, String::as_str));
    let nulls_last = parts
        .get(2)
        .is_some_and(|n| n.eq_ignore_ascii_case("NULLS_LAST"));

    Ok(SortKey {
        field,
        direction,
        nulls_last,
    })
}
