use crate::criteria::SearchCriteria;
use crate::errors::SearchError;

use super::predicate::{Field, Predicate, Value};

// Basic safety limit for text criteria
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// `None` for null, empty or whitespace-only input; the text unchanged otherwise.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `username = ?`, absent when the filter is blank
#[must_use]
pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    non_blank(username).map(|u| Predicate::Eq(Field::Username, Value::Text(u.to_string())))
}

/// `team.name = ?`, absent when the filter is blank
#[must_use]
pub fn group_name_eq(group_name: Option<&str>) -> Option<Predicate> {
    non_blank(group_name).map(|g| Predicate::Eq(Field::GroupName, Value::Text(g.to_string())))
}

/// `age >= ?`, absent when no bound is given
#[must_use]
pub fn age_goe(min_age: Option<i32>) -> Option<Predicate> {
    min_age.map(|a| Predicate::Gte(Field::Age, Value::Int(a)))
}

/// `age <= ?`, absent when no bound is given
#[must_use]
pub fn age_loe(max_age: Option<i32>) -> Option<Predicate> {
    max_age.map(|a| Predicate::Lte(Field::Age, Value::Int(a)))
}

fn check_text_length(field: Field, value: Option<&str>) -> Result<(), SearchError> {
    match value {
        Some(v) if v.len() > MAX_FIELD_VALUE_LENGTH => Err(SearchError::invalid_request(format!(
            "{} filter exceeds {MAX_FIELD_VALUE_LENGTH} bytes",
            field.name()
        ))),
        _ => Ok(()),
    }
}

/// Translate criteria into one optional predicate per criterion, in a fixed order:
/// username, group name, minimum age, maximum age.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRequest`] when `minAge > maxAge` or a text
/// filter is unreasonably long. Inverted bounds are rejected here instead of
/// being sent to the executor, where they would look like "no matches".
pub fn build_predicates(criteria: &SearchCriteria) -> Result<[Option<Predicate>; 4], SearchError> {
    check_text_length(Field::Username, criteria.username_filter())?;
    check_text_length(Field::GroupName, criteria.group_name_filter())?;

    if let (Some(min), Some(max)) = (criteria.min_age_bound(), criteria.max_age_bound())
        && min > max
    {
        return Err(SearchError::invalid_request(format!(
            "minAge ({min}) must not be greater than maxAge ({max})"
        )));
    }

    Ok([
        username_eq(criteria.username_filter()),
        group_name_eq(criteria.group_name_filter()),
        age_goe(criteria.min_age_bound()),
        age_loe(criteria.max_age_bound()),
    ])
}

/// AND together every present predicate, skipping absent ones.
///
/// With nothing present the result is [`Predicate::All`].
pub fn combine<I>(predicates: I) -> Predicate
where
    I: IntoIterator<Item = Option<Predicate>>,
{
    predicates
        .into_iter()
        .flatten()
        .fold(Predicate::All, Predicate::and)
}

/// Builder and combinator in one step.
///
/// # Errors
///
/// Same as [`build_predicates`].
pub fn apply_filters(criteria: &SearchCriteria) -> Result<Predicate, SearchError> {
    Ok(combine(build_predicates(criteria)?))
}
