use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::entities::{member, team};
use crate::filtering::{Direction, Field, Predicate, SortField, SortKey, Value};
use crate::models::RawRow;
use crate::query::{ComposedQuery, CountQuery};

use super::QueryExecutor;

/// Evaluates composed queries over members and teams held in memory.
///
/// Semantics follow the SQL executor on SQLite: a comparison against a null
/// column never matches, and without an explicit nulls flag nulls sort
/// first ascending and last descending. Text compares bytewise.
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    teams: Vec<team::Model>,
    members: Vec<member::Model>,
}

impl MemoryExecutor {
    #[must_use]
    pub fn new(teams: Vec<team::Model>, members: Vec<member::Model>) -> Self {
        Self { teams, members }
    }

    /// `members LEFT JOIN teams ON members.team_id = teams.id`, in storage order
    fn joined(&self) -> Vec<RawRow> {
        let teams: HashMap<i64, &team::Model> = self.teams.iter().map(|t| (t.id, t)).collect();
        self.members
            .iter()
            .map(|m| {
                let team = m.team_id.and_then(|id| teams.get(&id));
                RawRow {
                    member_id: m.id,
                    username: m.username.clone(),
                    age: m.age,
                    team_id: team.map(|t| t.id),
                    team_name: team.map(|t| t.name.clone()),
                }
            })
            .collect()
    }

    fn matching(&self, predicate: &Predicate) -> Vec<RawRow> {
        self.joined()
            .into_iter()
            .filter(|row| matches(predicate, row))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cell<'a> {
    Int(i64),
    Text(&'a str),
}

fn cell<'a>(row: &'a RawRow, field: Field) -> Option<Cell<'a>> {
    match field {
        Field::Username => row.username.as_deref().map(Cell::Text),
        Field::Age => Some(Cell::Int(i64::from(row.age))),
        Field::GroupName => row.team_name.as_deref().map(Cell::Text),
    }
}

fn sort_cell(row: &RawRow, field: SortField) -> Option<Cell<'_>> {
    match field {
        SortField::Id => Some(Cell::Int(row.member_id)),
        SortField::Username => cell(row, Field::Username),
        SortField::Age => cell(row, Field::Age),
        SortField::GroupName => cell(row, Field::GroupName),
    }
}

/// `None` when the comparison is unknown (null column or mismatched types).
fn compare_to(row: &RawRow, field: Field, value: &Value) -> Option<Ordering> {
    match (cell(row, field)?, value) {
        (Cell::Text(a), Value::Text(b)) => Some(a.cmp(b.as_str())),
        (Cell::Int(a), Value::Int(b)) => Some(a.cmp(&i64::from(*b))),
        _ => None,
    }
}

fn matches(predicate: &Predicate, row: &RawRow) -> bool {
    match predicate {
        Predicate::All => true,
        Predicate::Eq(field, value) => compare_to(row, *field, value) == Some(Ordering::Equal),
        Predicate::Gte(field, value) => {
            matches!(compare_to(row, *field, value), Some(Ordering::Greater | Ordering::Equal))
        }
        Predicate::Lte(field, value) => {
            matches!(compare_to(row, *field, value), Some(Ordering::Less | Ordering::Equal))
        }
        Predicate::And(parts) => parts.iter().all(|p| matches(p, row)),
    }
}

fn compare_rows(a: &RawRow, b: &RawRow, order: &[SortKey]) -> Ordering {
    for key in order {
        let nulls_first = !key.nulls_last && key.direction == Direction::Asc;
        let ordering = match (sort_cell(a, key.field), sort_cell(b, key.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => {
                if nulls_first { Ordering::Less } else { Ordering::Greater }
            }
            (Some(_), None) => {
                if nulls_first { Ordering::Greater } else { Ordering::Less }
            }
            (Some(x), Some(y)) => match key.direction {
                Direction::Asc => x.cmp(&y),
                Direction::Desc => y.cmp(&x),
            },
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn run_query(&self, query: &ComposedQuery) -> Result<Vec<RawRow>, DbErr> {
        let mut rows = self.matching(&query.filter);
        rows.sort_by(|a, b| compare_rows(a, b, &query.order));

        if let Some(window) = query.window {
            let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
            rows = rows.into_iter().skip(offset).take(limit).collect();
        }

        Ok(rows)
    }

    async fn run_count(&self, query: &CountQuery) -> Result<u64, DbErr> {
        Ok(self.matching(&query.filter).len() as u64)
    }
}
