use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::{NullOrdering, SimpleExpr},
};

use crate::entities::{member, team};
use crate::filtering::{Direction, Field, Predicate, SortField, SortKey, Value};
use crate::models::RawRow;
use crate::query::{ComposedQuery, CountQuery};

use super::QueryExecutor;

/// Runs composed queries as SQL over a Sea-ORM connection.
///
/// The team relation is fetched with a single `LEFT JOIN` built from
/// [`member::Relation::Team`], never with per-row lookups.
#[derive(Debug, Clone)]
pub struct SeaOrmExecutor {
    db: DatabaseConnection,
}

impl SeaOrmExecutor {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl From<DatabaseConnection> for SeaOrmExecutor {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}

#[derive(Clone, Copy)]
enum Comparison {
    Eq,
    Gte,
    Lte,
}

fn compare<C: ColumnTrait>(column: C, comparison: Comparison, value: sea_orm::Value) -> SimpleExpr {
    match comparison {
        Comparison::Eq => column.eq(value),
        Comparison::Gte => column.gte(value),
        Comparison::Lte => column.lte(value),
    }
}

fn leaf_expr(field: Field, comparison: Comparison, value: &Value) -> SimpleExpr {
    let value = match value {
        Value::Text(s) => sea_orm::Value::from(s.clone()),
        Value::Int(i) => sea_orm::Value::from(*i),
    };
    match field {
        Field::Username => compare(member::Column::Username, comparison, value),
        Field::Age => compare(member::Column::Age, comparison, value),
        Field::GroupName => compare(team::Column::Name, comparison, value),
    }
}

/// Translate a predicate into a Sea-ORM condition; `Predicate::All` becomes an empty `Condition::all()`.
#[must_use]
pub fn to_condition(predicate: &Predicate) -> Condition {
    match predicate {
        Predicate::All => Condition::all(),
        Predicate::Eq(field, value) => Condition::all().add(leaf_expr(*field, Comparison::Eq, value)),
        Predicate::Gte(field, value) => Condition::all().add(leaf_expr(*field, Comparison::Gte, value)),
        Predicate::Lte(field, value) => Condition::all().add(leaf_expr(*field, Comparison::Lte, value)),
        Predicate::And(parts) => parts
            .iter()
            .filter(|p| !p.is_match_all())
            .fold(Condition::all(), |condition, p| condition.add(to_condition(p))),
    }
}

fn order_by_column<C: ColumnTrait>(
    select: Select<member::Entity>,
    column: C,
    key: &SortKey,
) -> Select<member::Entity> {
    let order = match key.direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    };
    if key.nulls_last {
        select.order_by_with_nulls(column, order, NullOrdering::Last)
    } else {
        select.order_by(column, order)
    }
}

fn apply_order(select: Select<member::Entity>, key: &SortKey) -> Select<member::Entity> {
    match key.field {
        SortField::Id => order_by_column(select, member::Column::Id, key),
        SortField::Username => order_by_column(select, member::Column::Username, key),
        SortField::Age => order_by_column(select, member::Column::Age, key),
        SortField::GroupName => order_by_column(select, team::Column::Name, key),
    }
}

/// `members LEFT JOIN teams` filtered by `predicate`, selecting all member columns.
fn joined(predicate: &Predicate) -> Select<member::Entity> {
    member::Entity::find()
        .join(JoinType::LeftJoin, member::Relation::Team.def())
        .filter(to_condition(predicate))
}

#[async_trait]
impl QueryExecutor for SeaOrmExecutor {
    async fn run_query(&self, query: &ComposedQuery) -> Result<Vec<RawRow>, DbErr> {
        let mut select = joined(&query.filter)
            .select_only()
            .column_as(member::Column::Id, "member_id")
            .column_as(member::Column::Username, "username")
            .column_as(member::Column::Age, "age")
            .column_as(team::Column::Id, "team_id")
            .column_as(team::Column::Name, "team_name");

        for key in &query.order {
            select = apply_order(select, key);
        }

        if let Some(window) = query.window {
            select = select.offset(window.offset).limit(window.limit);
        }

        select.into_model::<RawRow>().all(&self.db).await
    }

    async fn run_count(&self, query: &CountQuery) -> Result<u64, DbErr> {
        joined(&query.filter).count(&self.db).await
    }
}
