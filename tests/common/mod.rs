#![allow(dead_code)]

use roster_search::entities::{member, team};
use roster_search::{SeaOrmExecutor, SearchCriteria};
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::prelude::*;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// teamA: member1 (10), member2 (40); teamB: member3 (20), member4 (30)
pub async fn seed_roster(db: &DatabaseConnection) -> Result<(), DbErr> {
    team::Entity::insert_many([team_row(1, "teamA"), team_row(2, "teamB")])
        .exec(db)
        .await?;
    member::Entity::insert_many([
        member_row(1, Some("member1"), 10, Some(1)),
        member_row(2, Some("member2"), 40, Some(1)),
        member_row(3, Some("member3"), 20, Some(2)),
        member_row(4, Some("member4"), 30, Some(2)),
    ])
    .exec(db)
    .await?;
    Ok(())
}

/// Member 5, aged 50, without a team
pub async fn seed_loner(db: &DatabaseConnection) -> Result<(), DbErr> {
    member::Entity::insert(member_row(5, Some("loner"), 50, None))
        .exec(db)
        .await?;
    Ok(())
}

/// Member 6, aged 25, in teamA but without a username
pub async fn seed_anonymous(db: &DatabaseConnection) -> Result<(), DbErr> {
    member::Entity::insert(member_row(6, None, 25, Some(1)))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn seeded_executor() -> SeaOrmExecutor {
    let db = setup_test_db().await.expect("Failed to set up test database");
    seed_roster(&db).await.expect("Failed to seed roster");
    SeaOrmExecutor::new(db)
}

pub fn team_row(id: i64, name: &str) -> team::ActiveModel {
    team::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
    }
}

pub fn member_row(id: i64, username: Option<&str>, age: i32, team_id: Option<i64>) -> member::ActiveModel {
    member::ActiveModel {
        id: Set(id),
        username: Set(username.map(str::to_string)),
        age: Set(age),
        team_id: Set(team_id),
    }
}

pub fn all() -> SearchCriteria {
    SearchCriteria::new()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTeamTable), Box::new(CreateMemberTable)]
    }
}

pub struct CreateTeamTable;

#[async_trait::async_trait]
impl MigrationName for CreateTeamTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_team_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTeamTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(TeamEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(TeamColumn::Id)
                    .big_integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(TeamColumn::Name).string().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamEntity).to_owned())
            .await?;
        Ok(())
    }
}

pub struct CreateMemberTable;

#[async_trait::async_trait]
impl MigrationName for CreateMemberTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_member_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateMemberTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(MemberEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(MemberColumn::Id)
                    .big_integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(MemberColumn::Username).string().null())
            .col(ColumnDef::new(MemberColumn::Age).integer().not_null())
            .col(ColumnDef::new(MemberColumn::TeamId).big_integer().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_members_team_id")
                    .from(MemberEntity, MemberColumn::TeamId)
                    .to(TeamEntity, TeamColumn::Id),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberEntity).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum TeamColumn {
    Id,
    Name,
}

impl Iden for TeamColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct TeamEntity;

impl Iden for TeamEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "teams").unwrap();
    }
}

#[derive(Debug)]
pub enum MemberColumn {
    Id,
    Username,
    Age,
    TeamId,
}

impl Iden for MemberColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Username => "username",
                Self::Age => "age",
                Self::TeamId => "team_id",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct MemberEntity;

impl Iden for MemberEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "members").unwrap();
    }
}
