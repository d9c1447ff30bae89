//! Sea-ORM entities the search runs against.
//!
//! `member` is the base relation; `team` is reached through the
//! `member.team_id -> team.id` relation with a left outer join.

pub mod member;
pub mod team;
