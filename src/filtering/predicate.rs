//! Executor-neutral filter expressions.
//!
//! A [`Predicate`] is a small tree over the searchable columns of the
//! member/team join. Executors translate it into whatever they run
//! (a Sea-ORM `Condition`, an in-memory row test, ...).

use std::fmt;

/// A searchable column of the member/team join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `members.username`
    Username,
    /// `members.age`
    Age,
    /// `teams.name`, null when the member has no team
    GroupName,
}

impl Field {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Age => "age",
            Self::GroupName => "groupName",
        }
    }
}

/// A literal compared against a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i32),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Boolean expression over one joined row.
///
/// Comparisons follow SQL semantics: comparing a null column never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every row.
    All,
    /// `field = value`
    Eq(Field, Value),
    /// `field >= value`
    Gte(Field, Value),
    /// `field <= value`
    Lte(Field, Value),
    /// Conjunction; an empty list matches every row.
    And(Vec<Predicate>),
}

impl Predicate {
    /// Whether this predicate imposes no constraint at all.
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        match self {
            Self::All => true,
            Self::And(parts) => parts.iter().all(Self::is_match_all),
            _ => false,
        }
    }

    /// Logical AND of `self` and `other`, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = Vec::new();
        for p in [self, other] {
            match p {
                Self::All => {}
                Self::And(inner) => parts.extend(inner),
                leaf => parts.push(leaf),
            }
        }
        match parts.len() {
            0 => Self::All,
            1 => parts.remove(0),
            _ => Self::And(parts),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "TRUE"),
            Self::Eq(field, value) => write!(f, "{} = {value}", field.name()),
            Self::Gte(field, value) => write!(f, "{} >= {value}", field.name()),
            Self::Lte(field, value) => write!(f, "{} <= {value}", field.name()),
            Self::And(parts) if parts.is_empty() => write!(f, "TRUE"),
            Self::And(parts) => {
                let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
                write!(f, "({})", rendered.join(" AND "))
            }
        }
    }
}
