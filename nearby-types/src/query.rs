//! Query modes and query values.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// What a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Topic IDs located at the nearest points (tag `t`).
    Topic,
    /// Question IDs reachable from the nearest points (tag `q`).
    Question,
    /// Any other tag. Always answered with an empty result.
    Unsupported,
}

impl QueryMode {
    /// Map a mode tag to a mode. Unknown tags are not an error.
    ///
    /// ```
    /// use nearby_types::query::QueryMode;
    ///
    /// assert_eq!(QueryMode::from_tag("t"), QueryMode::Topic);
    /// assert_eq!(QueryMode::from_tag("q"), QueryMode::Question);
    /// assert_eq!(QueryMode::from_tag("x"), QueryMode::Unsupported);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "t" => QueryMode::Topic,
            "q" => QueryMode::Question,
            _ => QueryMode::Unsupported,
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            QueryMode::Topic => Some("t"),
            QueryMode::Question => Some("q"),
            QueryMode::Unsupported => None,
        }
    }
}

/// A single proximity query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub mode: QueryMode,
    /// Number of IDs wanted; the answer never holds more.
    pub target: usize,
    pub location: Coordinate,
}

impl Query {
    pub fn new(mode: QueryMode, target: usize, location: Coordinate) -> Self {
        Self {
            mode,
            target,
            location,
        }
    }

    pub fn topics(target: usize, location: Coordinate) -> Self {
        Self::new(QueryMode::Topic, target, location)
    }

    pub fn questions(target: usize, location: Coordinate) -> Self {
        Self::new(QueryMode::Question, target, location)
    }
}
