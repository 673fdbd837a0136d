//! Typed identifiers for topics and questions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Topic, an entity located at one coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TopicId(pub i64);

/// Identifier of a Question, an entity referencing zero or more Topics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

impl TopicId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl QuestionId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TopicId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
