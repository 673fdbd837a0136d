//! Topic and question records fed to the index builder.

use crate::coordinate::Coordinate;
use crate::ids::{QuestionId, TopicId};
use serde::{Deserialize, Serialize};

/// A Topic and the coordinate it sits at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: TopicId,
    pub location: Coordinate,
}

impl TopicRecord {
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            id: TopicId(id),
            location: Coordinate::new(x, y),
        }
    }
}

/// A Question and the Topics it references, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub topics: Vec<TopicId>,
}

impl QuestionRecord {
    pub fn new(id: i64, topics: impl IntoIterator<Item = i64>) -> Self {
        Self {
            id: QuestionId(id),
            topics: topics.into_iter().map(TopicId).collect(),
        }
    }
}
