//! Label layers: coordinate → topics and topic → questions.
//!
//! Both maps keep their per-key sequences in insertion order. Any ordering a
//! query needs is applied to a copy at query time, never to the stored data.

use nearby_types::coordinate::Coordinate;
use nearby_types::ids::{QuestionId, TopicId};
use nearby_types::record::{QuestionRecord, TopicRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Topics sharing one coordinate. Usually one.
pub type TopicList = SmallVec<[TopicId; 2]>;

/// Questions referencing one topic.
pub type QuestionList = SmallVec<[QuestionId; 4]>;

/// Maps a coordinate to the topics located exactly there.
#[derive(Debug, Default, Clone)]
pub struct PointLabelIndex {
    topics: FxHashMap<Coordinate, TopicList>,
    // Distinct coordinates in first-seen order, so the spatial index is
    // always built from the same sequence.
    order: Vec<Coordinate>,
    topic_count: usize,
}

impl PointLabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TopicRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record.id, record.location);
        }
        index
    }

    pub(crate) fn insert(&mut self, topic: TopicId, at: Coordinate) {
        let list = self.topics.entry(at).or_insert_with(|| {
            self.order.push(at);
            TopicList::new()
        });
        list.push(topic);
        self.topic_count += 1;
    }

    /// Topics at `at` in insertion order. Empty if nothing is there.
    pub fn topics_at(&self, at: &Coordinate) -> &[TopicId] {
        self.topics.get(at).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Topics at `at`, highest ID first.
    pub fn topics_at_descending(&self, at: &Coordinate) -> TopicList {
        let mut list = TopicList::from_slice(self.topics_at(at));
        list.sort_unstable_by(|a, b| b.cmp(a));
        list
    }

    /// Distinct coordinates in first-seen order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.order
    }

    /// Number of distinct coordinates.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of topic records, counting each shared coordinate once per topic.
    pub fn topic_count(&self) -> usize {
        self.topic_count
    }
}

/// Maps a topic to the questions that reference it.
#[derive(Debug, Default, Clone)]
pub struct LabelFanoutIndex {
    questions: FxHashMap<TopicId, QuestionList>,
    question_count: usize,
    link_count: usize,
}

impl LabelFanoutIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from question records.
    ///
    /// References to topics missing from `points` are kept; they are simply
    /// never reached by a spatial query.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a QuestionRecord>,
        points: &PointLabelIndex,
    ) -> Self {
        let known: FxHashSet<TopicId> = points
            .topics
            .values()
            .flat_map(|l| l.iter().copied())
            .collect();

        let mut index = Self::new();
        for record in records {
            for &topic in &record.topics {
                if !known.contains(&topic) {
                    log::debug!(
                        "question {} references unknown topic {}",
                        record.id,
                        topic
                    );
                }
                index.insert(topic, record.id);
            }
            index.question_count += 1;
        }
        index
    }

    pub(crate) fn insert(&mut self, topic: TopicId, question: QuestionId) {
        self.questions.entry(topic).or_default().push(question);
        self.link_count += 1;
    }

    /// Questions referencing `topic` in insertion order. Empty for unknown topics.
    pub fn questions_for(&self, topic: TopicId) -> &[QuestionId] {
        self.questions
            .get(&topic)
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    /// Questions referencing `topic`, highest ID first.
    pub fn questions_for_descending(&self, topic: TopicId) -> QuestionList {
        let mut list = QuestionList::from_slice(self.questions_for(topic));
        list.sort_unstable_by(|a, b| b.cmp(a));
        list
    }

    /// Number of question records read.
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// Number of topic → question links.
    pub fn link_count(&self) -> usize {
        self.link_count
    }
}
