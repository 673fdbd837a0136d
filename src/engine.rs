//! Neighbor-expansion aggregation.
//!
//! Topic queries take the `n` nearest points once. Question queries widen the
//! neighbor request by doubling until `n` distinct questions are collected or
//! every indexed point has been visited.

use crate::labels::{LabelFanoutIndex, PointLabelIndex};
use crate::spatial_index::SpatialIndex;
use nearby_types::coordinate::Coordinate;
use nearby_types::ids::{QuestionId, TopicId};
use nearby_types::query::{Query, QueryMode};
use rustc_hash::FxHashSet;

/// Outcome of a question search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSearch {
    /// Distinct questions, at most the target count.
    pub questions: Vec<QuestionId>,
    /// Neighbor requests issued.
    pub rounds: usize,
    /// Size of the last neighbor request.
    pub request_size: usize,
}

/// Upper bound on neighbor requests for a question search.
///
/// Equals ⌈log2(points / target)⌉ + 1 when `target < points`, else 1.
pub fn max_rounds(points: usize, target: usize) -> usize {
    if points == 0 || target == 0 {
        return 0;
    }
    let mut rounds = 1;
    let mut size = target;
    while size < points {
        size = size.saturating_mul(2);
        rounds += 1;
    }
    rounds
}

/// Answers proximity queries against built, read-only indexes.
///
/// Holds only borrows, so any number of engines can share the same indexes
/// across threads.
#[derive(Clone, Copy)]
pub struct NeighborExpansionEngine<'a> {
    points: &'a PointLabelIndex,
    fanout: &'a LabelFanoutIndex,
    spatial: &'a dyn SpatialIndex,
}

impl<'a> NeighborExpansionEngine<'a> {
    pub fn new(
        points: &'a PointLabelIndex,
        fanout: &'a LabelFanoutIndex,
        spatial: &'a dyn SpatialIndex,
    ) -> Self {
        Self {
            points,
            fanout,
            spatial,
        }
    }

    /// Answer one query with raw IDs, at most `target` of them.
    ///
    /// Unsupported modes produce an empty answer.
    pub fn answer(&self, mode: QueryMode, target: usize, at: &Coordinate) -> Vec<i64> {
        match mode {
            QueryMode::Topic => self
                .nearest_topics(target, at)
                .into_iter()
                .map(TopicId::get)
                .collect(),
            QueryMode::Question => self
                .nearest_questions(target, at)
                .questions
                .into_iter()
                .map(QuestionId::get)
                .collect(),
            QueryMode::Unsupported => {
                log::trace!("Unsupported query mode at {}, answering empty", at);
                Vec::new()
            }
        }
    }

    pub fn answer_query(&self, query: &Query) -> Vec<i64> {
        self.answer(query.mode, query.target, &query.location)
    }

    /// Topics at the `target` nearest points.
    ///
    /// Points contribute in the spatial index's order; topics sharing a point
    /// come highest ID first. The result is cut to `target` entries.
    pub fn nearest_topics(&self, target: usize, at: &Coordinate) -> Vec<TopicId> {
        if target == 0 {
            return Vec::new();
        }

        let mut topics = Vec::with_capacity(target.min(self.points.topic_count()));
        for point in self.spatial.nearest(at, target) {
            topics.extend(self.points.topics_at_descending(&point));
            if topics.len() >= target {
                break;
            }
        }
        topics.truncate(target);

        log::trace!("topic query at {} -> {} ids", at, topics.len());
        topics
    }

    /// Distinct questions reachable from the nearest points.
    ///
    /// Starts with `target` neighbors and doubles the request until `target`
    /// questions are found or the request covers every indexed point. Each
    /// round rescans from the nearest point; questions already collected are
    /// skipped. Topics sharing a point are visited in insertion order and
    /// each topic's questions highest ID first.
    pub fn nearest_questions(&self, target: usize, at: &Coordinate) -> QuestionSearch {
        let total = self.spatial.len();
        if target == 0 || total == 0 {
            return QuestionSearch::default();
        }

        let mut questions = Vec::with_capacity(target.min(self.fanout.question_count()));
        let mut seen = FxHashSet::default();
        let mut request_size = target;
        let mut rounds = 0;

        loop {
            rounds += 1;
            debug_assert!(rounds <= max_rounds(total, target));

            for point in self.spatial.nearest(at, request_size) {
                for &topic in self.points.topics_at(&point) {
                    for question in self.fanout.questions_for_descending(topic) {
                        if seen.insert(question) {
                            questions.push(question);
                        }
                    }

                    if questions.len() >= target {
                        questions.truncate(target);
                        return QuestionSearch {
                            questions,
                            rounds,
                            request_size,
                        };
                    }
                }
            }

            if request_size >= total {
                break;
            }
            request_size = request_size.saturating_mul(2);
            log::debug!(
                "question query at {}: {} of {} found, widening to {} neighbors",
                at,
                questions.len(),
                target,
                request_size
            );
        }

        log::trace!(
            "question query at {} exhausted {} points with {} of {} ids",
            at,
            total,
            questions.len(),
            target
        );
        QuestionSearch {
            questions,
            rounds,
            request_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial_index::{LinearIndex, RTreeIndex};
    use nearby_types::record::{QuestionRecord, TopicRecord};

    struct Fixture {
        points: PointLabelIndex,
        fanout: LabelFanoutIndex,
        spatial: RTreeIndex,
    }

    impl Fixture {
        fn new(topics: &[TopicRecord], questions: &[QuestionRecord]) -> Self {
            let points = PointLabelIndex::from_records(topics);
            let fanout = LabelFanoutIndex::from_records(questions, &points);
            let spatial = RTreeIndex::build(points.coordinates());
            Self {
                points,
                fanout,
                spatial,
            }
        }

        fn engine(&self) -> NeighborExpansionEngine<'_> {
            NeighborExpansionEngine::new(&self.points, &self.fanout, &self.spatial)
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    fn shared_point() -> Fixture {
        Fixture::new(
            &[TopicRecord::new(1, 0.0, 0.0), TopicRecord::new(2, 0.0, 0.0)],
            &[QuestionRecord::new(10, [1]), QuestionRecord::new(11, [2])],
        )
    }

    /// Five topics on the x axis at 1..=5; only the far ones have questions.
    fn sparse_line() -> Fixture {
        Fixture::new(
            &[
                TopicRecord::new(1, 1.0, 0.0),
                TopicRecord::new(2, 2.0, 0.0),
                TopicRecord::new(3, 3.0, 0.0),
                TopicRecord::new(4, 4.0, 0.0),
                TopicRecord::new(5, 5.0, 0.0),
            ],
            &[
                QuestionRecord::new(100, [4]),
                QuestionRecord::new(101, [5]),
                QuestionRecord::new(102, [5, 4]),
            ],
        )
    }

    #[test]
    fn test_topics_descending_at_shared_point() {
        let fx = shared_point();
        assert_eq!(fx.engine().answer(QueryMode::Topic, 2, &origin()), vec![2, 1]);
    }

    #[test]
    fn test_topics_truncated_inside_a_point() {
        let fx = shared_point();
        assert_eq!(fx.engine().answer(QueryMode::Topic, 1, &origin()), vec![2]);
    }

    #[test]
    fn test_topics_follow_point_order_not_id_order() {
        let fx = Fixture::new(
            &[
                TopicRecord::new(1, 3.0, 0.0),
                TopicRecord::new(9, 1.0, 0.0),
                TopicRecord::new(4, 2.0, 0.0),
                TopicRecord::new(8, 2.0, 0.0),
            ],
            &[],
        );
        assert_eq!(
            fx.engine().answer(QueryMode::Topic, 4, &origin()),
            vec![9, 8, 4, 1]
        );
        assert_eq!(fx.engine().answer(QueryMode::Topic, 2, &origin()), vec![9, 8]);
    }

    #[test]
    fn test_topic_cardinality() {
        let fx = sparse_line();
        for n in 1..10 {
            assert!(fx.engine().nearest_topics(n, &origin()).len() <= n);
        }
        assert_eq!(fx.engine().nearest_topics(10, &origin()).len(), 5);
    }

    #[test]
    fn test_single_question_at_shared_point() {
        // Topics at one point are visited in insertion order, so topic 1's
        // question wins. Sorting topics descending first would yield 11.
        let fx = shared_point();
        assert_eq!(fx.engine().answer(QueryMode::Question, 1, &origin()), vec![10]);
        assert_eq!(
            fx.engine().answer(QueryMode::Question, 2, &origin()),
            vec![10, 11]
        );
    }

    #[test]
    fn test_questions_descending_within_topic() {
        let fx = Fixture::new(
            &[TopicRecord::new(1, 0.0, 0.0)],
            &[
                QuestionRecord::new(5, [1]),
                QuestionRecord::new(20, [1]),
                QuestionRecord::new(7, [1]),
            ],
        );
        assert_eq!(
            fx.engine().answer(QueryMode::Question, 3, &origin()),
            vec![20, 7, 5]
        );
    }

    #[test]
    fn test_widening_reaches_far_questions() {
        let fx = sparse_line();
        let search = fx.engine().nearest_questions(1, &origin());

        // Requests of 1, 2 and 4 neighbors; topic 4 sits fourth nearest.
        assert_eq!(search.questions, vec![QuestionId(102)]);
        assert_eq!(search.rounds, 3);
        assert_eq!(search.request_size, 4);
    }

    #[test]
    fn test_widening_dedups_across_topics() {
        let fx = sparse_line();
        let search = fx.engine().nearest_questions(3, &origin());

        // Topic 4: [102, 100]; topic 5: [102 (seen), 101].
        assert_eq!(
            search.questions,
            vec![QuestionId(102), QuestionId(100), QuestionId(101)]
        );
        assert_eq!(search.rounds, 2);
        assert_eq!(search.request_size, 6);
    }

    #[test]
    fn test_exhausted_search_returns_short() {
        let fx = sparse_line();
        let search = fx.engine().nearest_questions(4, &origin());

        assert_eq!(search.questions.len(), 3);
        assert!(search.request_size >= 5);
        assert!(search.rounds <= max_rounds(5, 4));
    }

    #[test]
    fn test_rounds_bounded() {
        let fx = sparse_line();
        for target in 1..=8 {
            let search = fx.engine().nearest_questions(target, &Coordinate::new(-100.0, 0.0));
            assert!(
                search.rounds <= max_rounds(5, target),
                "target {} took {} rounds",
                target,
                search.rounds
            );
        }
    }

    #[test]
    fn test_unknown_topic_does_not_stall() {
        let fx = Fixture::new(
            &[TopicRecord::new(1, 0.0, 0.0), TopicRecord::new(2, 1.0, 0.0)],
            &[QuestionRecord::new(10, [99]), QuestionRecord::new(11, [2])],
        );
        assert_eq!(fx.engine().answer(QueryMode::Question, 1, &origin()), vec![11]);
        assert_eq!(fx.engine().answer(QueryMode::Question, 5, &origin()), vec![11]);
    }

    #[test]
    fn test_huge_target_returns_everything_reachable() {
        let fx = Fixture::new(
            &[TopicRecord::new(1, 0.0, 0.0)],
            &[QuestionRecord::new(10, [1])],
        );
        let engine = fx.engine();
        assert_eq!(engine.answer(QueryMode::Topic, usize::MAX, &origin()), vec![1]);
        assert_eq!(engine.answer(QueryMode::Question, usize::MAX, &origin()), vec![10]);
        assert_eq!(engine.nearest_questions(usize::MAX, &origin()).rounds, 1);
    }

    #[test]
    fn test_unsupported_mode_is_empty() {
        let fx = shared_point();
        assert!(fx.engine().answer(QueryMode::Unsupported, 3, &origin()).is_empty());
    }

    #[test]
    fn test_zero_target() {
        let fx = shared_point();
        assert!(fx.engine().answer(QueryMode::Topic, 0, &origin()).is_empty());
        assert_eq!(
            fx.engine().nearest_questions(0, &origin()),
            QuestionSearch::default()
        );
    }

    #[test]
    fn test_empty_index_answers_empty() {
        let fx = Fixture::new(&[], &[QuestionRecord::new(1, [1])]);
        assert!(fx.engine().answer(QueryMode::Topic, 3, &origin()).is_empty());
        assert!(fx.engine().answer(QueryMode::Question, 3, &origin()).is_empty());
    }

    #[test]
    fn test_answer_is_idempotent() {
        let fx = sparse_line();
        let engine = fx.engine();
        for mode in [QueryMode::Topic, QueryMode::Question] {
            let first = engine.answer(mode, 3, &Coordinate::new(2.5, 1.0));
            assert_eq!(engine.answer(mode, 3, &Coordinate::new(2.5, 1.0)), first);
        }
    }

    #[test]
    fn test_engine_agnostic_to_index_impl() {
        let fx = sparse_line();
        let linear = LinearIndex::build(fx.points.coordinates());
        let other = NeighborExpansionEngine::new(&fx.points, &fx.fanout, &linear);
        for target in 1..6 {
            for mode in [QueryMode::Topic, QueryMode::Question] {
                assert_eq!(
                    fx.engine().answer(mode, target, &Coordinate::new(3.2, -1.0)),
                    other.answer(mode, target, &Coordinate::new(3.2, -1.0))
                );
            }
        }
    }

    #[test]
    fn test_max_rounds() {
        assert_eq!(max_rounds(5, 1), 4);
        assert_eq!(max_rounds(5, 5), 1);
        assert_eq!(max_rounds(5, 9), 1);
        assert_eq!(max_rounds(8, 2), 3);
        assert_eq!(max_rounds(0, 2), 0);
    }
}
