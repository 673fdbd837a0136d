//! Built, immutable query handle.

use crate::builder::NearbyBuilder;
use crate::config::{Config, SpatialIndexKind};
use crate::engine::{NeighborExpansionEngine, QuestionSearch};
use crate::error::{NearbyError, Result};
use crate::labels::{LabelFanoutIndex, PointLabelIndex};
use crate::spatial_index::SpatialIndex;
use nearby_types::coordinate::Coordinate;
use nearby_types::query::Query;

/// Sizes of the built indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Topic records
    pub topics: usize,
    /// Distinct topic coordinates
    pub points: usize,
    /// Coordinates held by the spatial index
    pub indexed_points: usize,
    /// Question records
    pub questions: usize,
    /// Topic → question links
    pub links: usize,
}

/// Read-only indexes plus the configuration they were built with.
///
/// Nothing here changes after [`NearbyBuilder::build`], so a `Nearby` can be
/// shared across threads (for example behind an `Arc`) without locking.
pub struct Nearby {
    config: Config,
    points: PointLabelIndex,
    fanout: LabelFanoutIndex,
    spatial: Box<dyn SpatialIndex>,
}

impl Nearby {
    pub fn builder() -> NearbyBuilder {
        NearbyBuilder::new()
    }

    pub(crate) fn from_parts(
        config: Config,
        points: PointLabelIndex,
        fanout: LabelFanoutIndex,
        spatial: Box<dyn SpatialIndex>,
    ) -> Self {
        Self {
            config,
            points,
            fanout,
            spatial,
        }
    }

    pub fn engine(&self) -> NeighborExpansionEngine<'_> {
        NeighborExpansionEngine::new(&self.points, &self.fanout, self.spatial.as_ref())
    }

    /// Answer one query.
    ///
    /// Fails only when the query breaks the configuration: a non-finite
    /// location with coordinate validation on, or a target above
    /// `max_target_count`.
    pub fn answer(&self, query: &Query) -> Result<Vec<i64>> {
        self.check(query)?;
        Ok(self.engine().answer_query(query))
    }

    /// Answer every query in order. Nothing is answered if any query is invalid.
    pub fn answer_all(&self, queries: &[Query]) -> Result<Vec<Vec<i64>>> {
        for query in queries {
            self.check(query)?;
        }
        let engine = self.engine();
        Ok(queries.iter().map(|q| engine.answer_query(q)).collect())
    }

    /// Question search with round accounting.
    pub fn search_questions(&self, target: usize, at: &Coordinate) -> QuestionSearch {
        self.engine().nearest_questions(target, at)
    }

    pub fn check(&self, query: &Query) -> Result<()> {
        if self.config.validate_coordinates && !query.location.is_finite() {
            return Err(NearbyError::InvalidInput(format!(
                "query location {} is not finite",
                query.location
            )));
        }

        if let Some(max) = self.config.max_target_count
            && query.target > max
        {
            return Err(NearbyError::InvalidInput(format!(
                "query target {} exceeds max_target_count {}",
                query.target, max
            )));
        }

        Ok(())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            topics: self.points.topic_count(),
            points: self.points.len(),
            indexed_points: self.spatial.len(),
            questions: self.fanout.question_count(),
            links: self.fanout.link_count(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn spatial_index_kind(&self) -> SpatialIndexKind {
        self.spatial.kind()
    }

    pub fn point_labels(&self) -> &PointLabelIndex {
        &self.points
    }

    pub fn label_fanout(&self) -> &LabelFanoutIndex {
        &self.fanout
    }
}

impl std::fmt::Debug for Nearby {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nearby")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nearby {
        Nearby::builder()
            .config(Config::default().with_max_target_count(10))
            .topic(1, 0.0, 0.0)
            .topic(2, 0.0, 0.0)
            .question(10, [1])
            .question(11, [2])
            .build()
            .unwrap()
    }

    #[test]
    fn test_answer_checks_limits() {
        let nearby = sample();
        assert!(nearby.answer(&Query::topics(11, Coordinate::new(0.0, 0.0))).is_err());
        assert!(
            nearby
                .answer(&Query::topics(1, Coordinate::new(f64::NAN, 0.0)))
                .is_err()
        );
        assert_eq!(
            nearby.answer(&Query::topics(10, Coordinate::new(0.0, 0.0))).unwrap(),
            vec![2, 1]
        );
    }

    #[test]
    fn test_answer_all_is_all_or_nothing() {
        let nearby = sample();
        let queries = [
            Query::topics(2, Coordinate::new(0.0, 0.0)),
            Query::questions(50, Coordinate::new(0.0, 0.0)),
        ];
        assert!(nearby.answer_all(&queries).is_err());

        let answers = nearby.answer_all(&queries[..1]).unwrap();
        assert_eq!(answers, vec![vec![2, 1]]);
    }

    #[test]
    fn test_nearby_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Nearby>();
    }
}
