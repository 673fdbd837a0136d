//! Index builder
//!
//! Collects topic and question records plus a [`Config`], then builds every
//! index in one pass: point labels, then question fan-out, then the spatial
//! index.

use crate::config::{Config, SpatialIndexKind};
use crate::error::{NearbyError, Result};
use crate::labels::{LabelFanoutIndex, PointLabelIndex};
use crate::nearby::Nearby;
use crate::spatial_index::build_spatial_index;
use nearby_types::record::{QuestionRecord, TopicRecord};

/// Builder for a [`Nearby`] handle.
#[derive(Debug, Default)]
pub struct NearbyBuilder {
    config: Config,
    topics: Vec<TopicRecord>,
    questions: Vec<QuestionRecord>,
}

impl NearbyBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Select the spatial index implementation.
    pub fn spatial_index(mut self, kind: SpatialIndexKind) -> Self {
        self.config = self.config.with_spatial_index(kind);
        self
    }

    /// Add one topic at `(x, y)`.
    pub fn topic(mut self, id: i64, x: f64, y: f64) -> Self {
        self.topics.push(TopicRecord::new(id, x, y));
        self
    }

    pub fn topics(mut self, records: impl IntoIterator<Item = TopicRecord>) -> Self {
        self.topics.extend(records);
        self
    }

    /// Add one question referencing `topics`.
    pub fn question(mut self, id: i64, topics: impl IntoIterator<Item = i64>) -> Self {
        self.questions.push(QuestionRecord::new(id, topics));
        self
    }

    pub fn questions(mut self, records: impl IntoIterator<Item = QuestionRecord>) -> Self {
        self.questions.extend(records);
        self
    }

    /// Build all indexes.
    ///
    /// Fails on an invalid configuration or, when coordinate validation is
    /// on, on a topic with a non-finite coordinate. An empty topic set is
    /// accepted and answers every query with nothing.
    pub fn build(self) -> Result<Nearby> {
        self.config.validate().map_err(NearbyError::Config)?;

        if self.config.validate_coordinates
            && let Some(bad) = self.topics.iter().find(|t| !t.location.is_finite())
        {
            return Err(NearbyError::InvalidInput(format!(
                "topic {} has non-finite coordinate {}",
                bad.id, bad.location
            )));
        }

        let points = PointLabelIndex::from_records(&self.topics);
        let fanout = LabelFanoutIndex::from_records(&self.questions, &points);
        let spatial = build_spatial_index(self.config.spatial_index, points.coordinates());

        if spatial.is_empty() {
            log::warn!("Spatial index is empty; every query will answer with no IDs");
        }

        let nearby = Nearby::from_parts(self.config, points, fanout, spatial);
        let stats = nearby.stats();
        log::info!(
            "Built {} index: {} topics at {} points, {} questions, {} links",
            nearby.config().spatial_index,
            stats.topics,
            stats.points,
            stats.questions,
            stats.links
        );
        Ok(nearby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = NearbyBuilder::new();
        assert_eq!(builder.config, Config::default());
        assert!(builder.topics.is_empty());
    }

    #[test]
    fn test_builder_collects_records() {
        let nearby = NearbyBuilder::new()
            .topic(1, 0.0, 0.0)
            .topic(2, 0.0, 0.0)
            .topic(3, 1.0, 1.0)
            .question(10, [1, 3])
            .question(11, [])
            .build()
            .unwrap();

        let stats = nearby.stats();
        assert_eq!(stats.topics, 3);
        assert_eq!(stats.points, 2);
        assert_eq!(stats.questions, 2);
        assert_eq!(stats.links, 2);
    }

    #[test]
    fn test_builder_selects_index() {
        let nearby = NearbyBuilder::new()
            .spatial_index(SpatialIndexKind::Linear)
            .topic(1, 0.0, 0.0)
            .build()
            .unwrap();
        assert_eq!(nearby.spatial_index_kind(), SpatialIndexKind::Linear);
    }

    #[test]
    fn test_builder_rejects_non_finite_topic() {
        let err = NearbyBuilder::new()
            .topic(1, 0.0, 0.0)
            .topic(2, f64::NAN, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, NearbyError::InvalidInput(msg) if msg.contains("topic 2")));
    }

    #[test]
    fn test_builder_without_validation_skips_non_finite_points() {
        let nearby = NearbyBuilder::new()
            .config(Config::default().with_validate_coordinates(false))
            .topic(1, 0.0, 0.0)
            .topic(2, f64::INFINITY, 1.0)
            .build()
            .unwrap();
        assert_eq!(nearby.stats().points, 2);
        assert_eq!(nearby.stats().indexed_points, 1);
    }

    #[test]
    fn test_builder_empty() {
        let nearby = NearbyBuilder::new().build().unwrap();
        assert_eq!(nearby.stats().points, 0);
    }
}
