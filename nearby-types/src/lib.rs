//! # nearby-types
//!
//! Core data types shared by the `nearby` proximity query engine.
//!
//! - **Coordinates**: `Coordinate`, an exact 2-D location usable as a map key
//! - **Identifiers**: `TopicId`, `QuestionId`
//! - **Records**: `TopicRecord`, `QuestionRecord` (build-phase input)
//! - **Queries**: `QueryMode`, `Query`
//! - **Configuration**: `SpatialIndexKind`
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use nearby_types::coordinate::Coordinate;
//! use nearby_types::query::{Query, QueryMode};
//!
//! let query = Query::new(QueryMode::from_tag("q"), 3, Coordinate::new(1.5, -2.0));
//! assert_eq!(query.mode, QueryMode::Question);
//! ```

pub mod config;
pub mod coordinate;
pub mod ids;
pub mod query;
pub mod record;
