//! Nearest-neighbor expansion queries over labeled 2-D points.
//!
//! Topics sit at coordinates; questions reference topics. A query asks for
//! the `n` topics nearest a location, or for `n` distinct questions reachable
//! from the nearest topics, widening the neighbor search until enough are
//! found or every point has been visited.
//!
//! ## Features
//! - **Static indexes**: built once, read-only afterwards, shareable across threads
//! - **Spatial index**: R*-tree (default) or linear scan, same deterministic tie-break
//! - **Text workloads**: parse the line format, answer every query, format output
//!
//! ```rust
//! use nearby::{Coordinate, Nearby, Query};
//!
//! let nearby = Nearby::builder()
//!     .topic(1, 0.0, 0.0)
//!     .topic(2, 0.0, 0.0)
//!     .topic(3, 4.0, 4.0)
//!     .question(10, [1])
//!     .question(11, [2, 3])
//!     .build()?;
//!
//! let here = Coordinate::new(0.5, 0.0);
//! assert_eq!(nearby.answer(&Query::topics(3, here))?, vec![2, 1, 3]);
//! assert_eq!(nearby.answer(&Query::questions(2, here))?, vec![10, 11]);
//! # Ok::<(), nearby::NearbyError>(())
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod labels;
pub mod nearby;
pub mod spatial_index;

pub use builder::NearbyBuilder;
pub use config::{Config, SpatialIndexKind};
pub use engine::{NeighborExpansionEngine, QuestionSearch};
pub use error::{NearbyError, Result};
pub use labels::{LabelFanoutIndex, PointLabelIndex};
pub use nearby::{IndexStats, Nearby};
pub use spatial_index::{LinearIndex, RTreeIndex, SpatialIndex};

pub use nearby_types::coordinate::Coordinate;
pub use nearby_types::ids::{QuestionId, TopicId};
pub use nearby_types::query::{Query, QueryMode};
pub use nearby_types::record::{QuestionRecord, TopicRecord};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Nearby, NearbyBuilder, NearbyError, Result, SpatialIndexKind};

    pub use crate::{Coordinate, Query, QueryMode};

    pub use crate::{QuestionId, QuestionRecord, TopicId, TopicRecord};

    pub use crate::input::{format_answer, parse_workload};
}
