//! Spatial index selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which nearest-neighbor structure backs the spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpatialIndexKind {
    /// R*-tree, bulk loaded once.
    #[default]
    #[serde(rename = "rtree")]
    RTree,
    /// Exhaustive scan with a bounded heap.
    #[serde(rename = "linear")]
    Linear,
}

impl SpatialIndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialIndexKind::RTree => "rtree",
            SpatialIndexKind::Linear => "linear",
        }
    }
}

impl FromStr for SpatialIndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rtree" => Ok(SpatialIndexKind::RTree),
            "linear" => Ok(SpatialIndexKind::Linear),
            other => Err(format!(
                "unknown spatial index '{}', expected 'rtree' or 'linear'",
                other
            )),
        }
    }
}

impl fmt::Display for SpatialIndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("rtree".parse::<SpatialIndexKind>(), Ok(SpatialIndexKind::RTree));
        assert_eq!("Linear".parse::<SpatialIndexKind>(), Ok(SpatialIndexKind::Linear));
        assert!("kdtree".parse::<SpatialIndexKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SpatialIndexKind::RTree).unwrap();
        assert_eq!(json, "\"rtree\"");
        let kind: SpatialIndexKind = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(kind, SpatialIndexKind::Linear);
    }
}
