//! Static k-nearest-neighbor indexes over distinct 2-D coordinates.
//!
//! Two implementations share one ordering contract: results ascend by
//! Euclidean distance, and equidistant points are ordered by ascending `x`,
//! then ascending `y`. The contract also decides which points make the cut
//! when several tie at the `count` boundary.
//!
//! # Example
//!
//! ```rust
//! use nearby::spatial_index::{RTreeIndex, SpatialIndex};
//! use nearby::Coordinate;
//!
//! let index = RTreeIndex::build(&[
//!     Coordinate::new(1.0, 0.0),
//!     Coordinate::new(-1.0, 0.0),
//!     Coordinate::new(5.0, 5.0),
//! ]);
//!
//! let nearest = index.nearest(&Coordinate::new(0.0, 0.0), 2);
//! assert_eq!(nearest, vec![Coordinate::new(-1.0, 0.0), Coordinate::new(1.0, 0.0)]);
//! ```

use crate::config::SpatialIndexKind;
use nearby_types::coordinate::Coordinate;
use rstar::RTree;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Nearest-neighbor lookups over a fixed point set.
pub trait SpatialIndex: Send + Sync {
    /// The `min(count, len())` points nearest to `at`, nearest first.
    fn nearest(&self, at: &Coordinate, count: usize) -> Vec<Coordinate>;

    /// Number of indexed points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> SpatialIndexKind;
}

/// Build the index selected by `kind`.
///
/// Non-finite coordinates are left out; no finite query could rank them.
pub fn build_spatial_index(
    kind: SpatialIndexKind,
    points: &[Coordinate],
) -> Box<dyn SpatialIndex> {
    match kind {
        SpatialIndexKind::RTree => Box::new(RTreeIndex::build(points)),
        SpatialIndexKind::Linear => Box::new(LinearIndex::build(points)),
    }
}

fn finite_points(points: &[Coordinate]) -> impl Iterator<Item = Coordinate> + '_ {
    points.iter().copied().filter(|p| {
        if p.is_finite() {
            true
        } else {
            log::warn!("Leaving non-finite coordinate {} out of the spatial index", p);
            false
        }
    })
}

fn rejects_query(at: &Coordinate, count: usize, len: usize) -> bool {
    if count == 0 || len == 0 {
        return true;
    }
    if !at.is_finite() {
        log::warn!("Rejecting nearest-neighbor query with non-finite location {}", at);
        return true;
    }
    false
}

/// A point ranked against a query location.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance_2: f64,
    point: Coordinate,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_2
            .total_cmp(&other.distance_2)
            .then_with(|| self.point.cmp_xy(&other.point))
    }
}

/// R*-tree backed index, bulk loaded once.
pub struct RTreeIndex {
    tree: RTree<[f64; 2]>,
}

impl RTreeIndex {
    pub fn build(points: &[Coordinate]) -> Self {
        let entries: Vec<[f64; 2]> = finite_points(points).map(Coordinate::to_array).collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }
}

impl SpatialIndex for RTreeIndex {
    fn nearest(&self, at: &Coordinate, count: usize) -> Vec<Coordinate> {
        if rejects_query(at, count, self.len()) {
            return Vec::new();
        }

        let query = at.to_array();
        let mut candidates: Vec<Candidate> = Vec::with_capacity(count.min(self.len()));

        // The iterator yields in non-decreasing distance. Past `count`, keep
        // pulling only while points tie with the boundary distance so the
        // tie-break below sees all of them.
        for (point, distance_2) in self.tree.nearest_neighbor_iter_with_distance_2(&query) {
            if candidates.len() >= count
                && let Some(boundary) = candidates.last()
                && distance_2 > boundary.distance_2
            {
                break;
            }
            candidates.push(Candidate {
                distance_2,
                point: Coordinate::from(*point),
            });
        }

        candidates.sort_unstable();
        candidates.truncate(count);
        candidates.into_iter().map(|c| c.point).collect()
    }

    fn len(&self) -> usize {
        self.tree.size()
    }

    fn kind(&self) -> SpatialIndexKind {
        SpatialIndexKind::RTree
    }
}

/// Exhaustive scan keeping the best `count` points in a bounded max-heap.
///
/// O(n log k) per query. Useful for small point sets and as a reference for
/// the R*-tree.
pub struct LinearIndex {
    points: Vec<Coordinate>,
}

impl LinearIndex {
    pub fn build(points: &[Coordinate]) -> Self {
        Self {
            points: finite_points(points).collect(),
        }
    }
}

impl SpatialIndex for LinearIndex {
    fn nearest(&self, at: &Coordinate, count: usize) -> Vec<Coordinate> {
        if rejects_query(at, count, self.len()) {
            return Vec::new();
        }

        let mut heap = BinaryHeap::with_capacity(count.min(self.points.len()));
        for point in &self.points {
            let candidate = Candidate {
                distance_2: point.distance_2(at),
                point: *point,
            };
            if heap.len() < count {
                heap.push(candidate);
            } else if let Some(worst) = heap.peek()
                && candidate < *worst
            {
                heap.pop();
                heap.push(candidate);
            }
        }

        heap.into_sorted_vec().into_iter().map(|c| c.point).collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn kind(&self) -> SpatialIndexKind {
        SpatialIndexKind::Linear
    }
}
