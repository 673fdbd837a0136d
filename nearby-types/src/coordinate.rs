//! Planar coordinates with exact, hashable equality.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An exact 2-D location.
///
/// Equality is value equality on both components, so `0.0` and `-0.0` are
/// the same coordinate. There is no tolerance: `(0.1, 0.0)` and
/// `(0.1000000001, 0.0)` are distinct keys.
///
/// # Examples
///
/// ```
/// use nearby_types::coordinate::Coordinate;
///
/// let a = Coordinate::new(0.0, 1.0);
/// let b = Coordinate::new(-0.0, 1.0);
/// assert_eq!(a, b);
/// assert_eq!(a.distance_2(&Coordinate::new(3.0, 5.0)), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_2(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Total order by `x`, then `y`.
    ///
    /// Used to break ties between equidistant points.
    pub fn cmp_xy(&self, other: &Coordinate) -> Ordering {
        let (ax, ay) = self.normalized();
        let (bx, by) = other.normalized();
        ax.total_cmp(&bx).then_with(|| ay.total_cmp(&by))
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    // Adding positive zero folds -0.0 into 0.0.
    #[inline]
    fn normalized(&self) -> (f64, f64) {
        (self.x + 0.0, self.y + 0.0)
    }

    #[inline]
    fn key_bits(&self) -> (u64, u64) {
        let (x, y) = self.normalized();
        (x.to_bits(), y.to_bits())
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.key_bits() == other.key_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_bits().hash(state);
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
