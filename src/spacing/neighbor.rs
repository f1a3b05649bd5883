//! Nearest-neighbor distances within a zone
//!
//! The reference computation is a dense pairwise distance matrix with the
//! diagonal replaced by `+∞` before the row-wise minimum. The k-d tree path
//! returns the exact same minima and is selected for large zones.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::KdTree;

/// A well location in a planar coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Squared Euclidean distance between two points.
///
/// Overflows to `inf` once a coordinate difference exceeds ~1.3e154; callers
/// that need the true distance go through [`euclidean`].
#[inline]
pub(crate) fn sq_dist(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

/// Euclidean distance between two points.
///
/// `sqrt` of the squared distance, falling back to `hypot` when squaring
/// overflows. Infinite only if a coordinate difference is itself infinite.
#[inline]
pub fn euclidean(a: &Point, b: &Point) -> f64 {
    let sq = sq_dist(a, b);
    if sq.is_finite() {
        sq.sqrt()
    } else {
        (a.x - b.x).hypot(a.y - b.y)
    }
}

/// Which nearest-neighbor algorithm to run for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborStrategy {
    /// Full n×n distance matrix
    Dense,
    /// Exact k-d tree search
    KdTree,
    /// k-d tree once the zone holds at least `min_zone_size` wells
    Auto { min_zone_size: usize },
}

impl Default for NeighborStrategy {
    fn default() -> Self {
        Self::Auto {
            min_zone_size: crate::config::defaults::KD_TREE_MIN_ZONE_SIZE,
        }
    }
}

impl NeighborStrategy {
    fn uses_tree(self, n: usize) -> bool {
        match self {
            Self::Dense => false,
            Self::KdTree => true,
            Self::Auto { min_zone_size } => n >= min_zone_size,
        }
    }
}

/// Dense pairwise distance matrix, row-major, `n × n`.
pub fn distance_matrix(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut matrix = vec![0.0; n * n];
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate() {
            matrix[i * n + j] = euclidean(a, b);
        }
    }
    matrix
}

/// Minimum distance from each point to any other point, aligned with `points`.
///
/// A single point has no neighbor and gets `f64::INFINITY`. Two points at the
/// same coordinates get `0.0`.
pub fn min_distances(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut matrix = distance_matrix(points);
    for i in 0..n {
        matrix[i * n + i] = f64::INFINITY;
    }

    if n == 0 {
        return Vec::new();
    }
    matrix
        .chunks_exact(n)
        .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
        .collect()
}

/// [`min_distances`] with an explicit algorithm choice.
pub fn min_distances_with(points: &[Point], strategy: NeighborStrategy) -> Vec<f64> {
    if strategy.uses_tree(points.len()) {
        debug!(points = points.len(), "Nearest neighbors via k-d tree");
        let tree = KdTree::build(points);
        (0..points.len()).map(|i| tree.nearest_distance(i)).collect()
    } else {
        min_distances(points)
    }
}
