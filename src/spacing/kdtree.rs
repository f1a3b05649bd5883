//! 2-D k-d tree for exact nearest-neighbor search
//!
//! Built once per zone over an index permutation (median split, alternating
//! axis). Searches compare squared distances and take a single square root at
//! the end, which yields exactly the minimum the dense matrix produces.

use std::cmp::Ordering;

use super::neighbor::{euclidean, sq_dist, Point};

/// k-d tree over a borrowed point slice.
#[derive(Debug, Clone)]
pub struct KdTree<'a> {
    points: &'a [Point],
    /// Implicit tree: the median of each sub-slice is the node, the halves
    /// on either side are its subtrees.
    order: Vec<usize>,
}

impl<'a> KdTree<'a> {
    pub fn build(points: &'a [Point]) -> Self {
        let mut order: Vec<usize> = (0..points.len()).collect();
        Self::build_recursive(points, &mut order, 0);
        Self { points, order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distance from point `query` to its nearest other point.
    ///
    /// `f64::INFINITY` when the tree holds no other point.
    pub fn nearest_distance(&self, query: usize) -> f64 {
        let mut best_sq = f64::INFINITY;
        self.search(&self.order, 0, query, &mut best_sq);
        if best_sq.is_finite() {
            return best_sq.sqrt();
        }
        // every squared distance overflowed (or there is no other point)
        let q = &self.points[query];
        self.points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != query)
            .map(|(_, p)| euclidean(q, p))
            .fold(f64::INFINITY, f64::min)
    }

    fn build_recursive(points: &[Point], indices: &mut [usize], depth: usize) {
        if indices.len() <= 1 {
            return;
        }
        let axis = depth % 2;
        let mid = indices.len() / 2;
        indices.select_nth_unstable_by(mid, |&a, &b| cmp_axis(&points[a], &points[b], axis));

        let (left, right) = indices.split_at_mut(mid);
        Self::build_recursive(points, left, depth + 1);
        Self::build_recursive(points, &mut right[1..], depth + 1);
    }

    fn search(&self, indices: &[usize], depth: usize, query: usize, best_sq: &mut f64) {
        if indices.is_empty() {
            return;
        }
        let axis = depth % 2;
        let mid = indices.len() / 2;
        let node = indices[mid];
        let q = &self.points[query];
        let p = &self.points[node];

        if node != query {
            let d = sq_dist(q, p);
            if d < *best_sq {
                *best_sq = d;
            }
        }

        let diff = coord(q, axis) - coord(p, axis);
        let (near, far) = if diff <= 0.0 {
            (&indices[..mid], &indices[mid + 1..])
        } else {
            (&indices[mid + 1..], &indices[..mid])
        };

        self.search(near, depth + 1, query, best_sq);
        // far side can only hold a closer point if the splitting line is within reach
        if diff * diff <= *best_sq {
            self.search(far, depth + 1, query, best_sq);
        }
    }
}

#[inline]
fn coord(p: &Point, axis: usize) -> f64 {
    if axis == 0 {
        p.x
    } else {
        p.y
    }
}

fn cmp_axis(a: &Point, b: &Point, axis: usize) -> Ordering {
    coord(a, axis).total_cmp(&coord(b, axis))
}
