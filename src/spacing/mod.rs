//! Well spacing geometry
//!
//! Nearest-neighbor distance within a zone and its conversion to an
//! equivalent drainage area.
//!
//! ## Usage
//!
//! ```ignore
//! let points = [Point::new(0.0, 0.0), Point::new(3.0, 0.0)];
//! let dist = min_distances(&points);          // [3.0, 3.0]
//! let acres = distance_to_acres(dist[0]);     // ~0.00175
//! ```

mod area;
mod kdtree;
mod neighbor;

pub use area::{distance_to_acres, SQUARE_METERS_PER_ACRE};
pub use kdtree::KdTree;
pub use neighbor::{
    distance_matrix, euclidean, min_distances, min_distances_with, NeighborStrategy, Point,
};
