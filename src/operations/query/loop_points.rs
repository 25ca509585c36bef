use crate::error::Result;
use crate::math::Point3;
use crate::topology::{LoopId, TopologyStore};

/// Extracts the ordered point path of a loop.
///
/// Yields the start point of every coedge, walking `next` from the root, so
/// a closed loop of `n` coedges gives `n` points with the closing segment
/// implied. An empty loop yields no points.
pub struct LoopPoints {
    loop_id: LoopId,
}

impl LoopPoints {
    /// Creates a new `LoopPoints` query.
    #[must_use]
    pub fn new(loop_id: LoopId) -> Self {
        Self { loop_id }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop or one of its vertices is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Point3>> {
        let mut points = Vec::new();
        for (_, co) in store.loop_coedges(self.loop_id)? {
            points.push(store.vertex(co.from())?.point);
        }
        Ok(points)
    }
}
