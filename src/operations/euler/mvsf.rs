use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::math::Point3;
use crate::topology::{FaceData, FaceId, LoopData, LoopId, TopologyStore, VertexData, VertexId};

/// Make Vertex, Shell, Face: bootstraps a new, disconnected topology.
///
/// Creates one vertex, an empty loop and a face bounded by that loop. No
/// edges exist yet; the vertex is the anchor for the first `Mev`.
#[derive(Debug)]
pub struct Mvsf {
    point: Point3,
}

/// Entities created by [`Mvsf`].
#[derive(Debug, Clone, Copy)]
pub struct MvsfResult {
    pub face: FaceId,
    pub loop_id: LoopId,
    pub vertex: VertexId,
}

impl Mvsf {
    /// Creates a new `Mvsf` operation.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the position has a non-finite coordinate.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<MvsfResult> {
        if !self.point.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::Degenerate("vertex position must be finite".into()).into());
        }

        let vertex = store.add_vertex(VertexData::new(self.point));
        let loop_id = store.add_loop(LoopData::new());
        let face = store.add_face(FaceData::new(loop_id));
        store.loop_data_mut(loop_id)?.face = Some(face);

        debug!(?face, ?loop_id, ?vertex, "mvsf created seed topology");
        Ok(MvsfResult {
            face,
            loop_id,
            vertex,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_creates_vertex_loop_and_face() {
        let mut store = TopologyStore::new();
        let seed = Mvsf::new(Point3::new(0.0, 0.0, 0.0))
            .execute(&mut store)
            .unwrap();

        let lp = store.loop_data(seed.loop_id).unwrap();
        assert!(lp.root().is_none());
        assert_eq!(lp.face, Some(seed.face));
        assert_eq!(store.face(seed.face).unwrap().outer_loop, seed.loop_id);
        assert!(store.face(seed.face).unwrap().inner_loops.is_empty());
        assert_eq!(store.vertex(seed.vertex).unwrap().point, Point3::origin());
        assert_eq!(store.vertex(seed.vertex).unwrap().valence(), 0);
        assert_eq!(store.edge_count(), 0);
        assert!(store.is_loop_valid(seed.loop_id));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let mut store = TopologyStore::new();
        let result = Mvsf::new(Point3::new(f64::NAN, 0.0, 0.0)).execute(&mut store);
        assert!(result.is_err());
        assert_eq!(store.vertex_count(), 0);
    }
}
