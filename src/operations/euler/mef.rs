use tracing::{debug, instrument, trace};

use crate::error::{OperationError, Result};
use crate::geometry::EdgeCurve;
use crate::topology::{
    EdgeData, EdgeId, FaceData, FaceId, LoopData, LoopId, TopologyStore, VertexId,
};

/// Make Edge, Face: joins two vertices of a loop, splitting it in two.
///
/// The forward use of the new edge (`from` to `to`) stays in the original
/// loop and closes the part of the chain running from `to` round to `from`.
/// The backward use bounds a new loop holding the remainder, and a new face
/// is created on that loop.
#[derive(Debug)]
pub struct Mef {
    from: VertexId,
    to: VertexId,
    loop_id: LoopId,
    curve: Option<EdgeCurve>,
}

/// Entities created by [`Mef`].
#[derive(Debug, Clone, Copy)]
pub struct MefResult {
    pub edge: EdgeId,
    /// The loop split off the original one.
    pub loop_id: LoopId,
    /// The face bounded by the new loop.
    pub face: FaceId,
}

impl Mef {
    /// Creates a new `Mef` operation.
    #[must_use]
    pub fn new(from: VertexId, to: VertexId, loop_id: LoopId) -> Self {
        Self {
            from,
            to,
            loop_id,
            curve: None,
        }
    }

    /// Attaches a curve payload to the new edge.
    #[must_use]
    pub fn with_curve(mut self, curve: EdgeCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if `from == to`, if the loop fails validation before
    /// the split, or if either vertex has no coedge in the loop.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<MefResult> {
        if self.from == self.to {
            return Err(
                OperationError::InvalidInput("mef needs two distinct vertices".into()).into(),
            );
        }
        store.validate_loop(self.loop_id)?;

        let from_co = store.find_coedge_to_vertex(self.loop_id, self.from)?;
        let to_co = store.find_coedge_to_vertex(self.loop_id, self.to)?;
        let from_next = store.coedge(from_co)?.next();
        let to_next = store.coedge(to_co)?.next();
        trace!(?from_co, ?to_co, "splitting loop");

        let mut data = EdgeData::new(self.from, self.to);
        data.curve.clone_from(&self.curve);
        let edge = store.add_edge(data)?;
        let (forward, backward) = store.add_coedge_pair(edge)?;

        store.link(from_co, forward)?;
        store.link(forward, to_next)?;
        store.link(to_co, backward)?;
        store.link(backward, from_next)?;

        let loop_id = store.add_loop(LoopData {
            root: Some(backward),
            face: None,
        });
        let face = store.add_face(FaceData::new(loop_id));
        store.loop_data_mut(loop_id)?.face = Some(face);
        store.loop_data_mut(self.loop_id)?.root = Some(forward);

        store.claim_chain(self.loop_id)?;
        store.claim_chain(loop_id)?;

        store.check_loops(&[self.loop_id, loop_id])?;
        debug!(?edge, ?loop_id, ?face, "mef created edge and face");
        Ok(MefResult {
            edge,
            loop_id,
            face,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{KernelError, TopologyError};
    use crate::operations::euler::test_support::{p, vertex_cycle, wire};
    use crate::topology::VertexData;

    #[test]
    fn closing_two_edge_wire_makes_triangles() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        assert_eq!(store.loop_len(seed.loop_id).unwrap(), 4);

        let made = Mef::new(v[2], v[0], seed.loop_id).execute(&mut store).unwrap();

        assert_eq!(store.loop_len(seed.loop_id).unwrap(), 3);
        assert_eq!(store.loop_len(made.loop_id).unwrap(), 3);
        assert!(store.is_loop_valid(seed.loop_id));
        assert!(store.is_loop_valid(made.loop_id));

        assert_eq!(vertex_cycle(&store, seed.loop_id), vec![v[2], v[0], v[1]]);
        assert_eq!(vertex_cycle(&store, made.loop_id), vec![v[0], v[2], v[1]]);

        assert_eq!(store.face(made.face).unwrap().outer_loop, made.loop_id);
        assert_eq!(store.loop_data(made.loop_id).unwrap().face, Some(made.face));
    }

    #[test]
    fn square_then_diagonal() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(
            &mut store,
            &[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        );
        let outer = Mef::new(v[3], v[0], seed.loop_id).execute(&mut store).unwrap();
        let square = seed.loop_id;
        assert_eq!(store.loop_len(square).unwrap(), 4);
        assert_eq!(store.loop_len(outer.loop_id).unwrap(), 4);
        assert_eq!(vertex_cycle(&store, square), vec![v[3], v[0], v[1], v[2]]);

        let before = store.loop_len(square).unwrap();
        let diagonal = Mef::new(v[0], v[2], square).execute(&mut store).unwrap();

        let left = store.loop_len(square).unwrap();
        let right = store.loop_len(diagonal.loop_id).unwrap();
        assert_eq!(left + right, before + 2);
        assert_eq!((left, right), (3, 3));
        assert!(store.is_loop_valid(square));
        assert!(store.is_loop_valid(diagonal.loop_id));
        assert!(store.is_loop_valid(outer.loop_id));
        assert_eq!(store.face_count(), 3);
    }

    #[test]
    fn every_coedge_is_retagged() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(
            &mut store,
            &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)],
        );
        let made = Mef::new(v[3], v[0], seed.loop_id).execute(&mut store).unwrap();

        for (lp, expected) in [(seed.loop_id, 4), (made.loop_id, 4)] {
            let mut count = 0;
            store
                .for_each_coedge(lp, |_, co| {
                    assert_eq!(co.owner(), Some(lp));
                    count += 1;
                })
                .unwrap();
            assert_eq!(count, expected);
        }
    }

    #[test]
    fn same_vertex_is_rejected() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0)]);
        assert!(Mef::new(v[0], v[0], seed.loop_id).execute(&mut store).is_err());
    }

    #[test]
    fn vertex_off_loop_is_rejected() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0)]);
        let stray = store.add_vertex(VertexData::new(p(3.0, 3.0)));
        let result = Mef::new(v[0], stray, seed.loop_id).execute(&mut store);
        assert!(matches!(
            result,
            Err(KernelError::Topology(TopologyError::VertexNotOnLoop))
        ));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn corrupt_loop_is_refused() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let root = store.loop_data(seed.loop_id).unwrap().root().unwrap();
        store.coedge_mut(root).unwrap().prev = root;

        let result = Mef::new(v[2], v[0], seed.loop_id).execute(&mut store);
        assert!(matches!(
            result,
            Err(KernelError::Topology(TopologyError::InconsistentLoop(_)))
        ));
    }
}
