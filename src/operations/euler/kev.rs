use tracing::{debug, instrument};

use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, LoopId, TopologyStore, VertexId};

/// Kill Edge, Vertex: removes a spur created by [`Mev`](super::Mev).
///
/// `vertex` must be the dangling end of `edge`: its only incident edge, with
/// the coedge arriving at it immediately followed by its partner. Both uses,
/// the edge and the vertex are destroyed and the chain is closed around the
/// gap. Removing the last spur of a loop leaves it empty again.
#[derive(Debug)]
pub struct Kev {
    edge: EdgeId,
    vertex: VertexId,
    loop_id: LoopId,
}

impl Kev {
    /// Creates a new `Kev` operation.
    #[must_use]
    pub fn new(edge: EdgeId, vertex: VertexId, loop_id: LoopId) -> Self {
        Self {
            edge,
            vertex,
            loop_id,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexNotOnLoop`] if no coedge of the loop ends
    /// at `vertex`, [`TopologyError::EdgeMismatch`] if that coedge or its
    /// partner does not use `edge`, and [`TopologyError::InvalidTopology`] if
    /// `vertex` is not a dangling end.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let arriving = store.find_coedge_to_vertex(self.loop_id, self.vertex)?;
        let data = store.coedge(arriving)?;
        if data.edge() != self.edge {
            return Err(TopologyError::EdgeMismatch.into());
        }
        let leaving = data.partner().ok_or(TopologyError::EdgeMismatch)?;
        if store.coedge(leaving)?.edge() != self.edge {
            return Err(TopologyError::EdgeMismatch.into());
        }
        if data.next() != leaving || store.vertex(self.vertex)?.valence() != 1 {
            return Err(TopologyError::InvalidTopology(
                "vertex is not the dangling end of the edge".into(),
            )
            .into());
        }

        store.unlink_coedge(arriving)?;
        store.unlink_coedge(leaving)?;
        store.remove_coedge(arriving)?;
        store.remove_coedge(leaving)?;
        store.remove_edge(self.edge)?;
        store.remove_vertex(self.vertex)?;

        store.check_loops(&[self.loop_id])?;
        debug!(edge = ?self.edge, vertex = ?self.vertex, "kev removed edge and vertex");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::operations::euler::test_support::{p, vertex_cycle, wire};
    use crate::operations::euler::{Mef, Mev, Mvsf};
    use crate::topology::CoEdgeId;

    fn chain(store: &TopologyStore, loop_id: LoopId) -> Vec<CoEdgeId> {
        store
            .loop_coedges(loop_id)
            .unwrap()
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn kev_undoes_first_mev() {
        let mut store = TopologyStore::new();
        let seed = Mvsf::new(p(0.0, 0.0)).execute(&mut store).unwrap();
        let made = Mev::new(seed.vertex, p(1.0, 0.0), seed.loop_id)
            .execute(&mut store)
            .unwrap();

        Kev::new(made.edge, made.vertex, seed.loop_id)
            .execute(&mut store)
            .unwrap();

        assert!(store.loop_data(seed.loop_id).unwrap().root().is_none());
        assert_eq!(store.coedge_count(), 0);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.vertex_count(), 1);
        assert_eq!(store.vertex(seed.vertex).unwrap().valence(), 0);
        assert!(store.edge(made.edge).is_err());
        assert!(store.vertex(made.vertex).is_err());
        assert!(store.is_loop_valid(seed.loop_id));
    }

    #[test]
    fn mev_kev_round_trip_restores_chain() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(
            &mut store,
            &[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        );
        Mef::new(v[3], v[0], seed.loop_id).execute(&mut store).unwrap();

        for &anchor in &v {
            let root = store.loop_data(seed.loop_id).unwrap().root();
            let before = chain(&store, seed.loop_id);

            let made = Mev::new(anchor, p(5.0, 5.0), seed.loop_id)
                .execute(&mut store)
                .unwrap();
            assert_eq!(store.loop_len(seed.loop_id).unwrap(), before.len() + 2);
            Kev::new(made.edge, made.vertex, seed.loop_id)
                .execute(&mut store)
                .unwrap();

            assert_eq!(store.loop_data(seed.loop_id).unwrap().root(), root);
            assert_eq!(chain(&store, seed.loop_id), before);
        }
    }

    #[test]
    fn killing_inner_vertex_is_rejected() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let first_edge = store.vertex(v[0]).unwrap().parents()[0];

        let result = Kev::new(first_edge, v[1], seed.loop_id).execute(&mut store);
        assert!(result.is_err());
        assert_eq!(vertex_cycle(&store, seed.loop_id), vec![v[0], v[1], v[2], v[1]]);
    }

    #[test]
    fn wrong_edge_is_a_mismatch() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let first_edge = store.vertex(v[0]).unwrap().parents()[0];

        let result = Kev::new(first_edge, v[2], seed.loop_id).execute(&mut store);
        assert!(matches!(
            result,
            Err(KernelError::Topology(TopologyError::EdgeMismatch))
        ));
    }
}
