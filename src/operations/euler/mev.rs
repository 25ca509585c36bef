use tracing::{debug, instrument, trace};

use crate::error::Result;
use crate::geometry::EdgeCurve;
use crate::math::Point3;
use crate::topology::{EdgeData, EdgeId, LoopId, TopologyStore, VertexData, VertexId};

/// Make Edge, Vertex: grows a spur from an existing vertex of a loop.
///
/// The new edge runs from `from` to a new vertex at `point`. Its two uses are
/// spliced into the loop right after the coedge arriving at `from`, so the
/// chain walks out along the spur and back.
#[derive(Debug)]
pub struct Mev {
    from: VertexId,
    point: Point3,
    loop_id: LoopId,
    curve: Option<EdgeCurve>,
}

/// Entities created by [`Mev`].
#[derive(Debug, Clone, Copy)]
pub struct MevResult {
    pub edge: EdgeId,
    pub vertex: VertexId,
}

impl Mev {
    /// Creates a new `Mev` operation.
    #[must_use]
    pub fn new(from: VertexId, point: Point3, loop_id: LoopId) -> Self {
        Self {
            from,
            point,
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
    /// Returns [`TopologyError::VertexNotOnLoop`](crate::error::TopologyError::VertexNotOnLoop)
    /// if the loop already has coedges and none of them ends at `from`, or an
    /// error if any referenced entity is missing.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<MevResult> {
        store.vertex(self.from)?;
        let anchor = match store.loop_data(self.loop_id)?.root() {
            Some(_) => Some(store.find_coedge_to_vertex(self.loop_id, self.from)?),
            None => None,
        };

        let vertex = store.add_vertex(VertexData::new(self.point));
        let mut data = EdgeData::new(self.from, vertex);
        data.curve.clone_from(&self.curve);
        let edge = store.add_edge(data)?;
        let (out, back) = store.add_coedge_pair(edge)?;

        match anchor {
            None => {
                store.link(out, back)?;
                store.link(back, out)?;
                store.loop_data_mut(self.loop_id)?.root = Some(out);
            }
            Some(prev) => {
                let after = store.coedge(prev)?.next();
                trace!(?prev, ?after, "splicing spur");
                store.link(prev, out)?;
                store.link(out, back)?;
                store.link(back, after)?;
            }
        }
        store.coedge_mut(out)?.owner = Some(self.loop_id);
        store.coedge_mut(back)?.owner = Some(self.loop_id);

        store.check_loops(&[self.loop_id])?;
        debug!(?edge, ?vertex, "mev created edge and vertex");
        Ok(MevResult { edge, vertex })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{KernelError, TopologyError};
    use crate::geometry::Line;
    use crate::operations::euler::test_support::{init_tracing, p, vertex_cycle, wire};
    use crate::operations::euler::Mvsf;

    #[test]
    fn first_edge_forms_stick_loop() {
        init_tracing();
        let mut store = TopologyStore::new();
        let seed = Mvsf::new(p(0.0, 0.0)).execute(&mut store).unwrap();
        let made = Mev::new(seed.vertex, Point3::new(1.0, 0.0, 0.0), seed.loop_id)
            .execute(&mut store)
            .unwrap();

        let edge = store.edge(made.edge).unwrap();
        assert_eq!(edge.from(), seed.vertex);
        assert_eq!(edge.to(), made.vertex);

        let root = store.loop_data(seed.loop_id).unwrap().root().unwrap();
        let next = store.coedge(root).unwrap().next();
        assert_ne!(next, root);
        assert_eq!(store.coedge(next).unwrap().next(), root);
        assert_eq!(store.coedge(root).unwrap().partner(), Some(next));
        assert_eq!(store.loop_len(seed.loop_id).unwrap(), 2);
        assert!(store.is_loop_valid(seed.loop_id));
    }

    #[test]
    fn spur_is_spliced_after_arriving_coedge() {
        let mut store = TopologyStore::new();
        let (seed, v) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);

        assert_eq!(store.loop_len(seed.loop_id).unwrap(), 4);
        assert_eq!(vertex_cycle(&store, seed.loop_id), vec![v[0], v[1], v[2], v[1]]);
        assert_eq!(store.vertex(v[1]).unwrap().valence(), 2);
    }

    #[test]
    fn curve_payload_is_attached() {
        let mut store = TopologyStore::new();
        let seed = Mvsf::new(p(0.0, 0.0)).execute(&mut store).unwrap();
        let line = Line::from_points(p(0.0, 0.0), p(1.0, 0.0)).unwrap();
        let made = Mev::new(seed.vertex, p(1.0, 0.0), seed.loop_id)
            .with_curve(EdgeCurve::Line(line.clone()))
            .execute(&mut store)
            .unwrap();
        assert_eq!(store.edge(made.edge).unwrap().curve, Some(EdgeCurve::Line(line)));
    }

    #[test]
    fn vertex_off_loop_is_rejected() {
        let mut store = TopologyStore::new();
        let (seed, _) = wire(&mut store, &[p(0.0, 0.0), p(1.0, 0.0)]);
        let stray = store.add_vertex(VertexData::new(p(5.0, 5.0)));
        let before = store.vertex_count();

        let result = Mev::new(stray, p(6.0, 5.0), seed.loop_id).execute(&mut store);
        assert!(matches!(
            result,
            Err(KernelError::Topology(TopologyError::VertexNotOnLoop))
        ));
        assert_eq!(store.vertex_count(), before);
    }
}
