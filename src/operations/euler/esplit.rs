use tracing::{debug, instrument, trace};

use crate::error::{OperationError, Result};
use crate::topology::{CoEdgeId, EdgeId, LoopId, TopologyStore, VertexId};

/// Edge split: subdivides an edge at a sequence of interior vertices.
///
/// The original edge is shortened to end at the first interior vertex and a
/// new edge, copying its curve and flags, is created for every following
/// segment. Each existing use of the edge receives matching uses of the new
/// segments, spliced in traversal order: after the forward use, and before
/// the backward use in reverse segment order.
#[derive(Debug)]
pub struct Esplit {
    edge: EdgeId,
    vertices: Vec<VertexId>,
}

/// Edges produced by [`Esplit`].
#[derive(Debug, Clone)]
pub struct EsplitResult {
    /// Every segment from the original `from` vertex to the original `to`
    /// vertex. The first entry is the original, shortened edge.
    pub edges: Vec<EdgeId>,
}

impl Esplit {
    /// Creates a new `Esplit` operation splitting `edge` at `vertices`,
    /// ordered from the edge's `from` end toward its `to` end.
    #[must_use]
    pub fn new(edge: EdgeId, vertices: Vec<VertexId>) -> Self {
        Self { edge, vertices }
    }

    /// Executes the operation. Returns `None` when there is nothing to split.
    ///
    /// # Errors
    ///
    /// Returns an error if an interior vertex is missing, repeated, or equal
    /// to an endpoint of the edge.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<Option<EsplitResult>> {
        let Some(&first) = self.vertices.first() else {
            return Ok(None);
        };
        let template = store.edge(self.edge)?.clone();
        let (start, end) = (template.from(), template.to());
        for (i, &v) in self.vertices.iter().enumerate() {
            store.vertex(v)?;
            if v == start || v == end || self.vertices[..i].contains(&v) {
                return Err(OperationError::InvalidInput(
                    "split vertices must be distinct interior vertices".into(),
                )
                .into());
            }
        }

        let mut forward = None;
        let mut backward = None;
        for co in store.edge_uses(self.edge)? {
            if store.coedge(co)?.is_reversed() {
                backward = Some(co);
            } else {
                forward = Some(co);
            }
        }

        store.rewire_edge_to(self.edge, first)?;

        let mut edges = vec![self.edge];
        let mut pieces: Vec<(Option<CoEdgeId>, Option<CoEdgeId>)> = Vec::new();
        let mut stops = self.vertices.clone();
        stops.push(end);
        for pair in stops.windows(2) {
            let piece = store.add_edge(template.derive(pair[0], pair[1]))?;
            let fwd = match forward {
                Some(_) => Some(store.add_coedge(piece, false)?),
                None => None,
            };
            let bwd = match backward {
                Some(_) => Some(store.add_coedge(piece, true)?),
                None => None,
            };
            if let (Some(f), Some(b)) = (fwd, bwd) {
                store.set_partners(f, b)?;
            }
            edges.push(piece);
            pieces.push((fwd, bwd));
        }

        let mut touched: Vec<LoopId> = Vec::new();

        if let Some(origin) = forward {
            let owner = store.coedge(origin)?.owner();
            let after = store.coedge(origin)?.next();
            let mut prev = origin;
            for co in pieces.iter().filter_map(|&(f, _)| f) {
                store.link(prev, co)?;
                store.coedge_mut(co)?.owner = owner;
                prev = co;
            }
            store.link(prev, after)?;
            touched.extend(owner);
            trace!(?origin, ?owner, "spliced forward segments");
        }

        if let Some(origin) = backward {
            let owner = store.coedge(origin)?.owner();
            let mut prev = store.coedge(origin)?.prev();
            for co in pieces.iter().rev().filter_map(|&(_, b)| b) {
                store.link(prev, co)?;
                store.coedge_mut(co)?.owner = owner;
                prev = co;
            }
            store.link(prev, origin)?;
            if let Some(owner) = owner {
                if !touched.contains(&owner) {
                    touched.push(owner);
                }
            }
            trace!(?origin, ?owner, "spliced backward segments");
        }

        store.check_loops(&touched)?;
        debug!(edge = ?self.edge, segments = edges.len(), "esplit divided edge");
        Ok(Some(EsplitResult { edges }))
    }
}
