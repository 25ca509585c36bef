use tracing::{debug, instrument};

use crate::error::{MergeConflict, Result, TopologyError};
use crate::topology::{EdgeId, LoopId, TopologyStore, VertexId};

/// Fuses the two edges meeting at a 2-valent vertex into one.
///
/// The first parent edge of the vertex survives: its endpoint at the vertex
/// moves to the far end of the second edge, whose uses are cut out of their
/// loops. The second edge and the vertex are destroyed. This undoes an
/// [`Esplit`](super::Esplit) at a single vertex.
#[derive(Debug)]
pub struct MergeEdgesOnVertex {
    vertex: VertexId,
}

/// Result of [`MergeEdgesOnVertex`] when no refusal occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The edges were fused; `edge` is the surviving edge.
    Merged { edge: EdgeId },
    /// The vertex does not have exactly two incident edges; nothing changed.
    NotApplicable { valence: usize },
}

impl MergeEdgesOnVertex {
    /// Creates a new `MergeEdgesOnVertex` operation.
    #[must_use]
    pub fn new(vertex: VertexId) -> Self {
        Self { vertex }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::IncompatibleMerge`] if the edges' flags differ
    /// or their curves are not the same carrier, or if both edges join the same
    /// pair of vertices so the result would be a closed edge. The store is left
    /// untouched.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<MergeOutcome> {
        let parents = store.vertex(self.vertex)?.parents().to_vec();
        let &[keep, absorbed] = parents.as_slice() else {
            debug!(valence = parents.len(), "merge not applicable");
            return Ok(MergeOutcome::NotApplicable {
                valence: parents.len(),
            });
        };

        let kept = store.edge(keep)?;
        let dropped = store.edge(absorbed)?;
        if kept.split_edge != dropped.split_edge || kept.inner_edge != dropped.inner_edge {
            return Err(TopologyError::IncompatibleMerge(MergeConflict::FlagMismatch).into());
        }
        match (&kept.curve, &dropped.curve) {
            (None, None) => {}
            (Some(a), Some(b)) => a
                .check_mergeable(b)
                .map_err(TopologyError::IncompatibleMerge)?,
            _ => return Err(TopologyError::IncompatibleMerge(MergeConflict::CurveKind).into()),
        }

        let near = kept
            .other_end(self.vertex)
            .ok_or(TopologyError::EntityNotFound("vertex"))?;
        let far = dropped
            .other_end(self.vertex)
            .ok_or(TopologyError::EntityNotFound("vertex"))?;
        if near == far || near == self.vertex || far == self.vertex {
            return Err(TopologyError::IncompatibleMerge(MergeConflict::WouldCollapse).into());
        }

        let mut touched: Vec<LoopId> = Vec::new();
        for co in store.edge_uses(absorbed)? {
            if let Some(owner) = store.coedge(co)?.owner() {
                if !touched.contains(&owner) {
                    touched.push(owner);
                }
            }
            store.unlink_coedge(co)?;
            store.remove_coedge(co)?;
        }
        store.remove_edge(absorbed)?;
        store.rewire_edge_end(keep, self.vertex, far)?;
        store.remove_vertex(self.vertex)?;

        store.check_loops(&touched)?;
        debug!(?keep, ?absorbed, vertex = ?self.vertex, "merged edges");
        Ok(MergeOutcome::Merged { edge: keep })
    }
}
