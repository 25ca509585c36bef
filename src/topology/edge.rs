use crate::geometry::EdgeCurve;

use super::coedge::CoEdgeId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// Data associated with a topological edge.
///
/// An edge connects two vertices and optionally carries a geometric curve
/// owned by the caller. Once inserted into a loop it is used by exactly two
/// partnered coedges.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub(crate) from: VertexId,
    /// End vertex of the edge.
    pub(crate) to: VertexId,
    /// The geometric carrier of this edge, if any.
    pub curve: Option<EdgeCurve>,
    /// Representative use of this edge.
    pub(crate) coedge: Option<CoEdgeId>,
    /// Marks an edge produced by splitting a wall-like boundary.
    pub split_edge: bool,
    /// Marks an edge lying inside a region rather than on its border.
    pub inner_edge: bool,
}

impl EdgeData {
    /// Creates a bare edge between two vertices.
    #[must_use]
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            curve: None,
            coedge: None,
            split_edge: false,
            inner_edge: false,
        }
    }

    /// Attaches a curve payload.
    #[must_use]
    pub fn with_curve(mut self, curve: EdgeCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Start vertex.
    #[must_use]
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// End vertex.
    #[must_use]
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Representative coedge, if the edge has been inserted into topology.
    #[must_use]
    pub fn coedge(&self) -> Option<CoEdgeId> {
        self.coedge
    }

    /// The endpoint opposite to `vertex`, or `None` if `vertex` is not an endpoint.
    #[must_use]
    pub fn other_end(&self, vertex: VertexId) -> Option<VertexId> {
        if self.from == vertex {
            Some(self.to)
        } else if self.to == vertex {
            Some(self.from)
        } else {
            None
        }
    }

    /// Copies the caller-visible properties (curve and flags) onto a new edge
    /// between `from` and `to`.
    #[must_use]
    pub(crate) fn derive(&self, from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            curve: self.curve.clone(),
            coedge: None,
            split_edge: self.split_edge,
            inner_edge: self.inner_edge,
        }
    }
}
