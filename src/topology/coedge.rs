use super::edge::EdgeId;
use super::loops::LoopId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a coedge in the topology store.
    pub struct CoEdgeId;
}

/// A directed use of an edge inside a loop.
///
/// Coedges form a circular doubly-linked chain through `prev`/`next`. A
/// coedge that is not linked into any chain points at itself.
#[derive(Debug, Clone)]
pub struct CoEdgeData {
    pub(crate) edge: EdgeId,
    pub(crate) from: VertexId,
    pub(crate) to: VertexId,
    /// `true` when this use runs against the edge's natural direction.
    pub(crate) reversed: bool,
    pub(crate) prev: CoEdgeId,
    pub(crate) next: CoEdgeId,
    pub(crate) partner: Option<CoEdgeId>,
    pub(crate) owner: Option<LoopId>,
}

impl CoEdgeData {
    /// The edge this coedge uses.
    #[must_use]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Start vertex in traversal direction.
    #[must_use]
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// End vertex in traversal direction.
    #[must_use]
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Whether the use runs from the edge's `to` toward its `from`.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Predecessor in the owning chain.
    #[must_use]
    pub fn prev(&self) -> CoEdgeId {
        self.prev
    }

    /// Successor in the owning chain.
    #[must_use]
    pub fn next(&self) -> CoEdgeId {
        self.next
    }

    /// Opposite-direction use of the same edge.
    #[must_use]
    pub fn partner(&self) -> Option<CoEdgeId> {
        self.partner
    }

    /// Loop this coedge is linked into.
    #[must_use]
    pub fn owner(&self) -> Option<LoopId> {
        self.owner
    }
}
