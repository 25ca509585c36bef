use crate::math::Point3;

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// Data associated with a topological vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex.
    pub point: Point3,
    /// Edges that use this vertex as an endpoint.
    ///
    /// Maintained by the store; an edge whose two endpoints are this vertex
    /// appears once.
    pub(crate) parents: Vec<EdgeId>,
}

impl VertexData {
    /// Creates a new, unattached vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            parents: Vec::new(),
        }
    }

    /// Edges incident to this vertex.
    #[must_use]
    pub fn parents(&self) -> &[EdgeId] {
        &self.parents
    }

    /// Number of incident edges.
    #[must_use]
    pub fn valence(&self) -> usize {
        self.parents.len()
    }

    pub(crate) fn attach(&mut self, edge: EdgeId) {
        if !self.parents.contains(&edge) {
            self.parents.push(edge);
        }
    }

    pub(crate) fn detach(&mut self, edge: EdgeId) {
        self.parents.retain(|&e| e != edge);
    }
}
