pub mod coedge;
pub mod edge;
pub mod face;
pub mod loops;
mod validate;
pub mod vertex;

pub use coedge::{CoEdgeData, CoEdgeId};
pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use loops::{LoopCoEdges, LoopData, LoopId};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices), so
/// the cyclic coedge links never form self-referential structures and a
/// destroyed entity simply stops resolving.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    pub(crate) coedges: SlotMap<CoEdgeId, CoEdgeData>,
    loops: SlotMap<LoopId, LoopData>,
    faces: SlotMap<FaceId, FaceData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Number of live vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn remove_vertex(&mut self, id: VertexId) -> Result<VertexData, TopologyError> {
        self.vertices
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    // --- Edge operations ---

    /// Inserts an edge, registers it with both endpoint vertices and returns its ID.
    ///
    /// The edge starts without coedges regardless of what `data` carries.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not in the store.
    pub fn add_edge(&mut self, mut data: EdgeData) -> Result<EdgeId, TopologyError> {
        self.vertex(data.from)?;
        self.vertex(data.to)?;
        data.coedge = None;
        let (from, to) = (data.from, data.to);
        let id = self.edges.insert(data);
        self.vertex_mut(from)?.attach(id);
        self.vertex_mut(to)?.attach(id);
        Ok(id)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The coedges using `edge`: its representative first, then the partner.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or its representative coedge is missing.
    pub fn edge_uses(&self, edge: EdgeId) -> Result<Vec<CoEdgeId>, TopologyError> {
        let Some(rep) = self.edge(edge)?.coedge else {
            return Ok(Vec::new());
        };
        let mut uses = vec![rep];
        if let Some(partner) = self.coedge(rep)?.partner {
            uses.push(partner);
        }
        Ok(uses)
    }

    /// Detaches an edge from its endpoints and removes it.
    pub(crate) fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeData, TopologyError> {
        let data = self
            .edges
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("edge"))?;
        for vertex in [data.from, data.to] {
            if let Some(v) = self.vertices.get_mut(vertex) {
                v.detach(id);
            }
        }
        Ok(data)
    }

    /// Moves the `old` endpoint of `edge` (and of its uses) onto `new`.
    pub(crate) fn rewire_edge_end(
        &mut self,
        edge: EdgeId,
        old: VertexId,
        new: VertexId,
    ) -> Result<(), TopologyError> {
        self.vertex(new)?;
        let data = self.edge_mut(edge)?;
        if data.from != old && data.to != old {
            return Err(TopologyError::InvalidTopology(
                "vertex is not an endpoint of the edge".into(),
            ));
        }
        if data.from == old {
            data.from = new;
        }
        if data.to == old {
            data.to = new;
        }

        for co in self.edge_uses(edge)? {
            let data = self.coedge_mut(co)?;
            if data.from == old {
                data.from = new;
            }
            if data.to == old {
                data.to = new;
            }
        }

        if let Some(v) = self.vertices.get_mut(old) {
            v.detach(edge);
        }
        self.vertex_mut(new)?.attach(edge);
        Ok(())
    }

    /// Moves only the `to` end of `edge` to `new`, leaving `from` in place
    /// even when both ends share a vertex.
    pub(crate) fn rewire_edge_to(&mut self, edge: EdgeId, new: VertexId) -> Result<(), TopologyError> {
        self.vertex(new)?;
        let data = self.edge_mut(edge)?;
        let old = data.to;
        let keeps_old = data.from == old;
        data.to = new;

        for co in self.edge_uses(edge)? {
            let data = self.coedge_mut(co)?;
            if data.reversed {
                data.from = new;
            } else {
                data.to = new;
            }
        }

        if !keeps_old {
            if let Some(v) = self.vertices.get_mut(old) {
                v.detach(edge);
            }
        }
        self.vertex_mut(new)?.attach(edge);
        Ok(())
    }

    // --- CoEdge operations ---

    /// Creates an unlinked use of `edge`, running against the edge when
    /// `reversed` is set. The first use of an edge becomes its representative.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the store.
    pub fn add_coedge(&mut self, edge: EdgeId, reversed: bool) -> Result<CoEdgeId, TopologyError> {
        let data = self.edge(edge)?;
        let (from, to) = if reversed {
            (data.to, data.from)
        } else {
            (data.from, data.to)
        };
        let id = self.coedges.insert_with_key(|id| CoEdgeData {
            edge,
            from,
            to,
            reversed,
            prev: id,
            next: id,
            partner: None,
            owner: None,
        });
        let data = self.edge_mut(edge)?;
        if data.coedge.is_none() {
            data.coedge = Some(id);
        }
        Ok(id)
    }

    /// Creates the two partnered uses of `edge`, returning `(forward, backward)`.
    ///
    /// The forward use becomes the edge's representative if it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the store.
    pub fn add_coedge_pair(&mut self, edge: EdgeId) -> Result<(CoEdgeId, CoEdgeId), TopologyError> {
        let forward = self.add_coedge(edge, false)?;
        let backward = self.add_coedge(edge, true)?;
        self.set_partners(forward, backward)?;
        Ok((forward, backward))
    }

    pub(crate) fn set_partners(&mut self, a: CoEdgeId, b: CoEdgeId) -> Result<(), TopologyError> {
        self.coedge_mut(a)?.partner = Some(b);
        self.coedge_mut(b)?.partner = Some(a);
        Ok(())
    }

    /// Returns a reference to the coedge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn coedge(&self, id: CoEdgeId) -> Result<&CoEdgeData, TopologyError> {
        self.coedges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("coedge"))
    }

    pub(crate) fn coedge_mut(&mut self, id: CoEdgeId) -> Result<&mut CoEdgeData, TopologyError> {
        self.coedges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("coedge"))
    }

    /// Iterates over all coedges.
    pub fn coedges(&self) -> impl Iterator<Item = (CoEdgeId, &CoEdgeData)> {
        self.coedges.iter()
    }

    /// Number of live coedges.
    #[must_use]
    pub fn coedge_count(&self) -> usize {
        self.coedges.len()
    }

    /// Makes `b` the successor of `a`.
    pub(crate) fn link(&mut self, a: CoEdgeId, b: CoEdgeId) -> Result<(), TopologyError> {
        self.coedge_mut(a)?.next = b;
        self.coedge_mut(b)?.prev = a;
        Ok(())
    }

    /// Cuts a coedge out of its chain, closing the gap and moving the owning
    /// loop's root off it. The coedge is left self-linked and ownerless.
    pub(crate) fn unlink_coedge(&mut self, id: CoEdgeId) -> Result<(), TopologyError> {
        let (prev, next, owner) = {
            let data = self.coedge(id)?;
            (data.prev, data.next, data.owner)
        };
        let successor = if next == id {
            None
        } else {
            self.link(prev, next)?;
            Some(next)
        };
        if let Some(owner) = owner {
            if let Some(lp) = self.loops.get_mut(owner) {
                if lp.root == Some(id) {
                    lp.root = successor;
                }
            }
        }
        let data = self.coedge_mut(id)?;
        data.prev = id;
        data.next = id;
        data.owner = None;
        Ok(())
    }

    /// Removes an unlinked coedge, dropping the partner's back-link and moving
    /// the edge's representative to the partner.
    pub(crate) fn remove_coedge(&mut self, id: CoEdgeId) -> Result<CoEdgeData, TopologyError> {
        let data = self
            .coedges
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("coedge"))?;
        let partner = data.partner.filter(|&p| self.coedges.contains_key(p));
        if let Some(p) = partner {
            if let Some(pd) = self.coedges.get_mut(p) {
                if pd.partner == Some(id) {
                    pd.partner = None;
                }
            }
        }
        if let Some(edge) = self.edges.get_mut(data.edge) {
            if edge.coedge == Some(id) {
                edge.coedge = partner;
            }
        }
        Ok(data)
    }

    // --- Loop operations ---

    /// Inserts a loop and returns its ID.
    pub fn add_loop(&mut self, data: LoopData) -> LoopId {
        self.loops.insert(data)
    }

    /// Returns a reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn loop_data(&self, id: LoopId) -> Result<&LoopData, TopologyError> {
        self.loops
            .get(id)
            .ok_or(TopologyError::EntityNotFound("loop"))
    }

    /// Returns a mutable reference to the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn loop_data_mut(&mut self, id: LoopId) -> Result<&mut LoopData, TopologyError> {
        self.loops
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("loop"))
    }

    /// Iterates over all loops.
    pub fn loops(&self) -> impl Iterator<Item = (LoopId, &LoopData)> {
        self.loops.iter()
    }

    /// Number of live loops.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    pub(crate) fn remove_loop(&mut self, id: LoopId) -> Result<LoopData, TopologyError> {
        self.loops
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("loop"))
    }

    /// Walks the chain of `id` in `next` order from its root.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is not in the store.
    pub fn loop_coedges(&self, id: LoopId) -> Result<LoopCoEdges<'_>, TopologyError> {
        let root = self.loop_data(id)?.root;
        Ok(LoopCoEdges::new(self, root))
    }

    /// Calls `f` for every coedge of the loop in `next` order.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is not in the store.
    pub fn for_each_coedge<F>(&self, id: LoopId, mut f: F) -> Result<(), TopologyError>
    where
        F: FnMut(CoEdgeId, &CoEdgeData),
    {
        for (co, data) in self.loop_coedges(id)? {
            f(co, data);
        }
        Ok(())
    }

    /// Number of coedges reachable from the loop's root.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is not in the store.
    pub fn loop_len(&self, id: LoopId) -> Result<usize, TopologyError> {
        Ok(self.loop_coedges(id)?.count())
    }

    /// Finds the first coedge (from the root) of the loop that ends at `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexNotOnLoop`] if no coedge of the loop ends
    /// at `vertex`, or an error if the loop is not in the store.
    pub fn find_coedge_to_vertex(
        &self,
        id: LoopId,
        vertex: VertexId,
    ) -> Result<CoEdgeId, TopologyError> {
        self.loop_coedges(id)?
            .find(|(_, data)| data.to == vertex)
            .map(|(co, _)| co)
            .ok_or(TopologyError::VertexNotOnLoop)
    }

    /// Re-tags every coedge reachable from the loop's root as owned by it.
    pub(crate) fn claim_chain(&mut self, id: LoopId) -> Result<(), TopologyError> {
        let members: Vec<CoEdgeId> = self.loop_coedges(id)?.map(|(co, _)| co).collect();
        for co in members {
            self.coedge_mut(co)?.owner = Some(id);
        }
        Ok(())
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or(TopologyError::EntityNotFound("face"))
    }

    /// Returns a mutable reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, TopologyError> {
        self.faces
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("face"))
    }

    /// Iterates over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    /// Number of live faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub(crate) fn remove_face(&mut self, id: FaceId) -> Result<FaceData, TopologyError> {
        self.faces
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("face"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn vertex(store: &mut TopologyStore, x: f64) -> VertexId {
        store.add_vertex(VertexData::new(Point3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn add_edge_registers_parents() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        let e = store.add_edge(EdgeData::new(a, b)).unwrap();

        assert_eq!(store.vertex(a).unwrap().parents(), &[e]);
        assert_eq!(store.vertex(b).unwrap().parents(), &[e]);
        assert!(store.edge(e).unwrap().coedge().is_none());
    }

    #[test]
    fn add_edge_rejects_missing_vertex() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        store.remove_vertex(b).unwrap();
        assert!(matches!(
            store.add_edge(EdgeData::new(a, b)),
            Err(TopologyError::EntityNotFound("vertex"))
        ));
    }

    #[test]
    fn coedge_pair_is_partnered_and_reversed() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        let e = store.add_edge(EdgeData::new(a, b)).unwrap();
        let (fwd, bwd) = store.add_coedge_pair(e).unwrap();

        let f = store.coedge(fwd).unwrap();
        let r = store.coedge(bwd).unwrap();
        assert_eq!((f.from(), f.to()), (a, b));
        assert_eq!((r.from(), r.to()), (b, a));
        assert!(!f.is_reversed());
        assert!(r.is_reversed());
        assert_eq!(f.partner(), Some(bwd));
        assert_eq!(r.partner(), Some(fwd));
        assert_eq!(f.next(), fwd);
        assert_eq!(f.prev(), fwd);
        assert_eq!(store.edge(e).unwrap().coedge(), Some(fwd));
        assert_eq!(store.edge_uses(e).unwrap(), vec![fwd, bwd]);
    }

    #[test]
    fn unlink_moves_root_and_empties_loop() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        let e = store.add_edge(EdgeData::new(a, b)).unwrap();
        let (fwd, bwd) = store.add_coedge_pair(e).unwrap();
        let lp = store.add_loop(LoopData { root: Some(fwd), face: None });
        store.link(fwd, bwd).unwrap();
        store.link(bwd, fwd).unwrap();
        store.claim_chain(lp).unwrap();
        assert_eq!(store.loop_len(lp).unwrap(), 2);

        store.unlink_coedge(fwd).unwrap();
        assert_eq!(store.loop_data(lp).unwrap().root(), Some(bwd));
        assert_eq!(store.loop_len(lp).unwrap(), 1);
        assert!(store.coedge(fwd).unwrap().owner().is_none());

        store.unlink_coedge(bwd).unwrap();
        assert!(store.loop_data(lp).unwrap().is_empty());
        assert_eq!(store.loop_len(lp).unwrap(), 0);
    }

    #[test]
    fn remove_coedge_hands_representative_to_partner() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        let e = store.add_edge(EdgeData::new(a, b)).unwrap();
        let (fwd, bwd) = store.add_coedge_pair(e).unwrap();

        store.remove_coedge(fwd).unwrap();
        assert_eq!(store.edge(e).unwrap().coedge(), Some(bwd));
        assert!(store.coedge(bwd).unwrap().partner().is_none());

        store.remove_coedge(bwd).unwrap();
        assert!(store.edge(e).unwrap().coedge().is_none());
    }

    #[test]
    fn rewire_moves_edge_and_uses() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        let c = vertex(&mut store, 2.0);
        let e = store.add_edge(EdgeData::new(a, b)).unwrap();
        let (fwd, bwd) = store.add_coedge_pair(e).unwrap();

        store.rewire_edge_end(e, b, c).unwrap();
        assert_eq!(store.edge(e).unwrap().to(), c);
        assert_eq!(store.coedge(fwd).unwrap().to(), c);
        assert_eq!(store.coedge(bwd).unwrap().from(), c);
        assert!(store.vertex(b).unwrap().parents().is_empty());
        assert_eq!(store.vertex(c).unwrap().parents(), &[e]);

        assert!(store.rewire_edge_end(e, b, a).is_err());
    }

    #[test]
    fn iteration_over_corrupt_chain_terminates() {
        let mut store = TopologyStore::new();
        let a = vertex(&mut store, 0.0);
        let b = vertex(&mut store, 1.0);
        let e = store.add_edge(EdgeData::new(a, b)).unwrap();
        let (fwd, bwd) = store.add_coedge_pair(e).unwrap();
        // Root points into a self-loop that never returns to it.
        store.link(fwd, bwd).unwrap();
        store.link(bwd, bwd).unwrap();
        let lp = store.add_loop(LoopData { root: Some(fwd), face: None });
        assert!(store.loop_len(lp).unwrap() <= store.coedge_count());
    }
}
