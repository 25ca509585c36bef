use crate::error::TopologyError;
use crate::topology::TopologyStore;

fn invalid(reason: &str) -> TopologyError {
    TopologyError::InvalidTopology(reason.into())
}

/// Validates the consistency of every entity in a store.
///
/// Beyond the per-loop checks of
/// [`TopologyStore::validate_loop`], this verifies that vertex parent sets
/// and edge endpoints agree in both directions, that every edge's
/// representative coedge actually uses it, and that face/loop back-links
/// resolve.
#[derive(Debug, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs every check and reports the first violation.
    ///
    /// # Errors
    ///
    /// Returns the [`TopologyError`] describing the first inconsistency found.
    pub fn check(&self, store: &TopologyStore) -> Result<(), TopologyError> {
        for (id, vertex) in store.vertices() {
            for &edge in vertex.parents() {
                let data = store
                    .edge(edge)
                    .map_err(|_| invalid("vertex lists a missing edge"))?;
                if data.from() != id && data.to() != id {
                    return Err(invalid("vertex lists an edge that does not use it"));
                }
            }
        }

        for (id, edge) in store.edges() {
            for end in [edge.from(), edge.to()] {
                let vertex = store
                    .vertex(end)
                    .map_err(|_| invalid("edge ends at a missing vertex"))?;
                if !vertex.parents().contains(&id) {
                    return Err(invalid("edge endpoint does not list the edge"));
                }
            }
            if let Some(rep) = edge.coedge() {
                let co = store
                    .coedge(rep)
                    .map_err(|_| invalid("edge representative is missing"))?;
                if co.edge() != id {
                    return Err(TopologyError::EdgeMismatch);
                }
            }
        }

        for (id, co) in store.coedges() {
            store.check_partner(id, co)?;
            store.check_edge_use(co)?;
            if let Some(owner) = co.owner() {
                store
                    .loop_data(owner)
                    .map_err(|_| invalid("coedge owned by a missing loop"))?;
            }
        }

        for (id, lp) in store.loops() {
            if let Some(face) = lp.face {
                store
                    .face(face)
                    .map_err(|_| invalid("loop bounds a missing face"))?;
            }
            store.validate_loop(id)?;
        }

        for (id, face) in store.faces() {
            for lp in face.loops() {
                store
                    .loop_data(lp)
                    .map_err(|_| invalid("face references a missing loop"))?;
            }
            if store.loop_data(face.outer_loop)?.face != Some(id) {
                return Err(invalid("outer loop does not point back at its face"));
            }
            for &hole in &face.inner_loops {
                if store.loop_data(hole)?.face != Some(id) {
                    return Err(invalid("inner loop does not point back at its face"));
                }
            }
        }

        Ok(())
    }

    /// Executes the validation, returning `true` if the store is consistent.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> bool {
        self.check(store).is_ok()
    }
}
