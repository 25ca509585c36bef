use tracing::{debug, instrument, trace};

use crate::error::{Result, TopologyError};
use crate::topology::{CoEdgeId, EdgeId, FaceId, TopologyStore};

/// Kill Edge, Face: removes an edge separating two loops and merges them.
///
/// `face` is the face being killed; its outer loop must be one of the two
/// loops on either side of `edge`. The other loop survives, absorbs every
/// remaining coedge and keeps its own face. Holes of the killed face move to
/// the survivor's face. The killed face and its emptied loop are removed from
/// the store.
#[derive(Debug)]
pub struct Kef {
    edge: EdgeId,
    face: FaceId,
}

impl Kef {
    /// Creates a new `Kef` operation.
    #[must_use]
    pub fn new(edge: EdgeId, face: FaceId) -> Self {
        Self { edge, face }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidTopology`] if the edge is not used on
    /// both sides, if both uses lie in the same loop, if neither loop is
    /// the outer loop of `face`, or if the surviving loop has no other face
    /// to take over the killed face's holes.
    #[instrument(skip(store))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let killed_loop = store.face(self.face)?.outer_loop;
        let uses = store.edge_uses(self.edge)?;
        let &[co, partner] = uses.as_slice() else {
            return Err(TopologyError::InvalidTopology("edge is not used on both sides".into()).into());
        };

        let co_data = store.coedge(co)?;
        let partner_data = store.coedge(partner)?;
        let (Some(co_loop), Some(partner_loop)) = (co_data.owner(), partner_data.owner()) else {
            return Err(TopologyError::InvalidTopology("edge is not part of a loop".into()).into());
        };
        if co_loop == partner_loop {
            return Err(TopologyError::InvalidTopology(
                "edge has the same loop on both sides".into(),
            )
            .into());
        }
        let survivor = if killed_loop == co_loop {
            partner_loop
        } else if killed_loop == partner_loop {
            co_loop
        } else {
            return Err(TopologyError::InvalidTopology(
                "face does not own a loop of the edge".into(),
            )
            .into());
        };

        let holes = store.face(self.face)?.inner_loops.clone();
        let heir = match store.loop_data(survivor)?.face {
            Some(f) if f == self.face => {
                return Err(TopologyError::InvalidTopology(
                    "surviving loop bounds the face being killed".into(),
                )
                .into());
            }
            Some(f) => Some(f),
            None if holes.is_empty() => None,
            None => {
                return Err(TopologyError::InvalidTopology(
                    "holes of the killed face have no face to move to".into(),
                )
                .into());
            }
        };

        let (a, b) = (co_data.prev(), co_data.next());
        let (d, e) = (partner_data.prev(), partner_data.next());
        trace!(?co, ?partner, ?survivor, "merging loops");
        if a == co && d == partner {
            // Both loops consist of nothing but this edge.
        } else if a == co {
            store.link(d, e)?;
        } else if d == partner {
            store.link(a, b)?;
        } else {
            store.link(a, e)?;
            store.link(d, b)?;
        }

        let root = store.loop_data(survivor)?.root();
        if root.is_none() || root == Some(co) || root == Some(partner) {
            let remaining: Option<CoEdgeId> = [a, b, d, e]
                .into_iter()
                .find(|&c| c != co && c != partner);
            store.loop_data_mut(survivor)?.root = remaining;
        }
        store.claim_chain(survivor)?;

        store.remove_coedge(co)?;
        store.remove_coedge(partner)?;
        store.remove_edge(self.edge)?;

        store.loop_data_mut(killed_loop)?.root = None;
        store.remove_loop(killed_loop)?;
        store.remove_face(self.face)?;

        if let Some(heir) = heir {
            for &hole in &holes {
                store.loop_data_mut(hole)?.face = Some(heir);
            }
            store.face_mut(heir)?.inner_loops.extend(holes);
        }

        store.check_loops(&[survivor])?;
        debug!(edge = ?self.edge, face = ?self.face, ?survivor, "kef merged loops");
        Ok(())
    }
}
