use super::coedge::{CoEdgeData, CoEdgeId};
use super::face::FaceId;
use super::TopologyStore;

slotmap::new_key_type! {
    /// Unique identifier for a loop in the topology store.
    pub struct LoopId;
}

/// Data associated with a topological loop.
///
/// A loop is a circular chain of coedges reachable from `root`. A loop
/// without coedges (fresh from `Mvsf`, or emptied by `Kev`) has no root.
#[derive(Debug, Clone, Default)]
pub struct LoopData {
    pub(crate) root: Option<CoEdgeId>,
    /// The face this loop bounds.
    pub face: Option<FaceId>,
}

impl LoopData {
    /// Creates an empty loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Any member of the chain, or `None` if the loop is empty.
    #[must_use]
    pub fn root(&self) -> Option<CoEdgeId> {
        self.root
    }

    /// Returns `true` if the loop has no coedges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// Iterator over the coedges of a loop in `next` order, starting at the root.
///
/// Stops after one full turn, when a link dangles, or after visiting as many
/// coedges as the store holds, so a corrupted chain cannot spin forever.
pub struct LoopCoEdges<'a> {
    store: &'a TopologyStore,
    root: Option<CoEdgeId>,
    current: Option<CoEdgeId>,
    budget: usize,
}

impl<'a> LoopCoEdges<'a> {
    pub(crate) fn new(store: &'a TopologyStore, root: Option<CoEdgeId>) -> Self {
        Self {
            store,
            root,
            current: root,
            budget: store.coedges.len(),
        }
    }
}

impl<'a> Iterator for LoopCoEdges<'a> {
    type Item = (CoEdgeId, &'a CoEdgeData);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        if self.budget == 0 {
            self.current = None;
            return None;
        }
        self.budget -= 1;
        let Some(data) = self.store.coedges.get(id) else {
            self.current = None;
            return None;
        };
        self.current = Some(data.next).filter(|&next| Some(next) != self.root);
        Some((id, data))
    }
}
