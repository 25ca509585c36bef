use crate::error::TopologyError;

use super::coedge::{CoEdgeData, CoEdgeId};
use super::loops::LoopId;
use super::TopologyStore;

fn broken(reason: impl Into<String>) -> TopologyError {
    TopologyError::InconsistentLoop(reason.into())
}

impl TopologyStore {
    /// Checks the structural invariants of a loop.
    ///
    /// Following `next` from the root must return to the root after visiting
    /// every coedge the loop owns exactly once, the `prev` walk must produce
    /// the same cycle in reverse, consecutive coedges must meet at a shared
    /// vertex, and every visited coedge must agree with its edge and partner.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InconsistentLoop`] naming the first violation,
    /// or an error if the loop is not in the store.
    pub fn validate_loop(&self, id: LoopId) -> Result<(), TopologyError> {
        let data = self.loop_data(id)?;
        let owned = self
            .coedges
            .values()
            .filter(|co| co.owner == Some(id))
            .count();

        let Some(root) = data.root else {
            return if owned == 0 {
                Ok(())
            } else {
                Err(broken(format!("empty loop still owns {owned} coedges")))
            };
        };

        let limit = self.coedges.len();
        let mut forward = Vec::new();
        let mut current = root;
        loop {
            if forward.len() >= limit {
                return Err(broken("next chain does not return to root"));
            }
            let co = self
                .coedges
                .get(current)
                .ok_or_else(|| broken("next link dangles"))?;
            if co.owner != Some(id) {
                return Err(broken("chain reaches a coedge owned elsewhere"));
            }
            let next = self
                .coedges
                .get(co.next)
                .ok_or_else(|| broken("next link dangles"))?;
            if next.prev != current {
                return Err(broken("next.prev does not point back"));
            }
            if co.to != next.from {
                return Err(broken("consecutive coedges do not share a vertex"));
            }
            self.check_partner(current, co)?;
            self.check_edge_use(co)?;

            forward.push(current);
            current = co.next;
            if current == root {
                break;
            }
        }

        if forward.len() != owned {
            return Err(broken(format!(
                "chain visits {} of {owned} owned coedges",
                forward.len()
            )));
        }

        let n = forward.len();
        let mut current = root;
        for step in 0..n {
            if forward[(n - step) % n] != current {
                return Err(broken("prev chain is not the reverse of next chain"));
            }
            current = self
                .coedges
                .get(current)
                .ok_or_else(|| broken("prev link dangles"))?
                .prev;
        }
        if current != root {
            return Err(broken("prev chain does not return to root"));
        }

        Ok(())
    }

    /// Returns `true` if [`validate_loop`](Self::validate_loop) succeeds.
    #[must_use]
    pub fn is_loop_valid(&self, id: LoopId) -> bool {
        self.validate_loop(id).is_ok()
    }

    /// Validates the given loops after a mutation, when the build asks for it.
    pub(crate) fn check_loops(&self, loops: &[LoopId]) -> Result<(), TopologyError> {
        if cfg!(any(debug_assertions, feature = "validate")) {
            for &id in loops {
                self.validate_loop(id)?;
            }
        }
        Ok(())
    }

    pub(crate) fn check_partner(&self, id: CoEdgeId, co: &CoEdgeData) -> Result<(), TopologyError> {
        let Some(partner_id) = co.partner else {
            return Ok(());
        };
        let partner = self
            .coedges
            .get(partner_id)
            .ok_or_else(|| broken("partner link dangles"))?;
        if partner.partner != Some(id) {
            return Err(broken("partner.partner is not self"));
        }
        if partner.from != co.to || partner.to != co.from {
            return Err(broken("partner does not run opposite"));
        }
        if partner.edge != co.edge {
            return Err(broken("partner uses a different edge"));
        }
        Ok(())
    }

    pub(crate) fn check_edge_use(&self, co: &CoEdgeData) -> Result<(), TopologyError> {
        let edge = self
            .edge(co.edge)
            .map_err(|_| broken("coedge uses a missing edge"))?;
        let (from, to) = if co.reversed {
            (edge.to, edge.from)
        } else {
            (edge.from, edge.to)
        };
        if co.from != from || co.to != to {
            return Err(broken("coedge endpoints disagree with its edge"));
        }
        Ok(())
    }
}
