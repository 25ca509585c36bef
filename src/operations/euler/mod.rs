//! Euler operators: the only way the kernel mutates topology.
//!
//! Each operator is a small command object built with `new` and applied with
//! `execute`. Make/kill pairs (`Mev`/`Kev`, `Mef`/`Kef`) exactly undo each
//! other; `Esplit` and `MergeEdgesOnVertex` are derived operators built on
//! the same relinking primitives.
//!
//! Operators do not roll back. If one fails partway, the store may be left
//! partially mutated and the caller's transaction layer must restore it.

mod esplit;
mod kef;
mod kev;
mod mef;
mod merge_edges;
mod mev;
mod mvsf;

pub use esplit::{Esplit, EsplitResult};
pub use kef::Kef;
pub use kev::Kev;
pub use mef::{Mef, MefResult};
pub use merge_edges::{MergeEdgesOnVertex, MergeOutcome};
pub use mev::{Mev, MevResult};
pub use mvsf::{Mvsf, MvsfResult};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::math::Point3;
    use crate::topology::{LoopId, TopologyStore, VertexId};

    use super::{Mev, Mvsf, MvsfResult};

    /// Installs a `RUST_LOG`-driven subscriber once per test binary.
    pub(crate) fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    pub(crate) fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    /// Builds an open wire through `points` with successive `Mev` calls.
    ///
    /// Returns the bootstrap result and every vertex in order.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn wire(store: &mut TopologyStore, points: &[Point3]) -> (MvsfResult, Vec<VertexId>) {
        init_tracing();
        let seed = Mvsf::new(points[0]).execute(store).unwrap();
        let mut vertices = vec![seed.vertex];
        for &point in &points[1..] {
            let last = vertices[vertices.len() - 1];
            let made = Mev::new(last, point, seed.loop_id).execute(store).unwrap();
            vertices.push(made.vertex);
        }
        (seed, vertices)
    }

    /// The `from` vertex of every coedge of a loop, in chain order.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn vertex_cycle(store: &TopologyStore, loop_id: LoopId) -> Vec<VertexId> {
        store
            .loop_coedges(loop_id)
            .unwrap()
            .map(|(_, co)| co.from())
            .collect()
    }
}
