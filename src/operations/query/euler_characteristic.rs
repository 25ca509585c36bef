use crate::topology::TopologyStore;

/// Entity counts entering the Euler-Poincaré relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EulerCounts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub loops: usize,
}

impl EulerCounts {
    /// `V - E + F`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

/// Counts the entities of a store.
///
/// Every Euler operator keeps `V - E + F` unchanged; each `Mvsf` component
/// contributes 2.
#[derive(Debug, Default)]
pub struct EulerCharacteristic;

impl EulerCharacteristic {
    /// Creates a new `EulerCharacteristic` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> EulerCounts {
        EulerCounts {
            vertices: store.vertex_count(),
            edges: store.edge_count(),
            faces: store.face_count(),
            loops: store.loop_count(),
        }
    }
}
