mod arc;
mod line;

pub use arc::Arc;
pub use line::Line;

use crate::error::MergeConflict;

/// The geometric carrier attached to an edge.
///
/// The kernel never evaluates these curves. It clones them when an edge is
/// split and compares them when two edges are fused back together; the extent
/// of an edge on its carrier is always given by the edge's vertices.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeCurve {
    /// A straight line carrier.
    Line(Line),
    /// A circular carrier.
    Arc(Arc),
}

impl EdgeCurve {
    /// Checks whether two edges lying on `self` and `other` may be fused into
    /// a single edge without changing shape.
    ///
    /// # Errors
    ///
    /// Returns the [`MergeConflict`] describing why the carriers differ.
    pub fn check_mergeable(&self, other: &Self) -> Result<(), MergeConflict> {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => {
                if a.is_coincident(b) {
                    Ok(())
                } else {
                    Err(MergeConflict::NotCoincident)
                }
            }
            (Self::Arc(a), Self::Arc(b)) => {
                if a.is_concentric(b) {
                    Ok(())
                } else {
                    Err(MergeConflict::NotConcentric)
                }
            }
            _ => Err(MergeConflict::CurveKind),
        }
    }
}
