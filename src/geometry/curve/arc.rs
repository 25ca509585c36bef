use crate::error::{GeometryError, Result};
use crate::math::{is_parallel, Point3, Vector3, TOLERANCE};

/// A circular carrier in 3D space.
///
/// Defined by a center, a radius and the normal of the circle's plane. The
/// angular extent of an arc edge is given by its vertices, so splitting an
/// arc edge reuses the same carrier for every piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
}

impl Arc {
    /// Creates a new arc carrier.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the normal is zero-length.
    pub fn new(center: Point3, radius: f64, normal: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        Ok(Self {
            center,
            radius,
            normal: normal / normal_len,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns `true` if both arcs lie on the same circle.
    ///
    /// Opposite normals count as the same circle, so arcs sweeping in
    /// opposite senses are still mergeable.
    #[must_use]
    pub fn is_concentric(&self, other: &Self) -> bool {
        (self.center - other.center).norm() < TOLERANCE
            && (self.radius - other.radius).abs() < TOLERANCE
            && is_parallel(&self.normal, &other.normal)
    }
}
