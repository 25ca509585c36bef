use crate::error::{GeometryError, Result};
use crate::math::{is_parallel, Point3, Vector3, TOLERANCE};

/// An infinite line defined by an origin point and a unit direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates the line through two distinct points, directed from `a` to `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn from_points(a: Point3, b: Point3) -> Result<Self> {
        Self::new(a, b - a)
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Distance from `point` to the line.
    #[must_use]
    pub fn distance_to(&self, point: &Point3) -> f64 {
        (*point - self.origin).cross(&self.direction).norm()
    }

    /// Returns `true` if both lines describe the same infinite line,
    /// regardless of orientation.
    #[must_use]
    pub fn is_coincident(&self, other: &Self) -> bool {
        is_parallel(&self.direction, &other.direction)
            && self.distance_to(&other.origin) < TOLERANCE
    }
}
