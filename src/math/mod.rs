/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if two unit vectors point along the same or opposite direction.
#[must_use]
pub fn is_parallel(a: &Vector3, b: &Vector3) -> bool {
    a.cross(b).norm() < TOLERANCE
}
