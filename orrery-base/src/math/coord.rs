//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Vector3D};

/// Unit-of-measure type for world-space positions and displacements.
///
/// All bodies in a scene share this coordinate system; there are no nested frames.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum World {}

/// Numeric type used for all continuous coordinates.
pub type FreeCoordinate = f64;

/// Positions in world space.
pub type FreePoint = Point3D<FreeCoordinate, World>;

/// Displacements in world space.
pub type FreeVector = Vector3D<FreeCoordinate, World>;

/// Returns whether every component of `vector` is finite (neither infinite nor NaN).
#[inline]
pub fn is_finite_vector<U>(vector: Vector3D<FreeCoordinate, U>) -> bool {
    vector.x.is_finite() && vector.y.is_finite() && vector.z.is_finite()
}
