//! Moving spheres, gravity, and overlap resolution.
//!
//! The entry point is [`PhysicsEngine`], which advances a slice of [`Body`]s by one tick.

use euclid::Vector3D;

use crate::math::FreeCoordinate;

mod body;
pub use body::*;
mod collision;
pub use collision::*;
mod engine;
pub use engine::*;


/// Unit-of-measure type for vectors that are velocity in world units per second.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Velocity {}

/// Unit-of-measure type for vectors that are acceleration in world units per second².
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Acceleration {}

/// Standard gravity of Earth, pointing in the &minus;Y direction.
///
/// This is the default gravity of [`PhysicsEngine`] and of
/// [`PhysicsParameters`](crate::scene::PhysicsParameters).
pub const EARTH_GRAVITY: Vector3D<FreeCoordinate, Acceleration> = Vector3D::new(0.0, -9.81, 0.0);
