use core::fmt;

use euclid::Vector3D;
use manyfmt::{Fmt, Refmt as _};

use crate::math::{FreeCoordinate, FreePoint, FreeVector, Sphere, is_finite_vector};
use crate::physics::Velocity;
use crate::util::{ConciseDebug, StatusText};

/// A sphere with a position and velocity, which falls under gravity and is pushed out of
/// other bodies it overlaps.
///
/// Bodies are plain data; they are advanced by a [`PhysicsEngine`](super::PhysicsEngine)
/// and usually stored in a [`Scene`](crate::scene::Scene).
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub struct Body {
    /// Position of the center of the collision sphere.
    pub position: FreePoint,

    /// Velocity, in position units per second.
    pub velocity: Vector3D<FreeCoordinate, Velocity>,

    /// Radius of the collision sphere.
    ///
    /// This should be positive; it is not validated, and a body with a non-positive radius
    /// only collides with bodies whose radius makes up the difference.
    pub radius: FreeCoordinate,

    /// Is this body simulated at all?
    ///
    /// If false, the body neither moves nor collides with anything.
    pub physics_enabled: bool,

    /// Is this body an immovable obstacle?
    ///
    /// Static bodies are not affected by gravity or collisions, but other bodies are
    /// still pushed out of them.
    pub is_static: bool,
    // When adding a field, don't forget to expand the Debug impl.
}

impl fmt::Debug for Body {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            position,
            velocity,
            radius,
            physics_enabled,
            is_static,
        } = self;
        fmt.debug_struct("Body")
            .field("position", &position.refmt(&ConciseDebug))
            .field("velocity", &velocity.refmt(&ConciseDebug))
            .field("radius", radius)
            .field("physics_enabled", physics_enabled)
            .field("is_static", is_static)
            .finish()
    }
}

/// Omits the radius on the grounds that it is presumably constant.
impl Fmt<StatusText> for Body {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &StatusText) -> fmt::Result {
        write!(
            fmt,
            "Position: {}  Velocity: {}",
            self.position.refmt(&ConciseDebug),
            self.velocity.refmt(&ConciseDebug),
        )?;
        if self.is_static {
            write!(fmt, "  Static")?;
        }
        if !self.physics_enabled {
            write!(fmt, "  Disabled")?;
        }
        Ok(())
    }
}

impl Body {
    /// Constructs a [`Body`] requiring only information that can't be reasonably defaulted.
    ///
    /// The body is at rest, simulated, and not static.
    pub fn new_minimal(position: impl Into<FreePoint>, radius: FreeCoordinate) -> Self {
        Self {
            position: position.into(),
            velocity: Vector3D::zero(),
            radius,
            physics_enabled: true,
            is_static: false,
        }
    }

    /// Constructs a static [`Body`]: an obstacle which never moves.
    pub fn new_static(position: impl Into<FreePoint>, radius: FreeCoordinate) -> Self {
        Self {
            is_static: true,
            ..Self::new_minimal(position, radius)
        }
    }

    /// Returns the body with its velocity replaced.
    #[must_use]
    pub fn with_velocity(
        mut self,
        velocity: impl Into<Vector3D<FreeCoordinate, Velocity>>,
    ) -> Self {
        self.velocity = velocity.into();
        self
    }

    /// Returns the body with [`physics_enabled`](Self::physics_enabled) set to false.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.physics_enabled = false;
        self
    }

    /// Returns the body's collision volume in world coordinates.
    pub fn collision_sphere(&self) -> Sphere {
        Sphere::new(self.position, self.radius)
    }

    /// Returns whether gravity and velocity should be applied to this body.
    pub fn is_movable(&self) -> bool {
        self.physics_enabled && !self.is_static
    }

    /// Returns whether position and velocity are both free of NaN and infinity.
    pub fn is_finite(&self) -> bool {
        is_finite_vector(self.position.to_vector()) && is_finite_vector(self.velocity)
    }

    /// Moves the body by the given offset, unless it is static or disabled.
    pub(crate) fn nudge(&mut self, offset: FreeVector) {
        if self.is_movable() {
            self.position += offset;
        }
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a> arbitrary::Arbitrary<'a> for Body {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let position: [FreeCoordinate; 3] = u.arbitrary()?;
        let velocity: [FreeCoordinate; 3] = u.arbitrary()?;
        Ok(Self {
            position: position.into(),
            velocity: velocity.into(),
            radius: u.arbitrary()?,
            physics_enabled: u.arbitrary()?,
            is_static: u.arbitrary()?,
        })
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        arbitrary::size_hint::and_all(&[
            <[FreeCoordinate; 6]>::size_hint(depth),
            <FreeCoordinate>::size_hint(depth),
            <[bool; 2]>::size_hint(depth),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::vec3;
    use pretty_assertions::assert_eq;

    #[test]
    fn debug() {
        let body = Body::new_minimal([1.0, 2.0, 3.0], 0.5).with_velocity(vec3(0.0, -1.0, 0.0));
        assert_eq!(
            format!("{body:?}"),
            "Body { position: (+1.000, +2.000, +3.000), velocity: (+0.000, -1.000, +0.000), \
            radius: 0.5, physics_enabled: true, is_static: false }"
        );
    }

    #[test]
    fn status_text() {
        let body = Body::new_static([0.0, 0.0, 0.0], 1.0);
        assert_eq!(
            format!("{}", body.refmt(&StatusText)),
            "Position: (+0.000, +0.000, +0.000)  Velocity: (+0.000, +0.000, +0.000)  Static"
        );
    }

    #[test]
    fn nudge_respects_flags() {
        let offset = vec3(1.0, 0.0, 0.0);

        let mut dynamic = Body::new_minimal([0.0, 0.0, 0.0], 1.0);
        dynamic.nudge(offset);
        assert_eq!(dynamic.position, euclid::point3(1.0, 0.0, 0.0));

        let mut fixed = Body::new_static([0.0, 0.0, 0.0], 1.0);
        fixed.nudge(offset);
        assert_eq!(fixed.position, euclid::point3(0.0, 0.0, 0.0));

        let mut disabled = Body::new_minimal([0.0, 0.0, 0.0], 1.0).disabled();
        disabled.nudge(offset);
        assert_eq!(disabled.position, euclid::point3(0.0, 0.0, 0.0));
    }

    #[test]
    fn is_finite() {
        assert!(Body::new_minimal([0.0, 0.0, 0.0], 1.0).is_finite());
        assert!(!Body::new_minimal([f64::NAN, 0.0, 0.0], 1.0).is_finite());
        assert!(
            !Body::new_minimal([0.0, 0.0, 0.0], 1.0)
                .with_velocity(vec3(0.0, f64::INFINITY, 0.0))
                .is_finite()
        );
    }
}
