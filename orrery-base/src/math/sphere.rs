use core::fmt;

use manyfmt::Refmt as _;
use ordered_float::FloatCore;

use crate::math::{FreeCoordinate, FreePoint, FreeVector};
use crate::util::ConciseDebug;

/// A sphere in world space, used as a collision volume.
///
/// Unlike most geometric types, the radius is not validated: a sphere with zero or
/// negative radius is permitted and simply never overlaps anything it could not already
/// touch by virtue of the other sphere's radius.
#[derive(Clone, Copy, PartialEq)]
pub struct Sphere {
    center: FreePoint,
    radius: FreeCoordinate,
}

/// Geometric relationship between two [`Sphere`]s which intersect.
///
/// Produced by [`Sphere::penetration()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct Penetration {
    /// Distance between the two centers.
    ///
    /// If this is zero, the direction of separation is undefined.
    pub distance: FreeCoordinate,
    /// Sum of the radii minus [`distance`](Self::distance). Always positive.
    pub depth: FreeCoordinate,
    /// The vector from the first sphere's center to the second sphere's center.
    pub offset: FreeVector,
}

impl Sphere {
    /// Constructs a [`Sphere`] from its center and radius.
    #[inline]
    pub fn new(center: impl Into<FreePoint>, radius: FreeCoordinate) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    /// Returns the center of the sphere.
    #[inline]
    pub fn center(&self) -> FreePoint {
        self.center
    }

    /// Returns the radius of the sphere.
    #[inline]
    pub fn radius(&self) -> FreeCoordinate {
        self.radius
    }

    /// Translate this sphere by the specified offset.
    #[inline]
    #[must_use]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }

    /// Returns whether the point is strictly inside the sphere.
    ///
    /// ```
    /// # extern crate orrery_base as orrery;
    /// use orrery::math::Sphere;
    ///
    /// let sphere = Sphere::new([0.0, 0.0, 0.0], 1.0);
    /// assert!(sphere.contains([0.5, 0.5, 0.0].into()));
    /// assert!(!sphere.contains([1.0, 0.0, 0.0].into()));
    /// ```
    #[inline]
    pub fn contains(&self, point: FreePoint) -> bool {
        (point - self.center).square_length() < self.radius * self.radius
    }

    /// Returns whether the two spheres overlap; that is, whether the distance between their
    /// centers is strictly less than the sum of their radii.
    ///
    /// Spheres which exactly touch do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Sphere) -> bool {
        self.penetration(other).is_some()
    }

    /// If `self` and `other` overlap, returns how much they overlap and in which direction.
    ///
    /// ```
    /// # extern crate orrery_base as orrery;
    /// use orrery::math::Sphere;
    ///
    /// let a = Sphere::new([0.0, 0.0, 0.0], 1.0);
    /// let b = Sphere::new([1.5, 0.0, 0.0], 1.0);
    /// let p = a.penetration(&b).unwrap();
    /// assert_eq!(p.distance, 1.5);
    /// assert_eq!(p.depth, 0.5);
    ///
    /// assert_eq!(a.penetration(&Sphere::new([2.0, 0.0, 0.0], 1.0)), None);
    /// ```
    #[inline]
    pub fn penetration(&self, other: &Sphere) -> Option<Penetration> {
        let offset = other.center - self.center;
        let distance = robust_length(offset);
        let reach = self.radius + other.radius;
        if distance < reach {
            Some(Penetration {
                distance,
                depth: reach - distance,
                offset,
            })
        } else {
            None
        }
    }
}

/// Length of `vector`, which is zero only if the vector is zero, even when squaring its
/// components would underflow.
fn robust_length(vector: FreeVector) -> FreeCoordinate {
    let length = vector.length();
    if length > 0.0 || vector == FreeVector::zero() {
        return length;
    }
    let scale = FloatCore::max(
        FloatCore::max(FloatCore::abs(vector.x), FloatCore::abs(vector.y)),
        FloatCore::abs(vector.z),
    );
    scale * (vector / scale).length()
}

impl Penetration {
    /// Returns the unit vector pointing from the first sphere towards the second,
    /// or [`None`] if the centers coincide.
    #[inline]
    pub fn normal(&self) -> Option<FreeVector> {
        if self.distance > 0.0 {
            Some(self.offset / self.distance)
        } else {
            None
        }
    }
}

impl fmt::Debug for Sphere {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sphere")
            .field("center", &self.center.refmt(&ConciseDebug))
            .field("radius", &self.radius)
            .finish()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Sphere {
    #[allow(clippy::missing_inline_in_public_items)]
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let [x, y, z, radius]: [f64; 4] = u.arbitrary()?;
        Ok(Sphere::new([x, y, z], radius))
    }

    #[inline]
    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        <[f64; 4]>::size_hint(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::vec3;

    #[test]
    fn touching_is_not_intersecting() {
        let a = Sphere::new([0.0, 0.0, 0.0], 1.0);
        let b = Sphere::new([2.0, 0.0, 0.0], 1.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.translate(vec3(-0.001, 0.0, 0.0))));
    }

    #[test]
    fn coincident_centers_have_no_normal() {
        let a = Sphere::new([3.0, 4.0, 5.0], 0.5);
        let p = a.penetration(&a).unwrap();
        assert_eq!(p.distance, 0.0);
        assert_eq!(p.depth, 1.0);
        assert_eq!(p.normal(), None);
    }

    #[test]
    fn nearly_coincident_centers_have_a_normal() {
        let a = Sphere::new([0.0, 0.0, 0.0], 1.0);
        let b = Sphere::new([1e-170, 0.0, 0.0], 1.0);
        let p = a.penetration(&b).unwrap();
        assert_eq!(p.distance, 1e-170);
        assert_eq!(p.normal(), Some(vec3(1.0, 0.0, 0.0)));
    }

    #[test]
    fn normal_is_unit_length() {
        let a = Sphere::new([0.0, 0.0, 0.0], 2.0);
        let b = Sphere::new([1.0, 1.0, 1.0], 2.0);
        let normal = a.penetration(&b).unwrap().normal().unwrap();
        assert!((normal.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", Sphere::new([1.0, 2.0, 3.0], 0.5)),
            "Sphere { center: (+1.000, +2.000, +3.000), radius: 0.5 }"
        );
    }
}
