use core::fmt;
use core::ops;

use ordered_float::{FloatCore, NotNan};

// -------------------------------------------------------------------------------------------------

/// A floating-point number which is not NaN and whose sign bit is positive.
///
/// The allowed values consist of positive zero, positive infinity,
/// and every value in between those. This set of values means that this type
/// implements [`Eq`] straightforwardly, and is closed under multiplication and addition.
///
/// It is used for quantities such as time steps and time scales, where a negative value
/// would run the simulation backwards and a NaN would poison every body it touches.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveSign<T>(T);

/// Error from attempting to construct a [`PositiveSign`] from a NaN or negative value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("value was NaN or negative")]
#[expect(clippy::exhaustive_structs)]
pub struct NotPositiveSign;

impl core::error::Error for NotPositiveSign {}

impl<T: FloatCore> PositiveSign<T> {
    /// Constructs [`PositiveSign`] from the given value, replacing NaN or negative
    /// values with zero.
    #[inline]
    pub fn new_clamped(value: T) -> Self {
        if value > T::zero() {
            Self(value)
        } else {
            // Covers NaN, negative values, and negative zero.
            Self(T::zero())
        }
    }

    /// Constructs [`PositiveSign`] from the given value, or returns an error if it is
    /// NaN or negative.
    #[inline]
    pub fn try_new(value: T) -> Result<Self, NotPositiveSign> {
        if value.is_nan() || value.is_sign_negative() {
            Err(NotPositiveSign)
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the wrapped value.
    #[inline]
    pub const fn into_inner(self) -> T {
        self.0
    }

    /// Returns the wrapped value as [`NotNan`].
    #[inline]
    pub fn into_nn(self) -> NotNan<T> {
        // Cannot fail because `PositiveSign`'s restrictions are a superset of `NotNan`'s.
        NotNan::new(self.0).unwrap_or_else(|_| unreachable!("PositiveSign was NaN"))
    }

    /// Returns whether the value is finite.
    ///
    /// Since the value is statically guaranteed to be neither NaN nor negative,
    /// the only case where this returns `false` is when the value is positive infinity.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0 != T::infinity()
    }
}

impl PositiveSign<f64> {
    /// The value zero.
    pub const ZERO: Self = Self(0.0);
    /// The value one.
    pub const ONE: Self = Self(1.0);
}

impl<T: FloatCore> Eq for PositiveSign<T> {}

#[allow(clippy::derive_ord_xor_partial_ord)]
impl<T: FloatCore> Ord for PositiveSign<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.into_nn().cmp(&other.into_nn())
    }
}

impl<T: fmt::Debug> fmt::Debug for PositiveSign<T> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl<T: fmt::Display> fmt::Display for PositiveSign<T> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: FloatCore> Default for PositiveSign<T> {
    #[inline]
    fn default() -> Self {
        Self(T::zero())
    }
}

impl<T: FloatCore> ops::Add for PositiveSign<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Zero times anything is zero here, even infinity; see the type documentation.
impl<T: FloatCore> ops::Mul for PositiveSign<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new_clamped(self.0 * rhs.0)
    }
}

impl TryFrom<f64> for PositiveSign<f64> {
    type Error = NotPositiveSign;
    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<PositiveSign<f64>> for f64 {
    #[inline]
    fn from(value: PositiveSign<f64>) -> Self {
        value.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PositiveSign<f64> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PositiveSign<f64> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::try_new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for PositiveSign<f64> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new_clamped(f64::arbitrary(u)?))
    }

    #[inline]
    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        f64::size_hint(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping() {
        assert_eq!(PositiveSign::new_clamped(1.5).into_inner(), 1.5);
        assert_eq!(PositiveSign::new_clamped(-1.5).into_inner(), 0.0);
        assert_eq!(PositiveSign::new_clamped(f64::NAN).into_inner(), 0.0);
        assert!(
            PositiveSign::new_clamped(-0.0)
                .into_inner()
                .is_sign_positive()
        );
    }

    #[test]
    fn try_new_rejects() {
        assert_eq!(PositiveSign::try_new(-1.0), Err(NotPositiveSign));
        assert_eq!(PositiveSign::try_new(-0.0), Err(NotPositiveSign));
        assert_eq!(PositiveSign::try_new(f64::NAN), Err(NotPositiveSign));
        assert_eq!(PositiveSign::try_new(0.25).map(f64::from), Ok(0.25));
    }

    #[test]
    fn zero_times_infinity() {
        let product = PositiveSign::ZERO * PositiveSign::try_new(f64::INFINITY).unwrap();
        assert_eq!(product, PositiveSign::ZERO);
        assert!(!PositiveSign::try_new(f64::INFINITY).unwrap().is_finite());
    }
}
