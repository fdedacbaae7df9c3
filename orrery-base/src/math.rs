//! Mathematical utilities and decisions.

pub use ordered_float::{FloatIsNan, NotNan};

mod coord;
pub use coord::*;
mod restricted_number;
pub use restricted_number::*;
mod sphere;
pub use sphere::*;

/// Allows writing a [`NotNan`] value as a constant expression (which is not currently
/// a feature provided by the [`ordered_float`] crate itself).
///
/// Note that if the expression does not need to be constant, this macro may not be
/// needed; infallible construction can be written using `NotNan::from(an_integer)`,
/// `NotNan::zero()`, and `NotNan::one()`.
///
/// # Examples
///
/// ```
/// # extern crate orrery_base as orrery;
/// use orrery::{notnan, math::NotNan};
///
/// const X: NotNan<f64> = notnan!(-9.81);
/// ```
///
/// If anything other than a floating-point literal is used, the code will not compile:
///
/// ```compile_fail
/// # extern crate orrery_base as orrery;
/// # use orrery::{notnan, math::NotNan};
/// // Not a literal; will not compile
/// const X: NotNan<f64> = notnan!(f64::NAN);
/// ```
///
/// ```compile_fail
/// # extern crate orrery_base as orrery;
/// # use orrery::{notnan, math::NotNan};
/// // Not a float; will not compile
/// const X: NotNan<char> = notnan!('a');
/// ```
#[doc(hidden)] // reexported publicly within the math module by `orrery`
#[macro_export]
macro_rules! notnan {
    ($value:literal) => {
        match $value {
            value => {
                // Safety: Only literal values are allowed, which will either be a non-NaN
                // float or (as checked below) a type mismatch.
                let result = unsafe { $crate::math::NotNan::new_unchecked(value) };

                // Ensure that the type is one which could have resulted from a float literal,
                // by requiring type unification with a literal. This prohibits char, &str, etc.
                let _ = if false {
                    // Safety: Statically never NaN, and is also never executed.
                    unsafe { $crate::math::NotNan::new_unchecked(0.0) }
                } else {
                    result
                };

                result
            }
        }
    };
}
