//! This library is an internal component of [`orrery`],
//! which defines some core mathematical types and functions.
//! Do not depend on this library; use only [`orrery`] instead.
//!
//! [`orrery`]: ../orrery/index.html

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
#![warn(clippy::missing_inline_in_public_items)]

// Floating-point functions (`sqrt()` in particular) come from `std`; see the
// platform compatibility notes in `orrery`.
#[cfg_attr(test, macro_use)]
extern crate std;

/// Do not use this module directly; its contents are re-exported from `orrery`.
#[macro_use]
pub mod math;

/// Do not use this module directly; its contents are re-exported from `orrery`.
pub mod time;

/// Do not use this module directly; its contents are re-exported from `orrery`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
