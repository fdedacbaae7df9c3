//! Orrery is a small simulation core for "universes" made of "scenes", where each scene
//! holds a collection of spherical bodies that fall under gravity and push each other
//! apart when they overlap.
//!
//! This crate defines the data model and the simulation rules.
//! (The command-line driver lives in `orrery-cli`.)
//!
//! ## Data model
//!
//! * A [`Universe`] owns any number of named [`Scene`]s and a [`Clock`] which decides how
//!   much time each step represents. Time advances at a uniform rate throughout a
//!   `Universe`.
//! * A [`Scene`] owns a list of [`Body`]s and the [`PhysicsParameters`] they are simulated
//!   with (gravity, time scale, and solver settings).
//! * A [`Body`] is a sphere with a position and velocity. Bodies can be excluded from
//!   simulation entirely, or be *static*: immovable obstacles which others are pushed away
//!   from.
//!
//! The simulation itself is performed by [`PhysicsEngine`], which is a plain value holding
//! only configuration. It can be used directly on any slice of bodies without a `Scene`
//! or `Universe`; those types merely decide which engine configuration to use for each tick.
//!
//! ### Coordinate system
//!
//! There are no assumptions about axes except that the default gravity vector points in
//! the &minus;Y direction, and degenerate contacts (bodies at exactly the same position)
//! are separated along +Y by default.
//!
//! ## Crate features
//!
//! This crate, `orrery`, defines the following feature flags:
//!
//! * `save`:
//!   Enable [`serde`] serialization of [`Universe`]s, [`Scene`]s, and [`Body`]s.
//! * `auto-threads`:
//!   Enable use of threads for parallel processing of body integration, via
//!   [`rayon`]’s global thread pool.
//!   This feature does not affect the public API or the results, only performance and
//!   dependencies.
//! * `arbitrary`: Adds implementations of the [`arbitrary::Arbitrary`] trait for
//!   fuzzing / property testing on types defined by this crate.
//!
//! ## Platform compatibility
//!
//! * This crate is not `no_std` compatible due to need for floating-point functions.
//! * It does not use IO, and does not create threads unless `auto-threads` is enabled.
//!
//! ## Dependencies and global state
//!
//! `orrery` has no global state. However, it does write log messages using the [`log`]
//! crate and is therefore subject to that global configuration.
//!
//! `orrery` depends on and re-exports the following crates as part of its public API:
//!
//! * [`euclid`] for vector math (as `orrery::euclid`).
//! * [`ordered_float`] (as `orrery::math::NotNan`).
//!
//! [`Body`]: crate::physics::Body
//! [`Clock`]: crate::time::Clock
//! [`PhysicsEngine`]: crate::physics::PhysicsEngine
//! [`PhysicsParameters`]: crate::scene::PhysicsParameters
//! [`Scene`]: crate::scene::Scene
//! [`Universe`]: crate::universe::Universe
//! [`ordered_float`]: https://docs.rs/ordered-float/
#![cfg_attr(
    not(feature = "arbitrary"),
    doc = "[`arbitrary::Arbitrary`]: https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html"
)]
#![cfg_attr(not(feature = "auto-threads"), doc = "[`rayon`]: https://docs.rs/rayon/")]
#![cfg_attr(not(feature = "save"), doc = "[`serde`]: https://docs.rs/serde/")]
#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
// * This crate contains no unsafe code of its own, but uses `notnan!`, which does.
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

extern crate alloc;
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod math;

pub mod physics;
#[cfg(feature = "save")]
pub mod save;
pub mod scene;
pub mod time;
pub mod universe;
pub mod util;

/// Re-export the version of the `euclid` vector math library we're using.
#[doc(no_inline)]
pub use euclid;
