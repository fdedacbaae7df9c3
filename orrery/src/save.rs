//! Serialization of [`Universe`](crate::universe::Universe)s, [`Scene`](crate::scene::Scene)s,
//! [`Body`](crate::physics::Body)s, and [`PhysicsParameters`](crate::scene::PhysicsParameters).
//!
//! This module contains no public items; it consists of [`serde`] trait implementations for
//! the types above, which produce a versioned format. Each object is tagged with its version,
//! as in `{"type": "BodyV1", ...}`, so that older saves remain readable when the format
//! changes. Vectors and points are written as 3-element arrays.
//!
//! [`PhysicsParameters`](crate::scene::PhysicsParameters) are the exception: they are an
//! untagged object whose fields may each be omitted to get the default, so that they are
//! convenient to write by hand in configuration files.

pub(crate) mod conversion;
pub(crate) mod schema;
