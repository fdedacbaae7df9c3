//! Data types which represent simulation state in formats explicitly designed for
//! serialization, and versioned to ensure ability to deserialize older data.
//!
//! As a general rule, all types in this file should avoid referring to types outside
//! this file, except where specifically intended. This ensures that changes to internal
//! representations will not accidentally leak to the serialization format via
//! `#[derive(Serialize, Deserialize)]`.
//!
//! General properties of the serialization schema:
//!
//! * 3D vectors/points are represented as 3-element arrays
//!   (and not, say, as structures with named fields).

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::num::{NonZeroU8, NonZeroU16};
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::math::{NotNan, PositiveSign};
use crate::{physics, scene};

//------------------------------------------------------------------------------------------------//
// Schema corresponding to the `physics` module

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub(crate) enum BodySer {
    BodyV1 {
        position: [f64; 3],
        #[serde(default, skip_serializing_if = "is_default")]
        velocity: [f64; 3],
        radius: f64,
        #[serde(default = "return_true", skip_serializing_if = "is_true")]
        physics_enabled: bool,
        #[serde(default, skip_serializing_if = "is_default")]
        is_static: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) enum DegeneratePolicySerV1 {
    #[default]
    Separate,
    Fail,
}

//------------------------------------------------------------------------------------------------//
// Schema corresponding to the `scene` module

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub(crate) enum SceneSer<'a> {
    SceneV1 {
        #[serde(default)]
        physics: PhysicsParametersSerV1,
        /// ID which the next inserted body will receive. If missing or too small, it is
        /// raised to be greater than every body's ID.
        #[serde(default)]
        next_id: u64,
        bodies: Vec<SceneBodySerV1<'a>>,
    },
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct SceneBodySerV1<'a> {
    pub(crate) id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<Cow<'a, str>>,
    pub(crate) body: Cow<'a, physics::Body>,
}

/// Not tagged with a version, because it is also used directly in configuration files.
/// New fields must therefore always have defaults.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PhysicsParametersSerV1 {
    pub(crate) gravity: [NotNan<f64>; 3],
    pub(crate) time_scale: PositiveSign<f64>,
    pub(crate) solver_iterations: NonZeroU8,
    pub(crate) speed_limit: Option<PositiveSign<f64>>,
    pub(crate) degenerate_contacts: DegeneratePolicySerV1,
    pub(crate) enabled: bool,
}

impl Default for PhysicsParametersSerV1 {
    fn default() -> Self {
        Self::from(&scene::PhysicsParameters::DEFAULT)
    }
}

//------------------------------------------------------------------------------------------------//
// Schema corresponding to the `time` and `universe` modules

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub(crate) enum ClockSer {
    ClockV1 {
        base_duration: Duration,
        divisor: NonZeroU16,
        phase: u16,
    },
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub(crate) enum UniverseSer<'a> {
    UniverseV1 {
        clock: ClockSer,
        /// Sorted by name.
        scenes: Vec<UniverseSceneSerV1<'a>>,
    },
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct UniverseSceneSerV1<'a> {
    pub(crate) name: Cow<'a, str>,
    pub(crate) scene: Cow<'a, scene::Scene>,
}

//------------------------------------------------------------------------------------------------//
// Helpers

fn return_true() -> bool {
    true
}
fn is_true(value: &bool) -> bool {
    *value
}
fn is_default<T: Default + PartialEq + Copy>(value: &T) -> bool {
    *value == T::default()
}
