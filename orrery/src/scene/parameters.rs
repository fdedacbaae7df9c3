use core::fmt;
use core::num::NonZeroU8;

use euclid::{Vector3D, vec3};

use crate::math::{FreeCoordinate, NotNan, PositiveSign, notnan};
use crate::physics::{Acceleration, DegeneratePolicy, PhysicsEngine};
use crate::time::Tick;
use crate::util::{ConciseDebug, Refmt as _};

#[cfg(doc)]
use crate::scene::Scene;

// -------------------------------------------------------------------------------------------------

/// The global characteristics of a [`Scene`]'s physics.
///
/// This is a separate type so that [`Scene`] does not need many miscellaneous accessors,
/// and so that the same parameters can be applied to many scenes (for example, from a
/// configuration file).
#[derive(Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[non_exhaustive]
pub struct PhysicsParameters {
    /// Gravity vector for moving bodies, in units/s².
    pub gravity: Vector3D<NotNan<FreeCoordinate>, Acceleration>,

    /// Multiplier applied to the length of each [`Tick`] to obtain the simulated time step.
    ///
    /// 1 is real time, 0.5 is slow motion, and 0 freezes motion while still resolving
    /// overlaps.
    pub time_scale: PositiveSign<FreeCoordinate>,

    /// Maximum number of collision resolution passes per step.
    ///
    /// See [`PhysicsEngine::solver_iterations`].
    pub solver_iterations: NonZeroU8,

    /// If set, the maximum speed bodies may reach.
    pub speed_limit: Option<PositiveSign<FreeCoordinate>>,

    /// What to do with overlapping bodies that have exactly the same position.
    pub degenerate_contacts: DegeneratePolicy,

    /// Whether the scene is simulated at all. If false, stepping the scene does nothing.
    pub enabled: bool,
}

impl PhysicsParameters {
    /// The default parameters: Earth gravity, real time, a single collision pass, no speed
    /// limit, degenerate contacts separated.
    pub const DEFAULT: Self = Self {
        gravity: vec3(notnan!(0.0), notnan!(-9.81), notnan!(0.0)),
        time_scale: PositiveSign::<f64>::ONE,
        solver_iterations: NonZeroU8::MIN,
        speed_limit: None,
        degenerate_contacts: DegeneratePolicy::Separate,
        enabled: true,
    };

    /// Parameters with no gravity; bodies move only by their own velocity and by being
    /// pushed out of each other.
    pub const ZERO_GRAVITY: Self = Self {
        gravity: vec3(notnan!(0.0), notnan!(0.0), notnan!(0.0)),
        ..Self::DEFAULT
    };

    /// Returns the [`PhysicsEngine`] which should be used to advance bodies by `tick`.
    ///
    /// The engine's time step is the tick's length multiplied by
    /// [`time_scale`](Self::time_scale).
    pub fn engine_for(&self, tick: Tick) -> PhysicsEngine {
        PhysicsEngine {
            gravity: self.gravity.map(NotNan::into_inner),
            timestep: tick.delta_t_f64() * self.time_scale.into_inner(),
            solver_iterations: self.solver_iterations.get(),
            speed_limit: self.speed_limit.map(PositiveSign::into_inner),
            degenerate: self.degenerate_contacts,
        }
    }
}

impl fmt::Debug for PhysicsParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            gravity,
            time_scale,
            solver_iterations,
            speed_limit,
            degenerate_contacts,
            enabled,
        } = self;
        f.debug_struct("PhysicsParameters")
            .field(
                "gravity",
                &gravity.map(NotNan::into_inner).refmt(&ConciseDebug),
            )
            .field("time_scale", time_scale)
            .field("solver_iterations", solver_iterations)
            .field("speed_limit", speed_limit)
            .field("degenerate_contacts", degenerate_contacts)
            .field("enabled", enabled)
            .finish()
    }
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
