use alloc::vec::Vec;
use core::fmt;
use core::ops;

use euclid::Vector3D;
use manyfmt::{Fmt, Refmt as _};

#[cfg(feature = "auto-threads")]
use rayon::iter::{IntoParallelRefMutIterator as _, ParallelIterator as _};

use crate::math::FreeCoordinate;
use crate::physics::{
    Acceleration, Body, CollisionInfo, Contact, DegenerateCollisionError, DegeneratePolicy,
    EARTH_GRAVITY, collision,
};
use crate::util::log::STEP_TARGET;
use crate::util::{ConciseDebug, StatusText};

/// Advances [`Body`]s through time: applies gravity and velocity, then pushes overlapping
/// bodies apart.
///
/// A `PhysicsEngine` holds only configuration, never bodies; it may be freely copied and
/// used on any number of independent sets of bodies. Every operation processes the bodies
/// in slice order and is deterministic.
///
/// The usual way to obtain one is
/// [`Scene::engine_for()`](crate::scene::Scene::engine_for), which applies the scene's
/// [`PhysicsParameters`](crate::scene::PhysicsParameters) to a [`Tick`](crate::time::Tick).
///
/// ```
/// use orrery::physics::{Body, PhysicsEngine};
///
/// let engine = PhysicsEngine::default();
/// let bodies = [
///     Body::new_minimal([0.0, 0.0, 0.0], 1.0),
///     Body::new_minimal([1.5, 0.0, 0.0], 1.0),
/// ];
/// let resolved = engine.resolve_collisions(&bodies).unwrap();
/// assert_eq!(resolved[0].position.x, -0.25);
/// assert_eq!(resolved[1].position.x, 1.75);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct PhysicsEngine {
    /// Acceleration applied to every movable body.
    pub gravity: Vector3D<FreeCoordinate, Acceleration>,

    /// Length of time, in seconds, which [`integrate()`](Self::integrate) advances by.
    pub timestep: FreeCoordinate,

    /// Maximum number of passes over all pairs of bodies which collision resolution makes.
    ///
    /// Resolution stops early once a pass finds no overlaps. Zero is treated as one.
    pub solver_iterations: u8,

    /// If set, velocities longer than this are shortened to this length after gravity is
    /// applied.
    pub speed_limit: Option<FreeCoordinate>,

    /// What to do with overlapping bodies that have exactly the same position.
    pub degenerate: DegeneratePolicy,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY,
            timestep: 1.0 / 60.0,
            solver_iterations: 1,
            speed_limit: None,
            degenerate: DegeneratePolicy::Separate,
        }
    }
}

impl PhysicsEngine {
    /// Returns a copy of `bodies` advanced by one [`timestep`](Self::timestep).
    ///
    /// See [`integrate_in_place()`](Self::integrate_in_place) for details.
    #[must_use]
    pub fn integrate(&self, bodies: &[Body]) -> Vec<Body> {
        let mut bodies = bodies.to_vec();
        self.integrate_in_place(&mut bodies);
        bodies
    }

    /// Advances each movable body by one [`timestep`](Self::timestep), using semi-implicit
    /// Euler integration: gravity changes the velocity, and then the new velocity changes
    /// the position.
    ///
    /// Bodies which are static or have physics disabled are left unchanged.
    /// Collisions are not considered.
    ///
    /// Returns the number of bodies which were moved.
    pub fn integrate_in_place(&self, bodies: &mut [Body]) -> usize {
        #[cfg(feature = "auto-threads")]
        let count: usize = bodies
            .par_iter_mut()
            .map(|body| usize::from(self.integrate_body(body)))
            .sum();

        #[cfg(not(feature = "auto-threads"))]
        let count: usize = bodies
            .iter_mut()
            .map(|body| usize::from(self.integrate_body(body)))
            .sum();

        count
    }

    fn integrate_body(&self, body: &mut Body) -> bool {
        if !body.is_movable() {
            return false;
        }
        let dt = self.timestep;

        body.velocity += (self.gravity * dt).cast_unit();

        if let Some(limit) = self.speed_limit {
            // The squared length may overflow to infinity even when the speed is finite.
            if body.velocity.square_length() > limit * limit {
                body.velocity = body.velocity.robust_normalize() * limit;
            }
        }

        body.position += (body.velocity * dt).cast_unit();
        true
    }

    /// Returns a copy of `bodies` with overlaps between them corrected.
    ///
    /// See [`resolve_collisions_in_place()`](Self::resolve_collisions_in_place) for details.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateCollisionError`] if two overlapping bodies have the same position
    /// and [`degenerate`](Self::degenerate) is [`DegeneratePolicy::Fail`].
    pub fn resolve_collisions(
        &self,
        bodies: &[Body],
    ) -> Result<Vec<Body>, DegenerateCollisionError> {
        let mut bodies = bodies.to_vec();
        self.resolve_collisions_in_place(&mut bodies, |_| {})?;
        Ok(bodies)
    }

    /// Pushes apart every pair of enabled bodies whose collision spheres overlap.
    ///
    /// Pairs are visited in index order, `(0, 1), (0, 2), …, (1, 2), …`. For each pair
    /// that overlaps, the bodies are moved apart along the line between their centers by
    /// the overlap distance: half each, or all of it for one body if the other is static.
    /// Corrections take effect immediately, so a later pair may undo some of an earlier
    /// correction; more passes are made, up to [`solver_iterations`](Self::solver_iterations),
    /// as long as overlaps remain.
    ///
    /// Only positions change. Velocities are left as they are, so bodies moving towards
    /// each other will overlap again on the next step.
    ///
    /// `collision_callback` is called once for every overlap that was corrected.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateCollisionError`] if two overlapping bodies have the same position
    /// and [`degenerate`](Self::degenerate) is [`DegeneratePolicy::Fail`]. In that case,
    /// corrections made to earlier pairs are kept.
    pub fn resolve_collisions_in_place<CC>(
        &self,
        bodies: &mut [Body],
        mut collision_callback: CC,
    ) -> Result<CollisionInfo, DegenerateCollisionError>
    where
        CC: FnMut(Contact),
    {
        let mut info = CollisionInfo::default();
        for _ in 0..self.solver_iterations.max(1) {
            let pass = collision::resolve_pass(bodies, self.degenerate, &mut collision_callback)?;
            info += pass;
            if pass.contacts == 0 {
                break;
            }
        }
        Ok(info)
    }

    /// Performs one complete step: [`integrate_in_place()`](Self::integrate_in_place) and
    /// then [`resolve_collisions_in_place()`](Self::resolve_collisions_in_place).
    ///
    /// # Errors
    ///
    /// As for [`resolve_collisions_in_place()`](Self::resolve_collisions_in_place).
    pub fn step<CC>(
        &self,
        bodies: &mut [Body],
        collision_callback: CC,
    ) -> Result<StepInfo, DegenerateCollisionError>
    where
        CC: FnMut(Contact),
    {
        let integrated = self.integrate_in_place(bodies);
        let collisions = self.resolve_collisions_in_place(bodies, collision_callback)?;
        let info = StepInfo {
            count: 1,
            integrated,
            collisions,
        };
        log::trace!(target: STEP_TARGET, "{}", info.refmt(&StatusText));
        Ok(info)
    }
}

impl Fmt<ConciseDebug> for PhysicsEngine {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "g={} dt={:.4}s iter={}",
            self.gravity.refmt(fopt),
            self.timestep,
            self.solver_iterations
        )?;
        if let Some(limit) = self.speed_limit {
            write!(fmt, " limit={limit}")?;
        }
        Ok(())
    }
}

/// Performance data returned by [`PhysicsEngine::step()`].
///
/// The exact contents of this structure are unstable; use only `Debug` and [`StatusText`]
/// formatting to examine it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct StepInfo {
    /// Number of steps which were aggregated into this value.
    pub count: usize,
    /// Number of bodies which gravity and velocity were applied to.
    pub integrated: usize,
    /// Statistics from collision resolution.
    pub collisions: CollisionInfo,
}

impl ops::AddAssign for StepInfo {
    fn add_assign(&mut self, other: Self) {
        self.count += other.count;
        self.integrated += other.integrated;
        self.collisions += other.collisions;
    }
}

impl Fmt<StatusText> for StepInfo {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &StatusText) -> fmt::Result {
        let Self {
            count,
            integrated,
            collisions:
                CollisionInfo {
                    pairs_tested,
                    contacts,
                    degenerate_contacts,
                    iterations,
                },
        } = *self;
        write!(
            fmt,
            "{count} steps: {integrated} moved, {pairs_tested} pairs tested in {iterations} passes, \
            {contacts} contacts ({degenerate_contacts} degenerate)"
        )
    }
}
