//! Detection and resolution of overlaps between pairs of [`Body`]s.

use core::fmt;
use core::ops;

use euclid::Vector3D;
use manyfmt::{Fmt, Refmt as _};

use crate::math::{FreeCoordinate, FreePoint, FreeVector};
use crate::physics::Body;
use crate::util::ConciseDebug;
use crate::util::log::STEP_TARGET;

/// Direction in which the second body of a pair is pushed when both bodies have exactly
/// the same position, under [`DegeneratePolicy::Separate`].
///
/// This is opposite the default gravity, so that the second body ends up on top.
pub const DEGENERATE_NORMAL: FreeVector = Vector3D::new(0.0, 1.0, 0.0);

/// An individual overlap between two bodies, which has been resolved.
///
/// Reported to the callback of
/// [`PhysicsEngine::resolve_collisions_in_place()`](super::PhysicsEngine::resolve_collisions_in_place).
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct Contact {
    /// Index of the first body of the pair in the slice being resolved.
    pub first: usize,
    /// Index of the second body of the pair. Always greater than [`first`](Self::first).
    pub second: usize,
    /// Unit vector pointing from the first body towards the second.
    pub normal: FreeVector,
    /// How far the bodies overlapped before the correction.
    pub overlap: FreeCoordinate,
    /// Whether the bodies had the same position, so that [`normal`](Self::normal) is
    /// [`DEGENERATE_NORMAL`] rather than derived from their positions.
    pub degenerate: bool,
}

impl Fmt<ConciseDebug> for Contact {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "{} and {} along {} by {:.3}",
            self.first,
            self.second,
            self.normal.refmt(fopt),
            self.overlap
        )?;
        if self.degenerate {
            write!(fmt, " (degenerate)")?;
        }
        Ok(())
    }
}

/// What to do when two overlapping bodies have exactly the same position, so that there is
/// no direction in which to separate them.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[non_exhaustive]
pub enum DegeneratePolicy {
    /// Push the bodies apart along [`DEGENERATE_NORMAL`], and count the contact as
    /// degenerate.
    #[default]
    Separate,
    /// Stop resolving collisions and return [`DegenerateCollisionError`].
    Fail,
}

/// Error returned when two overlapping bodies have exactly the same position and the
/// [`DegeneratePolicy`] is [`Fail`](DegeneratePolicy::Fail).
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[displaydoc("bodies {first} and {second} are both centered at {position:?}")]
#[non_exhaustive]
pub struct DegenerateCollisionError {
    /// Index of the first body of the pair.
    pub first: usize,
    /// Index of the second body of the pair.
    pub second: usize,
    /// The position both bodies have.
    pub position: FreePoint,
}

impl core::error::Error for DegenerateCollisionError {}

/// Statistics about collision resolution.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct CollisionInfo {
    /// Number of pairs of enabled bodies whose overlap was checked.
    pub pairs_tested: usize,
    /// Number of overlaps which were found and corrected.
    pub contacts: usize,
    /// Number of those overlaps which were between bodies at the same position.
    pub degenerate_contacts: usize,
    /// Number of passes over all pairs that were made.
    pub iterations: usize,
}

impl ops::AddAssign for CollisionInfo {
    fn add_assign(&mut self, other: Self) {
        let Self {
            pairs_tested,
            contacts,
            degenerate_contacts,
            iterations,
        } = other;
        self.pairs_tested += pairs_tested;
        self.contacts += contacts;
        self.degenerate_contacts += degenerate_contacts;
        self.iterations += iterations;
    }
}

/// Makes one pass over every pair of enabled bodies, in index order, pushing apart any which
/// overlap.
///
/// Corrections are applied immediately, so later pairs see the positions produced by
/// earlier ones. Velocities are not changed.
///
/// If a [`DegenerateCollisionError`] is returned, corrections made before the degenerate
/// pair was reached remain applied.
pub(crate) fn resolve_pass<CC>(
    bodies: &mut [Body],
    policy: DegeneratePolicy,
    collision_callback: &mut CC,
) -> Result<CollisionInfo, DegenerateCollisionError>
where
    CC: FnMut(Contact),
{
    let mut info = CollisionInfo {
        iterations: 1,
        ..CollisionInfo::default()
    };

    for first in 0..bodies.len() {
        if !bodies[first].physics_enabled {
            continue;
        }
        for second in (first + 1)..bodies.len() {
            let (a, b) = (&bodies[first], &bodies[second]);
            if !b.physics_enabled {
                continue;
            }
            info.pairs_tested += 1;

            let Some((share_first, share_second)) = correction_shares(a, b) else {
                // Neither body can move, so there is nothing to do even if they overlap.
                continue;
            };
            let Some(penetration) = a.collision_sphere().penetration(&b.collision_sphere())
            else {
                continue;
            };

            let (normal, degenerate) = match penetration.normal() {
                Some(normal) => (normal, false),
                None => match policy {
                    DegeneratePolicy::Separate => {
                        log::warn!(
                            target: STEP_TARGET,
                            "bodies {first} and {second} coincide at {}; separating along {}",
                            a.position.refmt(&ConciseDebug),
                            DEGENERATE_NORMAL.refmt(&ConciseDebug),
                        );
                        (DEGENERATE_NORMAL, true)
                    }
                    DegeneratePolicy::Fail => {
                        return Err(DegenerateCollisionError {
                            first,
                            second,
                            position: a.position,
                        });
                    }
                },
            };

            let overlap = penetration.depth;
            bodies[first].nudge(normal * -(overlap * share_first));
            bodies[second].nudge(normal * (overlap * share_second));

            info.contacts += 1;
            if degenerate {
                info.degenerate_contacts += 1;
            }
            collision_callback(Contact {
                first,
                second,
                normal,
                overlap,
                degenerate,
            });
        }
    }

    Ok(info)
}

/// Returns the fraction of the overlap correction that each of the two bodies should
/// receive, or [`None`] if neither may move.
///
/// A body whose partner is static takes the whole correction, so that it ends up exactly
/// touching the obstacle.
fn correction_shares(a: &Body, b: &Body) -> Option<(FreeCoordinate, FreeCoordinate)> {
    match (a.is_static, b.is_static) {
        (false, false) => Some((0.5, 0.5)),
        (true, false) => Some((0.0, 1.0)),
        (false, true) => Some((1.0, 0.0)),
        (true, true) => None,
    }
}
