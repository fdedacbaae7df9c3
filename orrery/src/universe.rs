//! [`Universe`], the top-level container of [`Scene`]s.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops;

use hashbrown::HashMap;
use itertools::Itertools as _;
use manyfmt::{Fmt, Refmt as _};

use crate::physics::DegenerateCollisionError;
use crate::scene::{Scene, SceneStepInfo};
use crate::time::{Clock, Tick};
use crate::util::StatusText;
use crate::util::log::STEP_TARGET;

/// Name of a [`Scene`] within a [`Universe`].
pub type Name = String;

/// A collection of named [`Scene`]s which share a [`Clock`], so that time advances at the
/// same rate in all of them.
///
/// Scenes do not interact with each other; bodies in different scenes never collide.
#[derive(Clone, Default, PartialEq)]
pub struct Universe {
    clock: Clock,
    scenes: HashMap<Name, Scene>,
}

impl Universe {
    /// Constructs an empty [`Universe`] with the default [`Clock`] (60 ticks per second).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an empty [`Universe`] whose time is governed by `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            scenes: HashMap::new(),
        }
    }

    /// Returns the clock which determines the length of each step.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Replaces the clock.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Adds a scene with the given name, returning the scene previously having that name,
    /// if any.
    pub fn insert(&mut self, name: impl Into<Name>, scene: Scene) -> Option<Scene> {
        self.scenes.insert(name.into(), scene)
    }

    /// Removes the scene with the given name.
    pub fn remove(&mut self, name: &str) -> Option<Scene> {
        self.scenes.remove(name)
    }

    /// Returns the scene with the given name.
    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Returns the scene with the given name, for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Iterates over all scenes, in order of name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scene)> + '_ {
        self.scenes
            .iter()
            .sorted_unstable_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(name, scene)| (name.as_str(), scene))
    }

    /// Iterates over all scenes for modification, in order of name.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Scene)> + '_ {
        self.scenes
            .iter_mut()
            .sorted_unstable_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(name, scene)| (name.as_str(), scene))
    }

    /// Returns the number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns whether there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Advances the clock by one tick, and steps every scene, in order of name, by that tick.
    ///
    /// If `paused` is true, the clock does not advance and scenes are not changed.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if a scene fails to step. Scenes after it in name order are
    /// not stepped on this tick.
    pub fn step(&mut self, paused: bool) -> Result<UniverseStepInfo, StepError> {
        let tick = self.clock.advance(paused);
        self.step_scenes(tick)
    }

    /// Steps every scene, in order of name, by `tick`, without consulting or advancing
    /// the clock.
    ///
    /// # Errors
    ///
    /// As for [`Universe::step()`].
    pub fn step_scenes(&mut self, tick: Tick) -> Result<UniverseStepInfo, StepError> {
        let mut info = UniverseStepInfo {
            ticks: usize::from(!tick.paused()),
            ..UniverseStepInfo::default()
        };
        for (name, scene) in self.iter_mut() {
            info.scenes += scene.step(tick).map_err(|source| StepError {
                scene: name.into(),
                source,
            })?;
        }
        log::trace!(target: STEP_TARGET, "{:?}: {}", tick, info.refmt(&StatusText));
        Ok(info)
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("clock", &self.clock)
            .field("scenes", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Error returned by [`Universe::step()`] when a scene could not be stepped.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("failed to step scene {scene:?}")]
#[non_exhaustive]
pub struct StepError {
    /// Name of the scene which failed.
    pub scene: Name,
    /// Why it failed.
    #[source]
    pub source: DegenerateCollisionError,
}

// -------------------------------------------------------------------------------------------------

/// Performance data returned by [`Universe::step()`].
///
/// The exact contents of this structure are unstable; use only `Debug` and [`StatusText`]
/// formatting to examine it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct UniverseStepInfo {
    /// Number of unpaused ticks aggregated into this value.
    pub ticks: usize,
    /// Aggregated statistics from every scene.
    pub scenes: SceneStepInfo,
}

impl ops::AddAssign for UniverseStepInfo {
    fn add_assign(&mut self, other: Self) {
        self.ticks += other.ticks;
        self.scenes += other.scenes;
    }
}

impl Fmt<StatusText> for UniverseStepInfo {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &StatusText) -> fmt::Result {
        let Self { ticks, scenes } = self;
        write!(fmt, "Ticks: {ticks}\n{}", scenes.refmt(fopt))
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Body, DegeneratePolicy};
    use crate::scene::PhysicsParameters;
    use crate::time::TickSchedule;
    use euclid::point3;
    use pretty_assertions::assert_eq;

    fn two_scenes() -> Universe {
        let mut universe = Universe::new();
        let mut falling = Scene::default();
        falling.insert(Body::new_minimal([0.0, 10.0, 0.0], 1.0));
        universe.insert("falling", falling);

        let mut floating = Scene::new(PhysicsParameters::ZERO_GRAVITY);
        floating.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
        floating.insert(Body::new_minimal([1.5, 0.0, 0.0], 1.0));
        universe.insert("floating", floating);
        universe
    }

    #[test]
    fn step_advances_clock_and_all_scenes() {
        let mut universe = two_scenes();
        let info = universe.step(false).unwrap();

        assert_eq!(universe.clock().phase(), 1);
        assert_eq!(info.ticks, 1);
        assert_eq!(info.scenes.stepped, 2);
        assert_eq!(info.scenes.physics.collisions.contacts, 1);
        assert!(universe.get("falling").unwrap().bodies()[0].position.y < 10.0);
        assert_eq!(
            universe.get("floating").unwrap().bodies()[1].position,
            point3(1.75, 0.0, 0.0)
        );
    }

    #[test]
    fn paused_step_changes_nothing() {
        let mut universe = two_scenes();
        let before = universe.clone();
        let info = universe.step(true).unwrap();
        assert_eq!(universe, before);
        assert_eq!(info.ticks, 0);
        assert_eq!(info.scenes.skipped, 2);
    }

    #[test]
    fn iteration_is_in_name_order() {
        let mut universe = Universe::new();
        for name in ["c", "a", "d", "b"] {
            universe.insert(name, Scene::default());
        }
        assert_eq!(
            universe.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut universe = Universe::new();
        assert!(universe.insert("x", Scene::default()).is_none());
        assert!(universe.insert("x", Scene::default()).is_some());
        assert_eq!(universe.len(), 1);
        assert!(universe.remove("x").is_some());
        assert!(universe.is_empty());
    }

    #[test]
    fn error_names_the_scene() {
        let mut universe = Universe::new();
        let mut scene = Scene::new(PhysicsParameters {
            degenerate_contacts: DegeneratePolicy::Fail,
            ..PhysicsParameters::ZERO_GRAVITY
        });
        scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
        scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
        universe.insert("stuck", scene);

        let error = universe.step(false).unwrap_err();
        assert_eq!(error.scene, "stuck");
        assert_eq!(
            format!("{}", crate::util::ErrorChain(&error)),
            "failed to step scene \"stuck\"\n\n\
            Caused by:\n    bodies 0 and 1 are both centered at (0.0, 0.0, 0.0)"
        );
    }

    #[test]
    fn clock_schedule_sets_step_length() {
        let mut universe = Universe::with_clock(Clock::new(TickSchedule::per_second(2), 0));
        let mut scene = Scene::new(PhysicsParameters::ZERO_GRAVITY);
        let id = scene.insert(
            Body::new_minimal([0.0, 0.0, 0.0], 1.0).with_velocity(euclid::vec3(1.0, 0.0, 0.0)),
        );
        universe.insert("s", scene);

        universe.step(false).unwrap();
        assert_eq!(
            universe.get("s").unwrap().get(id).unwrap().position,
            point3(0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn step_info_status_text() {
        let mut universe = two_scenes();
        let mut total = UniverseStepInfo::default();
        total += universe.step(false).unwrap();
        total += universe.step(true).unwrap();
        assert_eq!(
            format!("{}", total.refmt(&StatusText)),
            "Ticks: 1\n\
            Scenes: 2 stepped, 2 skipped\n\
            Physics: 2 steps: 3 moved, 1 pairs tested in 2 passes, 1 contacts (0 degenerate)"
        );
    }
}
