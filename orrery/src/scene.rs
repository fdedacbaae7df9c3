//! [`Scene`]s: collections of [`Body`]s sharing [`PhysicsParameters`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops;

use manyfmt::{Fmt, Refmt as _};

use crate::physics::{Body, DegenerateCollisionError, PhysicsEngine, StepInfo};
use crate::time::Tick;
use crate::util::log::STEP_TARGET;
use crate::util::{ConciseDebug, StatusText};

mod parameters;
pub use parameters::*;

#[cfg(test)]
mod tests;

// -------------------------------------------------------------------------------------------------

/// Identifies a [`Body`] within a [`Scene`].
///
/// IDs are assigned in increasing order by [`Scene::insert()`] and are never reused within
/// the same scene, even after the body is removed.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[expect(clippy::exhaustive_structs)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bookkeeping for one body, kept separately from the [`Body`] itself so that the bodies
/// form a contiguous slice for [`PhysicsEngine`].
#[derive(Clone, Debug, PartialEq)]
struct Entry {
    id: BodyId,
    name: Option<String>,
}

/// A collection of [`Body`]s which interact with each other, and the [`PhysicsParameters`]
/// which govern them.
///
/// Bodies are kept in insertion order, which is also the order in which collisions are
/// resolved. Removing a body preserves the order of the rest.
#[derive(Clone, PartialEq)]
pub struct Scene {
    parameters: PhysicsParameters,
    /// Parallel to `bodies`. IDs are strictly increasing.
    entries: Vec<Entry>,
    bodies: Vec<Body>,
    next_id: u64,
}

impl Scene {
    /// Constructs an empty scene.
    pub fn new(parameters: PhysicsParameters) -> Self {
        Self {
            parameters,
            entries: Vec::new(),
            bodies: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the physics parameters of this scene.
    pub fn parameters(&self) -> &PhysicsParameters {
        &self.parameters
    }

    /// Replaces the physics parameters of this scene.
    pub fn set_parameters(&mut self, parameters: PhysicsParameters) {
        self.parameters = parameters;
    }

    /// Adds a body to the end of the scene and returns its new ID.
    pub fn insert(&mut self, body: Body) -> BodyId {
        self.insert_entry(None, body)
    }

    /// Adds a body with a display name to the end of the scene and returns its new ID.
    ///
    /// Names are for human use and need not be unique.
    pub fn insert_named(&mut self, name: impl Into<String>, body: Body) -> BodyId {
        self.insert_entry(Some(name.into()), body)
    }

    fn insert_entry(&mut self, name: Option<String>, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, name });
        self.bodies.push(body);
        id
    }

    /// Removes a body from the scene, returning it if it was present.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        self.entries.remove(index);
        Some(self.bodies.remove(index))
    }

    /// Returns the body with the given ID, if it is present.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|index| &self.bodies[index])
    }

    /// Returns the body with the given ID for modification, if it is present.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.index_of(id).map(|index| &mut self.bodies[index])
    }

    /// Returns the name the body was given by [`Scene::insert_named()`], if any.
    pub fn name_of(&self, id: BodyId) -> Option<&str> {
        self.entries[self.index_of(id)?].name.as_deref()
    }

    /// Returns the first body with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
            .map(|entry| entry.id)
    }

    /// Iterates over all bodies in order, with their IDs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (BodyId, &Body)> + '_ {
        self.entries
            .iter()
            .zip(self.bodies.iter())
            .map(|(entry, body)| (entry.id, body))
    }

    /// Returns all bodies in order, as a slice suitable for use with [`PhysicsEngine`].
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Returns all bodies in order, for direct modification.
    ///
    /// Bodies cannot be added or removed this way.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Returns the number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns whether there are no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Returns the ID that the next inserted body will receive.
    pub fn next_id(&self) -> BodyId {
        BodyId(self.next_id)
    }

    /// Returns the [`PhysicsEngine`] that [`Scene::step()`] uses for `tick`.
    pub fn engine_for(&self, tick: Tick) -> PhysicsEngine {
        self.parameters.engine_for(tick)
    }

    /// Advances every body in the scene by `tick`.
    ///
    /// Does nothing if the tick is paused or the scene's physics is not
    /// [enabled](PhysicsParameters::enabled).
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateCollisionError`] under the conditions described by
    /// [`PhysicsEngine::resolve_collisions_in_place()`]. The bodies are left partly stepped.
    pub fn step(&mut self, tick: Tick) -> Result<SceneStepInfo, DegenerateCollisionError> {
        if tick.paused() || !self.parameters.enabled {
            return Ok(SceneStepInfo {
                skipped: 1,
                ..SceneStepInfo::default()
            });
        }

        let engine = self.engine_for(tick);
        let entries = &self.entries;
        let physics = engine.step(&mut self.bodies, |contact| {
            log::trace!(
                target: STEP_TARGET,
                "contact {} and {}: {}",
                entries[contact.first].id,
                entries[contact.second].id,
                contact.refmt(&ConciseDebug),
            );
        })?;

        Ok(SceneStepInfo {
            stepped: 1,
            skipped: 0,
            physics,
        })
    }

    /// Recreates a scene from its parts, as stored by the save format.
    ///
    /// `next_id` is raised if necessary so that it is greater than every existing ID, and
    /// bodies are sorted by ID. IDs must be distinct.
    #[cfg(feature = "save")]
    pub(crate) fn from_parts(
        parameters: PhysicsParameters,
        next_id: u64,
        bodies: impl IntoIterator<Item = (BodyId, Option<String>, Body)>,
    ) -> Self {
        let mut bodies: Vec<_> = bodies.into_iter().collect();
        bodies.sort_by_key(|&(id, _, _)| id);
        let next_id = bodies
            .last()
            .map_or(next_id, |&(BodyId(last), _, _)| next_id.max(last.saturating_add(1)));
        let (entries, bodies) = bodies
            .into_iter()
            .map(|(id, name, body)| (Entry { id, name }, body))
            .unzip();
        Self {
            parameters,
            entries,
            bodies,
            next_id,
        }
    }

    /// Iterates over all bodies with their IDs and names, for the save format.
    #[cfg(feature = "save")]
    pub(crate) fn iter_with_names(
        &self,
    ) -> impl Iterator<Item = (BodyId, Option<&str>, &Body)> + '_ {
        self.entries
            .iter()
            .zip(self.bodies.iter())
            .map(|(entry, body)| (entry.id, entry.name.as_deref(), body))
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |entry| entry.id).ok()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PhysicsParameters::default())
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            parameters,
            entries,
            bodies,
            next_id,
        } = self;
        f.debug_struct("Scene")
            .field("parameters", parameters)
            .field(
                "bodies",
                &entries
                    .iter()
                    .zip(bodies)
                    .map(|(entry, body)| (entry.id, entry.name.as_deref(), body))
                    .collect::<Vec<_>>(),
            )
            .field("next_id", next_id)
            .finish()
    }
}

impl Fmt<StatusText> for Scene {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &StatusText) -> fmt::Result {
        for (entry, body) in self.entries.iter().zip(&self.bodies) {
            write!(fmt, "{}", entry.id)?;
            if let Some(name) = &entry.name {
                write!(fmt, " {name:?}")?;
            }
            writeln!(fmt, ": {}", body.refmt(fopt))?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// Performance data returned by [`Scene::step()`].
///
/// The exact contents of this structure are unstable; use only `Debug` and [`StatusText`]
/// formatting to examine it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct SceneStepInfo {
    /// Number of scene steps which ran the physics engine.
    pub stepped: usize,
    /// Number of scene steps which did nothing because time was paused or the scene was
    /// disabled.
    pub skipped: usize,
    /// Statistics from the physics engine.
    pub physics: StepInfo,
}

impl ops::AddAssign for SceneStepInfo {
    fn add_assign(&mut self, other: Self) {
        self.stepped += other.stepped;
        self.skipped += other.skipped;
        self.physics += other.physics;
    }
}

impl Fmt<StatusText> for SceneStepInfo {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &StatusText) -> fmt::Result {
        let Self {
            stepped,
            skipped,
            physics,
        } = self;
        write!(
            fmt,
            "Scenes: {stepped} stepped, {skipped} skipped\nPhysics: {}",
            physics.refmt(fopt)
        )
    }
}
