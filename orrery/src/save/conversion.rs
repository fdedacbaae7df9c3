//! Conversion between the types in [`super::schema`] and those used in
//! normal operation.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::schema;

mod physics {
    use super::*;
    use crate::physics::{Body, DegeneratePolicy};

    impl Serialize for Body {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let &Body {
                position,
                velocity,
                radius,
                physics_enabled,
                is_static,
            } = self;
            schema::BodySer::BodyV1 {
                position: position.into(),
                velocity: velocity.into(),
                radius,
                physics_enabled,
                is_static,
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Body {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match schema::BodySer::deserialize(deserializer)? {
                schema::BodySer::BodyV1 {
                    position,
                    velocity,
                    radius,
                    physics_enabled,
                    is_static,
                } => Ok(Body {
                    position: position.into(),
                    velocity: velocity.into(),
                    radius,
                    physics_enabled,
                    is_static,
                }),
            }
        }
    }

    impl From<DegeneratePolicy> for schema::DegeneratePolicySerV1 {
        fn from(value: DegeneratePolicy) -> Self {
            match value {
                DegeneratePolicy::Separate => Self::Separate,
                DegeneratePolicy::Fail => Self::Fail,
            }
        }
    }

    impl From<schema::DegeneratePolicySerV1> for DegeneratePolicy {
        fn from(value: schema::DegeneratePolicySerV1) -> Self {
            match value {
                schema::DegeneratePolicySerV1::Separate => Self::Separate,
                schema::DegeneratePolicySerV1::Fail => Self::Fail,
            }
        }
    }
}

mod scene {
    use super::*;
    use crate::scene::{BodyId, PhysicsParameters, Scene};

    impl From<&PhysicsParameters> for schema::PhysicsParametersSerV1 {
        fn from(value: &PhysicsParameters) -> Self {
            let &PhysicsParameters {
                gravity,
                time_scale,
                solver_iterations,
                speed_limit,
                degenerate_contacts,
                enabled,
            } = value;
            Self {
                gravity: gravity.into(),
                time_scale,
                solver_iterations,
                speed_limit,
                degenerate_contacts: degenerate_contacts.into(),
                enabled,
            }
        }
    }

    impl From<schema::PhysicsParametersSerV1> for PhysicsParameters {
        fn from(value: schema::PhysicsParametersSerV1) -> Self {
            let schema::PhysicsParametersSerV1 {
                gravity,
                time_scale,
                solver_iterations,
                speed_limit,
                degenerate_contacts,
                enabled,
            } = value;
            Self {
                gravity: gravity.into(),
                time_scale,
                solver_iterations,
                speed_limit,
                degenerate_contacts: degenerate_contacts.into(),
                enabled,
            }
        }
    }

    impl Serialize for PhysicsParameters {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            schema::PhysicsParametersSerV1::from(self).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for PhysicsParameters {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(schema::PhysicsParametersSerV1::deserialize(deserializer)?.into())
        }
    }

    impl Serialize for Scene {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            schema::SceneSer::SceneV1 {
                physics: self.parameters().into(),
                next_id: self.next_id().0,
                bodies: self
                    .iter_with_names()
                    .map(|(BodyId(id), name, body)| schema::SceneBodySerV1 {
                        id,
                        name: name.map(Cow::Borrowed),
                        body: Cow::Borrowed(body),
                    })
                    .collect(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Scene {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match schema::SceneSer::deserialize(deserializer)? {
                schema::SceneSer::SceneV1 {
                    physics,
                    next_id,
                    bodies,
                } => {
                    if next_id > MAX_SAVED_ID {
                        return Err(serde::de::Error::custom(format_args!(
                            "next_id {next_id} is larger than {MAX_SAVED_ID}"
                        )));
                    }
                    let ids: Vec<u64> = bodies.iter().map(|entry| entry.id).collect();
                    if let Some(&too_large) = ids.iter().find(|&&id| id >= MAX_SAVED_ID) {
                        return Err(serde::de::Error::custom(format_args!(
                            "body ID {too_large} is not less than {MAX_SAVED_ID}"
                        )));
                    }
                    if let Some(duplicate) = first_duplicate(ids) {
                        return Err(serde::de::Error::custom(format_args!(
                            "duplicate body ID {duplicate}"
                        )));
                    }
                    Ok(Scene::from_parts(
                        physics.into(),
                        next_id,
                        bodies.into_iter().map(
                            |schema::SceneBodySerV1 { id, name, body }| {
                                (BodyId(id), name.map(Cow::into_owned), body.into_owned())
                            },
                        ),
                    ))
                }
            }
        }
    }

    /// Upper bound on stored IDs, so that they are exact in readers which parse JSON numbers
    /// as floats, and so that inserting into a loaded scene can never exhaust the ID space.
    const MAX_SAVED_ID: u64 = (1 << 53) - 1;

    fn first_duplicate(mut ids: Vec<u64>) -> Option<u64> {
        ids.sort_unstable();
        ids.windows(2).find(|pair| pair[0] == pair[1]).map(|pair| pair[0])
    }
}

mod universe {
    use super::*;
    use crate::time::{Clock, TickSchedule};
    use crate::universe::Universe;

    impl From<Clock> for schema::ClockSer {
        fn from(value: Clock) -> Self {
            let schedule = value.schedule();
            schema::ClockSer::ClockV1 {
                base_duration: schedule.base_duration(),
                divisor: schedule.divisor(),
                phase: value.phase(),
            }
        }
    }

    impl From<schema::ClockSer> for Clock {
        fn from(value: schema::ClockSer) -> Self {
            match value {
                schema::ClockSer::ClockV1 {
                    base_duration,
                    divisor,
                    phase,
                } => Clock::new(TickSchedule::new(base_duration, divisor), phase),
            }
        }
    }

    impl Serialize for Universe {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            schema::UniverseSer::UniverseV1 {
                clock: self.clock().into(),
                scenes: self
                    .iter()
                    .map(|(name, scene)| schema::UniverseSceneSerV1 {
                        name: Cow::Borrowed(name),
                        scene: Cow::Borrowed(scene),
                    })
                    .collect(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Universe {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match schema::UniverseSer::deserialize(deserializer)? {
                schema::UniverseSer::UniverseV1 { clock, scenes } => {
                    let mut universe = Universe::with_clock(clock.into());
                    for schema::UniverseSceneSerV1 { name, scene } in scenes {
                        if universe.get(&name).is_some() {
                            return Err(serde::de::Error::custom(format_args!(
                                "duplicate scene name {name:?}"
                            )));
                        }
                        universe.insert(name.into_owned(), scene.into_owned());
                    }
                    Ok(universe)
                }
            }
        }
    }
}
