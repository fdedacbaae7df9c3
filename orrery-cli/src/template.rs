use orrery::euclid::vec3;
use orrery::math::notnan;
use orrery::physics::Body;
use orrery::scene::{PhysicsParameters, Scene};
use orrery::universe::Universe;

/// Selection of universes which can be generated instead of loading a file.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum UniverseTemplate {
    /// A single scene with no bodies.
    Empty,
    /// Two overlapping spheres which push each other apart.
    CollisionPair,
    /// A block of overlapping spheres on a static floor, which slowly settles.
    Pile,
    /// Spheres falling onto a static floor, in two scenes with different gravity.
    Rain,
}

impl UniverseTemplate {
    /// Create a new universe using this template.
    ///
    /// `parameters` are used for every scene, except where the template's whole point is
    /// to vary them.
    pub fn build(self, parameters: PhysicsParameters) -> Universe {
        let mut universe = Universe::new();
        match self {
            UniverseTemplate::Empty => {
                universe.insert("main", Scene::new(parameters));
            }
            UniverseTemplate::CollisionPair => {
                let mut scene = Scene::new(parameters);
                scene.insert_named("left", Body::new_minimal([0.0, 0.0, 0.0], 1.0));
                scene.insert_named("right", Body::new_minimal([1.5, 0.0, 0.0], 1.0));
                universe.insert("main", scene);
            }
            UniverseTemplate::Pile => {
                let mut scene = Scene::new(parameters);
                insert_floor(&mut scene);
                for y in 0..4u8 {
                    for x in 0..3u8 {
                        for z in 0..3u8 {
                            scene.insert(Body::new_minimal(
                                [
                                    f64::from(x) * 0.9,
                                    0.5 + f64::from(y) * 0.9,
                                    f64::from(z) * 0.9,
                                ],
                                0.5,
                            ));
                        }
                    }
                }
                universe.insert("main", scene);
            }
            UniverseTemplate::Rain => {
                let mut moon_parameters = parameters;
                moon_parameters.gravity = parameters.gravity.map(|g| g / notnan!(6.0));
                for (name, parameters) in [("earth", parameters), ("moon", moon_parameters)] {
                    let mut scene = Scene::new(parameters);
                    insert_floor(&mut scene);
                    for i in 0..20u8 {
                        let i = f64::from(i);
                        scene.insert(
                            Body::new_minimal([(i * 0.7) % 3.0, 2.0 + i * 1.5, 0.0], 0.25)
                                .with_velocity(vec3(0.0, -1.0, 0.0)),
                        );
                    }
                    universe.insert(name, scene);
                }
            }
        }
        universe
    }
}

/// A static sphere so large that its top is nearly flat, touching the plane y = 0.
fn insert_floor(scene: &mut Scene) {
    scene.insert_named("floor", Body::new_static([0.0, -1000.0, 0.0], 1000.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr as _;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator as _;

    #[test]
    fn names_round_trip() {
        for template in UniverseTemplate::iter() {
            let name: &'static str = template.into();
            assert_eq!(UniverseTemplate::from_str(name).unwrap(), template);
        }
        assert_eq!(
            UniverseTemplate::CollisionPair.to_string(),
            "collision-pair"
        );
    }

    #[test]
    fn every_template_steps() {
        for template in UniverseTemplate::iter() {
            let mut universe = template.build(PhysicsParameters::DEFAULT);
            assert!(!universe.is_empty(), "{template}");
            for _ in 0..10 {
                universe.step(false).unwrap();
            }
            for (name, scene) in universe.iter() {
                assert!(
                    scene.bodies().iter().all(Body::is_finite),
                    "{template} {name}"
                );
            }
        }
    }

    #[test]
    fn rain_moon_has_weaker_gravity() {
        let universe = UniverseTemplate::Rain.build(PhysicsParameters::DEFAULT);
        let earth = universe.get("earth").unwrap().parameters().gravity.y;
        let moon = universe.get("moon").unwrap().parameters().gravity.y;
        assert_eq!(moon.into_inner(), earth.into_inner() / 6.0);
    }

    #[test]
    fn collision_pair_separates() {
        let mut universe =
            UniverseTemplate::CollisionPair.build(PhysicsParameters::ZERO_GRAVITY);
        universe.step(false).unwrap();
        let scene = universe.get("main").unwrap();
        let left = scene.get(scene.find_by_name("left").unwrap()).unwrap();
        let right = scene.get(scene.find_by_name("right").unwrap()).unwrap();
        assert_eq!(left.position.x, -0.25);
        assert_eq!(right.position.x, 1.75);
    }
}
