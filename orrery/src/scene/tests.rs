use alloc::vec::Vec;

use euclid::{point3, vec3};
use pretty_assertions::assert_eq;

use crate::math::PositiveSign;
use crate::physics::{Body, DegeneratePolicy};
use crate::scene::{BodyId, PhysicsParameters, Scene, SceneStepInfo};
use crate::time::{Clock, Tick, TickSchedule};
use crate::util::{Refmt as _, StatusText};

#[test]
fn ids_are_sequential_and_not_reused() {
    let mut scene = Scene::default();
    let a = scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
    let b = scene.insert_named("b", Body::new_minimal([5.0, 0.0, 0.0], 1.0));
    assert_eq!((a, b), (BodyId(0), BodyId(1)));

    assert!(scene.remove(b).is_some());
    assert_eq!(scene.remove(b), None);
    let c = scene.insert(Body::new_minimal([9.0, 0.0, 0.0], 1.0));
    assert_eq!(c, BodyId(2));
    assert_eq!(scene.len(), 2);
}

#[test]
fn remove_preserves_order() {
    let mut scene = Scene::default();
    let ids: Vec<BodyId> = (0..5)
        .map(|i| scene.insert(Body::new_minimal([f64::from(i), 0.0, 0.0], 0.1)))
        .collect();
    scene.remove(ids[1]);
    scene.remove(ids[3]);
    assert_eq!(
        scene.iter().map(|(id, _)| id).collect::<Vec<_>>(),
        vec![ids[0], ids[2], ids[4]]
    );
    assert_eq!(
        scene.bodies().iter().map(|b| b.position.x).collect::<Vec<_>>(),
        vec![0.0, 2.0, 4.0]
    );
    assert_eq!(scene.get(ids[4]).unwrap().position.x, 4.0);
}

#[test]
fn names() {
    let mut scene = Scene::default();
    let anon = scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
    let named = scene.insert_named("ball", Body::new_minimal([5.0, 0.0, 0.0], 1.0));
    assert_eq!(scene.name_of(anon), None);
    assert_eq!(scene.name_of(named), Some("ball"));
    assert_eq!(scene.find_by_name("ball"), Some(named));
    assert_eq!(scene.find_by_name("nothing"), None);
}

#[test]
fn get_mut_modifies_body() {
    let mut scene = Scene::default();
    let id = scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
    scene.get_mut(id).unwrap().velocity = vec3(1.0, 2.0, 3.0);
    assert_eq!(scene.get(id).unwrap().velocity, vec3(1.0, 2.0, 3.0));
}

#[test]
fn step_applies_gravity_with_tick_length() {
    let mut scene = Scene::default();
    let id = scene.insert(Body::new_minimal([0.0, 10.0, 0.0], 1.0));
    let mut clock = Clock::new(TickSchedule::per_second(60), 0);
    for _ in 0..60 {
        scene.step(clock.advance(false)).unwrap();
    }
    let velocity = scene.get(id).unwrap().velocity;
    assert!((velocity.y - -9.81).abs() < 1e-9, "{velocity:?}");
}

#[test]
fn step_resolves_collisions() {
    let mut scene = Scene::new(PhysicsParameters::ZERO_GRAVITY);
    let a = scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
    let b = scene.insert(Body::new_minimal([1.5, 0.0, 0.0], 1.0));

    let info = scene.step(Tick::from_seconds(1.0)).unwrap();

    assert_eq!(scene.get(a).unwrap().position, point3(-0.25, 0.0, 0.0));
    assert_eq!(scene.get(b).unwrap().position, point3(1.75, 0.0, 0.0));
    assert_eq!(info.stepped, 1);
    assert_eq!(info.physics.collisions.contacts, 1);
}

#[test]
fn paused_tick_does_nothing() {
    let mut scene = Scene::default();
    scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
    scene.insert(Body::new_minimal([0.5, 0.0, 0.0], 1.0));
    let before = scene.clone();

    let info = scene.step(Tick::from_seconds(1.0).pause()).unwrap();

    assert_eq!(scene, before);
    assert_eq!(
        info,
        SceneStepInfo {
            skipped: 1,
            ..SceneStepInfo::default()
        }
    );
}

#[test]
fn disabled_scene_does_nothing() {
    let mut scene = Scene::new(PhysicsParameters {
        enabled: false,
        ..PhysicsParameters::default()
    });
    scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
    let before = scene.clone();
    let info = scene.step(Tick::from_seconds(1.0)).unwrap();
    assert_eq!(scene, before);
    assert_eq!(info.skipped, 1);
}

#[test]
fn zero_time_scale_still_resolves_overlaps() {
    let mut scene = Scene::new(PhysicsParameters {
        time_scale: PositiveSign::<f64>::ZERO,
        ..PhysicsParameters::default()
    });
    let a = scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0).with_velocity(vec3(5.0, 0.0, 0.0)));
    scene.insert(Body::new_minimal([0.0, 1.0, 0.0], 1.0));

    scene.step(Tick::from_seconds(1.0)).unwrap();

    let body = scene.get(a).unwrap();
    assert_eq!(body.position, point3(0.0, -0.5, 0.0));
    assert_eq!(body.velocity, vec3(5.0, 0.0, 0.0));
}

#[test]
fn degenerate_failure_is_reported() {
    let mut scene = Scene::new(PhysicsParameters {
        degenerate_contacts: DegeneratePolicy::Fail,
        ..PhysicsParameters::ZERO_GRAVITY
    });
    scene.insert(Body::new_minimal([1.0, 1.0, 1.0], 1.0));
    scene.insert(Body::new_minimal([1.0, 1.0, 1.0], 1.0));

    let error = scene.step(Tick::from_seconds(1.0)).unwrap_err();
    assert_eq!((error.first, error.second), (0, 1));
}

#[test]
fn status_text() {
    let mut scene = Scene::default();
    scene.insert_named("ball", Body::new_minimal([0.0, 1.0, 0.0], 1.0));
    scene.insert(Body::new_static([0.0, 0.0, 0.0], 1.0));
    assert_eq!(
        format!("{}", scene.refmt(&StatusText)),
        "#0 \"ball\": Position: (+0.000, +1.000, +0.000)  Velocity: (+0.000, +0.000, +0.000)\n\
        #1: Position: (+0.000, +0.000, +0.000)  Velocity: (+0.000, +0.000, +0.000)  Static\n"
    );
}
