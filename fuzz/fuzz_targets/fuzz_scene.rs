#![no_main]
extern crate orrery;

use orrery::physics::Body;
use orrery::scene::{PhysicsParameters, Scene};
use orrery::time::Tick;

use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|input: (PhysicsParameters, Vec<Body>, Vec<u8>, f64)| {
    let (parameters, bodies, removals, dt) = input;

    let mut scene = Scene::new(parameters);
    let ids: Vec<_> = bodies.into_iter().take(32).map(|body| scene.insert(body)).collect();
    for index in removals {
        if let Some(&id) = ids.get(usize::from(index)) {
            scene.remove(id);
        }
    }

    let remaining: Vec<_> = scene.iter().map(|(id, _)| id).collect();
    assert!(remaining.windows(2).all(|pair| pair[0] < pair[1]), "IDs out of order");
    assert!(remaining.iter().all(|&id| id < scene.next_id()));

    let _ = scene.step(Tick::from_seconds(dt));
    assert_eq!(scene.len(), remaining.len());
});
