#![no_main]
extern crate orrery;

use orrery::physics::{Body, Contact};
use orrery::scene::PhysicsParameters;
use orrery::time::Tick;

use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

/// Bit-level representation, so that NaN compares equal to itself.
fn bits(vector: [f64; 3]) -> [u64; 3] {
    vector.map(f64::to_bits)
}

fuzz_target!(|input: (PhysicsParameters, Vec<Body>)| {
    let (parameters, mut bodies) = input;
    // Collision resolution is quadratic; large inputs only make the fuzzer slow.
    bodies.truncate(64);

    let engine = parameters.engine_for(Tick::from_seconds(1.0 / 60.0));
    let before = bodies.clone();

    let integrated = engine.integrate(&bodies);
    for (old, new) in before.iter().zip(&integrated) {
        if !old.is_movable() {
            assert_eq!(
                (bits(old.position.to_array()), bits(old.velocity.to_array())),
                (bits(new.position.to_array()), bits(new.velocity.to_array())),
                "integration changed an immovable body"
            );
        }
    }

    let mut contacts = 0;
    let result = engine.resolve_collisions_in_place(&mut bodies, |contact: Contact| {
        assert!(contact.first < contact.second);
        contacts += 1;
    });
    if let Ok(info) = result {
        assert_eq!(info.contacts, contacts);
    }

    for (old, new) in before.iter().zip(&bodies) {
        assert_eq!(
            bits(old.velocity.to_array()),
            bits(new.velocity.to_array()),
            "collision resolution changed a velocity"
        );
        if !old.is_movable() {
            assert_eq!(
                bits(old.position.to_array()),
                bits(new.position.to_array()),
                "collision resolution moved an immovable body"
            );
        }
    }
});
