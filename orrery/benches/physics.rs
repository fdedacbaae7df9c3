#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use orrery::physics::{Body, Contact, PhysicsEngine};

/// A cube of `side`³ spheres of radius 0.6 placed 1.0 apart, so that every neighboring
/// pair overlaps.
fn packed_bodies(side: u32) -> Vec<Body> {
    let mut bodies = Vec::new();
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                bodies.push(Body::new_minimal(
                    [f64::from(x), f64::from(y), f64::from(z)],
                    0.6,
                ));
            }
        }
    }
    bodies
}

fn physics_bench(c: &mut Criterion) {
    let engine = PhysicsEngine::default();
    let mut group = c.benchmark_group("physics");

    for side in [2u32, 5, 10] {
        let count = side.pow(3);
        let description = format!("{count} bodies");
        group.throughput(Throughput::Elements(u64::from(count)));

        group.bench_function(BenchmarkId::new("integrate", &description), |b| {
            b.iter_batched_ref(
                || packed_bodies(side),
                |bodies| black_box(engine.integrate_in_place(bodies)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("resolve_collisions", &description), |b| {
            b.iter_batched_ref(
                || packed_bodies(side),
                |bodies| black_box(engine.resolve_collisions_in_place(bodies, |_: Contact| {})),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("step", &description), |b| {
            b.iter_batched_ref(
                || packed_bodies(side),
                |bodies| black_box(engine.step(bodies, |_: Contact| {})),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, physics_bench);
criterion_main!(benches);
