#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use orrery::physics::Body;
use orrery::scene::Scene;
use orrery::universe::Universe;

fn raining_universe(scenes: usize, bodies_per_scene: u32) -> Universe {
    let mut universe = Universe::new();
    for scene_index in 0..scenes {
        let mut scene = Scene::default();
        scene.insert_named("floor", Body::new_static([0.0, -100.0, 0.0], 100.0));
        for i in 0..bodies_per_scene {
            scene.insert(Body::new_minimal(
                [f64::from(i % 7) * 0.9, 2.0 + f64::from(i) * 0.5, 0.0],
                0.5,
            ));
        }
        universe.insert(format!("scene {scene_index}"), scene);
    }
    universe
}

fn universe_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("universe");

    group.bench_function("step 10 scenes of 50 bodies", |b| {
        b.iter_batched_ref(
            || raining_universe(10, 50),
            |universe| black_box(universe.step(false)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("run 60 ticks", |b| {
        b.iter_batched_ref(
            || raining_universe(1, 50),
            |universe| {
                for _ in 0..60 {
                    black_box(universe.step(false).ok());
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, universe_bench);
criterion_main!(benches);
