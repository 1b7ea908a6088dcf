use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dem2bvh::bvh::write_bvh;
use dem2bvh::resample::resample;
use dem2bvh::types::{Pose, Track};

/// Ten minutes of 100fps camera data, spinning slowly so yaw wraps many times.
fn long_track() -> Track {
    (0..60_000)
        .map(|i| {
            let t = i as f64 / 100.0;
            Pose::from_channels([t.sin() * 500.0, 64.0, t * 3.0, 0.0, (t * 7.0).cos() * 30.0, (t * 45.0) % 360.0])
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let track = long_track();

    let mut group = c.benchmark_group("sample-size-example");
    group.sample_size(10);
    group.bench_function("resample 100 -> 30", |b| {
        b.iter(|| black_box(resample(&track, 100.0, 30.0).unwrap()))
    });
    group.bench_function("write bvh", |b| b.iter(|| black_box(write_bvh(&track, 100.0))));
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
