//! Benchmark for the per-step slingshot math.

use bevy::prelude::*;
use bevy_slingshot::components::GlideControl;
use bevy_slingshot::systems::{glide, powers, slingshot};
use bevy_slingshot::types::GlideSettings;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_explosion_falloff(c: &mut Criterion) {
    let mut group = c.benchmark_group("Explosion Falloff");

    for body_count in [100, 1000, 10000].iter() {
        let positions: Vec<Vec3> = (0..*body_count)
            .map(|i| {
                let angle = i as f32 * 0.37;
                Vec3::new(angle.cos(), angle.sin(), 0.0) * (i % 30) as f32 * 0.1
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(body_count),
            body_count,
            |b, &_count| {
                b.iter(|| {
                    let dt = 1.0 / 64.0;
                    positions
                        .iter()
                        .filter_map(|position| {
                            powers::explosion_velocity_change(
                                Vec3::ZERO,
                                2.0,
                                500.0,
                                *position,
                                1.0,
                                dt,
                            )
                        })
                        .count()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_split_directions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Split Directions");

    for fragment_count in [3u32, 8, 32].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(fragment_count),
            fragment_count,
            |b, &count| {
                b.iter(|| {
                    powers::split_directions(
                        Vec3::new(12.0, 3.0, 0.0),
                        Quat::IDENTITY,
                        count,
                        count as usize,
                        30.0,
                    )
                });
            },
        );
    }

    group.finish();
}

fn benchmark_aiming(c: &mut Criterion) {
    let glide_control = GlideControl::new(GlideSettings::default());

    c.bench_function("Glide Step", |b| {
        b.iter(|| glide::glide_step(&glide_control, Vec3::new(10.0, 2.0, 0.0), 14.9, 0.4));
    });

    c.bench_function("Drag Projection", |b| {
        let ray = Ray3d::new(Vec3::new(-1.0, 2.0, 10.0), Dir3::NEG_Z);

        b.iter(|| {
            let target = slingshot::pointer_world_position(ray, Vec3::ZERO);
            slingshot::clamp_stretch(target, 3.0)
        });
    });
}

criterion_group!(
    benches,
    benchmark_explosion_falloff,
    benchmark_split_directions,
    benchmark_aiming
);
criterion_main!(benches);
