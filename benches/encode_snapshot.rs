use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gadget_ic::{
    encoder::encode_body, validation::validate_consistency, write_snapshot, Body, ExtendedField,
    Header,
};

/// Uniform random point in a box of side 100 centred on the origin.
#[inline]
fn rand_vec(rng: &mut StdRng) -> Vector3<f64> {
    Vector3::new(
        rng.random::<f64>() - 0.5,
        rng.random::<f64>() - 0.5,
        rng.random::<f64>() - 0.5,
    ) * 100.0
}

/// Gas + halo body with randomized kinematics and sequential IDs.
fn make_body(npart: [u32; 6], fields: &[ExtendedField]) -> Body {
    let mut rng = StdRng::seed_from_u64(42);
    let mut body = Body::with_fields(npart, fields).expect("non-empty body");
    for (i, (pos, vel)) in body.pos.iter_mut().zip(body.vel.iter_mut()).enumerate() {
        *pos = rand_vec(&mut rng);
        *vel = rand_vec(&mut rng);
        body.id[i] = i as u64;
    }
    body.mass.fill(1.0);
    body.u.fill(1.0);
    body
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_snapshot");

    let npart = [100_000, 100_000, 0, 0, 0, 0];
    let header = Header::new(npart);
    let body = make_body(npart, &[]);
    let sph_body = make_body(npart, &[ExtendedField::Hsml]);

    // 1) Body blocks only
    group.bench_function("encode_body_200k", |b| {
        b.iter_batched(
            || Vec::with_capacity(8 << 20),
            |mut out| {
                encode_body(black_box(&body), &mut out).unwrap();
                out
            },
            BatchSize::LargeInput,
        )
    });

    // 2) Cross checks, dominated by the ID uniqueness pass
    group.bench_function("validate_consistency_200k", |b| {
        b.iter(|| validate_consistency(black_box(&header), black_box(&body)).unwrap())
    });

    // 3) Full pipeline with SPH blocks
    group.bench_function("write_snapshot_sph_200k", |b| {
        b.iter_batched(
            || Vec::with_capacity(16 << 20),
            |mut out| {
                write_snapshot(&header, black_box(&sph_body), &mut out).unwrap();
                out
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(encode_benches, bench_encode);
criterion_main!(encode_benches);
