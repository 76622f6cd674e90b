//! Benchmarks for primitive sampling and the fractal octave path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use noisegraph_engine::{
    AlgorithmKind, Dimension, Fractal, FractalMode, NoiseField, Perlin, SamplerConfig, Simplex,
    Value, Worley, build_sampler,
};

fn bench_primitives(c: &mut Criterion) {
    let perlin = Perlin::new(42);
    let simplex = Simplex::new(42);
    let value = Value::new(42);
    let worley = Worley::new(42);

    c.bench_function("perlin2", |b| {
        b.iter(|| perlin.sample(black_box([1.234, 5.678])))
    });
    c.bench_function("perlin3", |b| {
        b.iter(|| perlin.sample(black_box([1.234, 5.678, 9.012])))
    });
    c.bench_function("perlin4", |b| {
        b.iter(|| perlin.sample(black_box([1.234, 5.678, 9.012, 3.456])))
    });

    c.bench_function("simplex2", |b| {
        b.iter(|| simplex.sample(black_box([1.234, 5.678])))
    });
    c.bench_function("simplex3", |b| {
        b.iter(|| simplex.sample(black_box([1.234, 5.678, 9.012])))
    });
    c.bench_function("simplex4", |b| {
        b.iter(|| simplex.sample(black_box([1.234, 5.678, 9.012, 3.456])))
    });

    c.bench_function("value2", |b| {
        b.iter(|| value.sample(black_box([1.234, 5.678])))
    });
    c.bench_function("worley2", |b| {
        b.iter(|| worley.sample(black_box([1.234, 5.678])))
    });
    c.bench_function("worley3", |b| {
        b.iter(|| worley.sample(black_box([1.234, 5.678, 9.012])))
    });
}

fn bench_fractal(c: &mut Criterion) {
    let fbm4 = Fractal::new(42, 4, 1.0, 2.0, 0.5, FractalMode::Fbm, |s, f| {
        Ok(Perlin::new(s).with_frequency(f))
    })
    .unwrap();
    let fbm8 = Fractal::new(42, 8, 1.0, 2.0, 0.5, FractalMode::Fbm, |s, f| {
        Ok(Perlin::new(s).with_frequency(f))
    })
    .unwrap();
    let ridged4 = Fractal::new(42, 4, 1.0, 2.0, 0.5, FractalMode::Ridged, |s, f| {
        Ok(Perlin::new(s).with_frequency(f))
    })
    .unwrap();

    c.bench_function("fbm_perlin2_4oct", |b| {
        b.iter(|| fbm4.sample(black_box([1.234, 5.678])))
    });
    c.bench_function("fbm_perlin2_8oct", |b| {
        b.iter(|| fbm8.sample(black_box([1.234, 5.678])))
    });
    c.bench_function("fbm_perlin3_4oct", |b| {
        b.iter(|| fbm4.sample(black_box([1.234, 5.678, 9.012])))
    });
    c.bench_function("ridged_perlin2_4oct", |b| {
        b.iter(|| ridged4.sample(black_box([1.234, 5.678])))
    });
}

fn bench_graph(c: &mut Criterion) {
    let perlin = build_sampler(
        AlgorithmKind::Fractal,
        Dimension::D2,
        &SamplerConfig::new().with_seed(42).with_octaves(4),
    )
    .unwrap();
    let turbulent = build_sampler(
        AlgorithmKind::Turbulence,
        Dimension::D2,
        &SamplerConfig::new().with_seed(7).with_input(perlin.clone()),
    )
    .unwrap();

    c.bench_function("sampler_fbm_4oct", |b| {
        b.iter(|| perlin.sample(black_box(&[1.234, 5.678])))
    });
    c.bench_function("sampler_turbulent_fbm", |b| {
        b.iter(|| turbulent.sample(black_box(&[1.234, 5.678])))
    });
}

criterion_group!(benches, bench_primitives, bench_fractal, bench_graph);
criterion_main!(benches);
