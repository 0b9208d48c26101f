use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use constmul::blocks::{KernelChoice, MultiplyConstBuilder, MultiplyConstV};
use constmul::{Canonical, Complex, Float};

const N: usize = 8192;

fn bench_float(c: &mut Criterion) {
    let input: Vec<Float> = (0..N).map(|i| i as Float).collect();
    let mut out = vec![0.0; N];
    let fast = MultiplyConstV::scalar(0.5 as Float);
    let slow = MultiplyConstBuilder::from_values(&[0.5 as Float])
        .kernel(KernelChoice::Generic)
        .build();
    c.bench_function("f32 kernel", |b| {
        b.iter(|| fast.multiply(black_box(N), &input, &mut out))
    });
    c.bench_function("f32 generic", |b| {
        b.iter(|| slow.multiply(black_box(N), &input, &mut out))
    });
}

fn bench_complex(c: &mut Criterion) {
    let input: Vec<Complex> = (0..N).map(|i| Complex::new(i as Float, 1.0)).collect();
    let mut out = vec![Complex::default(); N];
    let k = Complex::new(0.5, -0.5);
    let fast = MultiplyConstV::scalar(k);
    let slow = MultiplyConstBuilder::from_values(&[k])
        .kernel(KernelChoice::Generic)
        .build();
    c.bench_function("fc32 kernel", |b| {
        b.iter(|| fast.multiply(black_box(N), &input, &mut out))
    });
    c.bench_function("fc32 generic", |b| {
        b.iter(|| slow.multiply(black_box(N), &input, &mut out))
    });
}

fn bench_lanes(c: &mut Criterion) {
    let input: Vec<i16> = (0..N).map(|i| (i % 100) as i16).collect();
    let mut out = vec![0; N];
    let mul = MultiplyConstV::<i16>::from_canonical(vec![Canonical::new(3.0, 0.0); 4]);
    c.bench_function("s16 4 lanes", |b| {
        b.iter(|| mul.multiply(black_box(N / 4), &input, &mut out))
    });
}

criterion_group!(benches, bench_float, bench_complex, bench_lanes);
criterion_main!(benches);
