use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Complex;
use ndarray::Array1;

use ringoccs::{Algorithm, DiffractedInput, ReconstructionConfig};

fn sample_input(n: usize) -> DiffractedInput<f64> {
    let dx = 0.25;
    let rho_km: Array1<f64> = (0..n).map(|i| 100_000.0 + i as f64 * dx).collect();
    let t_in: Array1<Complex<f64>> = (0..n).map(|_| Complex::new(1.0, 0.0)).collect();
    let f_km = Array1::from_elem(n, 1.0);
    let phi_rad = Array1::from_elem(n, 0.4);
    let kd = Array1::from_elem(n, 2000.0);
    let b_rad = Array1::from_elem(n, 1.3);
    let d_km = Array1::from_elem(n, 200_000.0);
    DiffractedInput::new(rho_km, t_in, f_km, phi_rad, kd, b_rad, d_km, None, None).unwrap()
}

fn sample_config(algorithm: Algorithm) -> ReconstructionConfig<f64> {
    ReconstructionConfig {
        res: 1.0,
        window: ringoccs::windows::WindowFamily::kaiser_bessel_2_0(),
        algorithm,
        use_norm: true,
        use_fwd: false,
        bfac: false,
        sigma: 1.0,
        perturb: [0.0; 5],
        ecc: 0.0,
        peri: 0.0,
        interp: 0,
        range: (100_050.0, 100_150.0),
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let n = 2001;
    let input = sample_input(n);

    c.bench_function("reconstruct: Newton", |b| {
        let cfg = sample_config(Algorithm::Newton);
        b.iter(|| ringoccs::reconstruct(&input, &cfg))
    });

    c.bench_function("reconstruct: Legendre order 4", |b| {
        let cfg = sample_config(Algorithm::Legendre { order: 4 });
        b.iter(|| ringoccs::reconstruct(&input, &cfg))
    });

    c.bench_function("reconstruct: Fresnel", |b| {
        let cfg = sample_config(Algorithm::Fresnel);
        b.iter(|| ringoccs::reconstruct(&input, &cfg))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
