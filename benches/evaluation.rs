use criterion::{criterion_group, criterion_main, Criterion};
use mpeval::{mp, BigFloat};

const PRECISIONS: [usize; 2] = [256, 1024];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn bench_unary(c: &mut Criterion, name: &str, x: f64, f: fn(&BigFloat, usize) -> BigFloat) {
    let mut g = c.benchmark_group(name);
    let x = mp(x, 64);
    for prec in PRECISIONS {
        g.bench_function(format!("{prec} bits"), |b| {
            b.iter(|| f(std::hint::black_box(&x), std::hint::black_box(prec)))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Elementary
// ---------------------------------------------------------------------------

fn exp(c: &mut Criterion) {
    bench_unary(c, "exp", 12.375, mpeval::exp);
}

fn log(c: &mut Criterion) {
    bench_unary(c, "log", 1234.5678, mpeval::log);
}

fn sin(c: &mut Criterion) {
    bench_unary(c, "sin", 100.25, mpeval::sin);
}

fn atan(c: &mut Criterion) {
    bench_unary(c, "atan", 0.7, mpeval::atan);
}

// ---------------------------------------------------------------------------
// Special functions
// ---------------------------------------------------------------------------

fn gamma(c: &mut Criterion) {
    bench_unary(c, "gamma", 7.3, mpeval::gamma);
}

fn erf(c: &mut Criterion) {
    bench_unary(c, "erf", 1.7, mpeval::erf);
}

fn erfc_tail(c: &mut Criterion) {
    bench_unary(c, "erfc_tail", 9.5, mpeval::erfc);
}

fn bessel_j(c: &mut Criterion) {
    let mut g = c.benchmark_group("bessel_j");
    for (n, x) in [(0i64, 3.5), (5, 20.0), (2, 150.0)] {
        let xv = mp(x, 64);
        for prec in PRECISIONS {
            g.bench_function(format!("J{n}({x}) {prec} bits"), |b| {
                b.iter(|| mpeval::bessel_j(n, std::hint::black_box(&xv), std::hint::black_box(prec)))
            });
        }
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Roots and constants
// ---------------------------------------------------------------------------

fn nth_root(c: &mut Criterion) {
    let mut g = c.benchmark_group("nth_root");
    let x = mp(2, 64);
    for prec in PRECISIONS {
        g.bench_function(format!("7th root {prec} bits"), |b| {
            b.iter(|| mpeval::nth_root(7, std::hint::black_box(&x), std::hint::black_box(prec)))
        });
    }
    g.finish();
}

fn cached_pi(c: &mut Criterion) {
    let mut g = c.benchmark_group("pi");
    for prec in PRECISIONS {
        // first call fills the cache
        mpeval::consts::pi(prec);
        g.bench_function(format!("cached {prec} bits"), |b| {
            b.iter(|| mpeval::consts::pi(std::hint::black_box(prec)))
        });
    }
    g.finish();
}

criterion_group!(benches, exp, log, sin, atan, gamma, erf, erfc_tail, bessel_j, nth_root, cached_pi);

criterion_main!(benches);
