//! Evaluate a small Chebyshev ephemeris segment at a few instants.
//!
//! Run with `RUST_LOG=mpeval=debug` to see strategy selection and constant
//! cache fills.

use mpeval::chebyshev::ChebyshevSegment;
use mpeval::{consts, cos, mp, sin, BigFloat, MpFloat, RoundingMode};
use tracing_subscriber::EnvFilter;

const PREC: usize = 192;
const TERMS: usize = 12;
const RM: RoundingMode = RoundingMode::ToEven;

/// Chebyshev coefficients of `f` on [−1, 1] from its values at the
/// Chebyshev nodes.
fn fit(f: impl Fn(&BigFloat) -> BigFloat) -> Vec<BigFloat> {
    let p = PREC + 32;
    let pi = consts::pi(p);
    let n = BigFloat::from_word(TERMS as u64, 64);
    let nodes: Vec<(BigFloat, BigFloat)> = (0..TERMS)
        .map(|k| {
            // θₖ = π(k + ½)/n
            let theta = pi.mul(&mp(k as f64 + 0.5, 64), p, RM).div(&n, p, RM);
            let t = cos(&theta, p);
            (theta, f(&t))
        })
        .collect();
    (0..TERMS)
        .map(|j| {
            let mut acc = BigFloat::new(p);
            for (theta, v) in &nodes {
                let w = cos(&theta.mul(&mp(j as u64, 64), p, RM), p);
                acc = acc.add(&v.mul(&w, p, RM), p, RM);
            }
            acc.mul(&mp(2, 64), p, RM).div(&n, p, RM)
        })
        .collect()
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    // A unit circle traversed once over the window, with a slow climb in z.
    let start = mp(2_451_545, 64);
    let end = mp(2_451_577, 64);
    let pi = consts::pi(PREC + 32);
    let angle = |t: &BigFloat| t.add(&mp(1, 64), PREC + 32, RM).mul(&pi, PREC + 32, RM);

    let mut coeffs = fit(|t| cos(&angle(t), PREC + 32));
    coeffs.extend(fit(|t| sin(&angle(t), PREC + 32)));
    coeffs.extend(fit(|t| t.mul(&mp(0.01, 64), PREC + 32, RM)));

    let segment = match ChebyshevSegment::new(start, end, coeffs, TERMS, TERMS) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bad segment: {e}");
            return;
        }
    };

    for offset in [0.0, 4.0, 8.0, 16.0, 24.0, 32.0, 40.0] {
        let time = mp(2_451_545.0 + offset, 64);
        match segment.evaluate(&time, PREC) {
            Ok(state) => {
                let r = |v: &[BigFloat; 3]| v.iter().map(|c| format!("{:+.12}", c.to_f64())).collect::<Vec<_>>();
                println!("t = +{offset:>4}  pos {:?}  vel {:?}", r(&state.position), r(&state.velocity));
            }
            Err(e) => println!("t = +{offset:>4}  {e}"),
        }
    }
}
