#[cfg(feature = "chebyshev")]
use mpeval::chebyshev::clenshaw;
use mpeval::elementary::{deg_norm, rad_norm_2pi, rad_norm_pi};
use mpeval::{
    bessel_j, consts, cos, erf, erfc, exp, gamma, log, mp, sin, BigFloat, MpFloat, RoundingMode,
};

const RM: RoundingMode = RoundingMode::ToEven;

/// Bits of agreement between `a` and `b`, relative to `b`.
fn agreement(a: &BigFloat, b: &BigFloat) -> i64 {
    let d = a.sub(b, 4096, RM);
    match d.bit_exponent() {
        None => i64::MAX,
        Some(de) => b.bit_exponent().unwrap_or(0) - de,
    }
}

fn assert_agree(a: &BigFloat, b: &BigFloat, bits: i64, what: &str) {
    let got = agreement(a, b);
    assert!(got >= bits, "{what}: {} vs {} agree to {got} bits, want {bits}", a.to_f64(), b.to_f64());
}

const SAMPLES: [f64; 9] = [-40.5, -3.0, -1.0, -0.001, 0.25, 1.0, 2.5, 17.75, 1e6];

// ── Pythagorean identity ─────────────────────────────────────────────

#[test]
fn sin_squared_plus_cos_squared() {
    for prec in [64usize, 256, 1024] {
        for &x in &SAMPLES {
            let x = mp(x, 64);
            let s = sin(&x, prec);
            let c = cos(&x, prec);
            let one = s.mul(&s, 2 * prec, RM).add(&c.mul(&c, 2 * prec, RM), 2 * prec, RM);
            assert_agree(&one, &mp(1, 64), prec as i64 - 3, "sin² + cos²");
        }
    }
}

// ── exp / log round trips ────────────────────────────────────────────

#[test]
fn exp_of_log_and_log_of_exp() {
    let prec = 256;
    for &x in &[1e-30, 0.5, 1.0, 3.75, 1e10, 1e300] {
        let x = mp(x, 64);
        let back = exp(&log(&x, prec + 64), prec);
        assert_agree(&back, &x, prec as i64 - 2, "exp(log x)");
    }
    for &x in &[-50.0, -1.0, 0.125, 2.0, 300.0] {
        let x = mp(x, 64);
        let back = log(&exp(&x, prec + 16), prec);
        assert_agree(&back, &x, prec as i64 - 4, "log(exp x)");
    }
}

// ── erf / erfc ───────────────────────────────────────────────────────

#[test]
fn erf_identities() {
    let prec = 192;
    let wide = 2 * prec;
    for &x in &[0.1, 0.5, 0.8, 1.5, 2.0, 3.3, 6.0] {
        let pos = mp(x, 64);
        let neg = mp(-x, 64);

        let sum = erf(&pos, prec).add(&erfc(&pos, prec), wide, RM);
        assert_agree(&sum, &mp(1, 64), prec as i64 - 2, "erf + erfc");

        assert!(erf(&neg, prec).same_as(&erf(&pos, prec).neg()), "erf odd at {x}");

        let reflected = mp(2, 64).sub(&erfc(&pos, wide), wide, RM);
        assert_agree(&erfc(&neg, prec), &reflected, prec as i64 - 1, "erfc(−x)");
    }
}

// ── Gamma ────────────────────────────────────────────────────────────

#[test]
fn gamma_factorials_and_recurrence() {
    let prec = 256;
    let mut fact = mp(1, 64);
    for n in 1u64..=30 {
        let g = gamma(&mp(n, 64), prec);
        assert!(g.same_as(&fact), "Γ({n}) = {}", g.to_f64());
        fact = fact.mul(&mp(n, 64), 1024, RM);
    }
    for &x in &[0.1, 1.5, 4.2, 33.3, -0.7, -5.5] {
        let x = mp(x, 64);
        let lhs = gamma(&x.add(&mp(1, 64), 128, RM), prec);
        let rhs = x.mul(&gamma(&x, prec), 2 * prec, RM);
        assert_agree(&lhs, &rhs, prec as i64 - 8, "Γ(x+1) = xΓ(x)");
    }
}

// ── Bessel ───────────────────────────────────────────────────────────

#[test]
fn bessel_negative_order() {
    for n in 0i64..=6 {
        for &x in &[0.5, 3.0, 12.0] {
            let x = mp(x, 64);
            let pos = bessel_j(n, &x, 128);
            let neg = bessel_j(-n, &x, 128);
            let expected = if n % 2 == 0 { pos } else { pos.neg() };
            assert!(neg.same_as(&expected), "J₋{n}");
        }
    }
}

// ── Angle normalization ──────────────────────────────────────────────

#[test]
fn angle_normalization() {
    assert_eq!(deg_norm(&mp(450, 64), 64).to_f64(), 90.0);
    assert_eq!(deg_norm(&mp(-90, 64), 64).to_f64(), 270.0);

    let prec = 256;
    let pi = consts::pi(prec);
    let five_pi = pi.mul(&mp(5, 64), prec + 8, RM);
    assert_agree(&rad_norm_2pi(&five_pi, prec), &pi, prec as i64 - 4, "radNorm02Pi(5π)");

    for &x in &[-1000.0, -7.0, 0.5, 6.0, 1234.5] {
        let x = mp(x, 64);
        let once = rad_norm_2pi(&x, prec);
        assert!(rad_norm_2pi(&once, prec).same_as(&once));
        let once = rad_norm_pi(&x, prec);
        assert!(rad_norm_pi(&once, prec).same_as(&once));
        let once = deg_norm(&x, prec);
        assert!(deg_norm(&once, prec).same_as(&once));
    }
}

// ── Chebyshev ────────────────────────────────────────────────────────

#[cfg(feature = "chebyshev")]
#[test]
fn chebyshev_degree_four() {
    let cs = [1.5, -0.5, 0.25, 2.0, -1.0];
    // T₀..T₄ at 0.5: 1, 0.5, −0.5, −1, −0.5
    let direct = 1.5 - 0.25 - 0.125 - 2.0 + 0.5;
    let coeffs: Vec<BigFloat> = cs.iter().map(|&c| mp(c, 64)).collect();
    let v = clenshaw(&mp(0.5, 64), &coeffs, coeffs.len(), 256);
    assert!((v.to_f64() - direct).abs() < 1e-15);
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn scenarios() {
    assert_eq!(exp(&mp(0, 64), 256).to_f64(), 1.0);

    let half_pi = consts::pi(512).ldexp(-1);
    let s = sin(&half_pi, 256);
    assert!(agreement(&s, &mp(1, 64)) >= 240);

    assert!((gamma(&mp(5, 64), 256).to_f64() / 24.0 - 1.0).abs() < 1e-7);
    assert!((erf(&mp(1, 64), 256).to_f64() - 0.8427007929497149).abs() < 1e-6);
    assert_eq!(bessel_j(0, &mp(0, 64), 256).to_f64(), 1.0);
}

// ── Precision monotonicity ───────────────────────────────────────────

#[test]
fn more_precision_is_never_worse() {
    let x = mp(2.75, 64);
    let reference_exp = exp(&x, 2048);
    let reference_gamma = gamma(&x, 2048);
    let reference_erf = erf(&x, 2048);
    let mut last = [0i64; 3];
    for prec in [32usize, 64, 128, 256, 512, 1024] {
        let now = [
            agreement(&exp(&x, prec), &reference_exp),
            agreement(&gamma(&x, prec), &reference_gamma),
            agreement(&erf(&x, prec), &reference_erf),
        ];
        for (i, (&n, &l)) in now.iter().zip(&last).enumerate() {
            assert!(n >= l, "function {i} lost accuracy at {prec} bits: {n} < {l}");
            assert!(n >= prec as i64 - 1, "function {i} at {prec} bits agrees to only {n}");
        }
        last = now;
    }
}
