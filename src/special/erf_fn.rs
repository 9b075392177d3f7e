//! Error function and complementary error function.
//!
//! Small arguments use the Taylor series of erf. Moderate arguments use the
//! Kummer series, whose positive terms make erfc = 1 − erf lose about
//! x²·log₂e bits; those are added as guard bits. Large arguments use the
//! Laplace continued fraction for erfc, or its asymptotic series once the
//! series can reach the working precision before diverging.

use astro_float::{BigFloat, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{magnitude_bits, settle, sum_asymptotic, sum_series, ConvergencePolicy, EvalError};
use crate::elementary::exp_kernel;
use crate::traits::{MpFloat, RM};

/// Below this |x| the Taylor series of erf is used.
const TAYLOR_LIMIT: f64 = 0.8;

/// Error function erf(x) = (2/√π) ∫₀ˣ e^(−t²) dt.
///
/// # Example
///
/// ```
/// use mpeval::{special::erf, mp, MpFloat};
///
/// assert!(erf(&mp(0, 64), 128).is_zero());
/// assert!((erf(&mp(1, 64), 128).to_f64() - 0.8427007929497149).abs() < 1e-15);
/// assert!((erf(&mp(-0.5, 64), 128).to_f64() + 0.5204998778130465).abs() < 1e-15);
/// ```
pub fn erf(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("erf", erf_kernel(x, &policy)))
}

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// Computed directly for large x, so the relative accuracy holds where
/// erf(x) is indistinguishable from 1.
///
/// ```
/// use mpeval::{special::erfc, mp, MpFloat};
///
/// let v = erfc(&mp(10, 64), 128).to_f64();
/// assert!((v / 2.088487583762545e-45 - 1.0).abs() < 1e-14);
/// assert_eq!(erfc(&mp(0, 64), 128).to_f64(), 1.0);
/// ```
pub fn erfc(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("erfc", erfc_kernel(x, &policy)))
}

pub(crate) fn erf_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() {
        return Ok(NAN);
    }
    let one = BigFloat::from_word(1, 64);
    if x.is_inf() {
        return Ok(if x.is_negative() { one.neg() } else { one });
    }
    if x.is_zero() {
        return Ok(x.clone());
    }

    let a = x.abs();
    let p = policy.working();
    if a.below(&BigFloat::from_f64(TAYLOR_LIMIT, 64)) {
        return erf_taylor(x, policy);
    }

    let x2 = a.mul(&a, p + 2 * magnitude_bits(&a) + 8, RM);
    let v = if x2.to_f64() * core::f64::consts::LOG2_E > (p + 2) as f64 {
        // erfc(|x|) is below half an ulp of 1 at working precision
        one.sub(&one.ldexp(-(p as i64 + 4)), p + 8, RM)
    } else {
        one.sub(&erfc_positive(&a, policy)?, p, RM)
    };
    Ok(if x.is_negative() { v.neg() } else { v })
}

pub(crate) fn erfc_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() {
        return Ok(NAN);
    }
    if x.is_inf_pos() {
        return Ok(BigFloat::new(64));
    }
    if x.is_inf_neg() {
        return Ok(BigFloat::from_word(2, 64));
    }
    let one = BigFloat::from_word(1, 64);
    if x.is_zero() {
        return Ok(one);
    }

    let p = policy.working();
    if x.is_negative() {
        // erfc(−a) = 2 − erfc(a), in (1, 2)
        let a = x.abs();
        return Ok(BigFloat::from_word(2, 64).sub(&erfc_kernel(&a, policy)?, p, RM));
    }
    if x.below(&BigFloat::from_f64(TAYLOR_LIMIT, 64)) {
        return Ok(one.sub(&erf_taylor(x, policy)?, p, RM));
    }
    erfc_positive(x, policy)
}

/// erf(x) = 2/√π · Σ (−1)ⁿ x^(2n+1) / (n!·(2n+1)), for |x| < 0.8.
fn erf_taylor(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let inner = policy.inflated(4);
    let p = inner.working();
    let neg_x2 = x.mul(x, p, RM).neg();
    let sum = sum_series(&inner, x.clone(), |n, t| {
        let n = n as u64;
        // tₙ = tₙ₋₁ · (−x²)(2n − 1) / (n(2n + 1))
        t.mul(&neg_x2, p, RM)
            .mul(&BigFloat::from_u64(2 * n - 1, 64), p, RM)
            .div(&BigFloat::from_u64(n * (2 * n + 1), 64), p, RM)
    })?;
    Ok(sum.mul(&two_over_sqrt_pi(p), p, RM))
}

fn two_over_sqrt_pi(p: usize) -> BigFloat {
    let sqrt_pi = consts::at(Constant::Pi, p).sqrt(p, RM);
    BigFloat::from_word(2, 64).div(&sqrt_pi, p, RM)
}

/// erfc(x) for x ≥ 0.8.
fn erfc_positive(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let xp = p + 2 * magnitude_bits(x) + 8;
    let x2 = x.mul(x, xp, RM);
    let x2_nats = x2.to_f64();
    let ln2 = core::f64::consts::LN_2;
    let kummer_limit = (0.5 * (p as f64 * ln2).sqrt()).max(2.0);

    if x.to_f64() < kummer_limit {
        tracing::trace!(x = x.to_f64(), "erfc: Kummer series");
        // 1 − erf(x) cancels e^(−x²) worth of leading bits
        let lost = (x2_nats * core::f64::consts::LOG2_E).ceil() as usize + 4;
        let inner = policy.inflated(lost);
        let q = inner.working();
        let erf = kummer(x, &x2, &inner)?;
        return Ok(BigFloat::from_word(1, 64).sub(&erf, q, RM));
    }

    let inner = policy.inflated(8);
    let q = inner.working();
    let gauss = exp_kernel(&x2.neg(), &inner)?;
    let sqrt_pi = consts::at(Constant::Pi, q).sqrt(q, RM);

    if x2_nats >= p as f64 * ln2 + 4.0 {
        tracing::trace!(x = x.to_f64(), "erfc: asymptotic series");
        match asymptotic(&x2, &inner) {
            Ok(sum) => {
                let prefactor = gauss.div(&x.mul(&sqrt_pi, q, RM), q, RM);
                return Ok(prefactor.mul(&sum, q, RM));
            }
            Err(err) => tracing::trace!(%err, "erfc: asymptotic series failed, using continued fraction"),
        }
    }

    tracing::trace!(x = x.to_f64(), "erfc: continued fraction");
    let cf = laplace_fraction(x, &inner)?;
    Ok(gauss.div(&sqrt_pi, q, RM).div(&cf, q, RM))
}

/// erf(x) = 2/√π · e^(−x²) · Σ 2ⁿ x^(2n+1) / (1·3⋯(2n+1)).
fn kummer(x: &BigFloat, x2: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let two_x2 = x2.ldexp(1);
    let sum = sum_series(policy, x.clone(), |n, t| {
        t.mul(&two_x2, p, RM).div(&BigFloat::from_u64(2 * n as u64 + 1, 64), p, RM)
    })?;
    let gauss = exp_kernel(&x2.neg(), policy)?;
    Ok(sum.mul(&gauss, p, RM).mul(&two_over_sqrt_pi(p), p, RM))
}

/// Σ (−1)ⁿ (2n − 1)!! / (2x²)ⁿ, stopped at the first negligible term.
fn asymptotic(x2: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let two_x2 = x2.ldexp(1);
    sum_asymptotic(policy, BigFloat::from_word(1, p), |n, t| {
        t.mul(&BigFloat::from_u64(2 * n as u64 - 1, 64), p, RM)
            .div(&two_x2, p, RM)
            .neg()
    })
}

/// x + (1/2)/(x + 1/(x + (3/2)/(x + ⋯))) by the modified Lentz method, so
/// that erfc(x) = e^(−x²) / (√π · value).
fn laplace_fraction(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let one = BigFloat::from_word(1, 64);
    let mut f = x.clone();
    let mut c = x.clone();
    let mut d = BigFloat::new(p);
    for n in 1..=policy.max_iter {
        let a = BigFloat::from_u64(n as u64, 64).ldexp(-1);
        d = one.div(&x.add(&a.mul(&d, p, RM), p, RM), p, RM);
        c = x.add(&a.div(&c, p, RM), p, RM);
        let delta = c.mul(&d, p, RM);
        if !delta.is_finite() {
            return Err(EvalError::NotFinite);
        }
        f = f.mul(&delta, p, RM);
        if policy.negligible(&delta.sub(&one, p, RM), &one) {
            return Ok(f);
        }
    }
    Err(EvalError::ConvergenceFailure {
        iterations: policy.max_iter,
    })
}
