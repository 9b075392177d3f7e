//! Exponential via ln 2 reduction, halving and squaring.

use astro_float::{BigFloat, INF_POS, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{magnitude_bits, settle, sum_series, ConvergencePolicy, EvalError};
use crate::traits::{MpFloat, RM};

/// Arguments with more integer bits than this over- or underflow the exponent
/// range of the result.
const EXP_RANGE_BITS: usize = 33;

/// Exponential eˣ.
///
/// Returns 1 at zero, +∞ at +∞ and 0 at −∞.
///
/// # Example
///
/// ```
/// use mpeval::{elementary::exp, mp, MpFloat};
///
/// let one = exp(&mp(0, 64), 256);
/// assert_eq!(one.to_f64(), 1.0);
///
/// let e = exp(&mp(1, 64), 256);
/// assert!((e.to_f64() - core::f64::consts::E).abs() < 1e-15);
/// ```
pub fn exp(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("exp", exp_kernel(x, &policy)))
}

pub(crate) fn exp_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    if x.is_nan() {
        return Ok(NAN);
    }
    if x.is_inf_pos() {
        return Ok(INF_POS);
    }
    if x.is_inf_neg() {
        return Ok(BigFloat::new(p));
    }
    if x.is_zero() {
        return Ok(BigFloat::from_word(1, p));
    }

    let mag = magnitude_bits(x);
    if mag > EXP_RANGE_BITS {
        return Ok(if x.is_negative() { BigFloat::new(p) } else { INF_POS });
    }

    // x = k·ln2 + r, |r| ≤ ln2/2; k needs `mag` extra bits of ln2 to cancel.
    let reduce = policy.inflated(mag);
    let q = reduce.working();
    let ln2 = consts::at(Constant::Ln2, q);
    let k = x.div(&ln2, q, RM).round_nearest(q);
    let r = x.sub(&k.mul(&ln2, q, RM), q, RM);
    let k = k.to_i64_exact().ok_or(EvalError::NotFinite)?;

    // Each squaring doubles the relative error, so the series carries s more bits.
    let s = policy.strategy.exp_halvings(&r, q);
    let series = policy.inflated(mag + s);
    let w = series.working();
    let u = r.ldexp(-(s as i64));

    let mut y = sum_series(&series, BigFloat::from_word(1, w), |n, t| {
        t.mul(&u, w, RM).div(&BigFloat::from_u64(n as u64, 64), w, RM)
    })?;
    for _ in 0..s {
        y = y.mul(&y, w, RM);
    }
    Ok(y.ldexp(k))
}

/// eˣ − 1 without cancellation for small x, used by hyperbolic functions.
pub(crate) fn expm1_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    match x.bit_exponent() {
        // |x| < 1/2: direct series x + x²/2! + …
        Some(e) if e <= -1 => sum_series(policy, x.clone(), |n, t| {
            t.mul(x, p, RM).div(&BigFloat::from_u64(n as u64 + 1, 64), p, RM)
        }),
        _ => Ok(exp_kernel(x, policy)?.sub(&BigFloat::from_word(1, 64), p, RM)),
    }
}
