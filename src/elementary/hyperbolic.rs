//! Hyperbolic functions and their inverses.
//!
//! sinh and tanh go through eˣ − 1 so small arguments keep full relative
//! precision; the inverses go through the logarithm with guard bits sized to
//! the cancellation in its argument.

use astro_float::{BigFloat, INF_NEG, INF_POS, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{settle, smallness_bits, ConvergencePolicy, EvalError};
use crate::traits::{MpFloat, RM};

use super::exp::{exp_kernel, expm1_kernel};
use super::log::{atanh_series, log_kernel};

/// Hyperbolic sine.
pub fn sinh(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("sinh", sinh_kernel(x, &policy)))
}

/// Hyperbolic cosine.
pub fn cosh(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("cosh", cosh_kernel(x, &policy)))
}

/// Hyperbolic tangent. Exactly ±1 once e^(−2|x|) falls below the working precision.
pub fn tanh(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("tanh", tanh_kernel(x, &policy)))
}

/// Inverse hyperbolic sine.
pub fn asinh(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("asinh", asinh_kernel(x, &policy)))
}

/// Inverse hyperbolic cosine. NaN for x < 1.
pub fn acosh(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("acosh", acosh_kernel(x, &policy)))
}

/// Inverse hyperbolic tangent. NaN outside [−1, 1], ±∞ at ±1.
pub fn atanh(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("atanh", atanh_kernel(x, &policy)))
}

fn with_sign_of(x: &BigFloat, v: BigFloat) -> BigFloat {
    if x.is_negative() {
        v.neg()
    } else {
        v
    }
}

pub(crate) fn sinh_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() || x.is_zero() || x.is_inf() {
        return Ok(x.clone());
    }
    let p = policy.working();
    // sinh a = (E + E/(E + 1)) / 2 with E = eᵃ − 1
    let e = expm1_kernel(&x.abs(), policy)?;
    if e.is_inf() {
        return Ok(with_sign_of(x, INF_POS));
    }
    let one = BigFloat::from_word(1, 64);
    let v = e.add(&e.div(&e.add(&one, p, RM), p, RM), p, RM).ldexp(-1);
    Ok(with_sign_of(x, v))
}

pub(crate) fn cosh_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() {
        return Ok(NAN);
    }
    if x.is_inf() {
        return Ok(INF_POS);
    }
    let p = policy.working();
    let e = exp_kernel(&x.abs(), policy)?;
    if e.is_inf() {
        return Ok(INF_POS);
    }
    let inv = BigFloat::from_word(1, 64).div(&e, p, RM);
    Ok(e.add(&inv, p, RM).ldexp(-1))
}

pub(crate) fn tanh_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() || x.is_zero() {
        return Ok(x.clone());
    }
    let p = policy.working();
    let one = BigFloat::from_word(1, p);
    let saturation = p as f64 * core::f64::consts::LN_2 / 2.0 + 1.0;
    if x.is_inf() || x.abs().to_f64() > saturation {
        return Ok(with_sign_of(x, one));
    }
    // tanh a = E / (E + 2) with E = e^(2a) − 1
    let e = expm1_kernel(&x.abs().ldexp(1), policy)?;
    let v = e.div(&e.add(&BigFloat::from_word(2, 64), p, RM), p, RM);
    Ok(with_sign_of(x, v))
}

pub(crate) fn asinh_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() || x.is_zero() || x.is_inf() {
        return Ok(x.clone());
    }
    let a = x.abs();
    let one = BigFloat::from_word(1, 64);

    if a.bit_exponent().unwrap_or(0) > (policy.working() / 2) as i64 + 1 {
        // a² swamps 1: asinh a = ln 2a to working precision
        let p = policy.working();
        let v = log_kernel(&a, policy)?.add(&consts::at(Constant::Ln2, p), p, RM);
        return Ok(with_sign_of(x, v));
    }

    // ln(a + √(a² + 1)) loses the bits by which a is small
    let policy = policy.inflated(smallness_bits(&a) + 4);
    let p = policy.working();
    let arg = a.add(&a.mul(&a, p, RM).add(&one, p, RM).sqrt(p, RM), p, RM);
    Ok(with_sign_of(x, log_kernel(&arg, &policy)?))
}

pub(crate) fn acosh_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let one = BigFloat::from_word(1, 64);
    if x.is_nan() || x.below(&one) {
        return Ok(NAN);
    }
    if x.is_inf_pos() {
        return Ok(INF_POS);
    }
    let p = policy.working();
    if x.same_as(&one) {
        return Ok(BigFloat::new(p));
    }

    if x.bit_exponent().unwrap_or(0) > (p / 2) as i64 + 1 {
        let v = log_kernel(x, policy)?.add(&consts::at(Constant::Ln2, p), p, RM);
        return Ok(v);
    }

    // x² − 1 = (x − 1)(x + 1) keeps the distance from 1 exact
    let d = x.sub(&one, p, RM);
    let policy = policy.inflated(smallness_bits(&d) + 4);
    let q = policy.working();
    let root = d.mul(&x.add(&one, q, RM), q, RM).sqrt(q, RM);
    log_kernel(&x.add(&root, q, RM), &policy)
}

pub(crate) fn atanh_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let one = BigFloat::from_word(1, 64);
    if x.is_nan() || x.abs().above(&one) {
        return Ok(NAN);
    }
    if x.is_zero() {
        return Ok(x.clone());
    }
    if x.abs().same_as(&one) {
        return Ok(if x.is_negative() { INF_NEG } else { INF_POS });
    }
    // |x| < 1/2: the series itself, no cancellation
    if x.bit_exponent().unwrap_or(0) <= -1 {
        return atanh_series(x, policy);
    }
    let p = policy.working();
    let ratio = one.add(x, p, RM).div(&one.sub(x, p, RM), p, RM);
    Ok(log_kernel(&ratio, policy)?.ldexp(-1))
}
