//! sin, cos and tan by reduction modulo π/2.

use astro_float::{BigFloat, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{magnitude_bits, settle, smallness_bits, sum_series, ConvergencePolicy, EvalError};
use crate::traits::{MpFloat, RM};

/// Attempts at reducing an argument that lands unusually close to a multiple
/// of π/2, each with more bits of π.
const REDUCTION_ATTEMPTS: usize = 4;

/// Sine.
///
/// ```
/// use mpeval::{elementary::sin, mp, MpFloat};
///
/// let s = sin(&mp(1, 64), 128);
/// assert!((s.to_f64() - 1f64.sin()).abs() < 1e-15);
/// ```
pub fn sin(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("sin", sin_kernel(x, &policy)))
}

/// Cosine.
pub fn cos(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("cos", cos_kernel(x, &policy)))
}

/// Tangent. Never infinite: no binary value is an odd multiple of π/2.
pub fn tan(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("tan", tan_kernel(x, &policy)))
}

/// Reduced argument `r = x − k·π/2` with |r| ≤ π/4, and `k mod 4`.
pub(crate) struct Reduced {
    pub r: BigFloat,
    pub quadrant: u8,
}

/// Reduce `x` by the nearest multiple of π/2, adding bits of π until the
/// remainder keeps `policy.working()` significant bits.
pub(crate) fn reduce_half_pi(x: &BigFloat, policy: &ConvergencePolicy) -> Result<Reduced, EvalError> {
    let mag = magnitude_bits(x);
    let mut extra = mag + 8;
    for _ in 0..REDUCTION_ATTEMPTS {
        let q = policy.working() + extra;
        let half_pi = consts::at(Constant::Pi, q).ldexp(-1);
        let k = x.div(&half_pi, q, RM).round_nearest(q);
        if k.is_zero() {
            return Ok(Reduced {
                r: x.clone(),
                quadrant: 0,
            });
        }
        let r = x.sub(&k.mul(&half_pi, q, RM), q, RM);
        let lost = smallness_bits(&r);
        if mag + lost + 4 <= extra {
            let quadrant = k
                .sub(&k.ldexp(-2).floor_int(q).ldexp(2), q, RM)
                .to_i64_exact()
                .ok_or(EvalError::NotFinite)?;
            return Ok(Reduced {
                r,
                quadrant: quadrant.rem_euclid(4) as u8,
            });
        }
        tracing::trace!(extra, lost, "retrying π/2 reduction with more bits");
        extra = mag + lost + 16;
    }
    Err(EvalError::ConvergenceFailure {
        iterations: REDUCTION_ATTEMPTS,
    })
}

/// sin r = r − r³/3! + r⁵/5! − …
pub(crate) fn sin_series(r: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let r2 = r.mul(r, p, RM);
    sum_series(policy, r.clone(), |n, t| {
        let n = n as u64;
        t.mul(&r2, p, RM)
            .div(&BigFloat::from_u64(2 * n * (2 * n + 1), 64), p, RM)
            .neg()
    })
}

/// cos r = 1 − r²/2! + r⁴/4! − …
pub(crate) fn cos_series(r: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let r2 = r.mul(r, p, RM);
    sum_series(policy, BigFloat::from_word(1, p), |n, t| {
        let n = n as u64;
        t.mul(&r2, p, RM)
            .div(&BigFloat::from_u64((2 * n - 1) * (2 * n), 64), p, RM)
            .neg()
    })
}

pub(crate) fn sin_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if !x.is_finite() {
        return Ok(NAN);
    }
    if x.is_zero() {
        return Ok(x.clone());
    }
    let Reduced { r, quadrant } = reduce_half_pi(x, policy)?;
    Ok(match quadrant {
        0 => sin_series(&r, policy)?,
        1 => cos_series(&r, policy)?,
        2 => sin_series(&r, policy)?.neg(),
        _ => cos_series(&r, policy)?.neg(),
    })
}

pub(crate) fn cos_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if !x.is_finite() {
        return Ok(NAN);
    }
    if x.is_zero() {
        return Ok(BigFloat::from_word(1, policy.working()));
    }
    let Reduced { r, quadrant } = reduce_half_pi(x, policy)?;
    Ok(match quadrant {
        0 => cos_series(&r, policy)?,
        1 => sin_series(&r, policy)?.neg(),
        2 => cos_series(&r, policy)?.neg(),
        _ => sin_series(&r, policy)?,
    })
}

pub(crate) fn tan_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if !x.is_finite() {
        return Ok(NAN);
    }
    if x.is_zero() {
        return Ok(x.clone());
    }
    let p = policy.working();
    let Reduced { r, quadrant } = reduce_half_pi(x, policy)?;
    let s = sin_series(&r, policy)?;
    let c = cos_series(&r, policy)?;
    Ok(if quadrant % 2 == 0 {
        s.div(&c, p, RM)
    } else {
        c.div(&s, p, RM).neg()
    })
}
