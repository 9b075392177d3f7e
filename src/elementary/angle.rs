//! Angle normalization and unit conversion.
//!
//! Each normalizer maps into a half-open interval and returns its input
//! unchanged (apart from the final rounding) when it already lies inside, so
//! normalizing twice is the same as normalizing once.

use astro_float::{BigFloat, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{magnitude_bits, settle, ConvergencePolicy, EvalError};
use crate::traits::{MpFloat, RM};

/// Normalize degrees into [0, 360).
///
/// ```
/// use mpeval::{elementary::deg_norm, mp, MpFloat};
///
/// assert_eq!(deg_norm(&mp(450, 64), 64).to_f64(), 90.0);
/// assert_eq!(deg_norm(&mp(-90, 64), 64).to_f64(), 270.0);
/// ```
pub fn deg_norm(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    let p = policy.working() + magnitude_bits(x);
    normalize(x, &BigFloat::new(64), &BigFloat::from_word(360, 64), p, &policy)
}

/// Normalize radians into [0, 2π).
pub fn rad_norm_2pi(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    let p = policy.working() + magnitude_bits(x);
    let two_pi = consts::at(Constant::Pi, p).ldexp(1);
    normalize(x, &BigFloat::new(64), &two_pi, p, &policy)
}

/// Normalize radians into [−π, π).
pub fn rad_norm_pi(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    let p = policy.working() + magnitude_bits(x);
    let pi = consts::at(Constant::Pi, p);
    normalize(x, &pi.neg(), &pi.ldexp(1), p, &policy)
}

/// Degrees to radians.
pub fn deg_to_rad(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("deg_to_rad", deg_to_rad_kernel(x, &policy)))
}

/// Radians to degrees.
pub fn rad_to_deg(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("rad_to_deg", rad_to_deg_kernel(x, &policy)))
}

/// `x` mapped into `[low, low + period)` and rounded to the policy target.
///
/// Both ends are compared at the target precision after the final rounding,
/// which can otherwise carry a value just below `low + period` onto it. Such
/// a value folds to `low`, its equal modulo the period. Input already inside
/// the target-rounded interval is only rounded.
fn normalize(
    x: &BigFloat,
    low: &BigFloat,
    period: &BigFloat,
    p: usize,
    policy: &ConvergencePolicy,
) -> BigFloat {
    if !x.is_finite() {
        return NAN;
    }
    let low_t = policy.finish(low.clone());
    let high_t = policy.finish(low.add(period, p, RM));
    let r = if !x.below(&low_t) && x.below(&high_t) {
        policy.finish(x.clone())
    } else {
        policy.finish(wrap(x, low, period, p))
    };
    if r.below(&high_t) {
        r
    } else {
        low_t
    }
}

/// `x` mapped into `[low, low + period)` for a positive `period`.
///
/// The quotient inside [`floor_rem`] can round onto an integer from either
/// side, so the result is nudged back by one period when it lands just
/// outside.
fn wrap(x: &BigFloat, low: &BigFloat, period: &BigFloat, p: usize) -> BigFloat {
    let high = low.add(period, p, RM);
    if !x.below(low) && x.below(&high) {
        return x.clone();
    }
    let mut r = floor_rem(&x.sub(low, p, RM), period, p).add(low, p, RM);
    if r.below(low) {
        r = r.add(period, p, RM);
    } else if !r.below(&high) {
        r = r.sub(period, p, RM);
    }
    r
}

/// Remainder of `x` modulo `m`, floored. Zero when `m` is zero.
pub(crate) fn floor_rem(x: &BigFloat, m: &BigFloat, p: usize) -> BigFloat {
    if m.is_zero() {
        return BigFloat::new(p);
    }
    let k = x.div(m, p, RM).floor_int(p);
    x.sub(&k.mul(m, p, RM), p, RM)
}

fn deg_to_rad_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let pi = consts::at(Constant::Pi, p);
    Ok(x.mul(&pi, p, RM).div(&BigFloat::from_word(180, 64), p, RM))
}

fn rad_to_deg_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let pi = consts::at(Constant::Pi, p);
    Ok(x.mul(&BigFloat::from_word(180, 64), p, RM).div(&pi, p, RM))
}
