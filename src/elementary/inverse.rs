//! Inverse trigonometric functions, all built on one atan series.

use astro_float::{BigFloat, RoundingMode, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{settle, sum_series, ConvergencePolicy, EvalError};
use crate::rounding::Rounded;
use crate::traits::{MpFloat, RM};

/// Arctangent, in (−π/2, π/2).
pub fn atan(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("atan", atan_kernel(x, &policy)))
}

/// Arcsine. NaN outside [−1, 1].
pub fn asin(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("asin", asin_kernel(x, &policy)))
}

/// Arccosine, in [0, π]. NaN outside [−1, 1].
pub fn acos(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("acos", acos_kernel(x, &policy)))
}

/// Angle of the point (x, y), in (−π, π].
///
/// ```
/// use mpeval::{elementary::atan2, mp, MpFloat};
///
/// let a = atan2(&mp(1, 64), &mp(-1, 64), 128);
/// assert!((a.to_f64() - 3.0 * core::f64::consts::FRAC_PI_4).abs() < 1e-15);
/// ```
pub fn atan2(y: &BigFloat, x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("atan2", atan2_kernel(y, x, &policy)))
}

/// [`atan2`] rounded once with mode `rm`, reporting the direction.
pub fn atan2_rounded(y: &BigFloat, x: &BigFloat, prec: usize, rm: RoundingMode) -> Rounded {
    let policy = ConvergencePolicy::new(prec).with_rounding(rm);
    let wide = settle("atan2", atan2_kernel(y, x, &policy));
    Rounded::from_wide(wide, &policy)
}

fn half_pi(p: usize) -> BigFloat {
    consts::at(Constant::Pi, p).ldexp(-1)
}

/// atan u = u − u³/3 + u⁵/5 − … for |u| < 1.
pub(crate) fn atan_series(u: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let u2 = u.mul(u, p, RM);
    sum_series(policy, u.clone(), |n, t| {
        let n = n as u64;
        t.mul(&u2, p, RM)
            .mul(&BigFloat::from_u64(2 * n - 1, 64), p, RM)
            .div(&BigFloat::from_u64(2 * n + 1, 64), p, RM)
            .neg()
    })
}

pub(crate) fn atan_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    if x.is_nan() {
        return Ok(NAN);
    }
    if x.is_zero() {
        return Ok(x.clone());
    }
    if x.is_inf() {
        let h = half_pi(p);
        return Ok(if x.is_negative() { h.neg() } else { h });
    }

    let one = BigFloat::from_word(1, 64);
    let a = x.abs();
    let magnitude = if a.same_as(&one) {
        consts::at(Constant::Pi, p).ldexp(-2)
    } else if a.above(&one) {
        // atan a = π/2 − atan(1/a)
        let inv = one.div(&a, p, RM);
        half_pi(p).sub(&atan_reduced(&inv, policy)?, p, RM)
    } else {
        atan_reduced(&a, policy)?
    };
    Ok(if x.is_negative() { magnitude.neg() } else { magnitude })
}

/// atan a for 0 < a < 1, after halving the angle: a ← a / (1 + √(1 + a²)).
fn atan_reduced(a: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let halvings = policy.strategy.atan_halvings(p);
    let one = BigFloat::from_word(1, 64);
    let mut u = a.clone();
    for _ in 0..halvings {
        let root = u.mul(&u, p, RM).add(&one, p, RM).sqrt(p, RM);
        u = u.div(&root.add(&one, p, RM), p, RM);
    }
    Ok(atan_series(&u, policy)?.ldexp(halvings as i64))
}

pub(crate) fn asin_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let one = BigFloat::from_word(1, 64);
    if x.is_nan() || x.abs().above(&one) {
        return Ok(NAN);
    }
    if x.is_zero() {
        return Ok(x.clone());
    }
    // the 1 ± x factors are exact; the quotient grows without bound near ±1
    let policy = policy.inflated(8);
    let p = policy.working();
    let d = one.sub(x, p, RM).mul(&one.add(x, p, RM), p, RM);
    if d.is_zero() {
        let h = half_pi(p);
        return Ok(if x.is_negative() { h.neg() } else { h });
    }
    atan_kernel(&x.div(&d.sqrt(p, RM), p, RM), &policy)
}

pub(crate) fn acos_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let one = BigFloat::from_word(1, 64);
    if x.is_nan() || x.abs().above(&one) {
        return Ok(NAN);
    }
    let p = policy.working();
    if x.same_as(&one) {
        return Ok(BigFloat::new(p));
    }
    if x.same_as(&one.neg()) {
        return Ok(consts::at(Constant::Pi, p));
    }
    // acos x = 2·atan √((1 − x)/(1 + x))
    let t = one.sub(x, p, RM).div(&one.add(x, p, RM), p, RM).sqrt(p, RM);
    Ok(atan_kernel(&t, policy)?.ldexp(1))
}

pub(crate) fn atan2_kernel(y: &BigFloat, x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    if x.is_nan() || y.is_nan() {
        return Ok(NAN);
    }
    let pi = consts::at(Constant::Pi, p);
    let signed = |v: BigFloat| if y.is_negative() { v.neg() } else { v };

    if y.is_inf() && x.is_inf() {
        let quarter = pi.ldexp(-2);
        let v = if x.is_inf_pos() {
            quarter
        } else {
            quarter.mul(&BigFloat::from_word(3, 64), p, RM)
        };
        return Ok(signed(v));
    }
    if y.is_inf() {
        return Ok(signed(pi.ldexp(-1)));
    }
    if x.is_inf() {
        return Ok(if x.is_inf_pos() {
            BigFloat::new(p)
        } else {
            signed(pi)
        });
    }
    if y.is_zero() {
        return Ok(if x.is_negative() && !x.is_zero() {
            signed(pi)
        } else {
            BigFloat::new(p)
        });
    }
    if x.is_zero() {
        return Ok(signed(pi.ldexp(-1)));
    }

    let a = atan_kernel(&y.div(x, p, RM), policy)?;
    if x.is_negative() {
        Ok(if y.is_negative() {
            a.sub(&pi, p, RM)
        } else {
            a.add(&pi, p, RM)
        })
    } else {
        Ok(a)
    }
}
