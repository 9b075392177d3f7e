//! Cube and n-th roots by Newton–Raphson iteration.
//!
//! The iteration y ← ((n−1)·y + a/yⁿ⁻¹)/n starts from a double-precision
//! seed, so it is already at 50 or so correct bits and each step doubles that.
//! Under [`Strategy::Tuned`](crate::Strategy::Tuned) the early steps run at
//! the precision they can actually deliver, doubling up to the working width.
//!
//! | Function | Domain |
//! |----------|--------|
//! | [`cbrt`] | all x |
//! | [`nth_root`] | n ≥ 1; odd n for x < 0 |
//!
//! # Example
//!
//! ```
//! use mpeval::roots::{cbrt, nth_root};
//! use mpeval::{mp, MpFloat};
//!
//! assert_eq!(cbrt(&mp(-27, 64), 128).to_f64(), -3.0);
//! assert!((nth_root(5, &mp(2, 64), 128).to_f64() - 2f64.powf(0.2)).abs() < 1e-15);
//! assert!(nth_root(4, &mp(-16, 64), 128).is_nan());
//! ```

use astro_float::{BigFloat, RoundingMode, INF_NEG, INF_POS, NAN};

use crate::convergence::{settle, ConvergencePolicy, EvalError};
use crate::rounding::{rounded_variants, Rounded};
use crate::traits::{MpFloat, RM};

#[cfg(test)]
mod tests;

/// Precision of the first rung of the Newton ladder.
const LADDER_START: usize = 64;

/// Real cube root; negative for negative x.
pub fn cbrt(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("cbrt", cbrt_kernel(x, &policy)))
}

/// Real n-th root of x.
///
/// NaN for n = 0 and for even n with x < 0. Odd roots of negative numbers
/// are negative.
pub fn nth_root(n: u32, x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("nth_root", nth_root_kernel(n, x, &policy)))
}

/// [`nth_root`] rounded once with mode `rm`, reporting the direction.
pub fn nth_root_rounded(n: u32, x: &BigFloat, prec: usize, rm: RoundingMode) -> Rounded {
    let policy = ConvergencePolicy::new(prec).with_rounding(rm);
    let wide = settle("nth_root", nth_root_kernel(n, x, &policy));
    Rounded::from_wide(wide, &policy)
}

rounded_variants! {
    /// [`cbrt`] rounded once with mode `rm`, reporting the direction.
    cbrt_rounded => cbrt_kernel, new, "cbrt";
}

fn cbrt_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    nth_root_kernel(3, x, policy)
}

pub(crate) fn nth_root_kernel(n: u32, x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if n == 0 || x.is_nan() {
        return Ok(NAN);
    }
    let odd = n % 2 == 1;
    if x.is_negative() && !x.is_zero() && !odd {
        return Ok(NAN);
    }
    if n == 1 || x.is_zero() {
        return Ok(x.clone());
    }
    if x.is_inf() {
        return Ok(if x.is_inf_neg() { INF_NEG } else { INF_POS });
    }
    if n == 2 {
        return Ok(x.sqrt(policy.working(), RM));
    }

    let a = x.abs();
    let root = newton(n, &a, seed(n, &a), policy)?;
    Ok(if x.is_negative() { root.neg() } else { root })
}

/// Double-precision estimate of a^(1/n) for a > 0, finite.
///
/// Writes a = m·2^(e−1) with m ∈ [1, 2) and e = q·n + r, so that
/// a^(1/n) = 2^((log₂m + r − 1)/n) · 2^q with a modest f64 exponent.
fn seed(n: u32, a: &BigFloat) -> BigFloat {
    let e = a.bit_exponent().unwrap_or(1);
    let n_i = i64::from(n);
    let (q, r) = (e.div_euclid(n_i), e.rem_euclid(n_i));
    let m = a.ldexp(1 - e).to_f64();
    let frac = ((m.log2() + (r - 1) as f64) / f64::from(n)).exp2();
    BigFloat::from_f64(frac, 64).ldexp(q)
}

fn newton(n: u32, a: &BigFloat, mut y: BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    if policy.strategy.newton_ladder() {
        let mut rung = LADDER_START;
        while rung < p {
            rung = (2 * rung).min(p);
            y = newton_step(n, a, &y, rung).0;
        }
    }
    for _ in 0..policy.max_iter {
        let (next, delta) = newton_step(n, a, &y, p);
        if !next.is_finite() {
            return Err(EvalError::NotFinite);
        }
        y = next;
        if policy.settled(&delta, &y) {
            return Ok(y);
        }
    }
    Err(EvalError::ConvergenceFailure {
        iterations: policy.max_iter,
    })
}

/// One step y ← ((n−1)·y + a/yⁿ⁻¹)/n at precision `p`, with the correction.
fn newton_step(n: u32, a: &BigFloat, y: &BigFloat, p: usize) -> (BigFloat, BigFloat) {
    let n64 = u64::from(n);
    // the powering adds up to 2·log₂n roundings
    let q = p + 2 * (64 - n64.leading_zeros() as usize);
    let y_pow = y.powu(n64 - 1, q);
    let next = y
        .mul(&BigFloat::from_u64(n64 - 1, 64), q, RM)
        .add(&a.div(&y_pow, q, RM), q, RM)
        .div(&BigFloat::from_u64(n64, 64), p, RM);
    let delta = next.sub(y, p, RM);
    (next, delta)
}
