//! Bessel functions of integer order, first and second kind.
//!
//! Large arguments use Hankel's asymptotic expansion in the P, Q form.
//! Elsewhere Jₙ comes from its power series, whose alternating terms peak
//! near e^x; that many bits are carried as extra guard. Yₙ starts from the
//! Y₀ and Y₁ series (or their Hankel forms) and recurs upward in the order,
//! which is the stable direction for the second kind.
//!
//! Near a zero of Jₙ or Yₙ the result is accurate in absolute rather than
//! relative terms.

use astro_float::{BigFloat, RoundingMode, NAN};

use crate::combinatorics::product_range;
use crate::consts::{self, Constant};
use crate::convergence::{magnitude_bits, settle, sum_asymptotic, sum_series, ConvergencePolicy, EvalError};
use crate::elementary::{cos_kernel, log_kernel, sin_kernel};
use crate::rounding::Rounded;
use crate::traits::{MpFloat, RM};

/// Hankel's expansion reaches e^(−2x) relative accuracy, so it is tried once
/// 2x·log₂e covers the precision it is summed at.
const HANKEL_BITS_PER_UNIT: f64 = 0.35;

/// Guard bits the Hankel sums carry on top of the caller's working precision.
const HANKEL_GUARD: usize = 16;

/// Bessel function of the first kind Jₙ(x) for integer n.
///
/// Uses J₋ₙ = (−1)ⁿ Jₙ and Jₙ(−x) = (−1)ⁿ Jₙ(x).
///
/// # Example
///
/// ```
/// use mpeval::{special::bessel_j, mp, MpFloat};
///
/// let j0 = bessel_j(0, &mp(1, 64), 128).to_f64();
/// assert!((j0 - 0.7651976865579666).abs() < 1e-15);
///
/// let j1 = bessel_j(1, &mp(2.5, 64), 128).to_f64();
/// assert!((j1 - 0.4970941024642741).abs() < 1e-15);
///
/// assert_eq!(bessel_j(3, &mp(0, 64), 128).to_f64(), 0.0);
/// ```
pub fn bessel_j(n: i64, x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("bessel_j", bessel_j_kernel(n, x, &policy)))
}

/// Bessel function of the second kind Yₙ(x) for integer n and x > 0.
///
/// Returns NaN for x ≤ 0. Uses Y₋ₙ = (−1)ⁿ Yₙ.
///
/// ```
/// use mpeval::{special::bessel_y, mp, MpFloat};
///
/// let y0 = bessel_y(0, &mp(1, 64), 128).to_f64();
/// assert!((y0 - 0.08825696421567696).abs() < 1e-15);
/// assert!(bessel_y(0, &mp(-1, 64), 128).is_nan());
/// ```
pub fn bessel_y(n: i64, x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("bessel_y", bessel_y_kernel(n, x, &policy)))
}

/// [`bessel_j`] rounded once with mode `rm`, reporting the direction.
pub fn bessel_j_rounded(n: i64, x: &BigFloat, prec: usize, rm: RoundingMode) -> Rounded {
    let policy = ConvergencePolicy::special(prec).with_rounding(rm);
    let wide = settle("bessel_j", bessel_j_kernel(n, x, &policy));
    Rounded::from_wide(wide, &policy)
}

/// [`bessel_y`] rounded once with mode `rm`, reporting the direction.
pub fn bessel_y_rounded(n: i64, x: &BigFloat, prec: usize, rm: RoundingMode) -> Rounded {
    let policy = ConvergencePolicy::special(prec).with_rounding(rm);
    let wide = settle("bessel_y", bessel_y_kernel(n, x, &policy));
    Rounded::from_wide(wide, &policy)
}

fn bessel_j_kernel(n: i64, x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() {
        return Ok(NAN);
    }
    let m = n.unsigned_abs();
    if x.is_zero() {
        return Ok(BigFloat::from_word(u64::from(m == 0), 64));
    }
    if x.is_inf() {
        return Ok(BigFloat::new(64));
    }

    let odd = m % 2 == 1;
    let flip = odd && (n < 0) != x.is_negative();
    let a = x.abs();

    let v = if in_hankel_regime(&a, policy) {
        match hankel(m, &a, policy) {
            Ok((j, _)) => j,
            Err(err) => {
                tracing::trace!(order = m, %err, "bessel_j: Hankel expansion failed, using power series");
                j_series(m, &a, policy)?
            }
        }
    } else {
        j_series(m, &a, policy)?
    };
    Ok(if flip { v.neg() } else { v })
}

fn bessel_y_kernel(n: i64, x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() || x.is_zero() || x.is_negative() {
        return Ok(NAN);
    }
    if x.is_inf() {
        return Ok(BigFloat::new(64));
    }
    let m = n.unsigned_abs();
    let flip = n < 0 && m % 2 == 1;

    // the upward recurrence is neutral below x and growing above it
    let inner = policy.inflated(64 - m.leading_zeros() as usize + 8);
    let asymptotic = if in_hankel_regime(x, &inner) {
        match hankel(0, x, &inner).and_then(|(_, y0)| Ok((y0, hankel(1, x, &inner)?.1))) {
            Ok(pair) => Some(pair),
            Err(err) => {
                tracing::trace!(%err, "bessel_y: Hankel expansion failed, using power series");
                None
            }
        }
    } else {
        None
    };
    let (y0, y1) = match asymptotic {
        Some(pair) => pair,
        None => (y0_series(x, &inner)?, y1_series(x, &inner)?),
    };

    let v = match m {
        0 => y0,
        1 => y1,
        _ => {
            let p = inner.working();
            let two_over_x = BigFloat::from_word(2, 64).div(x, p, RM);
            let (mut prev, mut cur) = (y0, y1);
            for k in 1..m {
                // Yₖ₊₁ = (2k/x)·Yₖ − Yₖ₋₁
                let next = two_over_x
                    .mul(&BigFloat::from_u64(k, 64), p, RM)
                    .mul(&cur, p, RM)
                    .sub(&prev, p, RM);
                if !next.is_finite() {
                    return Err(EvalError::NotFinite);
                }
                prev = cur;
                cur = next;
            }
            cur
        }
    };
    Ok(if flip { v.neg() } else { v })
}

fn in_hankel_regime(x: &BigFloat, policy: &ConvergencePolicy) -> bool {
    x.to_f64() >= HANKEL_BITS_PER_UNIT * (policy.working() + HANKEL_GUARD) as f64 + 2.0
}

/// Guard bits for series whose terms peak near e^x.
fn series_policy(x: &BigFloat, policy: &ConvergencePolicy) -> ConvergencePolicy {
    let lost = (x.to_f64() * core::f64::consts::LOG2_E).ceil().max(0.0) as usize;
    policy.inflated(lost + 16)
}

/// Jₘ(x) = Σ (−1)ᵏ (x/2)^(2k+m) / (k!·(m+k)!).
fn j_series(m: u64, x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let inner = series_policy(x, policy);
    let p = inner.working();
    let half_x = x.ldexp(-1);
    let neg_quarter_x2 = half_x.mul(&half_x, p, RM).neg();
    let first = half_x.powu(m, p).div(&product_range(2, m, p), p, RM);
    sum_series(&inner, first, |k, t| {
        let k = k as u64;
        t.mul(&neg_quarter_x2, p, RM)
            .div(&BigFloat::from_u64(k, 64), p, RM)
            .div(&BigFloat::from_u64(m + k, 64), p, RM)
    })
}

/// ln(x/2) + γ, the logarithmic coefficient shared by Y₀ and Y₁.
fn log_term(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let ln_half_x = log_kernel(&x.ldexp(-1), policy)?;
    Ok(ln_half_x.add(&consts::at(Constant::EulerGamma, p), p, RM))
}

/// Y₀(x) = (2/π)·[(ln(x/2) + γ)·J₀(x) + Σₖ₌₁ (−1)^(k+1) Hₖ (x²/4)ᵏ / (k!)²].
fn y0_series(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let inner = series_policy(x, policy);
    let p = inner.working();
    let one = BigFloat::from_word(1, 64);
    let half_x = x.ldexp(-1);
    let neg_quarter_x2 = half_x.mul(&half_x, p, RM).neg();

    // power = (−1)ᵏ (x²/4)ᵏ / (k!)², harmonic = Hₖ
    let mut power = BigFloat::from_word(1, p);
    let mut harmonic = BigFloat::new(p);
    let mut sum = BigFloat::new(p);
    let mut converged = false;
    for k in 1..=inner.max_iter as u64 {
        let kk = BigFloat::from_u64(k, 64);
        power = power.mul(&neg_quarter_x2, p, RM).div(&kk.mul(&kk, 128, RM), p, RM);
        harmonic = harmonic.add(&one.div(&kk, p, RM), p, RM);
        let term = power.mul(&harmonic, p, RM).neg();
        if !term.is_finite() {
            return Err(EvalError::NotFinite);
        }
        sum = sum.add(&term, p, RM);
        if inner.negligible(&term, &sum) {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(EvalError::ConvergenceFailure {
            iterations: inner.max_iter,
        });
    }

    let j0 = j_series(0, x, policy)?;
    let bracket = log_term(x, &inner)?.mul(&j0, p, RM).add(&sum, p, RM);
    let pi = consts::at(Constant::Pi, p);
    Ok(bracket.ldexp(1).div(&pi, p, RM))
}

/// Y₁(x) = (2/π)(ln(x/2) + γ)·J₁(x) − 2/(πx)
///         − (1/π)·Σₖ₌₀ (−1)ᵏ (Hₖ + Hₖ₊₁) (x/2)^(2k+1) / (k!·(k+1)!).
fn y1_series(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let inner = series_policy(x, policy);
    let p = inner.working();
    let one = BigFloat::from_word(1, 64);
    let half_x = x.ldexp(-1);
    let neg_quarter_x2 = half_x.mul(&half_x, p, RM).neg();

    // power = (−1)ᵏ (x/2)^(2k+1) / (k!(k+1)!), h_next = Hₖ₊₁
    let mut power = half_x.clone();
    let mut h_next = BigFloat::from_word(1, p);
    let mut sum = power.clone();
    let mut converged = false;
    for k in 1..=inner.max_iter as u64 {
        power = power
            .mul(&neg_quarter_x2, p, RM)
            .div(&BigFloat::from_u64(k * (k + 1), 64), p, RM);
        let h = h_next;
        h_next = h.add(&one.div(&BigFloat::from_u64(k + 1, 64), p, RM), p, RM);
        let term = power.mul(&h.add(&h_next, p, RM), p, RM);
        if !term.is_finite() {
            return Err(EvalError::NotFinite);
        }
        sum = sum.add(&term, p, RM);
        if inner.negligible(&term, &sum) {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(EvalError::ConvergenceFailure {
            iterations: inner.max_iter,
        });
    }

    let pi = consts::at(Constant::Pi, p);
    let j1 = j_series(1, x, policy)?;
    let log_part = log_term(x, &inner)?.mul(&j1, p, RM).ldexp(1);
    let pole = BigFloat::from_word(2, 64).div(x, p, RM);
    Ok(log_part.sub(&pole, p, RM).sub(&sum, p, RM).div(&pi, p, RM))
}

/// Hankel's expansion (Jₘ(x), Yₘ(x)) with
/// Jₘ = √(2/(πx))·(P cos χ − Q sin χ), Yₘ = √(2/(πx))·(P sin χ + Q cos χ),
/// χ = x − (2m + 1)π/4.
fn hankel(m: u64, x: &BigFloat, policy: &ConvergencePolicy) -> Result<(BigFloat, BigFloat), EvalError> {
    let inner = policy.inflated(HANKEL_GUARD);
    let p = inner.working();
    let mu = BigFloat::from_u64(m, 64).powu(2, 128).ldexp(2);
    let eight_x = x.ldexp(3);
    let eight_x2 = eight_x.mul(&eight_x, p, RM);
    let odd_square = |k: u64| BigFloat::from_u64(k, 64).powu(2, 128);
    let factor = |a: u64, b: u64| mu.sub(&odd_square(a), 192, RM).mul(&mu.sub(&odd_square(b), 192, RM), p, RM);

    let pp = sum_asymptotic(&inner, BigFloat::from_word(1, p), |j, t| {
        let j = j as u64;
        t.mul(&factor(4 * j - 3, 4 * j - 1), p, RM)
            .div(&eight_x2, p, RM)
            .div(&BigFloat::from_u64((2 * j - 1) * 2 * j, 64), p, RM)
            .neg()
    })?;
    let q_first = mu.sub(&BigFloat::from_word(1, 64), 192, RM).div(&eight_x, p, RM);
    let qq = sum_asymptotic(&inner, q_first, |j, t| {
        let j = j as u64;
        t.mul(&factor(4 * j - 1, 4 * j + 1), p, RM)
            .div(&eight_x2, p, RM)
            .div(&BigFloat::from_u64(2 * j * (2 * j + 1), 64), p, RM)
            .neg()
    })?;

    // χ must be exact to the working precision in absolute terms
    let q = p + magnitude_bits(x) + 64 - m.leading_zeros() as usize + 8;
    let quarter_pi = consts::at(Constant::Pi, q).ldexp(-2);
    let chi = x.sub(&quarter_pi.mul(&BigFloat::from_u64(2 * m + 1, 64), q, RM), q, RM);
    let (s, c) = (sin_kernel(&chi, &inner)?, cos_kernel(&chi, &inner)?);

    let pi = consts::at(Constant::Pi, p);
    let scale = BigFloat::from_word(2, 64).div(&pi.mul(x, p, RM), p, RM).sqrt(p, RM);
    let j = pp.mul(&c, p, RM).sub(&qq.mul(&s, p, RM), p, RM).mul(&scale, p, RM);
    let y = pp.mul(&s, p, RM).add(&qq.mul(&c, p, RM), p, RM).mul(&scale, p, RM);
    Ok((j, y))
}
