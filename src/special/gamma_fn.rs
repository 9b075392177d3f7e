//! Gamma and log-gamma functions.
//!
//! Low target widths use the Lanczos approximation (g = 7, n = 9), whose
//! double-precision coefficients are good to about 48 bits. Wider targets use
//! Spouge's approximation, the same shape with a parameter `a` that grows with
//! the precision and coefficients computed on demand.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use astro_float::{BigFloat, INF_POS, NAN};
use parking_lot::Mutex;

use crate::combinatorics::product_range;
use crate::consts::{self, Constant};
use crate::convergence::{magnitude_bits, settle, smallness_bits, ConvergencePolicy, EvalError};
use crate::elementary::{exp_kernel, log_kernel, sin_kernel};
use crate::traits::{MpFloat, RM};

use super::{LANCZOS_COEFFS, LANCZOS_G, LANCZOS_MAX_BITS};

/// Positive integers up to this are evaluated as an exact product.
const EXACT_INTEGER_LIMIT: i64 = 1025;

/// Most unit steps taken to move a Lanczos argument into [1/2, 3/2).
const REDUCTION_LIMIT: f64 = 64.0;

/// Spouge's relative error is about (2π)^(−a), i.e. 2.65·a bits.
const SPOUGE_BITS_PER_TERM: f64 = 0.378;

/// Spouge tables are keyed by working precision rounded up to this.
const SPOUGE_QUANTUM: usize = 64;

/// Gamma function Γ(x).
///
/// Returns +∞ at the poles 0, −1, −2, …, NaN for NaN and −∞.
///
/// # Example
///
/// ```
/// use mpeval::{special::gamma, mp, MpFloat};
///
/// // Γ(5) = 4! = 24
/// assert_eq!(gamma(&mp(5, 64), 256).to_f64(), 24.0);
///
/// // Γ(0.5) = √π
/// let sqrt_pi = core::f64::consts::PI.sqrt();
/// assert!((gamma(&mp(0.5, 64), 256).to_f64() - sqrt_pi).abs() < 1e-15);
///
/// assert!(gamma(&mp(-2, 64), 64).is_inf_pos());
/// ```
pub fn gamma(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("gamma", gamma_kernel(x, &policy)))
}

/// Natural logarithm of the absolute gamma function, ln |Γ(x)|.
///
/// Works in log space throughout, so large arguments do not overflow.
///
/// ```
/// use mpeval::{special::lgamma, mp, MpFloat};
///
/// assert!(lgamma(&mp(2, 64), 128).is_zero());
/// let v = lgamma(&mp(100, 64), 128);
/// assert!((v.to_f64() - 359.1342053695754).abs() < 1e-12);
/// ```
pub fn lgamma(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("lgamma", lgamma_kernel(x, &policy)))
}

pub(crate) fn gamma_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() || x.is_inf_neg() {
        return Ok(NAN);
    }
    if x.is_inf_pos() {
        return Ok(INF_POS);
    }
    if x.is_integral() {
        if !x.above(&BigFloat::new(64)) {
            return Ok(INF_POS);
        }
        if let Some(n) = x.to_i64_exact().filter(|&n| n <= EXACT_INTEGER_LIMIT) {
            // Γ(n) = (n−1)!
            return Ok(product_range(2, n as u64 - 1, policy.working()));
        }
    }
    if x.below(&BigFloat::from_f64(0.5, 64)) {
        return reflect(x, policy);
    }
    gamma_positive(x, policy)
}

pub(crate) fn lgamma_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() {
        return Ok(NAN);
    }
    if x.is_inf() {
        return Ok(INF_POS);
    }
    let one = BigFloat::from_word(1, 64);
    if x.is_integral() {
        if !x.above(&BigFloat::new(64)) {
            return Ok(INF_POS);
        }
        if let Some(n) = x.to_i64_exact().filter(|&n| n <= EXACT_INTEGER_LIMIT) {
            let p = policy.working();
            return log_kernel(&product_range(2, n as u64 - 1, p + 16), policy);
        }
    }

    if x.below(&BigFloat::from_f64(0.5, 64)) {
        // ln|Γ(x)| = ln π − ln|sin πx| − ln Γ(1 − x)
        let inner = policy.inflated(8);
        let p = inner.working();
        let q = p + magnitude_bits(x);
        let sine = reflection_sine(x, &inner)?.abs();
        let ln_pi = log_kernel(&consts::at(Constant::Pi, p), &inner)?;
        let rest = lgamma_kernel(&one.sub(x, q, RM), &inner)?;
        return Ok(ln_pi.sub(&log_kernel(&sine, &inner)?, p, RM).sub(&rest, p, RM));
    }

    // ln Γ vanishes at 1 and 2; its absolute error must shrink with it there
    let p = policy.working();
    let near_one = smallness_bits(&x.sub(&one, p, RM));
    let near_two = smallness_bits(&x.sub(&BigFloat::from_word(2, 64), p, RM));
    let inner = policy.inflated(near_one + near_two + magnitude_bits(x) + 8);
    let (ln_main, sum) = spouge_parts(x, &inner)?;
    let q = inner.working();
    Ok(ln_main.add(&log_kernel(&sum, &inner)?, q, RM))
}

/// sin(πx) from x = n + r with |r| ≤ 1/2, so no bits of x are lost to π.
fn reflection_sine(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let q = p + magnitude_bits(x);
    let n = x.round_nearest(q);
    let r = x.sub(&n, q, RM);
    let s = sin_kernel(&r.mul(&consts::at(Constant::Pi, p), p, RM), policy)?;
    let odd = !n.ldexp(-1).is_integral();
    Ok(if odd { s.neg() } else { s })
}

/// Γ(x) = π / (sin(πx)·Γ(1 − x)) for x < 1/2.
fn reflect(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let q = p + magnitude_bits(x);
    let one_minus = BigFloat::from_word(1, 64).sub(x, q, RM);
    let g = gamma_positive(&one_minus, policy)?;
    let s = reflection_sine(x, policy)?;
    if s.is_zero() {
        return Ok(INF_POS);
    }
    Ok(consts::at(Constant::Pi, p).div(&s.mul(&g, p, RM), p, RM))
}

/// Γ(x) for x ≥ 1/2, not a pole.
fn gamma_positive(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if policy.target <= LANCZOS_MAX_BITS {
        return lanczos(x, policy);
    }
    // the exponent of e^(ln Γ) carries magnitude_bits(x)·ln x of integer part
    let inner = policy.inflated(magnitude_bits(x) + 8);
    let (ln_main, sum) = spouge_parts(x, &inner)?;
    let q = inner.working();
    Ok(exp_kernel(&ln_main, &inner)?.mul(&sum, q, RM))
}

/// Lanczos sum A(z) = c₀ + Σ cᵢ/(z + i).
fn lanczos_sum(z: &BigFloat, p: usize) -> BigFloat {
    let mut sum = BigFloat::from_f64(LANCZOS_COEFFS[0], p);
    for (i, &c) in LANCZOS_COEFFS[1..].iter().enumerate() {
        let denom = z.add(&BigFloat::from_u64(i as u64 + 1, 64), p, RM);
        sum = sum.add(&BigFloat::from_f64(c, 64).div(&denom, p, RM), p, RM);
    }
    sum
}

/// Γ(x) = √(2π)·t^(z+½)·e^(−t)·A(z) with z = x − 1, t = z + g + ½.
fn lanczos(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let one = BigFloat::from_word(1, 64);
    let half = BigFloat::from_f64(0.5, 64);
    let three_halves = BigFloat::from_f64(1.5, 64);

    let inner = policy.inflated(magnitude_bits(x) + 8);
    let p = inner.working();

    // x = y + steps with y ∈ [1/2, 3/2), when that is a short walk
    let mut y = x.clone();
    let mut steps = 0usize;
    if x.to_f64() < REDUCTION_LIMIT + 1.5 {
        while !y.below(&three_halves) {
            y = y.sub(&one, p, RM);
            steps += 1;
        }
    }

    let z = y.sub(&one, p, RM);
    let t = z.add(&BigFloat::from_f64(LANCZOS_G + 0.5, 64), p, RM);
    let ln_pow = z.add(&half, p, RM).mul(&log_kernel(&t, &inner)?, p, RM).sub(&t, p, RM);
    let sqrt_two_pi = consts::at(Constant::Pi, p).ldexp(1).sqrt(p, RM);
    let mut g = exp_kernel(&ln_pow, &inner)?
        .mul(&sqrt_two_pi, p, RM)
        .mul(&lanczos_sum(&z, p), p, RM);

    // Γ(y + k) = Γ(y)·y·(y + 1)⋯(y + k − 1)
    let mut factor = y;
    for _ in 0..steps {
        g = g.mul(&factor, p, RM);
        factor = factor.add(&one, p, RM);
    }
    Ok(g)
}

/// Spouge coefficients for one working precision.
struct SpougeTable {
    a: u64,
    /// Precision the coefficients and their sum are carried at.
    precision: usize,
    /// `coeffs[0] = √(2π)`, `coeffs[k] = (−1)^(k−1)/(k−1)!·(a−k)^(k−½)·e^(a−k)`.
    coeffs: Vec<BigFloat>,
}

fn spouge_table(working: usize) -> Result<Arc<SpougeTable>, EvalError> {
    static TABLES: OnceLock<Mutex<HashMap<usize, Arc<SpougeTable>>>> = OnceLock::new();
    let key = working.div_ceil(SPOUGE_QUANTUM) * SPOUGE_QUANTUM;
    let tables = TABLES.get_or_init(|| Mutex::new(HashMap::new()));
    if let Some(table) = tables.lock().get(&key) {
        return Ok(table.clone());
    }
    let table = Arc::new(build_spouge_table(key)?);
    Ok(tables.lock().entry(key).or_insert(table).clone())
}

fn build_spouge_table(working: usize) -> Result<SpougeTable, EvalError> {
    let a = (working as f64 * SPOUGE_BITS_PER_TERM).ceil() as u64 + 1;
    // the alternating coefficients reach about e^(1.28a); that much cancels in the sum
    let precision = 2 * working + 32;
    let policy = ConvergencePolicy::new(precision).with_guard_bits(16);
    let p = policy.working();
    tracing::debug!(a, bits = precision, "building Spouge table");

    let mut coeffs = Vec::with_capacity(a as usize);
    coeffs.push(consts::at(Constant::Pi, p).ldexp(1).sqrt(p, RM));
    let mut factorial = BigFloat::from_word(1, p);
    for k in 1..a {
        if k > 1 {
            factorial = factorial.mul(&BigFloat::from_u64(k - 1, 64), p, RM);
        }
        let base = BigFloat::from_u64(a - k, 64);
        let exponent = BigFloat::from_f64(k as f64 - 0.5, 64)
            .mul(&log_kernel(&base, &policy)?, p, RM)
            .add(&base, p, RM);
        let c = exp_kernel(&exponent, &policy)?.div(&factorial, p, RM);
        coeffs.push(if k % 2 == 0 { c.neg() } else { c });
    }
    Ok(SpougeTable { a, precision, coeffs })
}

/// Spouge split of Γ(x) = e^main · sum with z = x − 1:
/// main = (z + ½)·ln(z + a) − (z + a), sum = c₀ + Σ cₖ/(z + k).
fn spouge_parts(x: &BigFloat, policy: &ConvergencePolicy) -> Result<(BigFloat, BigFloat), EvalError> {
    let table = spouge_table(policy.working())?;
    let p = policy.working();
    let cp = table.precision;
    let one = BigFloat::from_word(1, 64);

    let z = x.sub(&one, cp, RM);
    let za = z.add(&BigFloat::from_u64(table.a, 64), p, RM);
    let main = z
        .add(&BigFloat::from_f64(0.5, 64), p, RM)
        .mul(&log_kernel(&za, policy)?, p, RM)
        .sub(&za, p, RM);

    let mut sum = table.coeffs[0].clone();
    for (k, c) in table.coeffs.iter().enumerate().skip(1) {
        let denom = z.add(&BigFloat::from_u64(k as u64, 64), cp, RM);
        sum = sum.add(&c.div(&denom, cp, RM), cp, RM);
    }
    if !sum.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok((main, sum))
}
