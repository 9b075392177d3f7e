//! Natural, binary and decimal logarithms.

use astro_float::{BigFloat, INF_NEG, INF_POS, NAN};

use crate::consts::{self, Constant};
use crate::convergence::{settle, smallness_bits, sum_series, ConvergencePolicy, EvalError};
use crate::traits::{MpFloat, RM};

/// Natural logarithm ln x.
///
/// NaN for x < 0, −∞ at zero.
///
/// # Example
///
/// ```
/// use mpeval::{elementary::log, mp, MpFloat};
///
/// let l = log(&mp(10, 64), 256);
/// assert!((l.to_f64() - core::f64::consts::LN_10).abs() < 1e-15);
/// assert!(log(&mp(-1, 64), 64).is_nan());
/// ```
pub fn log(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("log", log_kernel(x, &policy)))
}

/// Base-2 logarithm. Exact for powers of two.
pub fn log2(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("log2", log2_kernel(x, &policy)))
}

/// Base-10 logarithm.
pub fn log10(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("log10", log10_kernel(x, &policy)))
}

pub(crate) fn log_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if let Some(special) = log_special(x) {
        return Ok(special);
    }
    let Some(e) = x.bit_exponent() else {
        return Ok(NAN);
    };

    // x = m·2^e with m ∈ [1/√2, √2)
    let mut m = x.ldexp(-e);
    let mut e = e;
    if m.to_f64() < core::f64::consts::FRAC_1_SQRT_2 {
        m = m.ldexp(1);
        e -= 1;
    }

    // Square roots shrink ln m but blur an m already close to 1.
    let one = BigFloat::from_word(1, 64);
    let mut roots = policy.strategy.log_square_roots(policy.working());
    if smallness_bits(&m.sub(&one, policy.working(), RM)) >= roots {
        roots = 0;
    }
    let series = policy.inflated(2 * roots);
    let p = series.working();
    for _ in 0..roots {
        m = m.sqrt(p, RM);
    }

    let z = m.sub(&one, p, RM).div(&m.add(&one, p, RM), p, RM);
    let ln_m = atanh_series(&z, &series)?.ldexp(1 + roots as i64);
    if e == 0 {
        return Ok(ln_m);
    }

    let e_bits = 64 - e.unsigned_abs().leading_zeros() as usize;
    let q = p + e_bits;
    let ln2 = consts::at(Constant::Ln2, q);
    let scaled = ln2.mul(&BigFloat::from_i64(e, 64), q, RM);
    Ok(scaled.add(&ln_m, p, RM))
}

fn log2_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if let Some(special) = log_special(x) {
        return Ok(special);
    }
    if let Some(e) = x.bit_exponent() {
        // 2^(e−1) has mantissa exactly 1/2
        if x.ldexp(-e).same_as(&BigFloat::from_f64(0.5, 64)) {
            return Ok(BigFloat::from_i64(e - 1, 64));
        }
    }
    let p = policy.working();
    let ln = log_kernel(x, policy)?;
    Ok(ln.div(&consts::at(Constant::Ln2, p), p, RM))
}

fn log10_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let ln = log_kernel(x, policy)?;
    if !ln.is_finite() {
        return Ok(ln);
    }
    Ok(ln.div(&consts::at(Constant::Ln10, p), p, RM))
}

/// NaN, negative, zero, +∞ and one.
fn log_special(x: &BigFloat) -> Option<BigFloat> {
    if x.is_nan() || (x.is_negative() && !x.is_zero()) {
        Some(NAN)
    } else if x.is_zero() {
        Some(INF_NEG)
    } else if x.is_inf_pos() {
        Some(INF_POS)
    } else if x.same_as(&BigFloat::from_word(1, 64)) {
        Some(BigFloat::new(64))
    } else {
        None
    }
}

/// atanh z = z + z³/3 + z⁵/5 + … for |z| < 1.
pub(crate) fn atanh_series(z: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let z2 = z.mul(z, p, RM);
    sum_series(policy, z.clone(), |n, t| {
        let n = n as u64;
        t.mul(&z2, p, RM)
            .mul(&BigFloat::from_u64(2 * n - 1, 64), p, RM)
            .div(&BigFloat::from_u64(2 * n + 1, 64), p, RM)
    })
}
