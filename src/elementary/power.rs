//! Square root and real powers.

use astro_float::{BigFloat, RoundingMode, INF_POS, NAN};

use crate::convergence::{magnitude_bits, settle, ConvergencePolicy, EvalError};
use crate::rounding::Rounded;
use crate::traits::{MpFloat, RM};

use super::exp::exp_kernel;
use super::log::log_kernel;

/// Exponents up to this size take the repeated-squaring path.
const INTEGER_POWER_LIMIT: u64 = 1 << 32;

/// Square root. NaN for x < 0.
pub fn sqrt(x: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("sqrt", sqrt_kernel(x, &policy)))
}

/// xʸ.
///
/// Integer exponents are computed by repeated squaring and accept a negative
/// base; otherwise xʸ = e^(y·ln x) and a negative base gives NaN.
///
/// ```
/// use mpeval::{elementary::pow, mp, MpFloat};
///
/// assert_eq!(pow(&mp(-2, 64), &mp(3, 64), 64).to_f64(), -8.0);
/// assert!((pow(&mp(2, 64), &mp(0.5, 64), 128).to_f64() - 2f64.sqrt()).abs() < 1e-15);
/// ```
pub fn pow(x: &BigFloat, y: &BigFloat, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    policy.finish(settle("pow", pow_kernel(x, y, &policy)))
}

/// [`pow`] rounded once with mode `rm`, reporting the direction.
pub fn pow_rounded(x: &BigFloat, y: &BigFloat, prec: usize, rm: RoundingMode) -> Rounded {
    let policy = ConvergencePolicy::new(prec).with_rounding(rm);
    let wide = settle("pow", pow_kernel(x, y, &policy));
    Rounded::from_wide(wide, &policy)
}

pub(crate) fn sqrt_kernel(x: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    if x.is_nan() || (x.is_negative() && !x.is_zero()) {
        return Ok(NAN);
    }
    if x.is_zero() || x.is_inf_pos() {
        return Ok(x.clone());
    }
    Ok(x.sqrt(policy.working(), RM))
}

pub(crate) fn pow_kernel(x: &BigFloat, y: &BigFloat, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    if x.is_nan() || y.is_nan() {
        return Ok(NAN);
    }
    if y.is_zero() {
        return Ok(BigFloat::from_word(1, p));
    }
    if x.is_zero() {
        return Ok(if y.is_negative() { INF_POS } else { BigFloat::new(p) });
    }

    if y.is_integral() {
        if let Some(n) = y.to_i64_exact().filter(|n| n.unsigned_abs() <= INTEGER_POWER_LIMIT) {
            // each squaring step adds at most one rounding; 2·log2|n| bits cover them
            let bits = 2 * (64 - n.unsigned_abs().leading_zeros() as usize);
            let q = p + bits;
            let v = x.powu(n.unsigned_abs(), q);
            return Ok(if n < 0 {
                BigFloat::from_word(1, 64).div(&v, q, RM)
            } else {
                v
            });
        }
    } else if x.is_negative() {
        return Ok(NAN);
    }
    if x.is_negative() {
        // huge even or odd integer exponent on a negative base
        let magnitude = pow_kernel(&x.abs(), y, policy)?;
        let even = y.ldexp(-1).is_integral();
        return Ok(if even { magnitude } else { magnitude.neg() });
    }

    // e^(y·ln x): the exponent needs as many extra bits as its integer part
    let ln_bits = 34;
    let inner = policy.inflated(magnitude_bits(y) + ln_bits);
    let q = inner.working();
    let a = y.mul(&log_kernel(x, &inner)?, q, RM);
    exp_kernel(&a, policy)
}
