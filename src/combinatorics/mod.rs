//! Factorials and binomial coefficients.
//!
//! Small arguments are exact integer products, rounded once; large ones go
//! through the gamma function.
//!
//! | Function | Small | Large |
//! |----------|-------|-------|
//! | [`factorial`] | product for n ≤ 1024 | Γ(n + 1) |
//! | [`binomial`] | ratio product for min(k, n−k) ≤ 4096 | e^(lnΓ(n+1) − lnΓ(k+1) − lnΓ(n−k+1)) |
//!
//! # Example
//!
//! ```
//! use mpeval::combinatorics::{binomial, factorial};
//! use mpeval::MpFloat;
//!
//! assert_eq!(factorial(10, 64).to_f64(), 3628800.0);
//! assert_eq!(binomial(52, 5, 64).to_f64(), 2598960.0);
//! assert!(binomial(3, 7, 64).is_zero());
//! ```

use astro_float::BigFloat;

use crate::convergence::{settle, ConvergencePolicy, EvalError};
use crate::elementary::exp_kernel;
use crate::special::{gamma_kernel, lgamma_kernel};
use crate::traits::RM;

#[cfg(test)]
mod tests;

/// Largest n whose factorial is formed as a direct product.
const PRODUCT_LIMIT: u64 = 1024;

/// Largest min(k, n−k) for the incremental ratio product.
const RATIO_LIMIT: u64 = 4096;

/// n! rounded to `prec` bits.
pub fn factorial(n: u64, prec: usize) -> BigFloat {
    if n <= PRODUCT_LIMIT {
        let policy = ConvergencePolicy::new(prec);
        return policy.finish(product_range(2, n, policy.working()));
    }
    let policy = ConvergencePolicy::special(prec);
    let x = BigFloat::from_u64(n, 64).add(&BigFloat::from_word(1, 64), 128, RM);
    policy.finish(settle("factorial", gamma_kernel(&x, &policy)))
}

/// Binomial coefficient C(n, k); zero for k > n.
pub fn binomial(n: u64, k: u64, prec: usize) -> BigFloat {
    if k > n {
        return BigFloat::new(64);
    }
    let k = k.min(n - k);
    if k <= RATIO_LIMIT {
        let policy = ConvergencePolicy::new(prec);
        return policy.finish(ratio_product(n, k, &policy));
    }
    let policy = ConvergencePolicy::special(prec);
    policy.finish(settle("binomial", binomial_lgamma(n, k, &policy)))
}

/// lo·(lo+1)⋯hi at precision `p`; 1 for an empty range.
///
/// Factors are gathered into a machine word until it would overflow, so the
/// big multiplications number about hi·log₂hi / 64.
pub(crate) fn product_range(lo: u64, hi: u64, p: usize) -> BigFloat {
    let mut result = BigFloat::from_word(1, p);
    let mut word: u64 = 1;
    for i in lo..=hi {
        match word.checked_mul(i) {
            Some(w) => word = w,
            None => {
                result = result.mul(&BigFloat::from_u64(word, 64), p, RM);
                word = i;
            }
        }
    }
    if word > 1 {
        result = result.mul(&BigFloat::from_u64(word, 64), p, RM);
    }
    result
}

/// C(n, k) = Π (n−k+i)/i; every partial product C(n−k+i, i) is an integer,
/// so the steps are exact while the value fits the working precision.
fn ratio_product(n: u64, k: u64, policy: &ConvergencePolicy) -> BigFloat {
    // two roundings per step once the value outgrows the precision
    let p = policy.working() + 2 * (64 - k.leading_zeros() as usize) + 2;
    let mut r = BigFloat::from_word(1, p);
    for i in 1..=k {
        r = r
            .mul(&BigFloat::from_u64(n - k + i, 64), p, RM)
            .div(&BigFloat::from_u64(i, 64), p, RM);
    }
    r
}

fn binomial_lgamma(n: u64, k: u64, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    // ln C(n, k) < n·ln 2 carries up to log₂n integer bits into the exponent
    let inner = policy.inflated(64 - n.leading_zeros() as usize + 8);
    let p = inner.working();
    let one = BigFloat::from_word(1, 64);
    let shifted = |v: u64| BigFloat::from_u64(v, 64).add(&one, 128, RM);
    let ln = lgamma_kernel(&shifted(n), &inner)?
        .sub(&lgamma_kernel(&shifted(k), &inner)?, p, RM)
        .sub(&lgamma_kernel(&shifted(n - k), &inner)?, p, RM);
    exp_kernel(&ln, &inner)
}
