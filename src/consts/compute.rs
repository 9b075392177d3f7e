//! Constant-specific algorithms. All run at `policy.working()` bits.

use astro_float::BigFloat;

use crate::convergence::{settle, sum_series, ConvergencePolicy, EvalError};
use crate::elementary::log_kernel;
use crate::strategy::Strategy;
use crate::traits::{MpFloat, RM};

use super::Constant;

/// Compute `c` with `guard` extra bits and round to `prec`.
pub(super) fn evaluate(c: Constant, prec: usize, guard: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec).with_guard_bits(guard);
    let value = match c {
        Constant::Pi => pi(&policy),
        Constant::E => e(&policy),
        Constant::Ln2 => ln2(&policy),
        Constant::Ln10 => ln10(&policy),
        Constant::EulerGamma => euler_gamma(&policy),
        Constant::Catalan => catalan(&policy),
        Constant::Sqrt2 => Ok(sqrt_of(2, &policy)),
        Constant::Sqrt3 => Ok(sqrt_of(3, &policy)),
        Constant::Phi => Ok(phi(&policy)),
    };
    policy.finish(settle("constant", value))
}

fn pi(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    match policy.strategy {
        Strategy::Reference => pi_machin(policy),
        Strategy::Tuned => pi_agm(policy),
    }
}

/// π = 16·atan(1/5) − 4·atan(1/239).
pub(crate) fn pi_machin(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let a = atan_inv(5, policy)?.ldexp(4);
    let b = atan_inv(239, policy)?.ldexp(2);
    Ok(a.sub(&b, p, RM))
}

/// Gauss–Legendre arithmetic-geometric mean iteration for π.
pub(crate) fn pi_agm(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working() + 16;
    let mut a = BigFloat::from_word(1, p);
    let mut b = BigFloat::from_word(2, p).sqrt(p, RM).ldexp(-1);
    let mut t = BigFloat::from_word(1, p).ldexp(-2);
    let mut k = 0i64;

    for _ in 0..policy.max_iter {
        let next = a.add(&b, p, RM).ldexp(-1);
        b = a.mul(&b, p, RM).sqrt(p, RM);
        let d = a.sub(&next, p, RM);
        t = t.sub(&d.mul(&d, p, RM).ldexp(k), p, RM);
        a = next;
        k += 1;
        if policy.settled(&a.sub(&b, p, RM), &a) {
            let s = a.add(&b, p, RM);
            return Ok(s.mul(&s, p, RM).div(&t.ldexp(2), p, RM));
        }
    }
    Err(EvalError::ConvergenceFailure {
        iterations: policy.max_iter,
    })
}

/// atan(1/m) = Σ (−1)ⁿ / ((2n+1)·m^(2n+1)).
pub(crate) fn atan_inv(m: u64, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    inverse_series(m, policy, true)
}

/// atanh(1/m) = Σ 1 / ((2n+1)·m^(2n+1)).
pub(crate) fn atanh_inv(m: u64, policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    inverse_series(m, policy, false)
}

fn inverse_series(m: u64, policy: &ConvergencePolicy, alternating: bool) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let m2 = BigFloat::from_u64(m * m, 64);
    let first = BigFloat::from_word(1, p).div(&BigFloat::from_u64(m, 64), p, RM);
    sum_series(policy, first, |n, term| {
        let n = n as u64;
        let t = term
            .mul(&BigFloat::from_u64(2 * n - 1, 64), p, RM)
            .div(&BigFloat::from_u64(2 * n + 1, 64), p, RM)
            .div(&m2, p, RM);
        if alternating {
            t.neg()
        } else {
            t
        }
    })
}

fn e(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    sum_series(policy, BigFloat::from_word(1, p), |n, term| {
        term.div(&BigFloat::from_u64(n as u64, 64), p, RM)
    })
}

fn ln2(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    Ok(atanh_inv(3, policy)?.ldexp(1))
}

fn ln10(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let ln2 = ln2(policy)?;
    let ln_five_quarters = atanh_inv(9, policy)?.ldexp(1);
    Ok(ln2.mul(&BigFloat::from_word(3, 64), p, RM).add(&ln_five_quarters, p, RM))
}

/// Brent–McMillan: γ = U/V − O(e^(−4n)) with n ≈ p·ln2/4, where
/// V = Σ (nᵏ/k!)² and U = Σ (nᵏ/k!)²·(H_k − ln n).
fn euler_gamma(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let policy = policy.inflated(16);
    let p = policy.working();
    let n = (p as f64 * core::f64::consts::LN_2 / 4.0).ceil() as u64 + 1;
    let n2 = BigFloat::from_u64(n * n, 128);

    let mut a = log_kernel(&BigFloat::from_u64(n, 64), &policy)?.neg();
    let mut b = BigFloat::from_word(1, p);
    let mut u = a.clone();
    let mut v = b.clone();

    for k in 1..=policy.max_iter as u64 {
        let kf = BigFloat::from_u64(k, 64);
        b = b.mul(&n2, p, RM).div(&BigFloat::from_u64(k * k, 128), p, RM);
        a = a.mul(&n2, p, RM).div(&kf, p, RM).add(&b, p, RM).div(&kf, p, RM);
        u = u.add(&a, p, RM);
        v = v.add(&b, p, RM);
        if k > n && policy.negligible(&a, &u) && policy.negligible(&b, &v) {
            return Ok(u.div(&v, p, RM));
        }
    }
    Err(EvalError::ConvergenceFailure {
        iterations: policy.max_iter,
    })
}

/// Ramanujan's series for Catalan's constant.
fn catalan(policy: &ConvergencePolicy) -> Result<BigFloat, EvalError> {
    let p = policy.working();
    let pi = super::at(Constant::Pi, p);
    let two_plus_sqrt3 = sqrt_of(3, policy).add(&BigFloat::from_word(2, 64), p, RM);
    let log_term = log_kernel(&two_plus_sqrt3, policy)?;

    let s = sum_series(policy, BigFloat::from_word(1, p), |n, term| {
        let n = n as u64;
        let odd = 2 * n + 1;
        term.mul(&BigFloat::from_u64(n * (2 * n - 1), 64), p, RM)
            .div(&BigFloat::from_u64(2 * odd * odd, 64), p, RM)
    })?;

    let head = pi.mul(&log_term, p, RM).ldexp(-3);
    let tail = s.mul(&BigFloat::from_word(3, 64), p, RM).ldexp(-3);
    Ok(head.add(&tail, p, RM))
}

fn sqrt_of(n: u64, policy: &ConvergencePolicy) -> BigFloat {
    let p = policy.working();
    BigFloat::from_u64(n, 64).sqrt(p, RM)
}

fn phi(policy: &ConvergencePolicy) -> BigFloat {
    let p = policy.working();
    sqrt_of(5, policy)
        .add(&BigFloat::from_word(1, 64), p, RM)
        .ldexp(-1)
}
