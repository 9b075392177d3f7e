use astro_float::BigFloat;

use crate::convergence::ConvergencePolicy;
use crate::traits::{MpFloat, RM};

/// Σ cᵢ·Tᵢ(t) over the first `n_used` coefficients.
///
/// Runs b ← 2t·b₁ − b₂ + cᵢ from i = n_used − 1 down to 0 and returns
/// (b₀ − b₂)/2 + c₀/2. `n_used` is clamped to `coeffs.len()`; an empty
/// series is zero.
pub fn clenshaw(t: &BigFloat, coeffs: &[BigFloat], n_used: usize, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    let p = policy.working();
    let n = n_used.min(coeffs.len());
    if n == 0 {
        return BigFloat::new(p);
    }

    let two_t = t.ldexp(1);
    let mut b0 = BigFloat::new(p);
    let mut b1 = BigFloat::new(p);
    let mut b2 = BigFloat::new(p);
    for c in coeffs[..n].iter().rev() {
        b2 = b1;
        b1 = b0;
        b0 = two_t.mul(&b1, p, RM).sub(&b2, p, RM).add(c, p, RM);
    }
    let v = b0.sub(&b2, p, RM).add(&coeffs[0], p, RM).ldexp(-1);
    policy.finish(v)
}

/// d/dt Σ cᵢ·Tᵢ(t) = Σ i·cᵢ·Uᵢ₋₁(t) over the first `n_used` coefficients.
///
/// Same backward recurrence with each coefficient weighted by its index,
/// stopping at i = 1; the result is b₀.
pub fn clenshaw_derivative(t: &BigFloat, coeffs: &[BigFloat], n_used: usize, prec: usize) -> BigFloat {
    let policy = ConvergencePolicy::new(prec);
    let p = policy.working();
    let n = n_used.min(coeffs.len());

    let two_t = t.ldexp(1);
    let mut b0 = BigFloat::new(p);
    let mut b1 = BigFloat::new(p);
    for i in (1..n).rev() {
        let b2 = b1;
        b1 = b0;
        let weighted = coeffs[i].mul(&BigFloat::from_u64(i as u64, 64), p, RM);
        b0 = two_t.mul(&b1, p, RM).sub(&b2, p, RM).add(&weighted, p, RM);
    }
    policy.finish(b0)
}
