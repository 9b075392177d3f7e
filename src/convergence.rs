//! Working-precision and convergence policy shared by every series loop.
//!
//! A [`ConvergencePolicy`] is built fresh for each top-level call. It fixes
//! the target width, the guard bits carried on top of it, the iteration
//! ceiling, and the rounding mode of the single final rounding step.
//!
//! ```
//! use mpeval::ConvergencePolicy;
//!
//! let policy = ConvergencePolicy::new(256);
//! assert_eq!(policy.working(), 256 + 32);
//!
//! // prec = 0 selects the documented default
//! assert_eq!(ConvergencePolicy::new(0).target, mpeval::DEFAULT_PRECISION);
//! ```

use core::fmt;

use astro_float::{BigFloat, RoundingMode, NAN};

use crate::strategy::{self, Strategy};
use crate::traits::{MpFloat, RM};

/// Precision used when a caller passes `prec = 0`.
pub const DEFAULT_PRECISION: usize = 256;

/// Guard bits for elementary functions.
pub const DEFAULT_GUARD_BITS: usize = 32;

/// Guard bits for special functions with long or cancelling tails.
pub const SPECIAL_GUARD_BITS: usize = 64;

/// Lower bound on the iteration ceiling.
const MIN_ITER: usize = 1000;

/// Resolve a caller-supplied precision, mapping 0 to [`DEFAULT_PRECISION`].
#[inline]
pub fn resolve_precision(prec: usize) -> usize {
    if prec == 0 {
        DEFAULT_PRECISION
    } else {
        prec
    }
}

/// Errors from series, continued-fraction and Newton kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The iteration ceiling was reached before the convergence predicate held.
    ConvergenceFailure {
        /// Iterations performed.
        iterations: usize,
    },
    /// An asymptotic expansion started growing before reaching the threshold.
    Diverged {
        /// Index of the first growing term.
        at: usize,
    },
    /// An intermediate term became NaN or infinite.
    NotFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConvergenceFailure { iterations } => {
                write!(f, "no convergence after {iterations} iterations")
            }
            Self::Diverged { at } => write!(f, "asymptotic expansion diverged at term {at}"),
            Self::NotFinite => write!(f, "intermediate value is NaN or infinite"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Per-call precision and convergence settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergencePolicy {
    /// Bits of the final result.
    pub target: usize,
    /// Extra bits carried through the computation.
    pub guard_bits: usize,
    /// Iteration ceiling for any single loop.
    pub max_iter: usize,
    /// Rounding of the final result.
    pub rounding: RoundingMode,
    /// Speed strategy; results agree across strategies.
    pub strategy: Strategy,
}

impl ConvergencePolicy {
    /// Policy for elementary functions: [`DEFAULT_GUARD_BITS`] guard bits.
    pub fn new(prec: usize) -> Self {
        Self::with_guard(prec, DEFAULT_GUARD_BITS)
    }

    /// Policy for special functions: [`SPECIAL_GUARD_BITS`] guard bits.
    pub fn special(prec: usize) -> Self {
        Self::with_guard(prec, SPECIAL_GUARD_BITS)
    }

    fn with_guard(prec: usize, guard_bits: usize) -> Self {
        let target = resolve_precision(prec);
        Self {
            target,
            guard_bits,
            max_iter: iteration_ceiling(target + guard_bits),
            rounding: RoundingMode::ToEven,
            strategy: strategy::active(),
        }
    }

    /// Replace the guard bits. A default iteration ceiling follows the new
    /// working precision; an explicit one is kept.
    pub fn with_guard_bits(mut self, guard_bits: usize) -> Self {
        let derived = self.max_iter == iteration_ceiling(self.working());
        self.guard_bits = guard_bits;
        if derived {
            self.max_iter = iteration_ceiling(self.working());
        }
        self
    }

    /// Replace the iteration ceiling.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Replace the final rounding mode.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Replace the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Working precision: target plus guard bits.
    #[inline]
    pub fn working(&self) -> usize {
        self.target + self.guard_bits
    }

    /// A derived policy carrying `extra` more guard bits.
    pub fn inflated(&self, extra: usize) -> Self {
        self.with_guard_bits(self.guard_bits + extra)
    }

    /// |term| < 2^(−working) · |reference|; absolute when `reference` is zero.
    pub fn negligible(&self, term: &BigFloat, reference: &BigFloat) -> bool {
        self.within(term, reference, 0)
    }

    /// Like [`negligible`](Self::negligible) but `slack` bits looser. Used by
    /// Newton and AGM iterations whose last correction sits at rounding level.
    pub fn settled(&self, delta: &BigFloat, reference: &BigFloat) -> bool {
        self.within(delta, reference, 8)
    }

    fn within(&self, term: &BigFloat, reference: &BigFloat, slack: usize) -> bool {
        if term.is_zero() {
            return true;
        }
        let Some(te) = term.bit_exponent() else {
            return false;
        };
        let re = reference.bit_exponent().unwrap_or(0);
        te <= re - (self.working() - slack.min(self.guard_bits)) as i64
    }

    /// Round a wide result to the target precision.
    ///
    /// `BigFloat` stores its mantissa in 64-bit words and rounds every
    /// precision up to a whole word, so a 53-bit target yields a 64-bit
    /// result. The rounding mode applies at that word boundary.
    pub fn finish(&self, mut value: BigFloat) -> BigFloat {
        if value.is_finite() && !value.is_zero() && value.set_precision(self.target, self.rounding).is_err() {
            return NAN;
        }
        value
    }
}

impl Default for ConvergencePolicy {
    /// Elementary policy at [`DEFAULT_PRECISION`].
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

fn iteration_ceiling(working: usize) -> usize {
    MIN_ITER.max(4 * working)
}

/// Sum `first + Σ next(n, term_{n−1})` for n = 1, 2, … until a term is
/// negligible against the running sum.
pub(crate) fn sum_series<F>(
    policy: &ConvergencePolicy,
    first: BigFloat,
    mut next: F,
) -> Result<BigFloat, EvalError>
where
    F: FnMut(usize, &BigFloat) -> BigFloat,
{
    let p = policy.working();
    let mut sum = first.clone();
    let mut term = first;
    if term.is_zero() {
        return Ok(sum);
    }
    for n in 1..=policy.max_iter {
        term = next(n, &term);
        if !term.is_finite() {
            return Err(EvalError::NotFinite);
        }
        sum = sum.add(&term, p, RM);
        if policy.negligible(&term, &sum) {
            return Ok(sum);
        }
    }
    Err(EvalError::ConvergenceFailure {
        iterations: policy.max_iter,
    })
}

/// Sum a divergent asymptotic expansion, stopping at the first negligible
/// term. Fails with [`EvalError::Diverged`] if the terms start growing first.
pub(crate) fn sum_asymptotic<F>(
    policy: &ConvergencePolicy,
    first: BigFloat,
    mut next: F,
) -> Result<BigFloat, EvalError>
where
    F: FnMut(usize, &BigFloat) -> BigFloat,
{
    let p = policy.working();
    let mut sum = first.clone();
    let mut term = first;
    for n in 1..=policy.max_iter {
        let t = next(n, &term);
        if !t.is_finite() {
            return Err(EvalError::NotFinite);
        }
        if t.abs().above(&term.abs()) {
            return Err(EvalError::Diverged { at: n });
        }
        term = t;
        sum = sum.add(&term, p, RM);
        if policy.negligible(&term, &sum) {
            return Ok(sum);
        }
    }
    Err(EvalError::ConvergenceFailure {
        iterations: policy.max_iter,
    })
}

/// Convert a kernel failure into the NaN sentinel, logging it once.
pub(crate) fn settle(function: &'static str, result: Result<BigFloat, EvalError>) -> BigFloat {
    match result {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(function, %err, "evaluation failed, returning NaN");
            NAN
        }
    }
}

/// Bits needed to hold `|x|` as an integer part; 0 when |x| < 1.
#[inline]
pub(crate) fn magnitude_bits(x: &BigFloat) -> usize {
    x.bit_exponent().map_or(0, |e| e.max(0) as usize)
}

/// Bits lost to cancellation when `x` is small; 0 when |x| ≥ 1.
#[inline]
pub(crate) fn smallness_bits(x: &BigFloat) -> usize {
    x.bit_exponent().map_or(0, |e| (-e).max(0) as usize)
}
