//! Single final rounding with a reported direction.
//!
//! Every function is evaluated at `target + guard` bits and rounded exactly
//! once. The `*_rounded` variants keep the wide value long enough to report
//! which way that rounding went.
//!
//! The target is honored in whole 64-bit words: `prec = 53` rounds to 64
//! bits, and the reported direction is that of the 64-bit rounding.

use core::cmp::Ordering;

use astro_float::BigFloat;

use crate::convergence::ConvergencePolicy;
use crate::traits::MpFloat;

/// A result rounded to the target precision, with the rounding direction
/// relative to the wide (guard-bit) value.
///
/// The target is rounded up to a multiple of 64 bits, as
/// [`ConvergencePolicy::finish`] does.
#[derive(Debug, Clone)]
pub struct Rounded {
    /// The rounded value.
    pub value: BigFloat,
    /// `Less` if `value` lies below the wide result, `Greater` if above,
    /// `Equal` if the wide result was already representable.
    pub direction: Ordering,
}

impl Rounded {
    /// Round `wide` according to `policy`.
    pub fn from_wide(wide: BigFloat, policy: &ConvergencePolicy) -> Self {
        let value = policy.finish(wide.clone());
        let direction = if !value.is_finite() || !wide.is_finite() {
            Ordering::Equal
        } else if value.below(&wide) {
            Ordering::Less
        } else if value.above(&wide) {
            Ordering::Greater
        } else {
            Ordering::Equal
        };
        Self { value, direction }
    }

    /// Direction as −1, 0 or +1.
    pub fn ternary(&self) -> i32 {
        match self.direction {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

/// Generate `name_rounded(x, prec, rm) -> Rounded` wrappers around unary
/// kernels of shape `fn(&BigFloat, &ConvergencePolicy) -> Result<BigFloat, EvalError>`.
macro_rules! rounded_variants {
    ($($(#[$meta:meta])* $name:ident => $kernel:path, $policy:ident, $label:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(
                x: &astro_float::BigFloat,
                prec: usize,
                rm: astro_float::RoundingMode,
            ) -> $crate::rounding::Rounded {
                let policy = $crate::convergence::ConvergencePolicy::$policy(prec).with_rounding(rm);
                let wide = $crate::convergence::settle($label, $kernel(x, &policy));
                $crate::rounding::Rounded::from_wide(wide, &policy)
            }
        )*
    };
}

pub(crate) use rounded_variants;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RM;
    use astro_float::RoundingMode;

    fn third(p: usize) -> BigFloat {
        BigFloat::from_word(1, p).div(&BigFloat::from_word(3, p), p, RM)
    }

    #[test]
    fn exact_value_rounds_equal() {
        let policy = ConvergencePolicy::new(64);
        let r = Rounded::from_wide(BigFloat::from_word(5, 128), &policy);
        assert_eq!(r.direction, Ordering::Equal);
        assert_eq!(r.ternary(), 0);
    }

    #[test]
    fn directed_rounding_reports_direction() {
        let up = ConvergencePolicy::new(64).with_rounding(RoundingMode::Up);
        let r = Rounded::from_wide(third(256), &up);
        assert_eq!(r.ternary(), 1);

        let down = ConvergencePolicy::new(64).with_rounding(RoundingMode::Down);
        let r = Rounded::from_wide(third(256), &down);
        assert_eq!(r.ternary(), -1);
    }

    #[test]
    fn nan_is_equal() {
        let policy = ConvergencePolicy::new(64);
        let r = Rounded::from_wide(astro_float::NAN, &policy);
        assert!(r.value.is_nan());
        assert_eq!(r.direction, Ordering::Equal);
    }
}
