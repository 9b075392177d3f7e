//! Process-wide choice between equivalent evaluation strategies.
//!
//! Every function produces the same result under either strategy; they differ
//! only in how aggressively arguments are reduced and in which π algorithm
//! feeds the constant cache.
//!
//! ## Selection
//!
//! The strategy is fixed once per process, on first use:
//!
//! 1. an explicit [`select`] call made before any evaluation,
//! 2. the `MPEVAL_STRATEGY` environment variable (`reference` or `tuned`),
//! 3. CPU probing: x86_64 with BMI2 + ADX (fast wide multiply-accumulate),
//!    or aarch64, selects [`Strategy::Tuned`]; anything else [`Strategy::Reference`].
//!
//! | Concern | `Reference` | `Tuned` |
//! |---------|-------------|---------|
//! | exp halving | until \|u\| < 2^−14 | ≈ √p halvings |
//! | log | plain atanh series | square roots first |
//! | atan | 2 argument halvings | ≈ √p / 2 halvings |
//! | π | Machin | Gauss–Legendre AGM |
//! | Newton roots | full precision throughout | precision doubling |

use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

use astro_float::BigFloat;

use crate::traits::MpFloat;

/// Environment variable consulted on first use.
pub const STRATEGY_ENV: &str = "MPEVAL_STRATEGY";

/// Evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Straightforward reductions; the baseline every other strategy matches.
    Reference,
    /// Deeper argument reduction and quadratically convergent constant algorithms.
    Tuned,
}

static ACTIVE: OnceLock<Strategy> = OnceLock::new();

/// The process-wide strategy, detected on first call.
#[inline]
pub fn active() -> Strategy {
    *ACTIVE.get_or_init(|| {
        let s = detect();
        tracing::debug!(strategy = %s, "selected evaluation strategy");
        s
    })
}

/// Fix the process-wide strategy. Fails with the already-active strategy if
/// one was selected (explicitly or by first use) earlier.
pub fn select(strategy: Strategy) -> Result<(), Strategy> {
    ACTIVE.set(strategy).map_err(|_| active())
}

/// Strategy from the environment, falling back to CPU probing.
pub fn detect() -> Strategy {
    if let Ok(v) = std::env::var(STRATEGY_ENV) {
        match v.parse() {
            Ok(s) => return s,
            Err(e) => tracing::warn!(%e, "ignoring {STRATEGY_ENV}"),
        }
    }
    probe()
}

#[cfg(target_arch = "x86_64")]
fn probe() -> Strategy {
    if is_x86_feature_detected!("bmi2") && is_x86_feature_detected!("adx") {
        Strategy::Tuned
    } else {
        Strategy::Reference
    }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> Strategy {
    Strategy::Tuned
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> Strategy {
    Strategy::Reference
}

impl Strategy {
    /// Number of halvings applied to an exp argument `r` before the series.
    pub(crate) fn exp_halvings(self, r: &BigFloat, p: usize) -> usize {
        let Some(e) = r.bit_exponent() else {
            return 0;
        };
        let depth = match self {
            Self::Reference => 14,
            Self::Tuned => isqrt(p).max(14) as i64,
        };
        (e + depth).max(0) as usize
    }

    /// Number of square roots taken of a log argument before the series.
    pub(crate) fn log_square_roots(self, p: usize) -> usize {
        match self {
            Self::Reference => 0,
            Self::Tuned => isqrt(p) / 2,
        }
    }

    /// Number of atan argument halvings.
    pub(crate) fn atan_halvings(self, p: usize) -> usize {
        match self {
            Self::Reference => 2,
            Self::Tuned => (isqrt(p) / 2).max(2),
        }
    }

    /// Whether Newton iterations start cheap and double their precision.
    pub(crate) fn newton_ladder(self) -> bool {
        matches!(self, Self::Tuned)
    }
}

fn isqrt(n: usize) -> usize {
    (n as f64).sqrt() as usize
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Tuned => write!(f, "tuned"),
        }
    }
}

/// Unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy {:?} (expected \"reference\" or \"tuned\")", self.0)
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" => Ok(Self::Reference),
            "tuned" => Ok(Self::Tuned),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mp;

    #[test]
    fn parse_names() {
        assert_eq!("reference".parse::<Strategy>(), Ok(Strategy::Reference));
        assert_eq!(" Tuned ".parse::<Strategy>(), Ok(Strategy::Tuned));
        assert!("fast".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Tuned.to_string(), "tuned");
    }

    #[test]
    fn active_is_stable() {
        let a = active();
        assert_eq!(active(), a);
        assert_eq!(select(Strategy::Reference).err().unwrap_or(a), a);
    }

    #[test]
    fn exp_halvings_reach_depth() {
        // |r| ~ 0.3 → exponent -1
        let r = mp(0.3, 64);
        assert_eq!(Strategy::Reference.exp_halvings(&r, 256), 13);
        assert!(Strategy::Tuned.exp_halvings(&r, 256) >= 13);
        assert_eq!(Strategy::Reference.exp_halvings(&BigFloat::new(64), 256), 0);
    }
}
