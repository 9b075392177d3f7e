//! Precision-indexed mathematical constants.
//!
//! Each constant is computed once per distinct bit width and cached for the
//! life of the process. A lookup at a new width computes a separate entry; an
//! existing entry is never recomputed or evicted, so repeated lookups return
//! identical values.
//!
//! Population is exactly-once per `(constant, bits)` key: the map lock is held
//! only to find or insert the key's slot, and the computation itself runs
//! under that slot's own [`OnceLock`]. Unrelated keys never wait on each other.
//!
//! | Constant | Algorithm |
//! |----------|-----------|
//! | [`Constant::Pi`] | Machin (reference) / Gauss–Legendre AGM (tuned) |
//! | [`Constant::E`] | Σ 1/n! |
//! | [`Constant::Ln2`] | 2·atanh(1/3) |
//! | [`Constant::Ln10`] | 3·ln 2 + 2·atanh(1/9) |
//! | [`Constant::EulerGamma`] | Brent–McMillan |
//! | [`Constant::Catalan`] | Ramanujan: (π/8)·ln(2+√3) + (3/8)·Σ 1/((2n+1)²·C(2n,n)) |
//! | [`Constant::Sqrt2`], [`Constant::Sqrt3`] | square root |
//! | [`Constant::Phi`] | (1 + √5) / 2 |
//!
//! # Example
//!
//! ```
//! use mpeval::consts::{constant, Constant};
//! use mpeval::MpFloat;
//!
//! let pi = constant(Constant::Pi, 256);
//! assert!((pi.to_f64() - core::f64::consts::PI).abs() < 1e-15);
//! ```

use core::fmt;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use astro_float::BigFloat;
use parking_lot::RwLock;

use crate::convergence::resolve_precision;

mod compute;

#[cfg(test)]
mod tests;

/// Extra bits each constant is computed with before rounding to the key width.
const CONSTANT_GUARD_BITS: usize = 32;

/// Internal lookups are rounded up to a multiple of this, to keep the number
/// of cache entries small.
const INTERNAL_QUANTUM: usize = 64;

/// Named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number e
    E,
    /// ln 2
    Ln2,
    /// ln 10
    Ln10,
    /// Euler–Mascheroni γ
    EulerGamma,
    /// Catalan's constant G
    Catalan,
    /// √2
    Sqrt2,
    /// √3
    Sqrt3,
    /// Golden ratio φ
    Phi,
}

impl Constant {
    /// All constants, in declaration order.
    pub const ALL: [Constant; 9] = [
        Constant::Pi,
        Constant::E,
        Constant::Ln2,
        Constant::Ln10,
        Constant::EulerGamma,
        Constant::Catalan,
        Constant::Sqrt2,
        Constant::Sqrt3,
        Constant::Phi,
    ];
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::Ln2 => "ln2",
            Constant::Ln10 => "ln10",
            Constant::EulerGamma => "euler_gamma",
            Constant::Catalan => "catalan",
            Constant::Sqrt2 => "sqrt2",
            Constant::Sqrt3 => "sqrt3",
            Constant::Phi => "phi",
        };
        f.write_str(name)
    }
}

type Slot = Arc<OnceLock<BigFloat>>;

/// Memoization table keyed by `(constant, bits)`.
#[derive(Default)]
pub struct ConstantCache {
    slots: RwLock<HashMap<(Constant, usize), Slot>>,
}

impl ConstantCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache behind [`constant`].
    pub fn global() -> &'static ConstantCache {
        static GLOBAL: OnceLock<ConstantCache> = OnceLock::new();
        GLOBAL.get_or_init(ConstantCache::new)
    }

    /// Value of `c` rounded to `prec` bits (`0` selects the default precision).
    pub fn get(&self, c: Constant, prec: usize) -> BigFloat {
        let prec = resolve_precision(prec);
        let slot = self.slot(c, prec);
        slot.get_or_init(|| {
            tracing::debug!(constant = %c, bits = prec, "computing constant");
            compute::evaluate(c, prec, CONSTANT_GUARD_BITS)
        })
        .clone()
    }

    /// True if `(c, prec)` has been computed.
    pub fn contains(&self, c: Constant, prec: usize) -> bool {
        let prec = resolve_precision(prec);
        self.slots
            .read()
            .get(&(c, prec))
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// True if no key has been requested.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, c: Constant, prec: usize) -> Slot {
        if let Some(slot) = self.slots.read().get(&(c, prec)) {
            return slot.clone();
        }
        self.slots.write().entry((c, prec)).or_default().clone()
    }
}

impl fmt::Debug for ConstantCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantCache").field("entries", &self.len()).finish()
    }
}

/// Value of `c` at `prec` bits from the process-wide cache.
pub fn constant(c: Constant, prec: usize) -> BigFloat {
    ConstantCache::global().get(c, prec)
}

/// Lookup for engine internals: at least `p` bits, with `p` rounded up to a
/// multiple of 64.
pub(crate) fn at(c: Constant, p: usize) -> BigFloat {
    let p = p.div_ceil(INTERNAL_QUANTUM) * INTERNAL_QUANTUM;
    constant(c, p)
}

/// π at `prec` bits.
pub fn pi(prec: usize) -> BigFloat {
    constant(Constant::Pi, prec)
}

/// e at `prec` bits.
pub fn e(prec: usize) -> BigFloat {
    constant(Constant::E, prec)
}

/// ln 2 at `prec` bits.
pub fn ln2(prec: usize) -> BigFloat {
    constant(Constant::Ln2, prec)
}

/// ln 10 at `prec` bits.
pub fn ln10(prec: usize) -> BigFloat {
    constant(Constant::Ln10, prec)
}

/// Euler–Mascheroni γ at `prec` bits.
pub fn euler_gamma(prec: usize) -> BigFloat {
    constant(Constant::EulerGamma, prec)
}

/// Catalan's constant at `prec` bits.
pub fn catalan(prec: usize) -> BigFloat {
    constant(Constant::Catalan, prec)
}
