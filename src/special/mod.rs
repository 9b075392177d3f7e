//! Special mathematical functions.
//!
//! Provides gamma, log-gamma, the error functions and integer-order Bessel
//! functions of the first and second kind. Each function selects its
//! expansion from the argument and the working precision, runs it with
//! [`SPECIAL_GUARD_BITS`](crate::convergence::SPECIAL_GUARD_BITS) guard bits
//! plus whatever the regime loses to cancellation, and rounds once.
//!
//! # Functions
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`gamma`] | Gamma function Γ(x) |
//! | [`lgamma`] | Log-gamma ln \|Γ(x)\| |
//! | [`erf`] | Error function |
//! | [`erfc`] | Complementary error function 1−erf(x) |
//! | [`bessel_j`] | Bessel function of the first kind Jₙ(x) |
//! | [`bessel_y`] | Bessel function of the second kind Yₙ(x) |
//!
//! # Regimes
//!
//! | Function | Argument | Method |
//! |----------|----------|--------|
//! | Γ | positive integer ≤ 1025 | exact product |
//! | Γ | x < ½ | reflection π / (sin(πx)·Γ(1−x)) |
//! | Γ | ≤ 48 target bits | Lanczos (g = 7, n = 9) after reduction into [½, 3/2) |
//! | Γ | otherwise | Spouge with a ≈ 0.38·working |
//! | erf | \|x\| < 0.8 | alternating Taylor series |
//! | erfc | 0.8 ≤ \|x\| < max(2, ½√(p·ln2)) | 1 − Kummer series |
//! | erfc | beyond | Laplace continued fraction, or the asymptotic series once x² ≥ p·ln2 |
//! | Jₙ, Yₙ | x ≥ 0.35·p + 2 | Hankel expansion P, Q |
//! | Jₙ | otherwise | power series with e^x cancellation guard |
//! | Yₙ | otherwise | Y₀, Y₁ series, upward recurrence |
//!
//! # Example
//!
//! ```
//! use mpeval::special::{gamma, lgamma, erf, bessel_j};
//! use mpeval::{mp, MpFloat};
//!
//! // Γ(5) = 4! = 24
//! assert_eq!(gamma(&mp(5, 64), 256).to_f64(), 24.0);
//!
//! // ln Γ(1) = 0
//! assert!(lgamma(&mp(1, 64), 256).is_zero());
//!
//! assert!((erf(&mp(1, 64), 256).to_f64() - 0.8427007929497149).abs() < 1e-15);
//! assert_eq!(bessel_j(0, &mp(0, 64), 256).to_f64(), 1.0);
//! ```

use crate::rounding::rounded_variants;

mod bessel;
mod erf_fn;
mod gamma_fn;


pub use bessel::{bessel_j, bessel_j_rounded, bessel_y, bessel_y_rounded};
pub use erf_fn::{erf, erfc};
pub use gamma_fn::{gamma, lgamma};

pub(crate) use gamma_fn::{gamma_kernel, lgamma_kernel};

rounded_variants! {
    /// [`gamma`] rounded once with mode `rm`, reporting the direction.
    gamma_rounded => gamma_fn::gamma_kernel, special, "gamma";
    /// [`lgamma`] rounded once with mode `rm`, reporting the direction.
    lgamma_rounded => gamma_fn::lgamma_kernel, special, "lgamma";
    /// [`erf`] rounded once with mode `rm`, reporting the direction.
    erf_rounded => erf_fn::erf_kernel, special, "erf";
    /// [`erfc`] rounded once with mode `rm`, reporting the direction.
    erfc_rounded => erf_fn::erfc_kernel, special, "erfc";
}

// ---------------------------------------------------------------------------
// Lanczos approximation constants (g = 7, n = 9)
// Coefficients from Paul Godfrey / Boost / CPython.
// ---------------------------------------------------------------------------

/// Lanczos parameter g.
pub(crate) const LANCZOS_G: f64 = 7.0;

/// Lanczos series coefficients (n = 9).
pub(crate) const LANCZOS_COEFFS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Largest target width the Lanczos coefficients are accurate for.
pub(crate) const LANCZOS_MAX_BITS: usize = 48;
