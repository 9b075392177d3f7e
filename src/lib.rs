//! # mpeval
//!
//! Arbitrary-precision evaluation of elementary and special functions over
//! [`astro_float::BigFloat`]. Every function takes a target width in bits,
//! evaluates at that width plus guard bits, and rounds once.
//!
//! ## Quick start
//!
//! ```
//! use mpeval::{elementary::exp, special::gamma, mp, MpFloat};
//!
//! let x = mp(0, 64);
//! assert_eq!(exp(&x, 256).to_f64(), 1.0);
//!
//! let g = gamma(&mp(5, 64), 256);
//! assert_eq!(g.to_f64(), 24.0);
//!
//! // prec = 0 selects DEFAULT_PRECISION
//! let pi = mpeval::consts::pi(0);
//! assert!(pi.same_as(&mpeval::consts::pi(mpeval::DEFAULT_PRECISION)));
//! ```
//!
//! ## Modules
//!
//! - [`consts`] — π, e, ln 2, ln 10, γ, Catalan's constant, √2, √3 and φ,
//!   computed once per bit width and cached process-wide.
//!
//! - [`elementary`] — exp, log, trigonometric, inverse trigonometric,
//!   hyperbolic and inverse hyperbolic functions, `sqrt`, `pow`, and angle
//!   normalization. Each reduces its argument into a fast-converging range
//!   and sums a power series.
//!
//! - [`special`] — Γ, ln|Γ|, erf, erfc, and integer-order Bessel Jₙ, Yₙ,
//!   switching between series, asymptotic expansions, continued fractions
//!   and recurrences by argument range.
//!
//! - [`roots`] — cube and n-th roots by Newton iteration.
//!
//! - [`combinatorics`] — factorials and binomial coefficients.
//!
//! - [`chebyshev`] — Clenshaw evaluation of Chebyshev series and
//!   ephemeris-style position/velocity segments. Requires `chebyshev` feature.
//!
//! - [`convergence`] — the per-call [`ConvergencePolicy`]: guard bits,
//!   iteration ceiling, convergence predicate and final rounding.
//!
//! - [`strategy`] — process-wide choice between the reference and the
//!   tuned evaluation strategies. Results agree; only speed differs.
//!
//! - [`traits`] — [`MpFloat`] helpers over `BigFloat` and the [`IntoMp`]
//!   conversion from machine numbers.
//!
//! ## Errors
//!
//! Domain errors (log of a negative number, asin outside [−1, 1], Yₙ at
//! x ≤ 0, …) return NaN. Poles of Γ return +∞. If a series exhausts its
//! iteration ceiling the function logs a `tracing` warning and returns NaN.
//!
//! ## Cargo features
//!
//! | Feature     | Default | Description |
//! |-------------|---------|-------------|
//! | `chebyshev` | yes     | Clenshaw evaluation and `ChebyshevSegment` |
//! | `all`       | no      | All features |

pub mod combinatorics;
pub mod consts;
pub mod convergence;
pub mod elementary;
pub mod roots;
pub mod rounding;
pub mod special;
pub mod strategy;
pub mod traits;

#[cfg(feature = "chebyshev")]
pub mod chebyshev;

pub use astro_float::{BigFloat, RoundingMode, Sign};
pub use convergence::{ConvergencePolicy, EvalError, DEFAULT_PRECISION};
pub use rounding::Rounded;
pub use strategy::Strategy;
pub use traits::{mp, IntoMp, MpFloat};

pub use combinatorics::{binomial, factorial};
pub use consts::{constant, Constant};
pub use elementary::{
    acos, acosh, asin, asinh, atan, atan2, atanh, cos, cosh, exp, log, log10, log2, pow, sin,
    sinh, sqrt, tan, tanh,
};
pub use roots::{cbrt, nth_root};
pub use special::{bessel_j, bessel_y, erf, erfc, gamma, lgamma};

#[cfg(feature = "chebyshev")]
pub use chebyshev::{clenshaw, clenshaw_derivative, ChebyshevSegment, StateVector};
