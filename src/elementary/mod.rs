//! Elementary transcendental functions.
//!
//! Every function takes a [`BigFloat`] argument and a target width in bits
//! (`0` selects [`DEFAULT_PRECISION`](crate::DEFAULT_PRECISION)), evaluates at
//! the target plus guard bits, and rounds once. Domain errors give NaN.
//!
//! # Functions
//!
//! | Function | Reduction | Kernel |
//! |----------|-----------|--------|
//! | [`exp`] | x = k·ln2 + r, then r/2^s | Taylor series, squared s times |
//! | [`log`], [`log2`], [`log10`] | x = m·2^e, m ∈ [1/√2, √2) | atanh series on (m−1)/(m+1) |
//! | [`sin`], [`cos`], [`tan`] | nearest multiple of π/2 | sine and cosine series |
//! | [`atan`], [`asin`], [`acos`], [`atan2`] | 1/x above 1, angle halving | atan series |
//! | [`sinh`], [`cosh`], [`tanh`] | — | eˣ and eˣ − 1 |
//! | [`asinh`], [`acosh`], [`atanh`] | — | logarithm, atanh series below 1/2 |
//! | [`sqrt`], [`pow`] | integer exponents by squaring | e^(y·ln x) |
//! | [`deg_norm`], [`rad_norm_2pi`], [`rad_norm_pi`] | floored remainder | — |
//! | [`deg_to_rad`], [`rad_to_deg`] | — | scaling by π/180 |
//!
//! Each unary function `f` also has `f_rounded(x, prec, rm)`, which rounds
//! with mode `rm` and reports the direction (see [`Rounded`](crate::Rounded)).
//!
//! # Example
//!
//! ```
//! use mpeval::elementary::{exp, log, sin, cos};
//! use mpeval::{mp, MpFloat};
//!
//! let rm = mpeval::RoundingMode::ToEven;
//! let x = mp(0.75, 64);
//! let s = sin(&x, 256);
//! let c = cos(&x, 256);
//! let one = s.mul(&s, 256, rm).add(&c.mul(&c, 256, rm), 256, rm);
//! assert!((one.to_f64() - 1.0).abs() < 1e-15);
//!
//! let back = log(&exp(&x, 256), 256);
//! assert!((back.to_f64() - 0.75).abs() < 1e-15);
//! ```

use crate::rounding::rounded_variants;

mod angle;
mod exp;
mod hyperbolic;
mod inverse;
mod log;
mod power;
mod trig;


pub use angle::{deg_norm, deg_to_rad, rad_norm_2pi, rad_norm_pi, rad_to_deg};
pub use exp::exp;
pub use hyperbolic::{acosh, asinh, atanh, cosh, sinh, tanh};
pub use inverse::{acos, asin, atan, atan2, atan2_rounded};
pub use log::{log, log10, log2};
pub use power::{pow, pow_rounded, sqrt};
pub use trig::{cos, sin, tan};

pub(crate) use exp::exp_kernel;
pub(crate) use log::log_kernel;
pub(crate) use trig::{cos_kernel, sin_kernel};

rounded_variants! {
    /// [`exp`] rounded once with mode `rm`, reporting the direction.
    exp_rounded => exp::exp_kernel, new, "exp";
    /// [`log`] rounded once with mode `rm`, reporting the direction.
    log_rounded => log::log_kernel, new, "log";
    /// [`sqrt`] rounded once with mode `rm`, reporting the direction.
    sqrt_rounded => power::sqrt_kernel, new, "sqrt";
    /// [`sin`] rounded once with mode `rm`, reporting the direction.
    sin_rounded => trig::sin_kernel, new, "sin";
    /// [`cos`] rounded once with mode `rm`, reporting the direction.
    cos_rounded => trig::cos_kernel, new, "cos";
    /// [`tan`] rounded once with mode `rm`, reporting the direction.
    tan_rounded => trig::tan_kernel, new, "tan";
    /// [`asin`] rounded once with mode `rm`, reporting the direction.
    asin_rounded => inverse::asin_kernel, new, "asin";
    /// [`acos`] rounded once with mode `rm`, reporting the direction.
    acos_rounded => inverse::acos_kernel, new, "acos";
    /// [`atan`] rounded once with mode `rm`, reporting the direction.
    atan_rounded => inverse::atan_kernel, new, "atan";
    /// [`sinh`] rounded once with mode `rm`, reporting the direction.
    sinh_rounded => hyperbolic::sinh_kernel, new, "sinh";
    /// [`cosh`] rounded once with mode `rm`, reporting the direction.
    cosh_rounded => hyperbolic::cosh_kernel, new, "cosh";
    /// [`tanh`] rounded once with mode `rm`, reporting the direction.
    tanh_rounded => hyperbolic::tanh_kernel, new, "tanh";
    /// [`asinh`] rounded once with mode `rm`, reporting the direction.
    asinh_rounded => hyperbolic::asinh_kernel, new, "asinh";
    /// [`acosh`] rounded once with mode `rm`, reporting the direction.
    acosh_rounded => hyperbolic::acosh_kernel, new, "acosh";
    /// [`atanh`] rounded once with mode `rm`, reporting the direction.
    atanh_rounded => hyperbolic::atanh_kernel, new, "atanh";
}
