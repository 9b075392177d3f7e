use astro_float::{BigFloat, Exponent, RoundingMode, EXPONENT_MAX, EXPONENT_MIN, INF_NEG, INF_POS, WORD_BIT_SIZE};
use num_traits::ToPrimitive;

/// Rounding used for every intermediate operation at working precision.
pub(crate) const RM: RoundingMode = RoundingMode::ToEven;

/// Extension methods over [`BigFloat`] used throughout the engine.
///
/// Covers the handful of operations the primitive does not expose directly:
/// conversion to a machine double, exact power-of-two rescaling, and exact
/// integer extraction.
pub trait MpFloat: Sized {
    /// Nearest machine double (ties to even, saturating to ±∞ / 0).
    fn to_f64(&self) -> f64;

    /// `self · 2^k`, computed by adjusting the binary exponent only.
    fn ldexp(&self, k: i64) -> Self;

    /// Neither NaN nor infinite.
    fn is_finite(&self) -> bool;

    /// Binary exponent `e` with `2^(e−1) ≤ |self| < 2^e`, or `None` for zero,
    /// NaN and infinities.
    fn bit_exponent(&self) -> Option<i64>;

    /// Nearest integer, ties away from zero. `p` must cover the integer part.
    fn round_nearest(&self, p: usize) -> Self;

    /// Largest integer not above `self`.
    fn floor_int(&self, p: usize) -> Self;

    /// The value as an `i64` if it is an integer in range.
    fn to_i64_exact(&self) -> Option<i64>;

    /// True for finite integer values (zero included).
    fn is_integral(&self) -> bool;

    /// `self^n` by binary powering at precision `p`.
    fn powu(&self, n: u64, p: usize) -> Self;

    /// Strictly less than `other`. False if either side is NaN.
    fn below(&self, other: &Self) -> bool;

    /// Strictly greater than `other`. False if either side is NaN.
    fn above(&self, other: &Self) -> bool;

    /// Numerically equal to `other`.
    fn same_as(&self, other: &Self) -> bool;
}

impl MpFloat for BigFloat {
    fn to_f64(&self) -> f64 {
        if self.is_nan() {
            return f64::NAN;
        }
        if self.is_inf_pos() {
            return f64::INFINITY;
        }
        if self.is_inf_neg() {
            return f64::NEG_INFINITY;
        }
        if self.is_zero() {
            return 0.0;
        }
        let mut rounded = self.clone();
        if rounded.set_precision(53, RoundingMode::ToEven).is_err() {
            return f64::NAN;
        }
        let (Some(digits), Some(e)) = (rounded.mantissa_digits(), rounded.exponent()) else {
            return f64::NAN;
        };

        // Mantissa words are stored least significant first; the value is 0.m · 2^e.
        let word_scale = 2f64.powi(WORD_BIT_SIZE as i32);
        let mut frac = 0.0f64;
        let mut scale = 1.0f64;
        for w in digits.iter().rev() {
            scale /= word_scale;
            frac += (*w as f64) * scale;
        }
        let v = scale_pow2(frac, e as i64);
        if rounded.is_negative() {
            -v
        } else {
            v
        }
    }

    fn ldexp(&self, k: i64) -> Self {
        let Some(e) = self.exponent() else {
            return self.clone();
        };
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let target = e as i64 + k;
        if target > EXPONENT_MAX as i64 {
            return if self.is_negative() { INF_NEG } else { INF_POS };
        }
        if target < EXPONENT_MIN as i64 {
            return BigFloat::new(64);
        }
        let mut out = self.clone();
        out.set_exponent(target as Exponent);
        out
    }

    fn is_finite(&self) -> bool {
        !self.is_nan() && !self.is_inf()
    }

    fn bit_exponent(&self) -> Option<i64> {
        if self.is_zero() || !self.is_finite() {
            return None;
        }
        self.exponent().map(|e| e as i64)
    }

    fn round_nearest(&self, p: usize) -> Self {
        let Some(e) = self.bit_exponent() else {
            return self.clone();
        };
        if e <= -1 {
            return BigFloat::new(p);
        }
        let p = p.max(e as usize + 2);
        let mut half = BigFloat::from_f64(0.5, p);
        if self.is_negative() {
            half = half.neg();
        }
        self.add(&half, p + 2, RoundingMode::ToZero).int()
    }

    fn floor_int(&self, p: usize) -> Self {
        if !self.is_finite() {
            return self.clone();
        }
        let t = self.int();
        if self.is_negative() && !t.same_as(self) {
            t.sub(&BigFloat::from_word(1, 64), p, RM)
        } else {
            t
        }
    }

    fn to_i64_exact(&self) -> Option<i64> {
        if self.is_zero() {
            return Some(0);
        }
        let e = self.bit_exponent()?;
        if !(1..=63).contains(&e) {
            return None;
        }
        let digits = self.mantissa_digits()?;

        let mut top: u128 = 0;
        let mut taken = 0usize;
        for w in digits.iter().rev() {
            if (taken + 1) * WORD_BIT_SIZE > 128 {
                break;
            }
            top = (top << WORD_BIT_SIZE) | (*w as u128);
            taken += 1;
        }
        let bits = taken * WORD_BIT_SIZE;
        if bits < 128 {
            top <<= 128 - bits;
        }
        if digits[..digits.len() - taken].iter().any(|w| *w != 0) {
            return None;
        }
        if top << e != 0 {
            return None;
        }
        let magnitude = (top >> (128 - e)) as i64;
        Some(if self.is_negative() { -magnitude } else { magnitude })
    }

    fn is_integral(&self) -> bool {
        self.is_finite() && self.int().same_as(self)
    }

    fn powu(&self, n: u64, p: usize) -> Self {
        let mut result = BigFloat::from_word(1, p);
        let mut base = self.clone();
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base, p, RM);
            }
            n >>= 1;
            if n > 0 {
                base = base.mul(&base, p, RM);
            }
        }
        result
    }

    fn below(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Some(c) if c < 0)
    }

    fn above(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Some(c) if c > 0)
    }

    fn same_as(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Some(c) if c == 0)
    }
}

/// `f · 2^e` without intermediate overflow in `powi`.
fn scale_pow2(f: f64, e: i64) -> f64 {
    if e > 1100 {
        return f64::INFINITY;
    }
    if e < -1200 {
        return 0.0;
    }
    let half = (e / 2) as i32;
    f * 2f64.powi(half) * 2f64.powi(e as i32 - half)
}

/// Conversion of machine numbers into [`BigFloat`].
///
/// Integers convert exactly; floats convert through their exact binary value.
pub trait IntoMp {
    /// Convert at precision `p`.
    fn into_mp(self, p: usize) -> BigFloat;
}

impl<T: ToPrimitive> IntoMp for T {
    fn into_mp(self, p: usize) -> BigFloat {
        let f = self.to_f64().unwrap_or(f64::NAN);
        if let Some(i) = self.to_i64() {
            if i as f64 == f {
                return BigFloat::from_i64(i, p.max(64));
            }
        }
        if let Some(u) = self.to_u64() {
            if u as f64 == f {
                return BigFloat::from_u64(u, p.max(64));
            }
        }
        BigFloat::from_f64(f, p.max(64))
    }
}

/// Shorthand for [`IntoMp::into_mp`].
///
/// ```
/// use mpeval::{mp, MpFloat};
///
/// let x = mp(2.5, 128);
/// assert_eq!(x.to_f64(), 2.5);
/// assert_eq!(mp(-7, 128).to_i64_exact(), Some(-7));
/// ```
pub fn mp<T: IntoMp>(v: T, p: usize) -> BigFloat {
    v.into_mp(p)
}
