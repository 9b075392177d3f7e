//! Chebyshev series evaluation and ephemeris-style segments.
//!
//! [`clenshaw`] sums Σ cᵢ·Tᵢ(t) by Clenshaw's backward recurrence and
//! [`clenshaw_derivative`] sums the derivative Σ i·cᵢ·Uᵢ₋₁(t) the same way.
//! A [`ChebyshevSegment`] holds one block of coefficients per Cartesian
//! component over a time window and turns a time into a [`StateVector`].
//!
//! # Example
//!
//! ```
//! use mpeval::chebyshev::{clenshaw, ChebyshevSegment};
//! use mpeval::{mp, MpFloat};
//!
//! // 1 + 2·T₁(t) + 3·T₂(t) at t = 0.5: 1 + 1 + 3·(−0.5)
//! let c = [mp(1, 64), mp(2, 64), mp(3, 64)];
//! assert_eq!(clenshaw(&mp(0.5, 64), &c, 3, 128).to_f64(), 0.5);
//!
//! // x(t) = t, y = 0, z = 1 over [0, 10]
//! let coeffs = vec![
//!     mp(0, 64), mp(1, 64),
//!     mp(0, 64), mp(0, 64),
//!     mp(1, 64), mp(0, 64),
//! ];
//! let seg = ChebyshevSegment::new(mp(0, 64), mp(10, 64), coeffs, 2, 2).unwrap();
//! let state = seg.evaluate(&mp(7.5, 64), 128).unwrap();
//! assert_eq!(state.position[0].to_f64(), 0.5);
//! assert_eq!(state.velocity[0].to_f64(), 0.2);
//! ```

mod clenshaw;
mod segment;

#[cfg(test)]
mod tests;

pub use clenshaw::{clenshaw, clenshaw_derivative};
pub use segment::{ChebyshevSegment, StateVector, COMPONENTS};

/// Errors from segment construction and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChebyshevError {
    /// The window end does not lie after its start.
    EmptyWindow,
    /// The requested time lies outside the segment window.
    OutOfWindow,
    /// `n_used` is zero or exceeds the coefficients per component.
    TermCount,
    /// The coefficient count is not [`COMPONENTS`] blocks of `n_coeffs`.
    ComponentCount,
}

impl core::fmt::Display for ChebyshevError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChebyshevError::EmptyWindow => write!(f, "segment window end must follow its start"),
            ChebyshevError::OutOfWindow => write!(f, "time lies outside the segment window"),
            ChebyshevError::TermCount => write!(f, "terms used must be between 1 and the coefficients per component"),
            ChebyshevError::ComponentCount => {
                write!(f, "coefficient count must be {COMPONENTS} blocks of equal length")
            }
        }
    }
}

impl std::error::Error for ChebyshevError {}
