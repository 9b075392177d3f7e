use astro_float::BigFloat;

use crate::convergence::ConvergencePolicy;
use crate::traits::{MpFloat, RM};

use super::clenshaw::{clenshaw, clenshaw_derivative};
use super::ChebyshevError;

/// Cartesian components per segment (x, y, z).
pub const COMPONENTS: usize = 3;

/// Position and velocity at one instant.
#[derive(Debug, Clone)]
pub struct StateVector {
    /// x, y, z.
    pub position: [BigFloat; COMPONENTS],
    /// dx/dτ, dy/dτ, dz/dτ in units of the segment's time axis.
    pub velocity: [BigFloat; COMPONENTS],
}

/// One time window of a Chebyshev ephemeris.
///
/// `coeffs` holds [`COMPONENTS`] consecutive blocks of `n_coeffs`
/// coefficients; evaluation uses the first `n_used` of each block.
#[derive(Debug, Clone)]
pub struct ChebyshevSegment {
    start: BigFloat,
    end: BigFloat,
    coeffs: Vec<BigFloat>,
    n_coeffs: usize,
    n_used: usize,
}

impl ChebyshevSegment {
    /// Validate and build a segment over `[start, end]`.
    pub fn new(
        start: BigFloat,
        end: BigFloat,
        coeffs: Vec<BigFloat>,
        n_coeffs: usize,
        n_used: usize,
    ) -> Result<Self, ChebyshevError> {
        if !end.above(&start) {
            return Err(ChebyshevError::EmptyWindow);
        }
        if n_coeffs == 0 || coeffs.len() != COMPONENTS * n_coeffs {
            return Err(ChebyshevError::ComponentCount);
        }
        if n_used == 0 || n_used > n_coeffs {
            return Err(ChebyshevError::TermCount);
        }
        Ok(Self {
            start,
            end,
            coeffs,
            n_coeffs,
            n_used,
        })
    }

    /// Window start.
    pub fn start(&self) -> &BigFloat {
        &self.start
    }

    /// Window end.
    pub fn end(&self) -> &BigFloat {
        &self.end
    }

    /// Terms summed per component.
    pub fn n_used(&self) -> usize {
        self.n_used
    }

    /// Coefficient block of component `i`, or `None` for `i ≥ COMPONENTS`.
    pub fn component(&self, i: usize) -> Option<&[BigFloat]> {
        (i < COMPONENTS).then(|| self.block(i))
    }

    fn block(&self, i: usize) -> &[BigFloat] {
        &self.coeffs[i * self.n_coeffs..(i + 1) * self.n_coeffs]
    }

    /// Map `time` in `[start, end]` to t = (2·time − start − end)/(end − start).
    pub fn normalized_time(&self, time: &BigFloat, prec: usize) -> Result<BigFloat, ChebyshevError> {
        if time.below(&self.start) || time.above(&self.end) || time.is_nan() {
            return Err(ChebyshevError::OutOfWindow);
        }
        let p = ConvergencePolicy::new(prec).working();
        let span = self.end.sub(&self.start, p, RM);
        let mid = self.start.add(&self.end, p, RM);
        Ok(time.ldexp(1).sub(&mid, p, RM).div(&span, p, RM))
    }

    /// State at `time`. Velocity is scaled by dt/dτ = 2/(end − start).
    pub fn evaluate(&self, time: &BigFloat, prec: usize) -> Result<StateVector, ChebyshevError> {
        let t = self.normalized_time(time, prec)?;
        let (position, wide_velocity) = self.state_at(&t, prec)?;
        let policy = ConvergencePolicy::new(prec);
        let p = policy.working();
        let scale = BigFloat::from_word(2, 64).div(&self.end.sub(&self.start, p, RM), p, RM);
        let velocity = wide_velocity.map(|v| policy.finish(v.mul(&scale, p, RM)));
        Ok(StateVector { position, velocity })
    }

    /// State at normalized time t ∈ [−1, 1]; velocity is d/dt. Both are
    /// rounded to `prec`.
    pub fn evaluate_normalized(&self, t: &BigFloat, prec: usize) -> Result<StateVector, ChebyshevError> {
        let (position, wide_velocity) = self.state_at(t, prec)?;
        let policy = ConvergencePolicy::new(prec);
        let velocity = wide_velocity.map(|v| policy.finish(v));
        Ok(StateVector { position, velocity })
    }

    /// Position rounded to `prec` and velocity d/dt at working width.
    fn state_at(
        &self,
        t: &BigFloat,
        prec: usize,
    ) -> Result<([BigFloat; COMPONENTS], [BigFloat; COMPONENTS]), ChebyshevError> {
        let one = BigFloat::from_word(1, 64);
        if t.abs().above(&one) || t.is_nan() {
            return Err(ChebyshevError::OutOfWindow);
        }
        let wide = ConvergencePolicy::new(prec).working();
        let position = core::array::from_fn(|i| clenshaw(t, self.block(i), self.n_used, prec));
        let velocity = core::array::from_fn(|i| clenshaw_derivative(t, self.block(i), self.n_used, wide));
        Ok((position, velocity))
    }
}
