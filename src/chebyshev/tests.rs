#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::mp;
    use crate::traits::{MpFloat, RM};
    use astro_float::BigFloat;

    const EPS: f64 = 1e-15;

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    fn coeffs(cs: &[f64]) -> Vec<BigFloat> {
        cs.iter().map(|&c| mp(c, 64)).collect()
    }

    /// Tₖ(t) for k = 0..n by the three-term recurrence, in f64.
    fn chebyshev_t(n: usize, t: f64) -> Vec<f64> {
        let mut ts = vec![1.0, t];
        for k in 2..n {
            ts.push(2.0 * t * ts[k - 1] - ts[k - 2]);
        }
        ts.truncate(n);
        ts
    }

    #[test]
    fn constant_and_linear() {
        let t = mp(0.7, 64);
        approx_eq(clenshaw(&t, &coeffs(&[7.0]), 1, 128).to_f64(), 7.0, EPS);
        assert!(clenshaw_derivative(&t, &coeffs(&[7.0]), 1, 128).is_zero());
        approx_eq(clenshaw(&t, &coeffs(&[3.0, 5.0]), 2, 128).to_f64(), 3.0 + 5.0 * 0.7, EPS);
        approx_eq(clenshaw_derivative(&t, &coeffs(&[3.0, 5.0]), 2, 128).to_f64(), 5.0, EPS);
    }

    #[test]
    fn degree_four_matches_direct_sum() {
        let cs = [0.5, -1.25, 2.0, 0.75, -0.3];
        let t = 0.5;
        let direct: f64 = cs.iter().zip(chebyshev_t(5, t)).map(|(c, tk)| c * tk).sum();
        let v = clenshaw(&mp(t, 64), &coeffs(&cs), 5, 256);
        approx_eq(v.to_f64(), direct, 1e-14);
    }

    #[test]
    fn derivative_of_cubic() {
        // T₃ = 4t³ − 3t, T₃' = 12t² − 3
        let cs = coeffs(&[1.0, 0.0, 0.0, 1.0]);
        let t = 0.6;
        approx_eq(clenshaw(&mp(t, 64), &cs, 4, 128).to_f64(), 1.0 + 4.0 * t * t * t - 3.0 * t, 1e-14);
        approx_eq(clenshaw_derivative(&mp(t, 64), &cs, 4, 128).to_f64(), 12.0 * t * t - 3.0, 1e-14);
    }

    #[test]
    fn derivative_matches_difference_quotient() {
        let cs = coeffs(&[0.1, 0.4, -0.9, 0.25, 0.6, -0.05]);
        let p = 256;
        let t = mp(-0.3, 64);
        let h = BigFloat::from_word(1, 64).ldexp(-60);
        let fwd = clenshaw(&t.add(&h, 512, RM), &cs, 6, 512);
        let back = clenshaw(&t.sub(&h, 512, RM), &cs, 6, 512);
        let quotient = fwd.sub(&back, 512, RM).div(&h.ldexp(1), 512, RM);
        let d = clenshaw_derivative(&t, &cs, 6, p);
        approx_eq(d.to_f64(), quotient.to_f64(), 1e-14);
    }

    #[test]
    fn endpoint_values() {
        // Tₖ(1) = 1, Tₖ(−1) = (−1)ᵏ
        let cs = coeffs(&[2.0, 3.0, 5.0, 7.0]);
        assert_eq!(clenshaw(&mp(1, 64), &cs, 4, 128).to_f64(), 17.0);
        assert_eq!(clenshaw(&mp(-1, 64), &cs, 4, 128).to_f64(), 2.0 - 3.0 + 5.0 - 7.0);
    }

    #[test]
    fn n_used_truncates_and_clamps() {
        let cs = coeffs(&[1.0, 1.0, 1.0]);
        let t = mp(0.25, 64);
        approx_eq(clenshaw(&t, &cs, 2, 128).to_f64(), 1.25, EPS);
        approx_eq(clenshaw(&t, &cs, 10, 128).to_f64(), clenshaw(&t, &cs, 3, 128).to_f64(), EPS);
        assert!(clenshaw(&t, &cs, 0, 128).is_zero());
        assert!(clenshaw(&t, &[], 4, 128).is_zero());
    }

    fn segment() -> ChebyshevSegment {
        // x = 1 + 2T₁ + 0.5T₂, y = −T₁, z = 3
        let cs = coeffs(&[1.0, 2.0, 0.5, 0.0, -1.0, 0.0, 3.0, 0.0, 0.0]);
        ChebyshevSegment::new(mp(100, 64), mp(132, 64), cs, 3, 3).unwrap()
    }

    #[test]
    fn segment_state() {
        let seg = segment();
        // time 124 → t = (248 − 232)/32 = 0.5
        let t = seg.normalized_time(&mp(124, 64), 128).unwrap();
        assert_eq!(t.to_f64(), 0.5);
        let s = seg.evaluate(&mp(124, 64), 128).unwrap();
        // x = 1 + 1 + 0.5·(−0.5)
        approx_eq(s.position[0].to_f64(), 1.75, EPS);
        approx_eq(s.position[1].to_f64(), -0.5, EPS);
        approx_eq(s.position[2].to_f64(), 3.0, EPS);
        // dx/dt = 2 + 0.5·4t = 3, scaled by 2/32
        approx_eq(s.velocity[0].to_f64(), 3.0 / 16.0, EPS);
        approx_eq(s.velocity[1].to_f64(), -1.0 / 16.0, EPS);
        assert!(s.velocity[2].is_zero());
    }

    #[test]
    fn normalized_velocity_is_rounded_like_position() {
        // x = c·T₁ with c = 1/3 at 256 bits, so dx/dt = c
        let third = mp(1, 256).div(&mp(3, 256), 256, RM);
        let mut cs = coeffs(&[0.0; 6]);
        cs[1] = third.clone();
        let seg = ChebyshevSegment::new(mp(0, 64), mp(1, 64), cs, 2, 2).unwrap();
        let s = seg.evaluate_normalized(&mp(0.5, 64), 64).unwrap();
        let rounded = crate::ConvergencePolicy::new(64).finish(third.clone());
        assert!(s.velocity[0].same_as(&rounded));
        assert!(!s.velocity[0].same_as(&third));
        assert!(s.position[0].same_as(&crate::ConvergencePolicy::new(64).finish(third.ldexp(-1))));
    }

    #[test]
    fn segment_window_edges() {
        let seg = segment();
        let at_start = seg.evaluate(&mp(100, 64), 128).unwrap();
        // t = −1: x = 1 − 2 + 0.5
        approx_eq(at_start.position[0].to_f64(), -0.5, EPS);
        assert!(seg.evaluate(&mp(132, 64), 128).is_ok());
        assert_eq!(seg.evaluate(&mp(99.5, 64), 128).unwrap_err(), ChebyshevError::OutOfWindow);
        assert_eq!(seg.evaluate(&mp(140, 64), 128).unwrap_err(), ChebyshevError::OutOfWindow);
        assert_eq!(
            seg.evaluate_normalized(&mp(1.5, 64), 128).unwrap_err(),
            ChebyshevError::OutOfWindow
        );
    }

    #[test]
    fn segment_validation() {
        let cs = coeffs(&[0.0; 6]);
        assert_eq!(
            ChebyshevSegment::new(mp(1, 64), mp(1, 64), cs.clone(), 2, 2).unwrap_err(),
            ChebyshevError::EmptyWindow
        );
        assert_eq!(
            ChebyshevSegment::new(mp(0, 64), mp(1, 64), cs.clone(), 3, 2).unwrap_err(),
            ChebyshevError::ComponentCount
        );
        assert_eq!(
            ChebyshevSegment::new(mp(0, 64), mp(1, 64), cs.clone(), 2, 3).unwrap_err(),
            ChebyshevError::TermCount
        );
        assert_eq!(
            ChebyshevSegment::new(mp(0, 64), mp(1, 64), cs.clone(), 2, 0).unwrap_err(),
            ChebyshevError::TermCount
        );
        let seg = ChebyshevSegment::new(mp(0, 64), mp(1, 64), cs, 2, 1).unwrap();
        assert_eq!(seg.n_used(), 1);
        assert_eq!(seg.component(2).map(<[BigFloat]>::len), Some(2));
        assert!(seg.component(3).is_none());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ChebyshevError::OutOfWindow.to_string(),
            "time lies outside the segment window"
        );
    }
}
