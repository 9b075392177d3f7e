#[cfg(test)]
mod tests {
    use super::super::compute::{pi_agm, pi_machin};
    use super::super::*;
    use crate::convergence::ConvergencePolicy;
    use crate::strategy::Strategy;
    use crate::traits::{MpFloat, RM};

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    /// |a − b| < 2^(−bits) · |b|, compared in BigFloat.
    fn close_bits(a: &BigFloat, b: &BigFloat, bits: i64) -> bool {
        let d = a.sub(b, 1024, RM);
        if d.is_zero() {
            return true;
        }
        let de = d.bit_exponent().unwrap_or(i64::MAX);
        let be = b.bit_exponent().unwrap_or(0);
        de <= be - bits
    }

    #[test]
    fn double_precision_values() {
        approx_eq(pi(128).to_f64(), core::f64::consts::PI, 1e-15);
        approx_eq(e(128).to_f64(), core::f64::consts::E, 1e-15);
        approx_eq(ln2(128).to_f64(), core::f64::consts::LN_2, 1e-15);
        approx_eq(ln10(128).to_f64(), core::f64::consts::LN_10, 1e-15);
        approx_eq(euler_gamma(128).to_f64(), 0.5772156649015329, 1e-15);
        approx_eq(catalan(128).to_f64(), 0.915965594177219, 1e-15);
        approx_eq(constant(Constant::Sqrt2, 128).to_f64(), core::f64::consts::SQRT_2, 1e-15);
        approx_eq(constant(Constant::Sqrt3, 128).to_f64(), 1.7320508075688772, 1e-15);
        approx_eq(constant(Constant::Phi, 128).to_f64(), 1.618033988749895, 1e-15);
    }

    #[test]
    fn default_precision_key() {
        let a = constant(Constant::Pi, 0);
        let b = constant(Constant::Pi, crate::DEFAULT_PRECISION);
        assert!(a.same_as(&b));
    }

    #[test]
    fn repeat_lookup_is_identical() {
        let cache = ConstantCache::new();
        for c in Constant::ALL {
            let first = cache.get(c, 192);
            let second = cache.get(c, 192);
            assert_eq!(first.mantissa_digits(), second.mantissa_digits(), "{c}");
            assert_eq!(first.exponent(), second.exponent(), "{c}");
        }
        assert_eq!(cache.len(), Constant::ALL.len());
    }

    #[test]
    fn precision_is_part_of_the_key() {
        let cache = ConstantCache::new();
        assert!(cache.is_empty());
        let low = cache.get(Constant::E, 64);
        assert!(cache.contains(Constant::E, 64));
        assert!(!cache.contains(Constant::E, 512));

        let high = cache.get(Constant::E, 512);
        assert!(cache.contains(Constant::E, 512));
        assert_eq!(cache.len(), 2);

        // the low entry is a rounding of the high one, not a recomputation
        assert!(close_bits(&low, &high, 62));
        assert!(!low.same_as(&high));
    }

    #[test]
    fn pi_algorithms_agree() {
        let policy = ConvergencePolicy::new(1000);
        let a = pi_machin(&policy).unwrap();
        let b = pi_agm(&policy).unwrap();
        assert!(close_bits(&a, &b, 1000));
    }

    #[test]
    fn pi_strategies_round_identically() {
        for s in [Strategy::Reference, Strategy::Tuned] {
            let policy = ConvergencePolicy::new(300).with_strategy(s);
            let v = match s {
                Strategy::Reference => pi_machin(&policy).unwrap(),
                Strategy::Tuned => pi_agm(&policy).unwrap(),
            };
            assert!(close_bits(&policy.finish(v), &pi(300), 298));
        }
    }

    #[test]
    fn constants_agree_across_precisions() {
        for c in Constant::ALL {
            let lo = constant(c, 200);
            let hi = constant(c, 800);
            assert!(close_bits(&lo, &hi, 198), "{c}");
        }
    }

    #[test]
    fn ln10_is_consistent_with_ln2() {
        // ln 10 − 3 ln 2 = ln(5/4)
        let p = 400;
        let d = ln10(p).sub(&ln2(p).mul(&BigFloat::from_word(3, 64), p, RM), p, RM);
        approx_eq(d.to_f64(), (1.25f64).ln(), 1e-15);
    }

    #[test]
    fn concurrent_population_is_exactly_once() {
        let cache = ConstantCache::new();
        let results: Vec<BigFloat> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get(Constant::Catalan, 320)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(cache.len(), 1);
        for r in &results[1..] {
            assert_eq!(r.mantissa_digits(), results[0].mantissa_digits());
        }
    }

    #[test]
    fn unrelated_keys_populate_in_parallel() {
        let cache = ConstantCache::new();
        std::thread::scope(|s| {
            for (i, c) in Constant::ALL.into_iter().enumerate() {
                let cache = &cache;
                s.spawn(move || cache.get(c, 128 + 64 * i));
            }
        });
        assert_eq!(cache.len(), Constant::ALL.len());
        for (i, c) in Constant::ALL.into_iter().enumerate() {
            assert!(cache.contains(c, 128 + 64 * i));
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Constant::EulerGamma.to_string(), "euler_gamma");
        assert_eq!(Constant::Pi.to_string(), "pi");
    }
}
