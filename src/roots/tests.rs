#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::convergence::ConvergencePolicy;
    use crate::mp;
    use crate::strategy::Strategy;
    use crate::traits::{MpFloat, RM};
    use astro_float::{BigFloat, RoundingMode, INF_NEG, INF_POS, NAN};

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    /// |a − b| ≤ 2^(−bits)·|b|, up to a factor of two.
    fn assert_close(a: &BigFloat, b: &BigFloat, bits: i64) {
        let d = a.sub(b, 4096, RM);
        if d.is_zero() {
            return;
        }
        let de = d.bit_exponent().expect("finite difference");
        let be = b.bit_exponent().unwrap_or(0);
        assert!(de <= be - bits, "{} vs {}: difference 2^{de}", a.to_f64(), b.to_f64());
    }

    #[test]
    fn cbrt_perfect_cubes() {
        for k in [1i64, 2, 3, 10, 123, -4, -50] {
            let x = mp(k * k * k, 64);
            assert_eq!(cbrt(&x, 128).to_i64_exact(), Some(k), "cbrt({})", k * k * k);
        }
    }

    #[test]
    fn cbrt_doubles() {
        for &x in &[2.0, 0.001, 1e-300, 7.5e200, -0.3] {
            let r = cbrt(&mp(x, 64), 128).to_f64();
            approx_eq(r / f64::cbrt(x), 1.0, 1e-15);
        }
    }

    #[test]
    fn nth_root_powers_back() {
        let p = 256;
        for n in [3u32, 4, 5, 7, 12, 31] {
            let x = mp(17.25, 64);
            let r = nth_root(n, &x, p);
            let back = r.powu(u64::from(n), 4 * p);
            assert_close(&back, &x, 248);
        }
    }

    #[test]
    fn nth_root_large_order() {
        // 2^(1/1000)
        let r = nth_root(1000, &mp(2, 64), 128).to_f64();
        approx_eq(r, 2f64.powf(1e-3), 1e-15);
        // the 100th root of 10^300 is 10^3
        let big = mp(10, 64).powu(300, 1200);
        approx_eq(nth_root(100, &big, 128).to_f64(), 1000.0, 1e-11);
    }

    #[test]
    fn nth_root_domain() {
        assert!(nth_root(0, &mp(8, 64), 64).is_nan());
        assert!(nth_root(2, &mp(-4, 64), 64).is_nan());
        assert!(nth_root(6, &mp(-1, 64), 64).is_nan());
        assert!(nth_root(3, &NAN, 64).is_nan());
        assert_eq!(nth_root(5, &mp(-32, 64), 64).to_f64(), -2.0);
        assert_eq!(nth_root(1, &mp(-7.5, 64), 64).to_f64(), -7.5);
        assert_eq!(nth_root(2, &mp(49, 64), 64).to_f64(), 7.0);
    }

    #[test]
    fn nth_root_special_values() {
        assert!(nth_root(4, &mp(0, 64), 64).is_zero());
        assert!(cbrt(&INF_POS, 64).is_inf_pos());
        assert!(cbrt(&INF_NEG, 64).is_inf_neg());
        assert!(nth_root(4, &INF_NEG, 64).is_nan());
    }

    #[test]
    fn strategies_agree() {
        let x = mp(3, 64);
        let results: Vec<BigFloat> = [Strategy::Reference, Strategy::Tuned]
            .into_iter()
            .map(|s| {
                let policy = ConvergencePolicy::new(1000).with_strategy(s);
                policy.finish(nth_root_kernel(7, &x, &policy).unwrap())
            })
            .collect();
        assert_close(&results[0], &results[1], 996);
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let policy = ConvergencePolicy::new(512)
            .with_strategy(Strategy::Reference)
            .with_max_iter(1);
        let r = nth_root_kernel(3, &mp(2, 64), &policy);
        assert!(matches!(r, Err(crate::convergence::EvalError::ConvergenceFailure { iterations: 1 })));
    }

    #[test]
    fn rounded_roots_bracket() {
        let x = mp(2, 64);
        let down = cbrt_rounded(&x, 64, RoundingMode::Down);
        let up = cbrt_rounded(&x, 64, RoundingMode::Up);
        assert_eq!(down.ternary(), -1);
        assert_eq!(up.ternary(), 1);
        assert!(down.value.below(&up.value));
        let r = nth_root_rounded(3, &x, 64, RoundingMode::ToEven);
        assert!(r.value.same_as(&cbrt(&x, 64)));
    }
}
