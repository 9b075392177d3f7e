#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::special::lgamma;
    use crate::elementary::log;
    use crate::traits::{MpFloat, RM};
    use astro_float::BigFloat;

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
    fn small_factorials() {
        let mut f = 1u64;
        for n in 0..=20u64 {
            if n > 0 {
                f *= n;
            }
            assert_eq!(factorial(n, 128).to_i64_exact(), i64::try_from(f).ok(), "{n}!");
        }
    }

    #[test]
    fn product_range_edges() {
        assert_eq!(product_range(2, 1, 64).to_f64(), 1.0);
        assert_eq!(product_range(5, 5, 64).to_f64(), 5.0);
        assert_eq!(product_range(3, 6, 64).to_f64(), 360.0);
        // crosses the machine-word flush several times, exact at 4096 bits
        let wide = product_range(1, 200, 4096);
        let stepwise = (1..=200u64).fold(BigFloat::from_word(1, 4096), |acc, i| {
            acc.mul(&BigFloat::from_u64(i, 64), 4096, RM)
        });
        assert!(wide.same_as(&stepwise));
    }

    #[test]
    fn factorial_crosses_to_gamma() {
        // 1024 is a product, 1025 goes through Γ; they differ by the factor 1025
        let p = 256;
        let a = factorial(1024, p);
        let b = factorial(1025, p);
        let ratio = b.div(&a, 2 * p, RM);
        assert_close(&ratio, &BigFloat::from_u64(1025, 64), 250);
    }

    #[test]
    fn large_factorial_matches_lgamma() {
        let p = 200;
        let f = factorial(5000, p);
        let lg = lgamma(&BigFloat::from_u64(5001, 64), p);
        assert_close(&log(&f, p), &lg, 190);
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(10, 0, 64).to_f64(), 1.0);
        assert_eq!(binomial(10, 10, 64).to_f64(), 1.0);
        assert_eq!(binomial(10, 3, 64).to_f64(), 120.0);
        assert_eq!(binomial(10, 7, 64).to_f64(), 120.0);
        assert_eq!(binomial(60, 30, 128).to_i64_exact(), Some(118264581564861424));
        assert!(binomial(4, 5, 64).is_zero());
        assert_eq!(binomial(0, 0, 64).to_f64(), 1.0);
    }

    #[test]
    fn binomial_pascal_rule() {
        let p = 256;
        for &(n, k) in &[(100u64, 37u64), (1000, 500), (5000, 123)] {
            let lhs = binomial(n, k, p);
            let rhs = binomial(n - 1, k - 1, 2 * p).add(&binomial(n - 1, k, 2 * p), 2 * p, RM);
            assert_close(&lhs, &rhs, 250);
        }
    }

    #[test]
    fn binomial_lgamma_path_agrees() {
        // k = 5000 exceeds the ratio-product limit
        let p = 128;
        let n = 10_000u64;
        let big = binomial(n, 5000, p);
        let symmetric = binomial(n, n - 5000, p);
        assert!(big.same_as(&symmetric));
        let neighbour = binomial(n, 4096, p);
        // C(n, 4096) < C(n, 5000)
        assert!(neighbour.below(&big));
        // ln C(10000, 5000) ≈ 6926.6
        approx_eq(log(&big, p).to_f64(), 6926.6, 0.5);
    }
}
