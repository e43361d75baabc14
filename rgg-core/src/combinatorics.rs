//! Combinatorial and probabilistic helpers.
//!
//! Binomial coefficients come from a Pascal's-triangle table and factorials
//! from a checked product. The probability helpers work in log space so
//! intermediate magnitudes stay bounded.

use std::{f64::consts::PI, fmt};

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors produced by the combinatorics helpers.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CombinatoricsError {
    /// `k` exceeded `n` in `C(n, k)`.
    #[error("cannot choose {k} items from {n}")]
    KExceedsN {
        /// Size of the set.
        n: u32,
        /// Size of the requested subset.
        k: u32,
    },
    /// The result does not fit into a `u64`.
    #[error("{operation}({n}) overflows u64")]
    Overflow {
        /// Name of the overflowing operation.
        operation: &'static str,
        /// Argument that triggered the overflow.
        n: u32,
    },
}

define_error_codes! {
    /// Stable codes describing [`CombinatoricsError`] variants.
    enum CombinatoricsErrorCode for CombinatoricsError {
        /// `k` exceeded `n` in `C(n, k)`.
        KExceedsN => KExceedsN { .. } => "COMBINATORICS_K_EXCEEDS_N",
        /// The result does not fit into a `u64`.
        Overflow => Overflow { .. } => "COMBINATORICS_OVERFLOW",
    }
}

/// Computes `C(n, k)` with a Pascal's-triangle table of `(n + 1) × (k + 1)`
/// entries.
///
/// # Errors
/// Returns [`CombinatoricsError::KExceedsN`] when `k > n` and
/// [`CombinatoricsError::Overflow`] when an entry of the table exceeds
/// `u64::MAX`.
///
/// # Examples
/// ```
/// use rgg_core::binomial_coefficient;
///
/// assert_eq!(binomial_coefficient(5, 2)?, 10);
/// assert_eq!(binomial_coefficient(7, 0)?, 1);
/// # Ok::<(), rgg_core::CombinatoricsError>(())
/// ```
pub fn binomial_coefficient(n: u32, k: u32) -> Result<u64, CombinatoricsError> {
    if k > n {
        return Err(CombinatoricsError::KExceedsN { n, k });
    }

    let rows = n as usize + 1;
    let columns = k as usize + 1;
    let mut table = vec![vec![0_u64; columns]; rows];
    for i in 0..rows {
        for j in 0..=i.min(columns - 1) {
            table[i][j] = if j == 0 || j == i {
                1
            } else {
                table[i - 1][j - 1]
                    .checked_add(table[i - 1][j])
                    .ok_or(CombinatoricsError::Overflow {
                        operation: "binomial_coefficient",
                        n,
                    })?
            };
        }
    }

    Ok(table[n as usize][k as usize])
}

/// Computes `n!`.
///
/// # Errors
/// Returns [`CombinatoricsError::Overflow`] for `n > 20`.
///
/// # Examples
/// ```
/// use rgg_core::factorial;
///
/// assert_eq!(factorial(0)?, 1);
/// assert_eq!(factorial(5)?, 120);
/// assert!(factorial(21).is_err());
/// # Ok::<(), rgg_core::CombinatoricsError>(())
/// ```
pub fn factorial(n: u32) -> Result<u64, CombinatoricsError> {
    (2..=u64::from(n))
        .try_fold(1_u64, u64::checked_mul)
        .ok_or(CombinatoricsError::Overflow {
            operation: "factorial",
            n,
        })
}

/// Returns `value / k!`, dividing by `k, k - 1, …, 2` in turn.
///
/// # Examples
/// ```
/// use rgg_core::divide_by_factorial;
///
/// assert!((divide_by_factorial(720.0, 6) - 1.0).abs() < 1e-12);
/// assert_eq!(divide_by_factorial(3.5, 1), 3.5);
/// ```
#[must_use]
pub fn divide_by_factorial(value: f64, k: u32) -> f64 {
    (2..=k).rev().fold(value, |acc, factor| acc / f64::from(factor))
}

/// Evaluates the Poisson probability mass `e^(-λ)·λ^k / k!`.
///
/// The mass is formed in log space as `k·ln λ − λ − ln k!`, so neither `λ^k`
/// nor `k!` is ever materialised and large `k` or `λ` stay finite.
///
/// # Examples
/// ```
/// use rgg_core::poisson_pmf;
///
/// assert!((poisson_pmf(2.0, 1) - 2.0 * (-2.0_f64).exp()).abs() < 1e-15);
/// assert!(poisson_pmf(50.0, 200) < 1e-40);
/// ```
#[must_use]
pub fn poisson_pmf(lambda: f64, k: u32) -> f64 {
    if lambda <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    let ln_factorial = (1..=k).fold(0.0_f64, |acc, factor| acc + f64::from(factor).ln());
    (f64::from(k) * lambda.ln() - lambda - ln_factorial).exp()
}

/// Returns the Poisson distribution with mean `lambda` for `k = 0..len`.
///
/// `ln k!` is accumulated one factor at a time and every term is evaluated as
/// `exp(k·ln λ − λ − ln k!)`, so `e^(-λ)` never underflows the whole
/// distribution to zero for large means.
///
/// # Examples
/// ```
/// use rgg_core::poisson_distribution;
///
/// let degenerate = poisson_distribution(0.0, 3);
/// assert_eq!(degenerate, vec![1.0, 0.0, 0.0]);
/// ```
#[must_use]
pub fn poisson_distribution(lambda: f64, len: usize) -> Vec<f64> {
    if lambda <= 0.0 {
        return (0..len).map(|k| if k == 0 { 1.0 } else { 0.0 }).collect();
    }
    let ln_lambda = lambda.ln();
    let mut ln_factorial = 0.0_f64;
    let mut distribution = Vec::with_capacity(len);
    for k in 0..len {
        if k > 0 {
            ln_factorial += (k as f64).ln();
        }
        distribution.push((k as f64 * ln_lambda - lambda - ln_factorial).exp());
    }
    distribution
}

/// Returns the binomial distribution `C(trials, k)·p^k·(1 - p)^(trials - k)`
/// for `k = 0..=trials`.
///
/// `p` is clamped to `[0, 1]`. The coefficients are accumulated in log space
/// so large trial counts neither overflow nor produce NaN.
///
/// # Examples
/// ```
/// use rgg_core::binomial_distribution;
///
/// let distribution = binomial_distribution(2, 0.5);
/// assert_eq!(distribution.len(), 3);
/// assert!((distribution[1] - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn binomial_distribution(trials: usize, p: f64) -> Vec<f64> {
    let p = p.clamp(0.0, 1.0);
    let len = trials + 1;
    if p == 0.0 || p == 1.0 {
        let certain = if p == 0.0 { 0 } else { trials };
        return (0..len)
            .map(|k| if k == certain { 1.0 } else { 0.0 })
            .collect();
    }

    let ln_p = p.ln();
    let ln_q = (-p).ln_1p();
    let mut ln_coefficient = 0.0_f64;
    let mut distribution = Vec::with_capacity(len);
    for k in 0..len {
        let successes = k as f64;
        let failures = (trials - k) as f64;
        distribution.push((ln_coefficient + successes * ln_p + failures * ln_q).exp());
        if k < trials {
            ln_coefficient += failures.ln() - (successes + 1.0).ln();
        }
    }
    distribution
}

/// Volume of a `dimensions`-ball of the given radius.
///
/// Uses the recurrence `V_d = V_(d-2)·2π/d` with `V_0 = 1` and `V_1 = 2`.
///
/// # Examples
/// ```
/// use rgg_core::ball_volume;
///
/// let area = ball_volume(2, 0.5);
/// assert!((area - std::f64::consts::PI * 0.25).abs() < 1e-12);
/// ```
#[must_use]
pub fn ball_volume(dimensions: usize, radius: f64) -> f64 {
    let mut even = 1.0_f64;
    let mut odd = 2.0_f64;
    for d in 2..=dimensions {
        let next = 2.0 * PI / d as f64;
        if d % 2 == 0 {
            even *= next;
        } else {
            odd *= next;
        }
    }
    let unit = if dimensions % 2 == 0 { even } else { odd };
    unit * radius.powf(dimensions as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    use crate::test_utils::suite_proptest_config;

    #[rstest]
    #[case(0, 0, 1)]
    #[case(1, 1, 1)]
    #[case(6, 3, 20)]
    #[case(10, 4, 210)]
    #[case(52, 5, 2_598_960)]
    fn binomial_coefficient_matches_known_values(
        #[case] n: u32,
        #[case] k: u32,
        #[case] expected: u64,
    ) {
        assert_eq!(binomial_coefficient(n, k), Ok(expected));
    }

    #[test]
    fn binomial_coefficient_rejects_k_above_n() {
        assert_eq!(
            binomial_coefficient(3, 4),
            Err(CombinatoricsError::KExceedsN { n: 3, k: 4 })
        );
    }

    #[test]
    fn binomial_coefficient_reports_overflow() {
        let err = binomial_coefficient(70, 35).expect_err("C(70, 35) exceeds u64");
        assert_eq!(err.code(), CombinatoricsErrorCode::Overflow);
    }

    #[test]
    fn factorial_stops_at_twenty() {
        assert_eq!(factorial(20), Ok(2_432_902_008_176_640_000));
        assert!(matches!(
            factorial(21),
            Err(CombinatoricsError::Overflow {
                operation: "factorial",
                n: 21
            })
        ));
    }

    #[rstest]
    #[case(0.5, 0)]
    #[case(2.0, 3)]
    #[case(7.5, 12)]
    fn poisson_pmf_agrees_with_distribution(#[case] lambda: f64, #[case] k: u32) {
        let distribution = poisson_distribution(lambda, k as usize + 1);
        let expected = distribution[k as usize];
        assert!((poisson_pmf(lambda, k) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(50.0, 200)]
    #[case(5.0, 400)]
    #[case(900.0, 2_000)]
    fn poisson_pmf_stays_finite_in_the_tail(#[case] lambda: f64, #[case] k: u32) {
        let mass = poisson_pmf(lambda, k);
        assert!(mass.is_finite(), "pmf({lambda}, {k}) = {mass}");
        assert!((0.0..1e-20).contains(&mass), "pmf({lambda}, {k}) = {mass}");
    }

    #[test]
    fn poisson_pmf_matches_the_closed_form_for_small_arguments() {
        let expected = divide_by_factorial((-3.0_f64).exp() * 3.0_f64.powi(4), 4);
        assert!((poisson_pmf(3.0, 4) - expected).abs() < 1e-14);
    }

    #[rstest]
    #[case(800.0, 1_000)]
    #[case(941.7, 1_200)]
    fn poisson_distribution_survives_large_means(#[case] lambda: f64, #[case] len: usize) {
        let distribution = poisson_distribution(lambda, len);
        assert!(distribution.iter().all(|value| value.is_finite()));
        let total: f64 = distribution.iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "total {total}");
        let mode = distribution
            .iter()
            .enumerate()
            .max_by(|left, right| left.1.total_cmp(right.1))
            .map(|(k, _)| k)
            .expect("non-empty distribution");
        assert!(mode.abs_diff(lambda as usize) <= 1, "mode {mode}");
    }

    #[test]
    fn poisson_distribution_sums_to_one_when_truncated_late() {
        let total: f64 = poisson_distribution(4.0, 60).iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn binomial_distribution_matches_exact_coefficients() {
        let p = 0.3_f64;
        let distribution = binomial_distribution(8, p);
        for (k, value) in distribution.iter().enumerate() {
            let successes = u32::try_from(k).expect("k fits in u32");
            let coefficient = binomial_coefficient(8, successes).expect("small coefficient") as f64;
            let expected = coefficient * p.powi(k as i32) * (1.0 - p).powi(8 - k as i32);
            assert!((value - expected).abs() < 1e-12, "k={k}");
        }
    }

    #[test]
    fn binomial_distribution_stays_finite_for_large_trials() {
        let distribution = binomial_distribution(5_000, 0.01);
        assert!(distribution.iter().all(|value| value.is_finite()));
        let total: f64 = distribution.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(0.0, vec![1.0, 0.0, 0.0])]
    #[case(1.0, vec![0.0, 0.0, 1.0])]
    #[case(3.0, vec![0.0, 0.0, 1.0])]
    fn binomial_distribution_handles_certain_outcomes(#[case] p: f64, #[case] expected: Vec<f64>) {
        assert_eq!(binomial_distribution(2, p), expected);
    }

    #[rstest]
    #[case(1, 2.0)]
    #[case(2, PI)]
    #[case(3, 4.0 * PI / 3.0)]
    #[case(4, PI * PI / 2.0)]
    fn ball_volume_matches_unit_volumes(#[case] dimensions: usize, #[case] expected: f64) {
        assert!((ball_volume(dimensions, 1.0) - expected).abs() < 1e-12);
    }

    proptest! {
        #![proptest_config(suite_proptest_config(64))]

        #[test]
        fn binomial_coefficient_satisfies_pascal_and_symmetry(
            n in 1_u32..=60,
            fraction in 0.0_f64..=1.0,
        ) {
            let k = ((f64::from(n) * fraction).round() as u32).clamp(1, n);
            let value = binomial_coefficient(n, k).expect("n <= 60 fits in u64");
            prop_assert_eq!(Ok(value), binomial_coefficient(n, n - k));
            let left = binomial_coefficient(n - 1, k - 1).expect("smaller coefficient");
            let right = if k < n {
                binomial_coefficient(n - 1, k).expect("smaller coefficient")
            } else {
                0
            };
            prop_assert_eq!(value, left + right);
        }

        #[test]
        fn binomial_distribution_is_normalised(trials in 1_usize..400, p in 0.0_f64..=1.0) {
            let distribution = binomial_distribution(trials, p);
            prop_assert_eq!(distribution.len(), trials + 1);
            let total: f64 = distribution.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
        }
    }
}
