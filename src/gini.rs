// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Gini coefficient and Lorenz curve over counts.
//!
//! Counts are unsigned by construction, so negative input cannot occur. Zero counts are
//! discarded before computation; with fewer than two remaining entities the coefficient is
//! defined as `0.0`.

use std::fmt;

use serde::Serialize;

/// Computes the Gini coefficient of `values` in `[0.0, 1.0]`.
///
/// After discarding zeros and sorting ascending, with `n` values summing up to `total`, the
/// coefficient is `2 * Σ(rank * value) / (n * total) - (n + 1) / n` where rank is 1-based.
/// The result is independent of the order of `values`.
pub fn gini(values: &[usize]) -> f64 {
    let mut values: Vec<u128> = values.iter().filter(|x| **x > 0).map(|x| *x as u128).collect();
    if values.len() <= 1 {
        return 0.0;
    }
    values.sort_unstable();

    let n = values.len() as u128;
    let total: u128 = values.iter().sum();
    let weighted_sum: u128 = values
        .iter()
        .zip(1u128..)
        .map(|(value, rank)| rank * value)
        .sum();

    let n = n as f64;
    let gini = (2.0 * weighted_sum as f64) / (n * total as f64) - (n + 1.0) / n;

    gini.clamp(0.0, 1.0)
}

/// Computes the points of the Lorenz curve starting at `(0, 0)` and ending at `(1, 1)`.
///
/// The x coordinate is the cumulative share of entities, the y coordinate the cumulative share
/// of the counted quantity, both over counts sorted ascending. Zero counts are kept because
/// they are entities, too. Empty or all-zero input yields no points.
pub fn lorenz_curve(values: &[usize]) -> Vec<(f64, f64)> {
    let total: u128 = values.iter().map(|x| *x as u128).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len() as f64;
    let mut points = Vec::with_capacity(sorted.len() + 1);
    points.push((0.0, 0.0));

    let mut cumulative: u128 = 0;
    for (index, value) in sorted.iter().enumerate() {
        cumulative += *value as u128;
        points.push(((index + 1) as f64 / n, cumulative as f64 / total as f64));
    }

    points
}

/// Verbal interpretation of a Gini coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inequality {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Inequality {
    pub fn from_gini(gini: f64) -> Inequality {
        if gini < 0.3 {
            Inequality::Low
        } else if gini < 0.5 {
            Inequality::Moderate
        } else if gini < 0.7 {
            Inequality::High
        } else {
            Inequality::VeryHigh
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Inequality::Low => "Low inequality - relatively equal distribution",
            Inequality::Moderate => "Moderate inequality - some concentration",
            Inequality::High => "High inequality - significant concentration",
            Inequality::VeryHigh => "Very high inequality - extreme concentration",
        }
    }
}

impl fmt::Display for Inequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_that(&gini(&[])).is_equal_to(0.0);
    }

    #[test]
    fn all_zeros_is_zero() {
        assert_that(&gini(&[0, 0, 0])).is_equal_to(0.0);
    }

    #[test]
    fn single_entity_is_zero_not_one() {
        assert_that(&gini(&[100])).is_equal_to(0.0);
        assert_that(&gini(&[0, 0, 100, 0])).is_equal_to(0.0);
    }

    #[test]
    fn one_big_entity_among_many_approaches_one() {
        let mut values = vec![1; 99];
        values.push(1_000_000);

        let g = gini(&values);

        assert_that(&g).is_greater_than(0.98);
        assert_that(&g).is_less_than_or_equal_to(1.0);
    }

    #[test]
    fn equal_values_are_perfectly_equal() {
        assert_that(&gini(&[5, 5, 5, 5])).is_close_to(0.0, 1e-12);
        assert_that(&gini(&[10, 10, 10, 10, 10])).is_close_to(0.0, 1e-12);
    }

    #[test]
    fn extreme_concentration() {
        let g = gini(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 91]);

        assert_that(&g).is_close_to(0.81, 1e-12);
        assert_that(&g).is_greater_than(0.8);
    }

    #[test]
    fn two_entities() {
        // sorted [1, 3]: 2 * (1 + 6) / (2 * 4) - 3 / 2
        assert_that(&gini(&[3, 1])).is_close_to(0.25, 1e-12);
    }

    #[test]
    fn permutation_invariant() {
        assert_that(&gini(&[3, 1, 2])).is_equal_to(gini(&[1, 2, 3]));
        assert_that(&gini(&[7, 0, 3, 12, 1])).is_equal_to(gini(&[12, 1, 0, 7, 3]));
    }

    #[test]
    fn scale_invariant() {
        let values = [3, 1, 2, 9, 4];
        let scaled: Vec<_> = values.iter().map(|x| x * 7).collect();

        assert_that(&gini(&scaled)).is_close_to(gini(&values), 1e-12);
    }

    #[test]
    fn zeros_are_ignored() {
        assert_that(&gini(&[0, 1, 0, 1])).is_close_to(0.0, 1e-12);
        assert_that(&gini(&[0, 3, 1])).is_equal_to(gini(&[3, 1]));
    }

    #[test]
    fn lorenz_curve_of_empty_is_empty() {
        assert_that(&lorenz_curve(&[])).is_empty();
        assert_that(&lorenz_curve(&[0, 0])).is_empty();
    }

    #[test]
    fn lorenz_curve_points() {
        let points = lorenz_curve(&[3, 1]);

        assert_that(&points).is_equal_to(vec![(0.0, 0.0), (0.5, 0.25), (1.0, 1.0)]);
    }

    #[test]
    fn inequality_thresholds() {
        assert_that(&Inequality::from_gini(0.0)).is_equal_to(Inequality::Low);
        assert_that(&Inequality::from_gini(0.3)).is_equal_to(Inequality::Moderate);
        assert_that(&Inequality::from_gini(0.5)).is_equal_to(Inequality::High);
        assert_that(&Inequality::from_gini(0.7)).is_equal_to(Inequality::VeryHigh);
        assert_that(&Inequality::from_gini(1.0)).is_equal_to(Inequality::VeryHigh);
    }
}
