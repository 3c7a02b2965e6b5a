// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use serde::Serialize;

pub mod observations;

pub use observations::ObservationStats;

pub trait Statistics<'a> {
    type StatsOut;

    fn statistics(&'a self) -> Self::StatsOut;
}

#[derive(Debug)]
pub struct Summary<T: Ord + Clone> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Ord + Clone> Summary<T> {
    pub fn summary(values: &[T]) -> Summary<T> {
        let min = values.iter().min().cloned();
        let max = values.iter().max().cloned();

        Summary { min, max }
    }
}

/// Location and spread of the counts of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStatistics {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
}

impl DescriptiveStatistics {
    /// Returns `None` for empty input; the median of an even number of counts is the mean of the middle two.
    pub fn from_counts(counts: &[usize]) -> Option<DescriptiveStatistics> {
        let Summary { min, max } = Summary::summary(counts);
        let (min, max) = (min?, max?);

        let mut sorted = counts.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
        };
        let mean = sorted.iter().map(|x| *x as f64).sum::<f64>() / n as f64;

        Some(DescriptiveStatistics { min, max, mean, median })
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn summary_of_empty() {
        let summary: Summary<usize> = Summary::summary(&[]);

        assert_that(&summary.min).is_none();
        assert_that(&summary.max).is_none();
    }

    #[test]
    fn descriptive_statistics_of_empty() {
        assert_that(&DescriptiveStatistics::from_counts(&[])).is_none();
    }

    #[test]
    fn descriptive_statistics_odd() {
        let stats = DescriptiveStatistics::from_counts(&[9, 1, 5]).unwrap();

        assert_that(&stats).is_equal_to(DescriptiveStatistics {
            min: 1,
            max: 9,
            mean: 5.0,
            median: 5.0,
        });
    }

    #[test]
    fn descriptive_statistics_even() {
        let stats = DescriptiveStatistics::from_counts(&[10, 1, 2, 3]).unwrap();

        assert_that(&stats.min).is_equal_to(1);
        assert_that(&stats.max).is_equal_to(10);
        assert_that(&stats.mean).is_close_to(4.0, 1e-12);
        assert_that(&stats.median).is_close_to(2.5, 1e-12);
    }
}
