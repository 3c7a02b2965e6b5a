// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::str::FromStr;

use serde::Serialize;

use crate::distribution::{CountDistribution, Grouping};
use crate::observation::Observations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OctetBucket {
    pub octet: u8,
    pub count: usize,
}

/// Number of observations per first octet, i.e., per /8 address block, ordered by octet.
#[derive(Debug, Clone, Serialize)]
pub struct OctetHistogram {
    pub total: usize,
    /// Observations without a valid first octet
    pub skipped: usize,
    pub buckets: Vec<OctetBucket>,
}

impl OctetHistogram {
    pub fn from_observations(observations: &Observations) -> OctetHistogram {
        let distribution = CountDistribution::from_observations(Grouping::Slash8, observations);
        let buckets = distribution
            .numeric_ascending()
            .into_iter()
            .filter_map(|(key, count)| u8::from_str(key).ok().map(|octet| OctetBucket { octet, count }))
            .collect();

        OctetHistogram {
            total: distribution.total(),
            skipped: distribution.skipped(),
            buckets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|x| x.count).max().unwrap_or(0)
    }

    pub fn count(&self, octet: u8) -> usize {
        self.buckets
            .iter()
            .find(|x| x.octet == octet)
            .map(|x| x.count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::observation::Observation;

    #[test]
    fn buckets_ordered_by_octet() {
        let observations: Observations = ["192.168.0.1", "8.8.8.8", "8.8.4.4", "1.1.1.1", "nonsense"]
            .iter()
            .map(|x| Observation::new(*x))
            .collect();

        let histogram = OctetHistogram::from_observations(&observations);

        assert_that(&histogram.buckets).is_equal_to(vec![
            OctetBucket { octet: 1, count: 1 },
            OctetBucket { octet: 8, count: 2 },
            OctetBucket { octet: 192, count: 1 },
        ]);
        assert_that(&histogram.total).is_equal_to(4);
        assert_that(&histogram.skipped).is_equal_to(1);
        assert_that(&histogram.max_count()).is_equal_to(2);
        assert_that(&histogram.count(9)).is_equal_to(0);
    }

    #[test]
    fn empty_histogram() {
        let histogram = OctetHistogram::from_observations(&Observations::default());

        assert_that(&histogram.is_empty()).is_true();
        assert_that(&histogram.max_count()).is_equal_to(0);
    }
}
