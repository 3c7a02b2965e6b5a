// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Top-N share tables as shown by bar and pie charts.

use serde::Serialize;

use crate::distribution::{CountDistribution, Grouping, ShareEntry};

/// Default number of entries of a bar chart.
pub static DEFAULT_BAR_TOP: usize = 10;
/// Default number of entries of a pie chart; remaining entries are summed up as `Other`.
pub static DEFAULT_PIE_TOP: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ShareTable {
    pub grouping: Grouping,
    pub population: String,
    pub total: usize,
    pub unique: usize,
    pub entries: Vec<ShareEntry>,
    /// Whether the last entry sums up the remaining groups
    pub other: bool,
}

impl ShareTable {
    /// Takes the `top` largest entries of `distribution`; if `other` is set, the remaining ones are summed up.
    pub fn new(distribution: &CountDistribution, top: usize, other: bool) -> ShareTable {
        let other = other && distribution.len() > top;
        let entries = if other {
            distribution.top_with_other(top)
        } else {
            distribution.top(top)
        };

        ShareTable {
            grouping: distribution.grouping(),
            population: "all resolvers".to_string(),
            total: distribution.total(),
            unique: distribution.len(),
            entries,
            other,
        }
    }

    pub fn with_population<T: Into<String>>(self, population: T) -> ShareTable {
        ShareTable {
            population: population.into(),
            ..self
        }
    }

    pub fn has_other(&self) -> bool {
        self.other
    }

    /// Number of ranked entries, not counting the `Other` entry.
    pub fn ranked_len(&self) -> usize {
        if self.other {
            self.entries.len() - 1
        } else {
            self.entries.len()
        }
    }

    /// Sum of the shown percentages; 100 if `Other` is included.
    pub fn covered_percentage(&self) -> f64 {
        self.entries.iter().map(|x| x.percentage).sum()
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::observation::Observation;

    fn distribution() -> CountDistribution {
        let observations: Vec<_> = [
            ("1.1.1.1", "13335"),
            ("1.0.0.1", "13335"),
            ("1.0.0.2", "13335"),
            ("8.8.8.8", "15169"),
            ("8.8.4.4", "15169"),
            ("9.9.9.9", "19281"),
            ("208.67.222.222", "36692"),
        ]
        .iter()
        .map(|(ip, asn)| Observation::new(*ip).with_asn(*asn))
        .collect();

        CountDistribution::from_observations(Grouping::Asn, &observations)
    }

    #[test]
    fn bar_table() {
        let table = ShareTable::new(&distribution(), 2, false);

        assert_that(&table.entries).has_length(2);
        assert_that(&table.has_other()).is_false();
        assert_that(&table.total).is_equal_to(7);
        assert_that(&table.unique).is_equal_to(4);
        assert_that(&table.covered_percentage()).is_close_to(500.0 / 7.0, 1e-9);
    }

    #[test]
    fn pie_table_with_other() {
        let table = ShareTable::new(&distribution(), 2, true).with_population("DNSSEC-capable");

        let keys: Vec<_> = table.entries.iter().map(|x| (x.key.as_str(), x.count)).collect();

        assert_that(&keys).is_equal_to(vec![("13335", 3), ("15169", 2), ("Other", 2)]);
        assert_that(&table.has_other()).is_true();
        assert_that(&table.covered_percentage()).is_close_to(100.0, 1e-9);
        assert_that(&table.population.as_str()).is_equal_to("DNSSEC-capable");
    }

    #[test]
    fn pie_table_without_remaining_groups_has_no_other() {
        let table = ShareTable::new(&distribution(), 4, true);

        assert_that(&table.entries).has_length(4);
        assert_that(&table.has_other()).is_false();
        assert_that(&table.ranked_len()).is_equal_to(4);
    }

    #[test]
    fn group_named_other_is_a_ranked_entry() {
        let observations: Vec<_> = ["Cloudflare", "Cloudflare", "Other"]
            .iter()
            .enumerate()
            .map(|(i, owner)| Observation::new(format!("1.1.1.{}", i)).with_owner(*owner))
            .collect();
        let distribution = CountDistribution::from_observations(Grouping::Owner, &observations);

        let table = ShareTable::new(&distribution, 5, false);

        let keys: Vec<_> = table.entries.iter().map(|x| x.key.as_str()).collect();
        assert_that(&keys).is_equal_to(vec!["Cloudflare", "Other"]);
        assert_that(&table.has_other()).is_false();
        assert_that(&table.ranked_len()).is_equal_to(2);
        assert_that(&table.covered_percentage()).is_close_to(100.0, 1e-9);
    }
}
