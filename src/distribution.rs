// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Count distributions of observations grouped by address block, AS, owner, or country.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::gini;
use crate::observation::Observation;
use crate::statistics::DescriptiveStatistics;
use crate::Error;

pub static OTHER_KEY: &str = "Other";

/// The key observations are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    Slash8,
    Slash16,
    Asn,
    Owner,
    Country,
}

impl Grouping {
    /// The groupings of a standard Gini analysis.
    pub fn address_space_and_as() -> Vec<Grouping> {
        vec![Grouping::Slash8, Grouping::Slash16, Grouping::Asn]
    }

    pub fn all() -> Vec<Grouping> {
        vec![
            Grouping::Slash8,
            Grouping::Slash16,
            Grouping::Asn,
            Grouping::Owner,
            Grouping::Country,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grouping::Slash8 => "/8 Address Space",
            Grouping::Slash16 => "/16 Address Space",
            Grouping::Asn => "AS",
            Grouping::Owner => "Owner",
            Grouping::Country => "Country",
        }
    }

    /// Identifier as accepted on the command line and used in JSON, e.g., `slash8`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Slash8 => "slash8",
            Grouping::Slash16 => "slash16",
            Grouping::Asn => "asn",
            Grouping::Owner => "owner",
            Grouping::Country => "country",
        }
    }

    /// Returns the grouping key of `observation` or `None` if the observation does not take part in this grouping.
    pub fn key(&self, observation: &Observation) -> Option<String> {
        match self {
            Grouping::Slash8 => ip_prefix(observation.ip(), 1),
            Grouping::Slash16 => ip_prefix(observation.ip(), 2),
            Grouping::Asn => observation.asn().map(ToString::to_string),
            Grouping::Owner => observation.owner().map(ToString::to_string),
            Grouping::Country => observation.geo_location().map(ToString::to_string),
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grouping {
    type Err = Error;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        match str.trim().to_lowercase().as_str() {
            "slash8" | "/8" | "8" => Ok(Grouping::Slash8),
            "slash16" | "/16" | "16" => Ok(Grouping::Slash16),
            "asn" | "as" => Ok(Grouping::Asn),
            "owner" | "org" => Ok(Grouping::Owner),
            "country" | "geo" => Ok(Grouping::Country),
            _ => Err(Error::ParserError {
                what: str.to_string(),
                to: "Grouping",
                why: "unknown grouping".to_string(),
            }),
        }
    }
}

/// Truncates a dotted-quad to its first `octets` octets, e.g., `1.2.3.4` to `1.2` for two octets.
///
/// Addresses not decomposable into at least two dot-separated parts or with leading parts that
/// are not octets yield `None`.
fn ip_prefix(ip: &str, octets: usize) -> Option<String> {
    let parts: Vec<&str> = ip.trim().split('.').collect();
    if parts.len() < 2 || parts.len() < octets {
        return None;
    }
    let prefix = &parts[..octets];
    if prefix.iter().any(|x| u8::from_str(x).is_err()) {
        return None;
    }

    Some(prefix.join("."))
}

/// Number of observations per grouping key, in order of first appearance.
#[derive(Debug, Clone, Serialize)]
pub struct CountDistribution {
    grouping: Grouping,
    counts: IndexMap<String, usize>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    names: HashMap<String, String>,
    skipped: usize,
}

impl CountDistribution {
    pub fn from_observations<'a, I: IntoIterator<Item = &'a Observation>>(
        grouping: Grouping,
        observations: I,
    ) -> CountDistribution {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        let mut names: HashMap<String, String> = HashMap::new();
        let mut skipped = 0;

        for observation in observations {
            let key = match grouping.key(observation) {
                Some(key) => key,
                None => {
                    trace!("Skipping '{}' for {} grouping.", observation.ip(), grouping);
                    skipped += 1;
                    continue;
                }
            };
            if grouping == Grouping::Asn {
                if let Some(as_name) = observation.as_name() {
                    names.entry(key.clone()).or_insert_with(|| as_name.to_string());
                }
            }
            *counts.entry(key).or_insert(0) += 1;
        }
        debug!(
            "Built {} distribution of {} keys; skipped {} observations.",
            grouping,
            counts.len(),
            skipped
        );

        CountDistribution {
            grouping,
            counts,
            names,
            skipped,
        }
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Sum of all counts, i.e., the number of observations that took part in this grouping.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of observations without a key for this grouping.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    /// Display name of a key; currently only AS names are known.
    pub fn name(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    pub fn counts(&self) -> &IndexMap<String, usize> {
        &self.counts
    }

    pub fn values(&self) -> Vec<usize> {
        self.counts.values().copied().collect()
    }

    /// Entries by count descending; ties keep the order of first appearance.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Entries ordered by their numeric key; non-numeric keys go last in order of appearance.
    pub fn numeric_ascending(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by_key(|(k, _)| numeric_sort_key(k));
        entries
    }

    pub fn top(&self, n: usize) -> Vec<ShareEntry> {
        let total = self.total();
        self.ranked()
            .into_iter()
            .take(n)
            .map(|(key, count)| ShareEntry::new(key, self.name(key), count, total))
            .collect()
    }

    /// Like [`CountDistribution::top`] but sums all remaining entries up into an additional `Other` entry.
    pub fn top_with_other(&self, n: usize) -> Vec<ShareEntry> {
        let total = self.total();
        let mut top = self.top(n);
        if self.len() > n {
            let shown: usize = top.iter().map(|x| x.count).sum();
            top.push(ShareEntry::new(OTHER_KEY, None, total - shown, total));
        }
        top
    }

    pub fn gini(&self) -> f64 {
        gini::gini(&self.values())
    }

    pub fn lorenz_curve(&self) -> Vec<(f64, f64)> {
        gini::lorenz_curve(&self.values())
    }

    pub fn statistics(&self) -> Option<DescriptiveStatistics> {
        DescriptiveStatistics::from_counts(&self.values())
    }
}

fn numeric_sort_key(key: &str) -> Vec<u32> {
    key.split('.').map(|x| u32::from_str(x).unwrap_or(u32::MAX)).collect()
}

/// One key of a distribution with its share of the distribution's total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEntry {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: usize,
    pub percentage: f64,
}

impl ShareEntry {
    pub fn new<T: Into<String>>(key: T, name: Option<&str>, count: usize, total: usize) -> ShareEntry {
        ShareEntry {
            key: key.into(),
            name: name.map(ToString::to_string),
            count,
            percentage: percentage(count, total),
        }
    }

    /// Key and, if known, name, e.g., `13335 (CLOUDFLARENET)`.
    pub fn label(&self) -> String {
        match self.name {
            Some(ref name) => format!("{} ({})", self.key, name),
            None => self.key.clone(),
        }
    }
}

/// `part` in percent of `total`; `0.0` if `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    fn observations() -> Vec<Observation> {
        vec![
            Observation::new("1.2.3.4").with_asn("13335").with_as_name("CLOUDFLARENET"),
            Observation::new("1.2.5.6").with_asn("13335"),
            Observation::new("8.8.8.8").with_asn("15169").with_as_name("GOOGLE"),
        ]
    }

    fn as_map(distribution: &CountDistribution) -> Vec<(String, usize)> {
        distribution.counts().iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    #[test]
    fn slash8() {
        let distribution = CountDistribution::from_observations(Grouping::Slash8, &observations());

        assert_that(&as_map(&distribution)).is_equal_to(vec![("1".to_string(), 2), ("8".to_string(), 1)]);
    }

    #[test]
    fn slash16() {
        let distribution = CountDistribution::from_observations(Grouping::Slash16, &observations());

        assert_that(&as_map(&distribution)).is_equal_to(vec![("1.2".to_string(), 2), ("8.8".to_string(), 1)]);
    }

    #[test]
    fn malformed_ips_are_skipped() {
        let observations = vec![
            Observation::new("10.0.0.1"),
            Observation::new("localhost"),
            Observation::new("300.1.1.1"),
            Observation::new("::1"),
            Observation::new("10.1"),
        ];

        let slash8 = CountDistribution::from_observations(Grouping::Slash8, &observations);
        let slash16 = CountDistribution::from_observations(Grouping::Slash16, &observations);

        assert_that(&as_map(&slash8)).is_equal_to(vec![("10".to_string(), 2)]);
        assert_that(&slash8.skipped()).is_equal_to(3);
        assert_that(&as_map(&slash16)).is_equal_to(vec![("10.0".to_string(), 1), ("10.1".to_string(), 1)]);
    }

    #[test]
    fn missing_asn_is_excluded() {
        let observations = vec![
            Observation::new("1.1.1.1").with_asn("13335"),
            Observation::new("1.0.0.1"),
            Observation::new("9.9.9.9").with_asn(""),
        ];

        let asn = CountDistribution::from_observations(Grouping::Asn, &observations);
        let slash8 = CountDistribution::from_observations(Grouping::Slash8, &observations);

        assert_that(&asn.total()).is_equal_to(1);
        assert_that(&asn.skipped()).is_equal_to(2);
        assert_that(&slash8.total()).is_equal_to(3);
    }

    #[test]
    fn as_names_are_taken_from_first_named_observation() {
        let distribution = CountDistribution::from_observations(Grouping::Asn, &observations());

        assert_that(&distribution.name("13335")).is_equal_to(Some("CLOUDFLARENET"));
        assert_that(&distribution.name("15169")).is_equal_to(Some("GOOGLE"));
    }

    #[test]
    fn ranked_keeps_first_appearance_on_ties() {
        let observations = vec![
            Observation::new("9.0.0.1"),
            Observation::new("5.0.0.1"),
            Observation::new("7.0.0.1"),
            Observation::new("7.0.0.2"),
        ];
        let distribution = CountDistribution::from_observations(Grouping::Slash8, &observations);

        assert_that(&distribution.ranked()).is_equal_to(vec![("7", 2), ("9", 1), ("5", 1)]);
    }

    #[test]
    fn top_shares() {
        let distribution = CountDistribution::from_observations(Grouping::Asn, &observations());

        let top = distribution.top(1);

        assert_that(&top).has_length(1);
        assert_that(&top[0].key.as_str()).is_equal_to("13335");
        assert_that(&top[0].count).is_equal_to(2);
        assert_that(&top[0].percentage).is_close_to(66.666, 0.001);
        assert_that(&top[0].label().as_str()).is_equal_to("13335 (CLOUDFLARENET)");
    }

    #[test]
    fn top_with_other() {
        let observations: Vec<_> = ["1.0.0.1", "1.0.0.2", "1.0.0.3", "2.0.0.1", "2.0.0.2", "3.0.0.1", "4.0.0.1"]
            .iter()
            .map(|x| Observation::new(*x))
            .collect();
        let distribution = CountDistribution::from_observations(Grouping::Slash8, &observations);

        let top = distribution.top_with_other(2);
        let keys: Vec<_> = top.iter().map(|x| (x.key.as_str(), x.count)).collect();

        assert_that(&keys).is_equal_to(vec![("1", 3), ("2", 2), ("Other", 2)]);
        assert_that(&distribution.top_with_other(4)).has_length(4);
    }

    #[test]
    fn numeric_ascending() {
        let observations: Vec<_> = ["100.0.0.1", "20.0.0.1", "3.0.0.1", "20.0.0.2"]
            .iter()
            .map(|x| Observation::new(*x))
            .collect();
        let distribution = CountDistribution::from_observations(Grouping::Slash8, &observations);

        assert_that(&distribution.numeric_ascending()).is_equal_to(vec![("3", 1), ("20", 2), ("100", 1)]);
    }

    #[test]
    fn gini_of_distribution() {
        let distribution = CountDistribution::from_observations(Grouping::Slash8, &observations());

        // counts [2, 1]
        assert_that(&distribution.gini()).is_close_to(1.0 / 6.0, 1e-12);
    }

    #[test]
    fn grouping_from_str() {
        assert_that(&Grouping::from_str("/8").unwrap()).is_equal_to(Grouping::Slash8);
        assert_that(&Grouping::from_str("Slash16").unwrap()).is_equal_to(Grouping::Slash16);
        assert_that(&Grouping::from_str("as").unwrap()).is_equal_to(Grouping::Asn);
        assert_that(&Grouping::from_str("geo").unwrap()).is_equal_to(Grouping::Country);
        assert_that(&Grouping::from_str("city")).is_err();
    }

    #[test]
    fn grouping_identifier_parses_back() {
        for grouping in Grouping::all() {
            assert_that(&Grouping::from_str(grouping.as_str()).unwrap()).is_equal_to(grouping);
        }
    }

    #[test]
    fn empty_distribution() {
        let distribution = CountDistribution::from_observations(Grouping::Owner, &Vec::new());

        assert_that(&distribution.is_empty()).is_true();
        assert_that(&distribution.gini()).is_equal_to(0.0);
        assert_that(&distribution.statistics()).is_none();
        assert_that(&distribution.top_with_other(5)).is_empty();
    }
}
