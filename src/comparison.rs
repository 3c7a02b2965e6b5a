// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Side by side comparison of a baseline population and a filtered subset, e.g., all resolvers
//! vs. DNSSEC-capable resolvers.

use serde::Serialize;
use tracing::info;

use crate::analysis::{AnalysisOpts, DistributionReport, GiniAnalysis};
use crate::distribution::{percentage, CountDistribution, Grouping};
use crate::observation::{Filter, Observations};

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub baseline: GiniAnalysis,
    pub subset: GiniAnalysis,
    /// Subset size in percent of the baseline size
    pub subset_share: f64,
    pub groupings: Vec<GroupingComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupingComparison {
    pub grouping: Grouping,
    pub baseline_gini: f64,
    pub subset_gini: f64,
    pub baseline_unique: usize,
    pub subset_unique: usize,
    pub top: Vec<ComparedEntity>,
}

impl GroupingComparison {
    /// Subset gini minus baseline gini.
    pub fn gini_difference(&self) -> f64 {
        self.subset_gini - self.baseline_gini
    }

    pub fn subset_more_concentrated(&self) -> bool {
        self.subset_gini > self.baseline_gini
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedEntity {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub baseline_count: usize,
    pub subset_count: usize,
    /// Subset count in percent of the baseline count
    pub subset_percentage: f64,
}

impl ComparedEntity {
    pub fn label(&self) -> String {
        match self.name {
            Some(ref name) => format!("{} ({})", self.key, name),
            None => self.key.clone(),
        }
    }
}

impl Comparison {
    pub fn compare(baseline: &Observations, subset_filter: &Filter, opts: &AnalysisOpts) -> Comparison {
        let subset = baseline.filter(subset_filter);
        info!(
            "Comparing {} baseline observations with {} observations of subset '{}'.",
            baseline.len(),
            subset.len(),
            subset_filter
        );

        let groupings = opts
            .groupings
            .iter()
            .map(|grouping| {
                let baseline = CountDistribution::from_observations(*grouping, baseline);
                let subset = CountDistribution::from_observations(*grouping, &subset);
                compare_distributions(&baseline, &subset, opts.top)
            })
            .collect();

        Comparison {
            baseline: GiniAnalysis::analyze("all resolvers", baseline, opts),
            subset: GiniAnalysis::analyze(subset_filter.to_string(), &subset, opts),
            subset_share: percentage(subset.len(), baseline.len()),
            groupings,
        }
    }

    pub fn grouping(&self, grouping: Grouping) -> Option<&GroupingComparison> {
        self.groupings.iter().find(|x| x.grouping == grouping)
    }

    pub fn reports(&self) -> impl Iterator<Item = (&DistributionReport, &DistributionReport)> {
        self.baseline.reports.iter().zip(self.subset.reports.iter())
    }
}

fn compare_distributions(baseline: &CountDistribution, subset: &CountDistribution, top: usize) -> GroupingComparison {
    let mut keys: Vec<&str> = Vec::new();
    for (key, _) in baseline.ranked().into_iter().take(top) {
        keys.push(key);
    }
    for (key, _) in subset.ranked().into_iter().take(top) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    // Stable sort keeps baseline ranks first on ties
    keys.sort_by(|a, b| {
        let a = baseline.get(a).unwrap_or(0);
        let b = baseline.get(b).unwrap_or(0);
        b.cmp(&a)
    });

    let top = keys
        .into_iter()
        .take(top)
        .map(|key| {
            let baseline_count = baseline.get(key).unwrap_or(0);
            let subset_count = subset.get(key).unwrap_or(0);
            ComparedEntity {
                key: key.to_string(),
                name: baseline.name(key).or_else(|| subset.name(key)).map(ToString::to_string),
                baseline_count,
                subset_count,
                subset_percentage: percentage(subset_count, baseline_count),
            }
        })
        .collect();

    GroupingComparison {
        grouping: baseline.grouping(),
        baseline_gini: baseline.gini(),
        subset_gini: subset.gini(),
        baseline_unique: baseline.len(),
        subset_unique: subset.len(),
        top,
    }
}
