// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Gini analysis of an observation set across several groupings.

use serde::Serialize;
use tracing::info;

use crate::distribution::{CountDistribution, Grouping, ShareEntry};
use crate::gini::Inequality;
use crate::observation::Observations;
use crate::statistics::DescriptiveStatistics;

pub static DEFAULT_TOP: usize = 5;

#[derive(Debug, Clone)]
pub struct AnalysisOpts {
    pub groupings: Vec<Grouping>,
    pub top: usize,
}

impl AnalysisOpts {
    pub fn new(groupings: Vec<Grouping>, top: usize) -> AnalysisOpts {
        AnalysisOpts { groupings, top }
    }
}

impl Default for AnalysisOpts {
    fn default() -> Self {
        AnalysisOpts {
            groupings: Grouping::address_space_and_as(),
            top: DEFAULT_TOP,
        }
    }
}

/// Gini coefficient and descriptive statistics of one distribution.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub grouping: Grouping,
    /// Observations that took part in this grouping
    pub total: usize,
    /// Distinct keys
    pub unique: usize,
    pub gini: f64,
    pub inequality: Inequality,
    pub statistics: Option<DescriptiveStatistics>,
    pub top: Vec<ShareEntry>,
}

impl DistributionReport {
    pub fn new(distribution: &CountDistribution, top: usize) -> DistributionReport {
        let gini = distribution.gini();
        DistributionReport {
            grouping: distribution.grouping(),
            total: distribution.total(),
            unique: distribution.len(),
            gini,
            inequality: Inequality::from_gini(gini),
            statistics: distribution.statistics(),
            top: distribution.top(top),
        }
    }

    pub fn has_data(&self) -> bool {
        self.total > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GiniAnalysis {
    /// Description of the analyzed population, e.g., the filter that has been applied
    pub population: String,
    pub observations: usize,
    pub reports: Vec<DistributionReport>,
}

impl GiniAnalysis {
    pub fn analyze<T: Into<String>>(population: T, observations: &Observations, opts: &AnalysisOpts) -> GiniAnalysis {
        let population = population.into();
        info!(
            "Analyzing {} observations of {} for {} groupings.",
            observations.len(),
            population,
            opts.groupings.len()
        );
        let reports = opts
            .groupings
            .iter()
            .map(|grouping| CountDistribution::from_observations(*grouping, observations))
            .map(|distribution| DistributionReport::new(&distribution, opts.top))
            .collect();

        GiniAnalysis {
            population,
            observations: observations.len(),
            reports,
        }
    }

    pub fn report(&self, grouping: Grouping) -> Option<&DistributionReport> {
        self.reports.iter().find(|x| x.grouping == grouping)
    }

    pub fn gini(&self, grouping: Grouping) -> Option<f64> {
        self.report(grouping).map(|x| x.gini)
    }
}
