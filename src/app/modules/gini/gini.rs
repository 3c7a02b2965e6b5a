// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::GiniAnalysis;
use crate::app::console::{Console, ConsoleOpts};
use crate::app::modules::gini::config::GiniConfig;
use crate::app::modules::{load_observations, Environment, Partial};
use crate::app::{output, AppConfig, ExitStatus};
use crate::charts;
use crate::distribution::{CountDistribution, Grouping};
use crate::observation::Observations;

/// Number of entries of the per grouping bar charts.
static CHART_TOP: usize = 20;

pub struct Gini {}

impl Gini {
    pub fn init<'a>(app_config: &'a AppConfig, config: &'a GiniConfig) -> Result<LoadObservations<'a>> {
        let console = Console::new(ConsoleOpts::from(app_config));
        let env = Environment::new(app_config, config, console);

        Ok(LoadObservations { env })
    }
}

pub struct LoadObservations<'a> {
    env: Environment<'a, GiniConfig>,
}

impl<'a> LoadObservations<'a> {
    pub fn load_observations(self) -> Result<Partial<Analyze<'a>>> {
        let observations = match load_observations(&self.env)? {
            Partial::Next(observations) => observations,
            Partial::ExitStatus(e) => return Ok(Partial::ExitStatus(e)),
        };

        Ok(Partial::Next(Analyze {
            env: self.env,
            observations,
        }))
    }
}

impl<'a> Partial<Analyze<'a>> {
    pub fn analyze(self) -> Result<Partial<OutputAnalysis<'a>>> {
        match self {
            Partial::Next(next) => next.analyze(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct Analyze<'a> {
    env: Environment<'a, GiniConfig>,
    observations: Observations,
}

impl<'a> Analyze<'a> {
    fn analyze(self) -> Result<Partial<OutputAnalysis<'a>>> {
        if self.env.console.not_quiet() {
            self.env.console.caption(format!(
                "Computing Gini coefficients for {} groupings.",
                self.env.mod_config.groupings.len()
            ));
        }
        let analysis = GiniAnalysis::analyze(
            self.env.app_config.filter.to_string(),
            &self.observations,
            &self.env.mod_config.analysis_opts(),
        );
        info!("Finished analysis.");

        Ok(Partial::Next(OutputAnalysis {
            env: self.env,
            observations: self.observations,
            analysis,
        }))
    }
}

impl<'a> Partial<OutputAnalysis<'a>> {
    pub fn output(self) -> Result<Partial<WriteCharts<'a>>> {
        match self {
            Partial::Next(next) => next.output(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct OutputAnalysis<'a> {
    env: Environment<'a, GiniConfig>,
    observations: Observations,
    analysis: GiniAnalysis,
}

impl<'a> OutputAnalysis<'a> {
    fn output(self) -> Result<Partial<WriteCharts<'a>>> {
        output::output(&self.env.app_config.output_config, &self.analysis)?;

        Ok(Partial::Next(WriteCharts {
            env: self.env,
            observations: self.observations,
            analysis: self.analysis,
        }))
    }
}

impl<'a> Partial<WriteCharts<'a>> {
    pub fn write_charts(self) -> Result<ExitStatus> {
        match self {
            Partial::Next(next) => next.write_charts(),
            Partial::ExitStatus(e) => Ok(e),
        }
    }
}

pub struct WriteCharts<'a> {
    env: Environment<'a, GiniConfig>,
    observations: Observations,
    analysis: GiniAnalysis,
}

impl WriteCharts<'_> {
    fn write_charts(self) -> Result<ExitStatus> {
        let dir = match self.env.mod_config.charts {
            Some(ref dir) => dir,
            None => {
                self.env.console.print_finished();
                return Ok(ExitStatus::Ok);
            }
        };
        fs::create_dir_all(dir).with_context(|| format!("failed to create chart directory '{}'", dir.display()))?;

        let distributions: Vec<_> = self
            .analysis
            .reports
            .iter()
            .filter(|x| x.has_data())
            .map(|x| CountDistribution::from_observations(x.grouping, &self.observations))
            .collect();
        if distributions.is_empty() {
            self.env.console.attention("No data to chart.");
            return Ok(ExitStatus::Ok);
        }

        for distribution in &distributions {
            self.write_distribution_chart(dir, distribution)?;
        }
        self.write_lorenz_chart(dir, &distributions)?;

        self.env.console.print_finished();
        Ok(ExitStatus::Ok)
    }

    fn write_distribution_chart(&self, dir: &Path, distribution: &CountDistribution) -> Result<()> {
        let grouping = distribution.grouping();
        let path = dir.join(format!("{}_distribution.svg", grouping.as_str()));
        let title = distribution_title(grouping, distribution.len(), distribution.gini());

        charts::bar_chart(&title, &distribution.top(CHART_TOP), &path)
            .with_context(|| format!("failed to write chart '{}'", path.display()))?;
        self.env.console.print_chart_written(&path);

        Ok(())
    }

    fn write_lorenz_chart(&self, dir: &Path, distributions: &[CountDistribution]) -> Result<()> {
        let path = dir.join("lorenz_curves.svg");
        let curves: Vec<_> = distributions
            .iter()
            .map(|x| (x.grouping().label().to_string(), x.lorenz_curve()))
            .collect();

        charts::lorenz_chart(&format!("Lorenz Curves of {}", self.analysis.population), &curves, &path)
            .with_context(|| format!("failed to write chart '{}'", path.display()))?;
        self.env.console.print_chart_written(&path);

        Ok(())
    }
}

fn distribution_title(grouping: Grouping, unique: usize, gini: f64) -> String {
    if unique > CHART_TOP {
        format!("{} Distribution (Top {}), Gini: {:.3}", grouping, CHART_TOP, gini)
    } else {
        format!("{} Distribution, Gini: {:.3}", grouping, gini)
    }
}
