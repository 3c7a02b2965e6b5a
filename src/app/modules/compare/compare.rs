// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use anyhow::Result;
use tracing::info;

use crate::app::console::{Console, ConsoleOpts};
use crate::app::modules::compare::config::CompareConfig;
use crate::app::modules::{load_observations, Environment, Partial};
use crate::app::{output, AppConfig, ExitStatus};
use crate::comparison::Comparison;
use crate::observation::Observations;

pub struct Compare {}

impl Compare {
    pub fn init<'a>(app_config: &'a AppConfig, config: &'a CompareConfig) -> Result<LoadObservations<'a>> {
        let console = Console::new(ConsoleOpts::from(app_config));
        let env = Environment::new(app_config, config, console);

        Ok(LoadObservations { env })
    }
}

pub struct LoadObservations<'a> {
    env: Environment<'a, CompareConfig>,
}

impl<'a> LoadObservations<'a> {
    pub fn load_observations(self) -> Result<Partial<CompareSubset<'a>>> {
        let observations = match load_observations(&self.env)? {
            Partial::Next(observations) => observations,
            Partial::ExitStatus(e) => return Ok(Partial::ExitStatus(e)),
        };

        Ok(Partial::Next(CompareSubset {
            env: self.env,
            observations,
        }))
    }
}

impl<'a> Partial<CompareSubset<'a>> {
    pub fn compare(self) -> Result<Partial<OutputComparison<'a>>> {
        match self {
            Partial::Next(next) => next.compare(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct CompareSubset<'a> {
    env: Environment<'a, CompareConfig>,
    observations: Observations,
}

impl<'a> CompareSubset<'a> {
    fn compare(self) -> Result<Partial<OutputComparison<'a>>> {
        let subset = &self.env.mod_config.subset;
        if self.env.console.not_quiet() {
            self.env.console.caption(format!(
                "Comparing {} with {} resolvers.",
                self.env.app_config.filter, subset
            ));
        }

        let mut comparison = Comparison::compare(&self.observations, subset, &self.env.mod_config.analysis_opts());
        comparison.baseline.population = self.env.app_config.filter.to_string();
        info!("Finished comparison.");

        if comparison.subset.observations == 0 && self.env.console.not_quiet() {
            self.env
                .console
                .attention(format!("No {} resolvers among the loaded observations.", subset));
        }

        Ok(Partial::Next(OutputComparison {
            env: self.env,
            comparison,
        }))
    }
}

impl Partial<OutputComparison<'_>> {
    pub fn output(self) -> Result<ExitStatus> {
        match self {
            Partial::Next(next) => next.output(),
            Partial::ExitStatus(e) => Ok(e),
        }
    }
}

pub struct OutputComparison<'a> {
    env: Environment<'a, CompareConfig>,
    comparison: Comparison,
}

impl OutputComparison<'_> {
    fn output(self) -> Result<ExitStatus> {
        output::output(&self.env.app_config.output_config, &self.comparison)?;
        self.env.console.print_finished();

        Ok(ExitStatus::Ok)
    }
}
