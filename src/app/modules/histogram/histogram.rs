// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use anyhow::{Context, Result};
use tracing::info;

use crate::app::console::{Console, ConsoleOpts};
use crate::app::modules::histogram::config::HistogramConfig;
use crate::app::modules::{load_observations, Environment, Partial};
use crate::app::{output, AppConfig, ExitStatus};
use crate::charts;
use crate::histogram::OctetHistogram;
use crate::observation::Observations;

pub struct Histogram {}

impl Histogram {
    pub fn init<'a>(app_config: &'a AppConfig, config: &'a HistogramConfig) -> Result<LoadObservations<'a>> {
        let console = Console::new(ConsoleOpts::from(app_config));
        let env = Environment::new(app_config, config, console);

        Ok(LoadObservations { env })
    }
}

pub struct LoadObservations<'a> {
    env: Environment<'a, HistogramConfig>,
}

impl<'a> LoadObservations<'a> {
    pub fn load_observations(self) -> Result<Partial<Count<'a>>> {
        let observations = match load_observations(&self.env)? {
            Partial::Next(observations) => observations,
            Partial::ExitStatus(e) => return Ok(Partial::ExitStatus(e)),
        };

        Ok(Partial::Next(Count {
            env: self.env,
            observations,
        }))
    }
}

impl<'a> Partial<Count<'a>> {
    pub fn count(self) -> Result<Partial<OutputHistogram<'a>>> {
        match self {
            Partial::Next(next) => next.count(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct Count<'a> {
    env: Environment<'a, HistogramConfig>,
    observations: Observations,
}

impl<'a> Count<'a> {
    fn count(self) -> Result<Partial<OutputHistogram<'a>>> {
        let histogram = OctetHistogram::from_observations(&self.observations);
        info!(
            "Counted {} resolvers in {} /8 blocks; skipped {}.",
            histogram.total,
            histogram.buckets.len(),
            histogram.skipped
        );
        if histogram.is_empty() {
            self.env
                .console
                .error("No observation carries a valid IPv4 address. Aborting.");
            return Ok(Partial::ExitStatus(ExitStatus::Abort));
        }

        Ok(Partial::Next(OutputHistogram {
            env: self.env,
            histogram,
        }))
    }
}

impl<'a> Partial<OutputHistogram<'a>> {
    pub fn output(self) -> Result<Partial<WriteChart<'a>>> {
        match self {
            Partial::Next(next) => next.output(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct OutputHistogram<'a> {
    env: Environment<'a, HistogramConfig>,
    histogram: OctetHistogram,
}

impl<'a> OutputHistogram<'a> {
    fn output(self) -> Result<Partial<WriteChart<'a>>> {
        output::output(&self.env.app_config.output_config, &self.histogram)?;

        Ok(Partial::Next(WriteChart {
            env: self.env,
            histogram: self.histogram,
        }))
    }
}

impl Partial<WriteChart<'_>> {
    pub fn write_chart(self) -> Result<ExitStatus> {
        match self {
            Partial::Next(next) => next.write_chart(),
            Partial::ExitStatus(e) => Ok(e),
        }
    }
}

pub struct WriteChart<'a> {
    env: Environment<'a, HistogramConfig>,
    histogram: OctetHistogram,
}

impl WriteChart<'_> {
    fn write_chart(self) -> Result<ExitStatus> {
        let config = self.env.mod_config;
        if let Some(ref path) = config.chart {
            charts::histogram_chart(&config.title, &self.histogram, path)
                .with_context(|| format!("failed to write chart '{}'", path.display()))?;
            self.env.console.print_chart_written(path);
        }
        self.env.console.print_finished();

        Ok(ExitStatus::Ok)
    }
}
