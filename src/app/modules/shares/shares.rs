// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use anyhow::{Context, Result};
use tracing::info;

use crate::app::console::{Console, ConsoleOpts};
use crate::app::modules::shares::config::{ChartType, SharesConfig};
use crate::app::modules::{load_observations, Environment, Partial};
use crate::app::{output, AppConfig, ExitStatus};
use crate::charts;
use crate::distribution::CountDistribution;
use crate::observation::Observations;
use crate::shares::ShareTable;

pub struct Shares {}

impl Shares {
    pub fn init<'a>(app_config: &'a AppConfig, config: &'a SharesConfig) -> Result<LoadObservations<'a>> {
        let console = Console::new(ConsoleOpts::from(app_config));
        let env = Environment::new(app_config, config, console);

        Ok(LoadObservations { env })
    }
}

pub struct LoadObservations<'a> {
    env: Environment<'a, SharesConfig>,
}

impl<'a> LoadObservations<'a> {
    pub fn load_observations(self) -> Result<Partial<Rank<'a>>> {
        let observations = match load_observations(&self.env)? {
            Partial::Next(observations) => observations,
            Partial::ExitStatus(e) => return Ok(Partial::ExitStatus(e)),
        };

        Ok(Partial::Next(Rank {
            env: self.env,
            observations,
        }))
    }
}

impl<'a> Partial<Rank<'a>> {
    pub fn rank(self) -> Result<Partial<OutputShares<'a>>> {
        match self {
            Partial::Next(next) => next.rank(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct Rank<'a> {
    env: Environment<'a, SharesConfig>,
    observations: Observations,
}

impl<'a> Rank<'a> {
    fn rank(self) -> Result<Partial<OutputShares<'a>>> {
        let config = self.env.mod_config;
        let distribution = CountDistribution::from_observations(config.grouping, &self.observations);
        if distribution.is_empty() {
            self.env
                .console
                .error(format!("No observation carries a {} key. Aborting.", config.grouping));
            return Ok(Partial::ExitStatus(ExitStatus::Abort));
        }

        let table =
            ShareTable::new(&distribution, config.top, config.other).with_population(self.env.app_config.filter.to_string());
        info!("Ranked {} of {} {} keys.", table.entries.len(), table.unique, config.grouping);

        Ok(Partial::Next(OutputShares { env: self.env, table }))
    }
}

impl<'a> Partial<OutputShares<'a>> {
    pub fn output(self) -> Result<Partial<WriteChart<'a>>> {
        match self {
            Partial::Next(next) => next.output(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct OutputShares<'a> {
    env: Environment<'a, SharesConfig>,
    table: ShareTable,
}

impl<'a> OutputShares<'a> {
    fn output(self) -> Result<Partial<WriteChart<'a>>> {
        output::output(&self.env.app_config.output_config, &self.table)?;

        Ok(Partial::Next(WriteChart {
            env: self.env,
            table: self.table,
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
    env: Environment<'a, SharesConfig>,
    table: ShareTable,
}

impl WriteChart<'_> {
    fn write_chart(self) -> Result<ExitStatus> {
        let config = self.env.mod_config;
        if let Some(ref path) = config.chart {
            let title = config.title.clone().unwrap_or_else(|| default_title(&self.table));
            let res = match config.chart_type {
                ChartType::Bar => charts::bar_chart(&title, &self.table.entries, path),
                ChartType::Pie => charts::pie_chart(&title, &self.table.entries, path),
            };
            res.with_context(|| format!("failed to write chart '{}'", path.display()))?;
            self.env.console.print_chart_written(path);
        }
        self.env.console.print_finished();

        Ok(ExitStatus::Ok)
    }
}

fn default_title(table: &ShareTable) -> String {
    format!(
        "Top {} {} by Resolver Count ({})",
        table.ranked_len(),
        table.grouping,
        table.population
    )
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::distribution::Grouping;
    use crate::observation::Observation;

    #[test]
    fn default_title_does_not_count_other() {
        let observations: Observations = vec![
            Observation::new("1.1.1.1").with_asn("13335"),
            Observation::new("8.8.8.8").with_asn("15169"),
            Observation::new("9.9.9.9").with_asn("19281"),
        ]
        .into();
        let distribution = CountDistribution::from_observations(Grouping::Asn, &observations);

        let table = ShareTable::new(&distribution, 2, true);

        assert_that(&default_title(&table).as_str()).is_equal_to("Top 2 AS by Resolver Count (all resolvers)");
    }
}
