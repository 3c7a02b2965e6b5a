// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use anyhow::{Context, Result};
use tracing::info;

use crate::app::console::{Console, ConsoleOpts};
use crate::app::modules::hilbert::config::HilbertConfig;
use crate::app::modules::{load_observations, Environment, Partial};
use crate::app::{output, AppConfig, ExitStatus};
use crate::charts;
use crate::hilbert::HilbertMap;
use crate::source;

pub struct Hilbert {}

impl Hilbert {
    pub fn init<'a>(app_config: &'a AppConfig, config: &'a HilbertConfig) -> Result<LoadAddresses<'a>> {
        let console = Console::new(ConsoleOpts::from(app_config));
        let env = Environment::new(app_config, config, console);

        Ok(LoadAddresses { env })
    }
}

pub struct LoadAddresses<'a> {
    env: Environment<'a, HilbertConfig>,
}

impl<'a> LoadAddresses<'a> {
    pub fn load_addresses(self) -> Result<Partial<OutputMap<'a>>> {
        let map = match self.env.mod_config.ip_list {
            Some(ref path) => {
                if self.env.console.not_quiet() {
                    self.env
                        .console
                        .caption(format!("Loading IP addresses from '{}'.", path.display()));
                }
                let list = source::load_ip_list(path)
                    .with_context(|| format!("failed to load IP addresses from '{}'", path.display()))?;
                HilbertMap::from_addrs(list.addrs, list.skipped)
            }
            None => match load_observations(&self.env)? {
                Partial::Next(observations) => HilbertMap::from_observations(&observations),
                Partial::ExitStatus(e) => return Ok(Partial::ExitStatus(e)),
            },
        };
        info!("Mapped {} addresses; skipped {}.", map.len(), map.skipped);

        if self.env.console.not_quiet() && map.skipped > 0 {
            self.env.console.attention(format!(
                "Skipped {} addresses that are not IPv4 addresses.",
                map.skipped
            ));
        }
        if map.is_empty() {
            self.env.console.error("No IPv4 addresses to map. Aborting.");
            return Ok(Partial::ExitStatus(ExitStatus::Abort));
        }

        Ok(Partial::Next(OutputMap { env: self.env, map }))
    }
}

impl<'a> Partial<OutputMap<'a>> {
    pub fn output(self) -> Result<Partial<WriteChart<'a>>> {
        match self {
            Partial::Next(next) => next.output(),
            Partial::ExitStatus(e) => Ok(Partial::ExitStatus(e)),
        }
    }
}

pub struct OutputMap<'a> {
    env: Environment<'a, HilbertConfig>,
    map: HilbertMap,
}

impl<'a> OutputMap<'a> {
    fn output(self) -> Result<Partial<WriteChart<'a>>> {
        output::output(&self.env.app_config.output_config, &self.map)?;

        Ok(Partial::Next(WriteChart {
            env: self.env,
            map: self.map,
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
    env: Environment<'a, HilbertConfig>,
    map: HilbertMap,
}

impl WriteChart<'_> {
    fn write_chart(self) -> Result<ExitStatus> {
        let config = self.env.mod_config;
        if let Some(ref path) = config.chart {
            charts::hilbert_chart(&config.title, &self.map, path)
                .with_context(|| format!("failed to write chart '{}'", path.display()))?;
            self.env.console.print_chart_written(path);
        }
        self.env.console.print_finished();

        Ok(ExitStatus::Ok)
    }
}
