// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryInto;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::info;

use crate::app::modules::histogram::config::HistogramConfig;
use crate::app::modules::histogram::histogram::Histogram;
use crate::app::{AppConfig, ExitStatus};

pub mod config;
#[allow(clippy::module_inception)]
pub mod histogram;

pub fn run(args: &ArgMatches, app_config: &AppConfig) -> Result<ExitStatus> {
    info!("histogram module selected.");
    let args = args
        .subcommand_matches("histogram")
        .context("histogram arguments missing")?;
    let config: HistogramConfig = args.try_into()?;

    Histogram::init(app_config, &config)?
        .load_observations()?
        .count()?
        .output()?
        .write_chart()
}
