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

use crate::app::modules::compare::compare::Compare;
use crate::app::modules::compare::config::CompareConfig;
use crate::app::{AppConfig, ExitStatus};

#[allow(clippy::module_inception)]
pub mod compare;
pub mod config;

pub fn run(args: &ArgMatches, app_config: &AppConfig) -> Result<ExitStatus> {
    info!("compare module selected.");
    let args = args.subcommand_matches("compare").context("compare arguments missing")?;
    let config: CompareConfig = args.try_into()?;

    Compare::init(app_config, &config)?
        .load_observations()?
        .compare()?
        .output()
}
