// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::path::PathBuf;

use clap::ArgMatches;

static DEFAULT_TITLE: &str = "Distribution of DNS Resolvers by /8 IP Address Block";

#[derive(Debug)]
pub struct HistogramConfig {
    pub chart: Option<PathBuf>,
    pub title: String,
}

impl TryFrom<&ArgMatches> for HistogramConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let config = HistogramConfig {
            chart: args.get_one::<String>("chart").map(PathBuf::from),
            title: args
                .get_one::<String>("title")
                .cloned()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        };

        Ok(config)
    }
}
