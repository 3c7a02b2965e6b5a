// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::path::PathBuf;

use anyhow::bail;
use clap::ArgMatches;

static DEFAULT_TITLE: &str = "Hilbert Map of Resolver IP Addresses";

#[derive(Debug)]
pub struct HilbertConfig {
    /// Plain list of IPv4 addresses used instead of the observation export
    pub ip_list: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub title: String,
}

impl TryFrom<&ArgMatches> for HilbertConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let ip_list = args.get_one::<String>("ip-list").map(PathBuf::from);
        if ip_list.is_some() && args.get_one::<String>("input").is_some() {
            bail!("--ip-list and --input are mutually exclusive");
        }

        let config = HilbertConfig {
            ip_list,
            chart: args.get_one::<String>("chart").map(PathBuf::from),
            title: args
                .get_one::<String>("title")
                .cloned()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        };

        Ok(config)
    }
}
