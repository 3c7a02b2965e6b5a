// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;

use clap::ArgMatches;

use crate::analysis::{AnalysisOpts, DEFAULT_TOP};
use crate::distribution::Grouping;
use crate::observation::Filter;

#[derive(Debug)]
pub struct CompareConfig {
    pub top: usize,
    /// Selects the subset compared against all loaded observations
    pub subset: Filter,
}

impl CompareConfig {
    pub fn analysis_opts(&self) -> AnalysisOpts {
        AnalysisOpts::new(Grouping::address_space_and_as(), self.top)
    }
}

impl TryFrom<&ArgMatches> for CompareConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let config = CompareConfig {
            top: args.get_one::<usize>("top").copied().unwrap_or(DEFAULT_TOP),
            subset: Filter::dnssec(),
        };

        Ok(config)
    }
}
