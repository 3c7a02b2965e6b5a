// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::ArgMatches;

use crate::analysis::{AnalysisOpts, DEFAULT_TOP};
use crate::distribution::Grouping;

#[derive(Debug)]
pub struct GiniConfig {
    pub groupings: Vec<Grouping>,
    pub top: usize,
    /// Directory to write SVG charts to
    pub charts: Option<PathBuf>,
}

impl GiniConfig {
    pub fn analysis_opts(&self) -> AnalysisOpts {
        AnalysisOpts::new(self.groupings.clone(), self.top)
    }
}

impl TryFrom<&ArgMatches> for GiniConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let groupings: Vec<Grouping> = args
            .get_many::<String>("groupings")
            .context("No groupings specified")?
            .map(|x| Grouping::from_str(x))
            .collect::<std::result::Result<_, _>>()
            .context("failed to parse groupings")?;
        let mut unique = Vec::with_capacity(groupings.len());
        for grouping in groupings {
            if !unique.contains(&grouping) {
                unique.push(grouping);
            }
        }

        let config = GiniConfig {
            groupings: unique,
            top: args.get_one::<usize>("top").copied().unwrap_or(DEFAULT_TOP),
            charts: args.get_one::<String>("charts").map(PathBuf::from),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::app::cli_parser::create_parser;

    fn gini_config(args: Vec<&str>) -> GiniConfig {
        let args = create_parser().try_get_matches_from(args).unwrap();
        let args = args.subcommand_matches("gini").unwrap();

        GiniConfig::try_from(args).unwrap()
    }

    #[test]
    fn defaults() {
        let config = gini_config(vec!["rcensus", "gini", "-i", "x.tsv"]);

        assert_that(&config.groupings).is_equal_to(Grouping::address_space_and_as());
        assert_that(&config.top).is_equal_to(5);
        assert_that(&config.charts).is_none();
    }

    #[test]
    fn duplicate_groupings_are_removed() {
        let config = gini_config(vec!["rcensus", "gini", "-g", "asn,owner", "-g", "asn", "--top", "3"]);

        assert_that(&config.groupings).is_equal_to(vec![Grouping::Asn, Grouping::Owner]);
        assert_that(&config.top).is_equal_to(3);
    }
}
