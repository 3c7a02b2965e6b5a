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

use crate::distribution::Grouping;
use crate::shares::{DEFAULT_BAR_TOP, DEFAULT_PIE_TOP};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Bar,
    Pie,
}

impl FromStr for ChartType {
    type Err = Error;

    fn from_str(str: &str) -> std::result::Result<Self, Self::Err> {
        match str {
            "bar" => Ok(ChartType::Bar),
            "pie" => Ok(ChartType::Pie),
            _ => Err(Error::ParserError {
                what: str.to_string(),
                to: "ChartType",
                why: "unsupported chart type".to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct SharesConfig {
    pub grouping: Grouping,
    pub top: usize,
    /// Sum up all entries beyond `top`; always set for pie charts
    pub other: bool,
    pub chart: Option<PathBuf>,
    pub chart_type: ChartType,
    pub title: Option<String>,
}

impl TryFrom<&ArgMatches> for SharesConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let grouping = args
            .get_one::<String>("grouping")
            .context("No grouping specified")
            .and_then(|x| Grouping::from_str(x).context("failed to parse grouping"))?;
        let chart_type = args
            .get_one::<String>("chart-type")
            .map(|x| ChartType::from_str(x).context("failed to parse chart type"))
            .unwrap_or(Ok(ChartType::Bar))?;
        let default_top = match chart_type {
            ChartType::Bar => DEFAULT_BAR_TOP,
            ChartType::Pie => DEFAULT_PIE_TOP,
        };

        let config = SharesConfig {
            grouping,
            top: args.get_one::<usize>("top").copied().unwrap_or(default_top),
            other: args.get_flag("other") || chart_type == ChartType::Pie,
            chart: args.get_one::<String>("chart").map(PathBuf::from),
            chart_type,
            title: args.get_one::<String>("title").cloned(),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::app::cli_parser::create_parser;

    fn shares_config(args: Vec<&str>) -> SharesConfig {
        let args = create_parser().try_get_matches_from(args).unwrap();
        let args = args.subcommand_matches("shares").unwrap();

        SharesConfig::try_from(args).unwrap()
    }

    #[test]
    fn bar_chart_defaults() {
        let config = shares_config(vec!["rcensus", "shares", "-i", "x.tsv", "owner"]);

        assert_that(&config.grouping).is_equal_to(Grouping::Owner);
        assert_that(&config.top).is_equal_to(10);
        assert_that(&config.other).is_false();
        assert_that(&config.chart_type).is_equal_to(ChartType::Bar);
    }

    #[test]
    fn pie_chart_defaults() {
        let config = shares_config(vec![
            "rcensus",
            "shares",
            "asn",
            "--chart",
            "asn.svg",
            "--chart-type",
            "pie",
            "--title",
            "Top 5 AS",
        ]);

        assert_that(&config.top).is_equal_to(5);
        assert_that(&config.other).is_true();
        assert_that(&config.chart).is_equal_to(Some(PathBuf::from("asn.svg")));
        assert_that(&config.title).is_equal_to(Some("Top 5 AS".to_string()));
    }

    #[test]
    fn title_requires_chart() {
        let res = create_parser().try_get_matches_from(vec!["rcensus", "shares", "asn", "--title", "Top 5 AS"]);

        assert_that(&res).is_err();
    }
}
