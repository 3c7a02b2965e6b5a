// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use ipnetwork::IpNetwork;

use crate::app::output::json::JsonOptions;
use crate::app::output::summary::SummaryOptions;
use crate::app::output::{OutputConfig, OutputType};
use crate::observation::Filter;
use crate::source::InputFormat;

#[derive(Debug)]
pub struct AppConfig {
    /// Observation export; `None` only makes sense for modules that bring their own input
    pub input: Option<PathBuf>,
    pub input_format: Option<InputFormat>,
    pub filter: Filter,
    pub quiet: bool,
    pub output: OutputType,
    pub output_config: OutputConfig,
}

impl TryFrom<&ArgMatches> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let output = args
            .get_one::<String>("output")
            .map(|x| OutputType::try_from(x.as_str()).context("failed to parse output type"))
            .unwrap_or(Ok(OutputType::Summary))?;
        let input_format = args
            .get_one::<String>("input-format")
            .map(|x| InputFormat::from_str(x).context("failed to parse input format"))
            .transpose()?;
        let config = AppConfig {
            input: args.get_one::<String>("input").map(PathBuf::from),
            input_format,
            filter: filter(args)?,
            // Console messages would corrupt JSON on stdout
            quiet: args.get_flag("quiet") || output == OutputType::Json,
            output_config: output_config(output, args)?,
            output,
        };

        Ok(config)
    }
}

impl AppConfig {
    pub fn input(&self) -> Result<&PathBuf> {
        self.input.as_ref().context("no observation export specified; use --input")
    }
}

fn filter(args: &ArgMatches) -> Result<Filter> {
    let mut filter = Filter::new().dnssec_only(args.get_flag("dnssec-only"));
    if let Some(country) = args.get_one::<String>("country") {
        filter = filter.country(country);
    }
    if let Some(network) = args.get_one::<String>("network") {
        let network = IpNetwork::from_str(network).context("failed to parse network")?;
        filter = filter.network(network);
    }
    if let Some(asn) = args.get_one::<String>("asn") {
        filter = filter.asn(asn);
    }

    Ok(filter)
}

fn output_config(output_type: OutputType, args: &ArgMatches) -> Result<OutputConfig> {
    match args.get_many::<String>("output-options") {
        Some(options) => parse_output_options(output_type, options.map(String::as_str)),
        None => Ok(default_output_config(output_type)),
    }
}

fn default_output_config(output_type: OutputType) -> OutputConfig {
    match output_type {
        OutputType::Json => OutputConfig::json(JsonOptions::new(true)),
        OutputType::Summary => OutputConfig::summary(SummaryOptions::default()),
    }
}

fn parse_output_options<'a, I: Iterator<Item = &'a str>>(output_type: OutputType, options: I) -> Result<OutputConfig> {
    let options: Vec<&str> = options.filter(|x| !x.is_empty()).collect();
    match output_type {
        OutputType::Json => {
            let options = JsonOptions::try_from(options).context("failed to parse json options")?;
            Ok(OutputConfig::json(options))
        }
        OutputType::Summary => {
            let options = SummaryOptions::try_from(options).context("failed to parse summary options")?;
            Ok(OutputConfig::summary(options))
        }
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::app::cli_parser::create_parser;

    fn app_config(args: Vec<&str>) -> Result<AppConfig> {
        let args = create_parser().try_get_matches_from(args)?;
        let (_, sub_args) = args.subcommand().context("no subcommand")?;

        AppConfig::try_from(sub_args)
    }

    #[test]
    fn defaults() {
        let config = app_config(vec!["rcensus", "gini", "-i", "resolvers.tsv"]).unwrap();

        assert_that(&config.input).is_equal_to(Some(PathBuf::from("resolvers.tsv")));
        assert_that(&config.input_format).is_none();
        assert_that(&config.filter.is_empty()).is_true();
        assert_that(&config.output).is_equal_to(OutputType::Summary);
        assert_that(&config.quiet).is_false();
    }

    #[test]
    fn filters() {
        let config = app_config(vec![
            "rcensus",
            "--dnssec-only",
            "--country",
            "de",
            "--network",
            "1.0.0.0/8",
            "--asn",
            "13335",
            "gini",
            "-i",
            "resolvers.json",
        ])
        .unwrap();

        assert_that(&config.filter.to_string().as_str())
            .is_equal_to("DNSSEC-capable, country=de, network=1.0.0.0/8, asn=13335");
    }

    #[test]
    fn invalid_network() {
        let res = app_config(vec!["rcensus", "gini", "-i", "x.tsv", "--network", "1.0.0.0/33"]);

        assert_that(&res).is_err();
    }

    #[test]
    fn json_output_is_quiet() {
        let config = app_config(vec!["rcensus", "compare", "-i", "x.tsv", "-o", "json"]).unwrap();

        assert_that(&config.output).is_equal_to(OutputType::Json);
        assert_that(&config.quiet).is_true();
    }

    #[test]
    fn invalid_output_option() {
        let res = app_config(vec!["rcensus", "gini", "-i", "x.tsv", "--output-options", "pretty"]);

        assert_that(&res).is_err();
    }

    #[test]
    fn missing_input() {
        let config = app_config(vec!["rcensus", "histogram"]).unwrap();

        assert_that(&config.input()).is_err();
    }
}
