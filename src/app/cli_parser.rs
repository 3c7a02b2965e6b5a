// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! This file is used by the build script. Therefore all functions generating the app command line parser must be included
//! here. It would be nicer to move at least the subcommands to the corresponding modules, but then all logic, all crates
//! etc. used there have to be available for the build script which makes it much more complex.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, Command};

pub static SUPPORTED_INPUT_FORMATS: &[&str] = &["tsv", "json"];

pub static SUPPORTED_OUTPUT_FORMATS: &[&str] = &["json", "summary"];

pub static SUPPORTED_GROUPINGS: &[&str] = &["slash8", "slash16", "asn", "owner", "country"];

pub static SUPPORTED_CHART_TYPES: &[&str] = &["bar", "pie"];

pub fn create_parser() -> Command {
    Command::new("rcensus")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .disable_help_subcommand(true)
        .propagate_version(true)
        .infer_subcommands(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .global(true)
                .help("Sets the observation export to analyze"),
        )
        .arg(
            Arg::new("input-format")
                .long("input-format")
                .value_name("FORMAT")
                .global(true)
                .value_parser(PossibleValuesParser::new(SUPPORTED_INPUT_FORMATS.iter().copied()))
                .help("Sets the format of the observation export; inferred from the file extension if omitted"),
        )
        .arg(
            Arg::new("dnssec-only")
                .long("dnssec-only")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only considers DNSSEC-capable resolvers"),
        )
        .arg(
            Arg::new("country")
                .long("country")
                .value_name("COUNTRY CODE")
                .global(true)
                .help("Only considers resolvers located in this country"),
        )
        .arg(
            Arg::new("network")
                .long("network")
                .value_name("CIDR BLOCK")
                .global(true)
                .help("Only considers resolvers within this network, e.g., 1.0.0.0/8"),
        )
        .arg(
            Arg::new("asn")
                .long("asn")
                .value_name("ASN")
                .global(true)
                .help("Only considers resolvers announced by this Autonomous System"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .global(true)
                .default_value("summary")
                .value_parser(PossibleValuesParser::new(SUPPORTED_OUTPUT_FORMATS.iter().copied()))
                .help("Sets the output format for result presentation"),
        )
        .arg(
            Arg::new("output-options")
                .long("output-options")
                .value_name("OPTIONS")
                .global(true)
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Sets output options")
                .long_help(
                    r#"* Json:
  * 'pretty': Prettifies output
* Summary:
  * 'condensed': Simplifies output,
  * 'human': Uses human readable formatting

If omitted, 'pretty' is used for Json and 'human' for Summary.
"#,
                ),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Does not print anything but results"),
        )
        // This is a special option that is not reflected in AppConfig, but is checked during
        // setup in `rcensus.rs`.
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Disables colorful output"),
        )
        // This is a special option that is not reflected in AppConfig, but is checked during
        // setup in `rcensus.rs` and sets the global AtomicBool `styles::ASCII_MODE`.
        .arg(
            Arg::new("ascii")
                .long("ascii")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Uses only ASCII compatible characters for output"),
        )
        // This is a special option that is not reflected in AppConfig, but is checked during
        // setup in `rcensus.rs`.
        .arg(
            Arg::new("v")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Sets the level of verbosity"),
        )
        // This is a special option that is not reflected in AppConfig, but is checked during
        // setup in `rcensus.rs`.
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Uses debug formatting for logging -- much more verbose"),
        )
        .subcommands(subcommands())
}

fn subcommands() -> Vec<Command> {
    vec![
        compare_subcommand(),
        gini_subcommand(),
        hilbert_subcommand(),
        histogram_subcommand(),
        shares_subcommand(),
    ]
}

fn top_arg(default: &'static str) -> Arg {
    Arg::new("top")
        .long("top")
        .value_name("NUMBER")
        .default_value(default)
        .value_parser(value_parser!(usize))
        .help("Sets the number of top entities to list")
}

fn title_arg() -> Arg {
    Arg::new("title")
        .long("title")
        .value_name("TITLE")
        .requires("chart")
        .help("Sets the chart title")
}

fn gini_subcommand() -> Command {
    Command::new("gini")
        .about("Computes Gini coefficients of the resolver distribution")
        .arg(
            Arg::new("groupings")
                .short('g')
                .long("grouping")
                .value_name("GROUPING")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .default_values(["slash8", "slash16", "asn"])
                .value_parser(PossibleValuesParser::new(SUPPORTED_GROUPINGS.iter().copied()))
                .help("Sets the groupings to analyze"),
        )
        .arg(top_arg("5"))
        .arg(
            Arg::new("charts")
                .long("charts")
                .value_name("DIRECTORY")
                .help("Writes a Lorenz curve and a bar chart per grouping as SVG into this directory"),
        )
}

fn compare_subcommand() -> Command {
    Command::new("compare")
        .about("Compares the distribution of all resolvers to DNSSEC-capable resolvers")
        .arg(top_arg("5"))
}

fn shares_subcommand() -> Command {
    Command::new("shares")
        .about("Lists the top entities of a grouping by their share of resolvers")
        .arg(
            Arg::new("grouping")
                .index(1)
                .value_name("GROUPING")
                .required(true)
                .value_parser(PossibleValuesParser::new(SUPPORTED_GROUPINGS.iter().copied()))
                .help("Sets the grouping to rank"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Sets the number of top entities to list; 10 for bar charts and 5 for pie charts by default"),
        )
        .arg(
            Arg::new("other")
                .long("other")
                .action(ArgAction::SetTrue)
                .help("Sums all remaining entities into an 'Other' entry"),
        )
        .arg(
            Arg::new("chart")
                .long("chart")
                .value_name("FILE")
                .help("Writes the shares as SVG chart to this file"),
        )
        .arg(
            Arg::new("chart-type")
                .long("chart-type")
                .value_name("TYPE")
                .default_value("bar")
                .value_parser(PossibleValuesParser::new(SUPPORTED_CHART_TYPES.iter().copied()))
                .help("Sets the chart type"),
        )
        .arg(title_arg())
}

fn histogram_subcommand() -> Command {
    Command::new("histogram")
        .about("Counts resolvers per /8 address block")
        .arg(
            Arg::new("chart")
                .long("chart")
                .value_name("FILE")
                .help("Writes the histogram as SVG chart to this file"),
        )
        .arg(title_arg())
}

fn hilbert_subcommand() -> Command {
    Command::new("hilbert")
        .about("Maps resolver addresses onto a Hilbert curve of the IPv4 address space")
        .arg(
            Arg::new("ip-list")
                .long("ip-list")
                .value_name("FILE")
                .help("Reads IPv4 addresses from this file, one per line, instead of an observation export"),
        )
        .arg(
            Arg::new("chart")
                .long("chart")
                .value_name("FILE")
                .help("Writes the map as SVG chart to this file"),
        )
        .arg(title_arg())
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn parser_is_consistent() {
        create_parser().debug_assert();
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = create_parser()
            .try_get_matches_from(vec!["rcensus", "gini", "-i", "resolvers.tsv", "--dnssec-only", "-o", "json"])
            .unwrap();

        assert_that(&args.get_one::<String>("input").map(String::as_str)).is_equal_to(Some("resolvers.tsv"));
        assert_that(&args.get_flag("dnssec-only")).is_true();
        assert_that(&args.get_one::<String>("output").map(String::as_str)).is_equal_to(Some("json"));
    }

    #[test]
    fn groupings_are_comma_separated() {
        let args = create_parser()
            .try_get_matches_from(vec!["rcensus", "gini", "-i", "x.tsv", "--grouping", "asn,owner"])
            .unwrap();
        let (_, gini_args) = args.subcommand().unwrap();
        let groupings: Vec<&str> = gini_args.get_many::<String>("groupings").unwrap().map(String::as_str).collect();

        assert_that(&groupings).is_equal_to(vec!["asn", "owner"]);
    }

    #[test]
    fn unknown_grouping_is_rejected() {
        let res = create_parser().try_get_matches_from(vec!["rcensus", "shares", "-i", "x.tsv", "planet"]);

        assert_that(&res).is_err();
    }
}
