// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::env;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::{debug, error, info};

use resolver_census::app::cli_parser::create_parser;
use resolver_census::app::console::{Console, ConsoleOpts};
use resolver_census::app::logging::Logging;
use resolver_census::app::modules;
use resolver_census::app::output::styles;
use resolver_census::app::{AppConfig, ExitStatus};

fn main() {
    let args = match create_parser().try_get_matches() {
        Ok(args) => args,
        Err(err) => {
            // Help and version requests are reported as errors, too
            let _ = err.print();
            let status = if err.use_stderr() {
                ExitStatus::CliParsingFailed
            } else {
                ExitStatus::Ok
            };
            std::process::exit(status as i32);
        }
    };

    let color = !args.get_flag("no-color");
    if !color {
        styles::no_color_mode();
    }
    if args.get_flag("ascii") {
        styles::ascii_mode();
    }

    let verbosity = args.get_count("v");
    let logging = Logging::new(verbosity, env::var_os("RUST_LOG"), color, args.get_flag("debug"));
    if let Err(err) = logging.start() {
        eprintln!("Failed to initialize logging: {:#}", err);
        std::process::exit(ExitStatus::UnrecoverableError as i32);
    }
    debug!("Parsed args and set up logging.");

    let status = run(&args);
    info!("Exit status: {:?}", status);

    std::process::exit(status as i32);
}

fn run(args: &ArgMatches) -> ExitStatus {
    let app_config = match app_config(args) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to parse configuration: {:#}", err);
            Console::new(ConsoleOpts::default()).error(format!("Failed to parse configuration: {:#}", err));
            return ExitStatus::ConfigParsingFailed;
        }
    };
    debug!("{:?}", app_config);

    match run_module(args, &app_config) {
        Ok(status) => status,
        Err(err) => {
            error!("Module failed: {:#}", err);
            Console::new(ConsoleOpts::default()).error(format!("Failed: {:#}", err));
            ExitStatus::Failed
        }
    }
}

fn app_config(args: &ArgMatches) -> Result<AppConfig> {
    // Global args are propagated, so the subcommand's matches carry them as well
    let (_, sub_args) = args.subcommand().context("no command specified")?;
    AppConfig::try_from(sub_args)
}

fn run_module(args: &ArgMatches, app_config: &AppConfig) -> Result<ExitStatus> {
    match args.subcommand_name() {
        Some("compare") => modules::compare::run(args, app_config),
        Some("gini") => modules::gini::run(args, app_config),
        Some("hilbert") => modules::hilbert::run(args, app_config),
        Some("histogram") => modules::histogram::run(args, app_config),
        Some("shares") => modules::shares::run(args, app_config),
        _ => Ok(ExitStatus::CliParsingFailed),
    }
}
