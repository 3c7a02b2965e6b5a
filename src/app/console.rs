// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;
use std::path::Path;

use yansi::Painted;

use crate::app::output::styles::{
    self, ATTENTION_PREFIX, CAPTION_PREFIX, ERROR_PREFIX, FINISHED_PREFIX, INFO_PREFIX, OK_PREFIX,
};
use crate::app::AppConfig;
use crate::observation::Filter;
use crate::statistics::Statistics;

#[derive(Debug, Default)]
pub struct ConsoleOpts {
    quiet: bool,
}

impl From<&AppConfig> for ConsoleOpts {
    fn from(app_config: &AppConfig) -> Self {
        ConsoleOpts {
            quiet: app_config.quiet,
        }
    }
}

#[derive(Debug)]
pub struct Console {
    opts: ConsoleOpts,
}

impl Console {
    pub fn new(opts: ConsoleOpts) -> Console {
        Console { opts }
    }

    pub fn print_statistics<'a, T: Statistics<'a>>(&self, data: &'a T)
    where
        <T as Statistics<'a>>::StatsOut: fmt::Display,
    {
        if self.not_quiet() {
            let statistics = data.statistics();
            self.info(format!("Loaded {}.", statistics));
        }
    }

    pub fn print_filter(&self, filter: &Filter, remaining: usize) {
        if self.not_quiet() && !filter.is_empty() {
            self.info(format!(
                "Filtered for {}: {} observations remaining.",
                Fmt::emph(filter),
                remaining
            ));
        }
    }

    pub fn print_chart_written<P: AsRef<Path>>(&self, path: P) {
        if self.not_quiet() {
            self.ok(format!("Wrote chart to '{}'.", path.as_ref().display()));
        }
    }

    pub fn print_finished(&self) {
        if self.not_quiet() {
            self.finished();
        }
    }

    pub fn emphasize<T: fmt::Display>(&self, item: T) {
        println!("{}", Fmt::emph(item))
    }

    pub fn info<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", &*INFO_PREFIX, str.as_ref());
    }

    pub fn attention<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", Fmt::attention(&*ATTENTION_PREFIX), str.as_ref());
    }

    pub fn finished(&self) {
        self.emphasize(format!("{} Finished.", &*FINISHED_PREFIX));
    }

    pub fn caption<T: AsRef<str>>(&self, str: T) {
        self.emphasize(format!("{} {}", &*CAPTION_PREFIX, str.as_ref()));
    }

    pub fn error<T: AsRef<str>>(&self, str: T) {
        eprintln!("{} {}", Fmt::error(&*ERROR_PREFIX), str.as_ref());
    }

    pub fn ok<T: AsRef<str>>(&self, str: T) {
        println!("{} {}", Fmt::ok(&*OK_PREFIX), str.as_ref());
    }

    pub fn not_quiet(&self) -> bool {
        !self.opts.quiet
    }
}

pub struct Fmt {}

impl Fmt {
    pub fn emph<T: fmt::Display>(item: T) -> Painted<T> {
        Painted {
            value: item,
            style: styles::EMPH,
        }
    }

    pub fn attention<T: fmt::Display>(item: T) -> Painted<T> {
        Painted {
            value: item,
            style: styles::ATTENTION,
        }
    }

    pub fn error<T: fmt::Display>(item: T) -> Painted<T> {
        Painted {
            value: item,
            style: styles::ERROR,
        }
    }

    pub fn ok<T: fmt::Display>(item: T) -> Painted<T> {
        Painted {
            value: item,
            style: styles::OK,
        }
    }
}
