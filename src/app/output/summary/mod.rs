// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::HashSet;

use tabwriter::TabWriter;

use super::*;
use crate::distribution::ShareEntry;
use crate::statistics::DescriptiveStatistics;

pub mod analysis;
pub mod comparison;
pub mod hilbert;
pub mod histogram;
pub mod shares;

static SUPPORTED_OPTIONS: &[&str] = &["human", "condensed"];

#[derive(Debug)]
pub struct SummaryOptions {
    /// Show numbers rounded and with units
    human: bool,
    /// Reduce output to an as concise as possible form
    condensed: bool,
}

impl SummaryOptions {
    pub fn new(human: bool, condensed: bool) -> SummaryOptions {
        SummaryOptions { human, condensed }
    }

    pub fn human(&self) -> bool {
        self.human
    }

    pub fn condensed(&self) -> bool {
        self.condensed
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            human: true,
            condensed: false,
        }
    }
}

impl<'a> TryFrom<Vec<&'a str>> for SummaryOptions {
    type Error = Error;

    fn try_from(values: Vec<&'a str>) -> std::result::Result<Self, Self::Error> {
        let options: HashSet<&str> = values.into_iter().collect();
        if let Some(unknown) = options.iter().find(|x| !SUPPORTED_OPTIONS.contains(x)) {
            return Err(Error::ParserError {
                what: unknown.to_string(),
                to: "SummaryOptions",
                why: "unsupported summary option".to_string(),
            });
        }
        Ok(SummaryOptions {
            human: options.contains("human"),
            condensed: options.contains("condensed"),
        })
    }
}

#[derive(Debug, Default)]
pub struct SummaryFormat {
    opts: SummaryOptions,
}

impl SummaryFormat {
    pub fn new(opts: SummaryOptions) -> SummaryFormat {
        SummaryFormat { opts }
    }

    pub fn opts(&self) -> &SummaryOptions {
        &self.opts
    }
}

pub trait SummaryFormatter {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()>;
}

impl<T: SummaryFormatter> OutputFormat<T> for SummaryFormat {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()> {
        data.output(writer, &self.opts)
    }
}

trait Rendering {
    fn render(&self, opts: &SummaryOptions) -> String;
}

impl Rendering for ShareEntry {
    /// Tab separated label, count, and share
    fn render(&self, opts: &SummaryOptions) -> String {
        format!(
            "{}\t{}\t{}",
            self.label(),
            render_count(self.count, opts),
            render_percentage(self.percentage, opts)
        )
    }
}

impl Rendering for DescriptiveStatistics {
    fn render(&self, opts: &SummaryOptions) -> String {
        format!(
            "min {}, max {}, mean {}, median {}",
            render_count(self.min, opts),
            render_count(self.max, opts),
            render_decimal(self.mean, opts),
            render_decimal(self.median, opts)
        )
    }
}

fn render_gini(gini: f64, opts: &SummaryOptions) -> String {
    if opts.human() {
        format!("{:.3}", gini)
    } else {
        gini.to_string()
    }
}

fn render_percentage(percentage: f64, opts: &SummaryOptions) -> String {
    if opts.human() {
        format!("{:.2}%", percentage)
    } else {
        percentage.to_string()
    }
}

fn render_decimal(value: f64, opts: &SummaryOptions) -> String {
    if opts.human() {
        format!("{:.2}", value)
    } else {
        value.to_string()
    }
}

/// Groups digits by thousands in human mode, e.g., `1,234,567`.
fn render_count(count: usize, opts: &SummaryOptions) -> String {
    let digits = count.to_string();
    if !opts.human() || digits.len() <= 3 {
        return digits;
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Writes the aligned content of `tw` to `writer`.
fn finish_tabwriter<W: Write>(tw: TabWriter<Vec<u8>>, writer: &mut W) -> Result<()> {
    let text_buffer = tw.into_inner().map_err(|_| Error::InternalError {
        msg: "finish TabWriter buffer",
    })?;
    let out = String::from_utf8(text_buffer).map_err(|_| Error::InternalError {
        msg: "convert TabWriter buffer to output",
    })?;
    write!(writer, "{}", out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn summary_options() {
        let opts = SummaryOptions::try_from(vec!["condensed"]).unwrap();

        assert_that(&opts.human()).is_false();
        assert_that(&opts.condensed()).is_true();
        assert_that(&SummaryOptions::try_from(vec!["show-domain-names"])).is_err();
    }

    #[test]
    fn counts_are_grouped_in_human_mode() {
        let human = SummaryOptions::default();
        let raw = SummaryOptions::new(false, false);

        assert_that(&render_count(999, &human)).is_equal_to("999".to_string());
        assert_that(&render_count(1000, &human)).is_equal_to("1,000".to_string());
        assert_that(&render_count(1234567, &human)).is_equal_to("1,234,567".to_string());
        assert_that(&render_count(1234567, &raw)).is_equal_to("1234567".to_string());
    }

    #[test]
    fn share_entry_columns() {
        let entry = ShareEntry::new("13335", Some("CLOUDFLARENET"), 3, 8);

        assert_that(&entry.render(&SummaryOptions::default())).is_equal_to("13335 (CLOUDFLARENET)\t3\t37.50%".to_string());
    }
}
