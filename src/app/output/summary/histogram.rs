// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::*;
use crate::distribution::percentage;
use crate::histogram::{OctetBucket, OctetHistogram};

static BAR_WIDTH: usize = 40;

impl SummaryFormatter for OctetHistogram {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        let mut tw = TabWriter::new(vec![]);

        if !opts.condensed() {
            writeln!(
                tw,
                "{} resolvers in {} /8 address blocks; {} without valid first octet",
                render_count(self.total, opts),
                self.buckets.len(),
                render_count(self.skipped, opts)
            )?;
        }
        let max_count = self.max_count();
        for bucket in &self.buckets {
            output_bucket(&mut tw, bucket, self.total, max_count, opts)?;
        }

        finish_tabwriter(tw, writer)
    }
}

fn output_bucket<W: Write>(
    writer: &mut W,
    bucket: &OctetBucket,
    total: usize,
    max_count: usize,
    opts: &SummaryOptions,
) -> Result<()> {
    if opts.condensed() {
        writeln!(writer, "{}.0.0.0/8\t{}", bucket.octet, render_count(bucket.count, opts))?;
    } else {
        writeln!(
            writer,
            "{}.0.0.0/8\t{}\t{}\t{}",
            bucket.octet,
            render_count(bucket.count, opts),
            render_percentage(percentage(bucket.count, total), opts),
            bar(bucket.count, max_count)
        )?;
    }

    Ok(())
}

/// Bar of `BAR_WIDTH` characters for the largest count; non-zero counts get at least one character.
fn bar(count: usize, max_count: usize) -> String {
    if max_count == 0 || count == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max_count);

    "#".repeat(len)
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::observation::{Observation, Observations};

    #[test]
    fn bar_length() {
        assert_that(&bar(0, 10)).is_equal_to(String::new());
        assert_that(&bar(10, 10).len()).is_equal_to(BAR_WIDTH);
        assert_that(&bar(1, 1000).len()).is_equal_to(1);
    }

    #[test]
    fn summary() {
        crate::utils::tests::logging::init();
        yansi::disable();
        let observations: Observations = vec![
            Observation::new("8.8.8.8"),
            Observation::new("1.1.1.1"),
            Observation::new("1.0.0.1"),
            Observation::new("::1"),
        ]
        .into();
        let histogram = OctetHistogram::from_observations(&observations);

        let mut buf = Vec::new();
        histogram
            .output(&mut buf, &SummaryOptions::new(false, true))
            .expect("failed to render summary");
        let out = String::from_utf8(buf).expect("summary is not utf-8");
        let lines: Vec<_> = out.lines().map(|x| x.split_whitespace().collect::<Vec<_>>()).collect();

        assert_that(&lines).is_equal_to(vec![vec!["1.0.0.0/8", "2"], vec!["8.0.0.0/8", "1"]]);
    }
}
