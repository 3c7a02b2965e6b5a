// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use yansi::Paint;

use super::*;
use crate::analysis::{DistributionReport, GiniAnalysis};
use crate::app::output::styles::{self, ITEMAZATION_PREFIX};

impl SummaryFormatter for GiniAnalysis {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        let mut tw = TabWriter::new(vec![]);

        if opts.condensed() {
            for report in &self.reports {
                output_condensed_report(&mut tw, report, opts)?;
            }
        } else {
            writeln!(
                tw,
                "Gini analysis of {} ({} observations)",
                self.population,
                render_count(self.observations, opts)
            )?;
            for report in &self.reports {
                output_report(&mut tw, report, opts)?;
            }
        }

        finish_tabwriter(tw, writer)
    }
}

fn output_condensed_report<W: Write>(writer: &mut W, report: &DistributionReport, opts: &SummaryOptions) -> Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{} unique\t{}",
        report.grouping,
        render_gini(report.gini, opts),
        render_count(report.unique, opts),
        report.inequality
    )?;

    Ok(())
}

fn output_report<W: Write>(writer: &mut W, report: &DistributionReport, opts: &SummaryOptions) -> Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}: Gini {}",
        report.grouping.paint(styles::EMPH),
        render_gini(report.gini, opts).paint(styles::EMPH)
    )?;
    if !report.has_data() {
        writeln!(writer, "No data available for this grouping.")?;
        return Ok(());
    }
    writeln!(writer, "{}", report.inequality)?;
    writeln!(
        writer,
        "{} observations in {} groups",
        render_count(report.total, opts),
        render_count(report.unique, opts)
    )?;
    if let Some(ref statistics) = report.statistics {
        writeln!(writer, "Resolvers per group: {}", statistics.render(opts))?;
    }
    for (rank, entry) in report.top.iter().enumerate() {
        writeln!(writer, " {} {}.\t{}", &*ITEMAZATION_PREFIX, rank + 1, entry.render(opts))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::analysis::AnalysisOpts;
    use crate::distribution::Grouping;
    use crate::observation::{Observation, Observations};

    fn analysis() -> GiniAnalysis {
        let observations: Observations = vec![
            Observation::new("1.1.1.1").with_asn("13335").with_as_name("CLOUDFLARENET"),
            Observation::new("1.0.0.1").with_asn("13335").with_as_name("CLOUDFLARENET"),
            Observation::new("8.8.8.8").with_asn("15169").with_as_name("GOOGLE"),
        ]
        .into();
        let opts = AnalysisOpts::new(vec![Grouping::Asn, Grouping::Owner], 5);

        GiniAnalysis::analyze("all resolvers", &observations, &opts)
    }

    fn render(analysis: &GiniAnalysis, opts: &SummaryOptions) -> String {
        yansi::disable();
        let mut buf = Vec::new();
        analysis.output(&mut buf, opts).expect("failed to render summary");

        String::from_utf8(buf).expect("summary is not utf-8")
    }

    #[test]
    fn summary() {
        crate::utils::tests::logging::init();

        let out = render(&analysis(), &SummaryOptions::default());

        assert_that(&out.as_str()).starts_with("Gini analysis of all resolvers (3 observations)");
        assert_that(&out.as_str()).contains("AS: Gini 0.167");
        assert_that(&out.as_str()).contains("13335 (CLOUDFLARENET)");
        assert_that(&out.as_str()).contains("66.67%");
        assert_that(&out.as_str()).contains("No data available for this grouping.");
    }

    #[test]
    fn condensed_summary() {
        crate::utils::tests::logging::init();

        let out = render(&analysis(), &SummaryOptions::new(true, true));

        assert_that(&out.lines().count()).is_equal_to(2);
        assert_that(&out.contains("CLOUDFLARENET")).is_false();
    }
}
