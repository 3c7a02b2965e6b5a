// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use yansi::Paint;

use super::*;
use crate::app::output::styles::{self, ITEMAZATION_PREFIX};
use crate::comparison::{ComparedEntity, Comparison, GroupingComparison};

impl SummaryFormatter for Comparison {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        let mut tw = TabWriter::new(vec![]);

        writeln!(
            tw,
            "{}: {} of {} observations in {} ({})",
            self.subset.population,
            render_count(self.subset.observations, opts),
            render_count(self.baseline.observations, opts),
            self.baseline.population,
            render_percentage(self.subset_share, opts).paint(styles::EMPH)
        )?;
        writeln!(tw, "Grouping\tGini baseline\tGini subset\tDifference\tUnique baseline\tUnique subset\tVerdict")?;
        for grouping in &self.groupings {
            output_gini_row(&mut tw, grouping, opts)?;
        }

        if !opts.condensed() {
            for grouping in &self.groupings {
                writeln!(tw)?;
                output_top(&mut tw, grouping, opts)?;
            }
        }

        finish_tabwriter(tw, writer)
    }
}

fn output_gini_row<W: Write>(writer: &mut W, grouping: &GroupingComparison, opts: &SummaryOptions) -> Result<()> {
    let difference = grouping.gini_difference();
    let difference = if difference > 0.0 {
        format!("+{}", render_gini(difference, opts))
    } else {
        render_gini(difference, opts)
    };
    let verdict = if grouping.subset_more_concentrated() {
        "subset more concentrated"
    } else {
        "subset less or equally concentrated"
    };
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        grouping.grouping,
        render_gini(grouping.baseline_gini, opts),
        render_gini(grouping.subset_gini, opts),
        difference,
        render_count(grouping.baseline_unique, opts),
        render_count(grouping.subset_unique, opts),
        verdict
    )?;

    Ok(())
}

fn output_top<W: Write>(writer: &mut W, grouping: &GroupingComparison, opts: &SummaryOptions) -> Result<()> {
    writeln!(writer, "Top {}: baseline, subset, subset share", grouping.grouping)?;
    if grouping.top.is_empty() {
        writeln!(writer, "No data available for this grouping.")?;
    }
    for (rank, entity) in grouping.top.iter().enumerate() {
        writeln!(writer, " {} {}.\t{}", &*ITEMAZATION_PREFIX, rank + 1, entity.render(opts))?;
    }

    Ok(())
}

impl Rendering for ComparedEntity {
    fn render(&self, opts: &SummaryOptions) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.label(),
            render_count(self.baseline_count, opts),
            render_count(self.subset_count, opts),
            render_percentage(self.subset_percentage, opts)
        )
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::analysis::AnalysisOpts;
    use crate::distribution::Grouping;
    use crate::observation::{Filter, Observation, Observations};

    fn comparison() -> Comparison {
        let observations: Observations = vec![
            Observation::new("1.1.1.1").with_asn("13335").with_dnssec_support(true),
            Observation::new("1.0.0.1").with_asn("13335").with_dnssec_support(true),
            Observation::new("8.8.8.8").with_asn("15169"),
            Observation::new("9.9.9.9").with_asn("19281"),
        ]
        .into();

        Comparison::compare(&observations, &Filter::dnssec(), &AnalysisOpts::new(vec![Grouping::Asn], 5))
    }

    fn render(comparison: &Comparison, opts: &SummaryOptions) -> String {
        yansi::disable();
        let mut buf = Vec::new();
        comparison.output(&mut buf, opts).expect("failed to render summary");

        String::from_utf8(buf).expect("summary is not utf-8")
    }

    #[test]
    fn summary() {
        crate::utils::tests::logging::init();

        let out = render(&comparison(), &SummaryOptions::default());

        assert_that(&out.as_str()).starts_with("DNSSEC-capable: 2 of 4 observations in all resolvers (50.00%)");
        assert_that(&out.as_str()).contains("Top AS: baseline, subset, subset share");
        assert_that(&out.as_str()).contains("100.00%");
    }

    #[test]
    fn condensed_summary_omits_top_entities() {
        crate::utils::tests::logging::init();

        let out = render(&comparison(), &SummaryOptions::new(true, true));

        assert_that(&out.lines().count()).is_equal_to(3);
    }
}
