// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use yansi::Paint;

use super::*;
use crate::app::output::styles::{self, ITEMAZATION_PREFIX};
use crate::shares::ShareTable;

impl SummaryFormatter for ShareTable {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        let mut tw = TabWriter::new(vec![]);

        if !opts.condensed() {
            writeln!(
                tw,
                "Top {} of {} {} in {} groups by {}",
                self.ranked_len(),
                render_count(self.total, opts),
                self.population,
                render_count(self.unique, opts),
                self.grouping.paint(styles::EMPH)
            )?;
        }
        for (rank, entry) in self.entries.iter().enumerate() {
            writeln!(tw, " {} {}.\t{}", &*ITEMAZATION_PREFIX, rank + 1, entry.render(opts))?;
        }
        if !opts.condensed() && !self.has_other() && !self.entries.is_empty() {
            writeln!(
                tw,
                "Top entries cover {} of {}.",
                render_percentage(self.covered_percentage(), opts),
                self.population
            )?;
        }

        finish_tabwriter(tw, writer)
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;
    use crate::distribution::{CountDistribution, Grouping};
    use crate::observation::{Observation, Observations};

    fn observations() -> Observations {
        vec![
            Observation::new("1.1.1.1").with_owner("Cloudflare"),
            Observation::new("1.0.0.1").with_owner("Cloudflare"),
            Observation::new("8.8.8.8").with_owner("Google"),
            Observation::new("9.9.9.9").with_owner("Quad9"),
        ]
        .into()
    }

    fn render(table: &ShareTable) -> String {
        yansi::disable();
        let mut buf = Vec::new();
        table
            .output(&mut buf, &SummaryOptions::default())
            .expect("failed to render summary");

        String::from_utf8(buf).expect("summary is not utf-8")
    }

    #[test]
    fn summary() {
        crate::utils::tests::logging::init();
        let distribution = CountDistribution::from_observations(Grouping::Owner, &observations());

        let out = render(&ShareTable::new(&distribution, 2, false));

        assert_that(&out.as_str()).starts_with("Top 2 of 4 all resolvers in 3 groups by Owner");
        assert_that(&out.as_str()).contains("Cloudflare");
        assert_that(&out.as_str()).contains("Top entries cover 75.00% of all resolvers.");
    }

    #[test]
    fn summary_with_other() {
        crate::utils::tests::logging::init();
        let distribution = CountDistribution::from_observations(Grouping::Owner, &observations());

        let out = render(&ShareTable::new(&distribution, 1, true));

        assert_that(&out.as_str()).starts_with("Top 1 of 4 all resolvers in 3 groups by Owner");
        assert_that(&out.as_str()).contains("Other");
        assert_that(&out.contains("Top entries cover")).is_false();
    }
}
