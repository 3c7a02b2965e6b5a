// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::*;
use crate::app::output::styles::ITEMAZATION_PREFIX;
use crate::hilbert::HilbertMap;

impl SummaryFormatter for HilbertMap {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        let mut tw = TabWriter::new(vec![]);

        writeln!(
            tw,
            "{} IPv4 addresses on a Hilbert curve of order {} ({} x {} cells); {} skipped",
            render_count(self.len(), opts),
            self.curve.order(),
            render_count(self.curve.side() as usize, opts),
            render_count(self.curve.side() as usize, opts),
            render_count(self.skipped, opts)
        )?;
        match self.bounding_box() {
            Some(bbox) => writeln!(
                tw,
                "Bounding box: x {} to {}, y {} to {}",
                bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y
            )?,
            None => writeln!(tw, "No addresses to map.")?,
        }
        if !opts.condensed() {
            for point in &self.points {
                writeln!(tw, " {} {}\t{}\t{}", &*ITEMAZATION_PREFIX, point.addr, point.x, point.y)?;
            }
        }

        finish_tabwriter(tw, writer)
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn summary() {
        crate::utils::tests::logging::init();
        yansi::disable();
        let map = HilbertMap::from_ips(vec!["8.8.8.8", "1.1.1.1", "nonsense"]);

        let mut buf = Vec::new();
        map.output(&mut buf, &SummaryOptions::new(false, true))
            .expect("failed to render summary");
        let out = String::from_utf8(buf).expect("summary is not utf-8");

        assert_that(&out.as_str())
            .starts_with("2 IPv4 addresses on a Hilbert curve of order 16 (65536 x 65536 cells); 1 skipped");
        assert_that(&out.as_str()).contains("Bounding box: x 4112 to 8738, y 257 to 8738");
    }
}
