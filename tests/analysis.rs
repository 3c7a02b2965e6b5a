// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::path::PathBuf;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use spectral::prelude::*;

use resolver_census::analysis::{AnalysisOpts, GiniAnalysis};
use resolver_census::comparison::Comparison;
use resolver_census::distribution::{CountDistribution, Grouping};
use resolver_census::gini::Inequality;
use resolver_census::hilbert::HilbertMap;
use resolver_census::histogram::OctetHistogram;
use resolver_census::shares::ShareTable;
use resolver_census::source::{self, InputFormat};
use resolver_census::statistics::Statistics;
use resolver_census::{Filter, Observations};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn observations() -> Observations {
    source::load(fixture("resolvers.tsv"), None).expect("failed to load fixture")
}

#[test]
fn tsv_and_json_exports_agree() {
    let tsv = observations();
    let json = source::load(fixture("resolvers.json"), None).expect("failed to load fixture");

    assert_that(&tsv.len()).is_equal_to(8);
    assert_that(&json.len()).is_equal_to(8);
    for (a, b) in tsv.iter().zip(json.iter()) {
        assert_that(a).is_equal_to(b);
    }
}

#[test]
fn explicit_input_format_overrides_extension() {
    let res = source::load(fixture("resolvers.tsv"), Some(InputFormat::Json));

    assert_that(&res).is_err();
}

#[test]
fn loaded_statistics() {
    let stats = observations().statistics();

    assert_that(&stats.to_string().as_str()).is_equal_to(
        "8 observations [DNSSEC 4, ASN 6, Owner 5, Location 7], 1 malformed IP addresses",
    );
}

#[test]
fn gini_by_address_space_and_as() {
    let observations = observations();
    let opts = AnalysisOpts::new(Grouping::address_space_and_as(), 3);

    let analysis = GiniAnalysis::analyze("all resolvers", &observations, &opts);

    assert_that(&analysis.observations).is_equal_to(8);
    assert_that(&analysis.reports).has_length(3);

    let slash8 = analysis.report(Grouping::Slash8).expect("no /8 report");
    assert_that(&slash8.total).is_equal_to(7);
    assert_that(&slash8.unique).is_equal_to(4);
    assert_that(&slash8.gini).is_close_to(0.107, 0.001);
    assert_that(&slash8.inequality).is_equal_to(Inequality::Low);
    assert_that(&slash8.top).has_length(3);

    let asn = analysis.report(Grouping::Asn).expect("no AS report");
    assert_that(&asn.total).is_equal_to(6);
    assert_that(&asn.unique).is_equal_to(4);
    assert_that(&asn.gini).is_close_to(0.167, 0.001);
    assert_that(&asn.top[0].label().as_str()).is_equal_to("13335 (CLOUDFLARENET)");
}

#[test]
fn gini_is_independent_of_order() {
    let observations = observations();
    let reversed: Observations = observations.iter().rev().cloned().collect();

    let a = CountDistribution::from_observations(Grouping::Slash16, &observations);
    let b = CountDistribution::from_observations(Grouping::Slash16, &reversed);

    assert_that(&a.gini()).is_equal_to(b.gini());
}

#[test]
fn global_filter_narrows_population() {
    let observations = observations();
    let filter = Filter::new()
        .country("US")
        .network(IpNetwork::from_str("8.0.0.0/8").expect("invalid network"));

    let filtered = observations.filter(&filter);

    assert_that(&filtered.len()).is_equal_to(2);
    assert_that(&filtered.iter().all(|x| x.ip().starts_with("8.8."))).is_true();
}

#[test]
fn dnssec_comparison() {
    let observations = observations();
    let opts = AnalysisOpts::new(Grouping::address_space_and_as(), 5);

    let comparison = Comparison::compare(&observations, &Filter::dnssec(), &opts);

    assert_that(&comparison.subset.observations).is_equal_to(4);
    assert_that(&comparison.subset_share).is_close_to(50.0, 0.001);

    let slash8 = comparison.grouping(Grouping::Slash8).expect("no /8 comparison");
    assert_that(&slash8.subset_gini).is_close_to(0.167, 0.001);
    assert_that(&slash8.subset_more_concentrated()).is_true();

    let cloudflare = slash8.top.iter().find(|x| x.key == "1").expect("no entry for 1/8");
    assert_that(&cloudflare.baseline_count).is_equal_to(2);
    assert_that(&cloudflare.subset_count).is_equal_to(2);
    assert_that(&cloudflare.subset_percentage).is_close_to(100.0, 0.001);
}

#[test]
fn share_table_with_other() {
    let observations = observations();
    let distribution = CountDistribution::from_observations(Grouping::Country, &observations);

    let table = ShareTable::new(&distribution, 1, true).with_population("all resolvers");

    assert_that(&table.total).is_equal_to(7);
    assert_that(&table.entries).has_length(2);
    assert_that(&table.entries[0].key.as_str()).is_equal_to("us");
    assert_that(&table.entries[0].count).is_equal_to(4);
    assert_that(&table.has_other()).is_true();
    assert_that(&table.entries[1].count).is_equal_to(3);
}

#[test]
fn histogram_by_first_octet() {
    let histogram = OctetHistogram::from_observations(&observations());

    assert_that(&histogram.total).is_equal_to(7);
    assert_that(&histogram.skipped).is_equal_to(1);
    let octets: Vec<u8> = histogram.buckets.iter().map(|x| x.octet).collect();
    assert_that(&octets).is_equal_to(vec![1, 8, 9, 80]);
    assert_that(&histogram.count(80)).is_equal_to(2);
    assert_that(&histogram.max_count()).is_equal_to(2);
}

#[test]
fn hilbert_map_from_ip_list() {
    let list = source::load_ip_list(fixture("ips.txt")).expect("failed to load fixture");
    assert_that(&list.addrs).has_length(3);
    assert_that(&list.skipped).is_equal_to(2);

    let map = HilbertMap::from_addrs(list.addrs, list.skipped);

    assert_that(&map.len()).is_equal_to(3);
    assert_that(&map.skipped).is_equal_to(2);
    assert_that(&map.bounding_box()).is_some();
}

#[test]
fn hilbert_map_from_observations() {
    let map = HilbertMap::from_observations(&observations());

    assert_that(&map.len()).is_equal_to(7);
    assert_that(&map.skipped).is_equal_to(1);
}
