// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt;

use serde::Serialize;

use super::*;
use crate::distribution::Grouping;
use crate::observation::Observations;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationStats {
    pub observations: usize,
    pub dnssec: usize,
    pub with_asn: usize,
    pub with_owner: usize,
    pub with_geo_location: usize,
    pub malformed_ips: usize,
}

impl fmt::Display for ObservationStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = format!(
            "{num_obs} observations [DNSSEC {num_dnssec}, ASN {num_asn}, Owner {num_owner}, Location {num_geo}], {num_malformed} malformed IP addresses",
            num_obs = self.observations,
            num_dnssec = self.dnssec,
            num_asn = self.with_asn,
            num_owner = self.with_owner,
            num_geo = self.with_geo_location,
            num_malformed = self.malformed_ips,
        );
        f.write_str(&str)
    }
}

impl<'a> Statistics<'a> for Observations {
    type StatsOut = ObservationStats;

    fn statistics(&'a self) -> Self::StatsOut {
        ObservationStats {
            observations: self.len(),
            dnssec: self.iter().filter(|x| x.dnssec_support()).count(),
            with_asn: self.iter().filter(|x| x.asn().is_some()).count(),
            with_owner: self.iter().filter(|x| x.owner().is_some()).count(),
            with_geo_location: self.iter().filter(|x| x.geo_location().is_some()).count(),
            malformed_ips: self.iter().filter(|x| Grouping::Slash16.key(x).is_none()).count(),
        }
    }
}
