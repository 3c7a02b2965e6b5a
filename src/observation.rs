// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::net::IpAddr;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::utils::deserialize::{des_bool_from_any, des_opt_string_from_any, des_string_from_any};

/// One resolver record as it has been exported from the measurement database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, deserialize_with = "des_string_from_any")]
    ip: String,
    #[serde(default, deserialize_with = "des_opt_string_from_any")]
    asn: Option<String>,
    #[serde(default)]
    as_name: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    geo_location: Option<String>,
    #[serde(default, deserialize_with = "des_bool_from_any")]
    dnssec_support: bool,
}

impl Observation {
    pub fn new<T: Into<String>>(ip: T) -> Observation {
        Observation {
            ip: ip.into(),
            asn: None,
            as_name: None,
            owner: None,
            geo_location: None,
            dnssec_support: false,
        }
    }

    pub fn with_asn<T: Into<String>>(self, asn: T) -> Observation {
        Observation {
            asn: non_empty(asn.into()),
            ..self
        }
    }

    pub fn with_as_name<T: Into<String>>(self, as_name: T) -> Observation {
        Observation {
            as_name: non_empty(as_name.into()),
            ..self
        }
    }

    pub fn with_owner<T: Into<String>>(self, owner: T) -> Observation {
        Observation {
            owner: non_empty(owner.into()),
            ..self
        }
    }

    pub fn with_geo_location<T: Into<String>>(self, geo_location: T) -> Observation {
        Observation {
            geo_location: non_empty(geo_location.into()),
            ..self
        }
    }

    pub fn with_dnssec_support(self, dnssec_support: bool) -> Observation {
        Observation { dnssec_support, ..self }
    }

    /// Trims all text fields and turns empty ones into `None`.
    pub(crate) fn normalized(self) -> Observation {
        Observation {
            ip: self.ip.trim().to_string(),
            asn: self.asn.and_then(non_empty),
            as_name: self.as_name.and_then(non_empty),
            owner: self.owner.and_then(non_empty),
            geo_location: self.geo_location.and_then(non_empty),
            dnssec_support: self.dnssec_support,
        }
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn asn(&self) -> Option<&str> {
        self.asn.as_deref()
    }

    pub fn as_name(&self) -> Option<&str> {
        self.as_name.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn geo_location(&self) -> Option<&str> {
        self.geo_location.as_deref()
    }

    pub fn dnssec_support(&self) -> bool {
        self.dnssec_support
    }

    pub fn ip_addr(&self) -> Option<IpAddr> {
        IpAddr::from_str(&self.ip).ok()
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// An immutable, ordered set of observations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Observations {
    inner: Vec<Observation>,
}

impl Observations {
    pub fn new(inner: Vec<Observation>) -> Observations {
        Observations { inner }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the observations matching all predicates of `filter`.
    pub fn filter(&self, filter: &Filter) -> Observations {
        if filter.is_empty() {
            return self.clone();
        }
        let inner = self.inner.iter().filter(|x| filter.matches(x)).cloned().collect();
        Observations { inner }
    }
}

impl From<Vec<Observation>> for Observations {
    fn from(inner: Vec<Observation>) -> Self {
        Observations::new(inner)
    }
}

impl FromIterator<Observation> for Observations {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Observations::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Observations {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A conjunction of optional predicates over observations; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    dnssec_only: bool,
    country: Option<String>,
    network: Option<IpNetwork>,
    asn: Option<String>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    pub fn dnssec() -> Filter {
        Filter::new().dnssec_only(true)
    }

    pub fn dnssec_only(self, dnssec_only: bool) -> Filter {
        Filter { dnssec_only, ..self }
    }

    pub fn country<T: Into<String>>(self, country: T) -> Filter {
        Filter {
            country: Some(country.into()),
            ..self
        }
    }

    pub fn network(self, network: IpNetwork) -> Filter {
        Filter {
            network: Some(network),
            ..self
        }
    }

    pub fn asn<T: Into<String>>(self, asn: T) -> Filter {
        Filter {
            asn: Some(asn.into()),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.dnssec_only && self.country.is_none() && self.network.is_none() && self.asn.is_none()
    }

    pub fn matches(&self, observation: &Observation) -> bool {
        if self.dnssec_only && !observation.dnssec_support() {
            return false;
        }
        if let Some(ref country) = self.country {
            match observation.geo_location() {
                Some(location) if location.eq_ignore_ascii_case(country) => {}
                _ => return false,
            }
        }
        if let Some(ref network) = self.network {
            match observation.ip_addr() {
                Some(ip) if network.contains(ip) => {}
                _ => return false,
            }
        }
        if let Some(ref asn) = self.asn {
            if observation.asn() != Some(asn.as_str()) {
                return false;
            }
        }

        true
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("all resolvers");
        }
        let mut parts = Vec::new();
        if self.dnssec_only {
            parts.push("DNSSEC-capable".to_string());
        }
        if let Some(ref country) = self.country {
            parts.push(format!("country={}", country));
        }
        if let Some(ref network) = self.network {
            parts.push(format!("network={}", network));
        }
        if let Some(ref asn) = self.asn {
            parts.push(format!("asn={}", asn));
        }
        f.write_str(&parts.join(", "))
    }
}
