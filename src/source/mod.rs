// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Loading of observation exports and plain IP address lists.
//!
//! # Example
//!
//! ```no_run
//! use resolver_census::source::{self, InputFormat};
//!
//! let observations = source::load("resolvers.tsv", None).expect("failed to load observations");
//! let observations = source::load("resolvers.dump", Some(InputFormat::Json)).expect("failed to load observations");
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::net::Ipv4Addr;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::observation::{Observation, Observations};
use crate::{Error, Result};

pub mod json;
pub mod tsv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Tsv,
    Json,
}

impl InputFormat {
    /// Infers the format by file extension: `.json` is JSON, everything else TSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> InputFormat {
        match path.as_ref().extension().and_then(|x| x.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Tsv,
        }
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(str: &str) -> Result<Self> {
        match str.to_lowercase().as_str() {
            "tsv" => Ok(InputFormat::Tsv),
            "json" => Ok(InputFormat::Json),
            _ => Err(Error::ParserError {
                what: str.to_string(),
                to: "InputFormat",
                why: "unsupported input format".to_string(),
            }),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Tsv => f.write_str("tsv"),
            InputFormat::Json => f.write_str("json"),
        }
    }
}

/// Loads observations from `path`; if `format` is `None`, it is inferred from the file extension.
pub fn load<P: AsRef<Path>>(path: P, format: Option<InputFormat>) -> Result<Observations> {
    let path = path.as_ref();
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    info!("Loading observations from '{}' as {}.", path.display(), format);

    let file = File::open(path)?;
    from_reader(BufReader::new(file), format)
}

pub fn from_reader<R: Read>(mut reader: R, format: InputFormat) -> Result<Observations> {
    let rows = match format {
        InputFormat::Tsv => {
            let mut buf = String::new();
            reader.read_to_string(&mut buf)?;
            tsv::parse(&buf)?
        }
        InputFormat::Json => json::from_reader(reader)?,
    };

    Ok(finish(rows))
}

fn finish(rows: Vec<Observation>) -> Observations {
    let len = rows.len();
    let observations: Observations = rows
        .into_iter()
        .map(Observation::normalized)
        .filter(|x| !x.ip().is_empty())
        .collect();
    debug!(
        "Loaded {} observations; dropped {} rows without IP address.",
        observations.len(),
        len - observations.len()
    );

    observations
}

/// A list of IPv4 addresses and the number of lines that could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpList {
    pub addrs: Vec<Ipv4Addr>,
    pub skipped: usize,
}

/// Loads a plain text file with one IPv4 address per line.
pub fn load_ip_list<P: AsRef<Path>>(path: P) -> Result<IpList> {
    let path = path.as_ref();
    info!("Loading IP addresses from '{}'.", path.display());

    let file = File::open(path)?;
    ip_list_from_reader(BufReader::new(file))
}

/// Blank lines and lines starting with `#` are ignored; lines that are no IPv4 address are skipped and counted.
pub fn ip_list_from_reader<R: BufRead>(reader: R) -> Result<IpList> {
    let mut list = IpList::default();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match Ipv4Addr::from_str(line) {
            Ok(addr) => list.addrs.push(addr),
            Err(_) => list.skipped += 1,
        }
    }
    debug!("Read {} IP addresses; skipped {} lines.", list.addrs.len(), list.skipped);

    Ok(list)
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn input_format_from_path() {
        assert_that(&InputFormat::from_path("resolvers.json")).is_equal_to(InputFormat::Json);
        assert_that(&InputFormat::from_path("resolvers.JSON")).is_equal_to(InputFormat::Json);
        assert_that(&InputFormat::from_path("resolvers.tsv")).is_equal_to(InputFormat::Tsv);
        assert_that(&InputFormat::from_path("resolvers")).is_equal_to(InputFormat::Tsv);
    }

    #[test]
    fn input_format_from_str() {
        assert_that(&InputFormat::from_str("JSON").unwrap()).is_equal_to(InputFormat::Json);
        assert_that(&InputFormat::from_str("csv")).is_err();
    }

    #[test]
    fn rows_without_ip_are_dropped() {
        let input = "ip\tasn\n1.1.1.1\t13335\n \t15169\n\\N\t1\n";

        let observations = from_reader(input.as_bytes(), InputFormat::Tsv).expect("failed to load");

        assert_that(&observations.len()).is_equal_to(1);
    }

    #[test]
    fn json_rows_are_normalized() {
        let input = r#"[{"ip": " 1.1.1.1 ", "owner": " ", "geo_location": "DE "}, {"ip": ""}]"#;

        let observations = from_reader(input.as_bytes(), InputFormat::Json).expect("failed to load");
        let observation = observations.iter().next().unwrap();

        assert_that(&observations.len()).is_equal_to(1);
        assert_that(&observation.ip()).is_equal_to("1.1.1.1");
        assert_that(&observation.owner()).is_none();
        assert_that(&observation.geo_location()).is_equal_to(Some("DE"));
    }

    #[test]
    fn ip_list() {
        let input = "# RRSIG responses\n1.1.1.1\n\n8.8.8.8 \n2001:db8::1\nnonsense\n";

        let list = ip_list_from_reader(input.as_bytes()).expect("failed to read ip list");

        assert_that(&list.addrs).is_equal_to(vec![Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(8, 8, 8, 8)]);
        assert_that(&list.skipped).is_equal_to(2);
    }
}
