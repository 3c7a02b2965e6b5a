// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Tab separated exports as written by `mysql --batch` and `SELECT ... INTO OUTFILE`.
//!
//! The first non-empty line names the columns. `\N` and `NULL` denote SQL NULL; the escapes `\\`, `\t`, `\n`,
//! `\r`, and `\0` are unescaped.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::char;
use nom::combinator::{all_consuming, eof, map, opt, peek, value};
use nom::multi::separated_list0;
use nom::sequence::terminated;
use nom::IResult;
use tracing::{debug, trace};

use crate::observation::Observation;
use crate::utils::deserialize::parse_bool;
use crate::{Error, Result};

type Field = Option<String>;

pub(crate) fn parse_row(input: &str) -> IResult<&str, Vec<Field>> {
    all_consuming(separated_list0(char('\t'), field))(input)
}

fn field(input: &str) -> IResult<&str, Field> {
    alt((null, text))(input)
}

fn null(input: &str) -> IResult<&str, Field> {
    value(None, terminated(tag("\\N"), peek(alt((tag("\t"), eof)))))(input)
}

fn text(input: &str) -> IResult<&str, Field> {
    // An empty field is valid, but escaped_transform refuses empty input
    map(opt(escaped_text), |x| Some(x.unwrap_or_default()))(input)
}

fn escaped_text(input: &str) -> IResult<&str, String> {
    nom::bytes::complete::escaped_transform(
        is_not("\\\t"),
        '\\',
        alt((
            value("\\", tag("\\")),
            value("\t", tag("t")),
            value("\n", tag("n")),
            value("\r", tag("r")),
            value("\0", tag("0")),
        )),
    )(input)
}

#[derive(Debug, Default)]
struct Columns {
    ip: usize,
    asn: Option<usize>,
    as_name: Option<usize>,
    owner: Option<usize>,
    geo_location: Option<usize>,
    dnssec_support: Option<usize>,
    len: usize,
}

impl Columns {
    fn from_header(line: &str) -> Result<Columns> {
        let names = parse_line(line, 1)?;
        let names: Vec<String> = names
            .into_iter()
            .map(|x| x.unwrap_or_default().trim().to_lowercase())
            .collect();
        let position = |name: &str| names.iter().position(|x| x == name);

        let ip = position("ip").ok_or_else(|| Error::ParserError {
            what: line.to_string(),
            to: "Columns",
            why: "header has no 'ip' column".to_string(),
        })?;

        Ok(Columns {
            ip,
            asn: position("asn"),
            as_name: position("as_name"),
            owner: position("owner"),
            geo_location: position("geo_location"),
            dnssec_support: position("dnssec_support"),
            len: names.len(),
        })
    }

    fn observation(&self, fields: &mut [Field]) -> Option<Observation> {
        let ip = take(fields, Some(self.ip))?;
        let mut observation = Observation::new(ip);
        if let Some(asn) = take(fields, self.asn) {
            observation = observation.with_asn(asn);
        }
        if let Some(as_name) = take(fields, self.as_name) {
            observation = observation.with_as_name(as_name);
        }
        if let Some(owner) = take(fields, self.owner) {
            observation = observation.with_owner(owner);
        }
        if let Some(geo_location) = take(fields, self.geo_location) {
            observation = observation.with_geo_location(geo_location);
        }
        let dnssec_support = take(fields, self.dnssec_support)
            .map(|x| parse_bool(&x))
            .unwrap_or(false);

        Some(observation.with_dnssec_support(dnssec_support))
    }
}

fn take(fields: &mut [Field], index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| fields.get_mut(i))
        .and_then(Option::take)
        .filter(|x| x != "NULL")
}

fn parse_line(line: &str, line_number: usize) -> Result<Vec<Field>> {
    parse_row(line).map(|(_, fields)| fields).map_err(|e| Error::ParserError {
        what: line.to_string(),
        to: "Observation",
        why: format!("line {} is malformed: {}", line_number, e),
    })
}

/// Parses a complete TSV export; rows with a NULL IP address are skipped.
pub fn parse(input: &str) -> Result<Vec<Observation>> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let columns = match lines.next() {
        Some((_, header)) => Columns::from_header(header.trim_start_matches('\u{feff}'))?,
        None => {
            debug!("Empty TSV input.");
            return Ok(Vec::new());
        }
    };
    trace!("TSV columns: {:?}", columns);

    let mut observations = Vec::new();
    for (line_number, line) in lines {
        let mut fields = parse_line(line, line_number)?;
        if fields.len() != columns.len {
            return Err(Error::ParserError {
                what: line.to_string(),
                to: "Observation",
                why: format!(
                    "line {} has {} fields, but header has {}",
                    line_number,
                    fields.len(),
                    columns.len
                ),
            });
        }
        match columns.observation(&mut fields) {
            Some(observation) => observations.push(observation),
            None => trace!("Skipping line {} without IP address.", line_number),
        }
    }
    debug!("Parsed {} rows from TSV input.", observations.len());

    Ok(observations)
}
