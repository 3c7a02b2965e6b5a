// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use serde::{de, Deserialize, Deserializer};

/// Exports disagree on whether an ASN is a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

pub fn des_opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    let string = match value {
        Some(StringOrNumber::String(s)) => Some(s),
        Some(StringOrNumber::Unsigned(n)) => Some(n.to_string()),
        Some(StringOrNumber::Signed(n)) => Some(n.to_string()),
        None => None,
    };
    Ok(string.map(|x| x.trim().to_string()).filter(|x| !x.is_empty()))
}

/// Like [`des_opt_string_from_any`] but maps `null` to the empty string.
pub fn des_string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    des_opt_string_from_any(deserializer).map(Option::unwrap_or_default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Number(i64),
    String(String),
}

pub fn des_bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<BoolLike>::deserialize(deserializer)?;
    match value {
        Some(BoolLike::Bool(b)) => Ok(b),
        Some(BoolLike::Number(0)) => Ok(false),
        Some(BoolLike::Number(1)) => Ok(true),
        Some(BoolLike::Number(n)) => Err(de::Error::custom(format!("invalid boolean number {}", n))),
        Some(BoolLike::String(s)) => Ok(parse_bool(&s)),
        None => Ok(false),
    }
}

/// Interprets the textual boolean representations found in SQL exports; everything unknown is `false`.
pub fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}
