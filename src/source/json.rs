// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::Read;

use tracing::debug;

use crate::observation::Observation;
use crate::Result;

/// Reads a JSON array of observation objects.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let observations: Vec<Observation> = serde_json::from_reader(reader)?;
    debug!("Parsed {} rows from JSON input.", observations.len());

    Ok(observations)
}
