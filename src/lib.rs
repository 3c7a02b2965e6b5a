// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Inequality and concentration analysis of DNS resolver populations.
//!
//! The library materializes resolver observations from database exports ([`source`]), groups
//! them into count distributions ([`distribution`]), and condenses each distribution into a
//! Gini coefficient ([`gini`]) plus descriptive statistics ([`analysis`], [`comparison`]).
//! Everything below [`source`] is a pure function of already loaded observations.

pub use error::Error;
pub use gini::gini;
pub use observation::{Filter, Observation, Observations};

#[cfg(feature = "app-lib")]
pub mod app;
pub mod analysis;
#[cfg(feature = "charts")]
pub mod charts;
pub mod comparison;
pub mod distribution;
pub mod error;
pub mod gini;
pub mod hilbert;
pub mod histogram;
pub mod observation;
pub mod shares;
pub mod source;
pub mod statistics;
pub mod utils;

pub type Result<T> = std::result::Result<T, Error>;
