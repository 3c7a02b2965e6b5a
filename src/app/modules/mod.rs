// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use anyhow::{Context, Result};
use tracing::info;

use crate::app::console::Console;
use crate::app::{AppConfig, ExitStatus};
use crate::observation::Observations;
use crate::source;

pub mod compare;
pub mod gini;
pub mod hilbert;
pub mod histogram;
pub mod shares;

/** Return type for App modules that go through multiple steps
 *
 * An App module might go through multiple distinct steps to eventually fulfill its task. A long this
 * way, errors might occur. Errors should be reported using `Result`. But what if a step finishes
 * without errors but still couldn't obtain the necessary information for the next step to proceed?
 * For this use case, `Partial` works similar to an Either type for the `Result::Ok` side of the
 * execution.
 *
 * Think of it as a means for early returns.
 */
pub enum Partial<T> {
    Next(T),
    ExitStatus(ExitStatus),
}

/** Pass environment like configs and console access from step to step
 */
pub struct Environment<'a, T> {
    pub app_config: &'a AppConfig,
    pub mod_config: &'a T,
    pub console: Console,
}

impl<'a, T> Environment<'a, T> {
    pub fn new(app_config: &'a AppConfig, mod_config: &'a T, console: Console) -> Environment<'a, T> {
        Environment {
            app_config,
            mod_config,
            console,
        }
    }
}

/** Loads the observation export and applies the global filter
 *
 * Aborts, if no observations remain after filtering.
 */
pub fn load_observations<T>(env: &Environment<'_, T>) -> Result<Partial<Observations>> {
    let path = env.app_config.input()?;
    if env.console.not_quiet() {
        env.console
            .caption(format!("Loading observations from '{}'.", path.display()));
    }

    let observations = source::load(path, env.app_config.input_format)
        .with_context(|| format!("failed to load observations from '{}'", path.display()))?;
    env.console.print_statistics(&observations);

    let filter = &env.app_config.filter;
    let observations = if filter.is_empty() {
        observations
    } else {
        let filtered = observations.filter(filter);
        info!("Filter '{}' kept {} of {} observations.", filter, filtered.len(), observations.len());
        env.console.print_filter(filter, filtered.len());
        filtered
    };

    if observations.is_empty() {
        env.console.error("No observations to analyze. Aborting.");
        return Ok(Partial::ExitStatus(ExitStatus::Abort));
    }

    Ok(Partial::Next(observations))
}
