//! Bundled suites.
//!
//! Each suite targets one reference circuit:
//! - `instructions`: the core alone, instruction words fed on its data-out port.
//! - `ram`: the single-port RAM block.
//! - `system`: the core and dual-port RAM, running a program loaded through the external
//!   port.

/// Single-instruction scenarios for a core.
pub mod instructions;

/// RAM port scenarios.
pub mod ram;

/// Whole-program scenarios for a core with memory.
pub mod system;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use super::{Scenario, run_all, select};
use crate::circuit::{Circuit, Ram, Rv32Core, Soc};
use crate::common::error::{HarnessError, HarnessResult};
use crate::config::Config;
use crate::sim::{MemoryImage, RunOutcome, Session, run};

/// A bundled suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suite {
    /// Single-instruction checks against `Rv32Core`.
    Instructions,
    /// Port checks against `Ram`.
    Ram,
    /// Program checks against `Soc`.
    System,
}

impl Suite {
    /// Every suite, in the order `all` runs them.
    pub const ALL: [Self; 3] = [Self::Instructions, Self::Ram, Self::System];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instructions => "instructions",
            Self::Ram => "ram",
            Self::System => "system",
        }
    }

    /// Names of the suite's scenarios, in run order.
    pub fn scenario_names(self) -> Vec<&'static str> {
        match self {
            Self::Instructions => names(&instructions::scenarios::<Rv32Core>()),
            Self::Ram => names(&ram::scenarios::<Ram>()),
            Self::System => names(&system::scenarios::<Soc>(None)),
        }
    }

    /// Runs the suite against a fresh reference circuit built from `config`.
    ///
    /// Fails before running anything when the trace cannot be opened or `options.only`
    /// names no scenario of this suite.
    pub fn run(self, config: &Config, options: &RunOptions) -> HarnessResult<RunOutcome> {
        info!(suite = self.name(), "running suite");
        match self {
            Self::Instructions => launch(
                Rv32Core::new(&config.core),
                instructions::scenarios(),
                config,
                options,
            ),
            Self::Ram => launch(
                Ram::new(&config.core, &config.memory),
                ram::scenarios(),
                config,
                options,
            ),
            Self::System => launch(
                Soc::new(config),
                system::scenarios(options.image.clone()),
                config,
                options,
            ),
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suite {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|suite| suite.name() == s)
            .ok_or_else(|| HarnessError::UnknownSuite(s.to_string()))
    }
}

/// Per-run choices that are not part of the configuration file.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Run only the scenario with this name.
    pub only: Option<String>,
    /// Program for the system suite instead of the bundled one.
    pub image: Option<MemoryImage>,
    /// Waveform path overriding `general.trace_path`.
    pub trace_path: Option<PathBuf>,
}

fn names<C: Circuit>(scenarios: &[Scenario<C>]) -> Vec<&'static str> {
    scenarios.iter().map(|s| s.name).collect()
}

fn launch<C: Circuit>(
    circuit: C,
    scenarios: Vec<Scenario<C>>,
    config: &Config,
    options: &RunOptions,
) -> HarnessResult<RunOutcome> {
    let scenarios = match &options.only {
        Some(name) => select(scenarios, name)
            .ok_or_else(|| HarnessError::UnknownSuite(name.clone()))?,
        None => scenarios,
    };

    let mut general = config.general.clone();
    if let Some(path) = &options.trace_path {
        general.trace_path.clone_from(path);
    }
    let session = Session::from_config(circuit, &general)?;
    Ok(run(session, &general, |s| run_all(s, &scenarios)))
}
