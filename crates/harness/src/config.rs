//! Configuration for harness runs.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline values for tracing, reset, and memory geometry.
//! 2. **Structures:** Hierarchical config for general options, the core, and memory.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; use `Config::default()` when no file is given.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::constants::{DEFAULT_ADDR_BITS, DEFAULT_RAM_WORDS, DEFAULT_TRACE_PATH};
use crate::common::error::HarnessResult;

/// Default configuration constants.
mod defaults {
    /// PC loaded on reset.
    pub const RESET_PC: u32 = 0;

    /// Waveform tracing is on unless disabled.
    pub const TRACE: bool = true;

    /// Banners are colored unless disabled.
    pub const COLOR: bool = true;

    /// One extra clock step is taken at teardown so the last values reach the waveform.
    pub const FINAL_SETTLE: bool = true;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rv32tb_core::Config;
///
/// let json = r#"{ "general": { "trace": false }, "memory": { "words": 1024 } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(!config.general.trace);
/// assert_eq!(config.memory.words, 1024);
/// assert_eq!(config.core.addr_bits, 15);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Tracing, reporting, and teardown options
    #[serde(default)]
    pub general: GeneralConfig,
    /// Core parameters
    #[serde(default)]
    pub core: CoreConfig,
    /// RAM parameters
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> HarnessResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General run options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Write a VCD waveform of every step
    #[serde(default = "GeneralConfig::default_trace")]
    pub trace: bool,

    /// Waveform output path
    #[serde(default = "GeneralConfig::default_trace_path")]
    pub trace_path: PathBuf,

    /// Color the pass/fail banner
    #[serde(default = "GeneralConfig::default_color")]
    pub color: bool,

    /// Take one extra clock step during teardown
    #[serde(default = "GeneralConfig::default_final_settle")]
    pub final_settle: bool,
}

impl GeneralConfig {
    fn default_trace() -> bool {
        defaults::TRACE
    }

    fn default_trace_path() -> PathBuf {
        PathBuf::from(DEFAULT_TRACE_PATH)
    }

    fn default_color() -> bool {
        defaults::COLOR
    }

    fn default_final_settle() -> bool {
        defaults::FINAL_SETTLE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: defaults::TRACE,
            trace_path: Self::default_trace_path(),
            color: defaults::COLOR,
            final_settle: defaults::FINAL_SETTLE,
        }
    }
}

/// Core parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    /// PC loaded while reset is asserted
    #[serde(default = "CoreConfig::default_reset_pc")]
    pub reset_pc: u32,

    /// Width of the word-address bus in bits
    #[serde(default = "CoreConfig::default_addr_bits")]
    pub addr_bits: u8,
}

impl CoreConfig {
    fn default_reset_pc() -> u32 {
        defaults::RESET_PC
    }

    fn default_addr_bits() -> u8 {
        DEFAULT_ADDR_BITS
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            reset_pc: defaults::RESET_PC,
            addr_bits: DEFAULT_ADDR_BITS,
        }
    }
}

/// RAM parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Depth in 32-bit words
    #[serde(default = "MemoryConfig::default_words")]
    pub words: usize,
}

impl MemoryConfig {
    fn default_words() -> usize {
        DEFAULT_RAM_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            words: DEFAULT_RAM_WORDS,
        }
    }
}
