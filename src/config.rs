//! Configuration management for the field extractor.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file (explicit path or user config directory)
//! - Defaults and validation

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fields::OutputFormat;

pub const DEFAULT_CAPACITY: usize = 64;
pub const DEFAULT_LETTERS: &str = "GMXYZEFS";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the field extractor
#[derive(Debug, Parser)]
#[command(name = "gcode-fields")]
#[command(about = "Line-buffered G-code field extractor")]
#[command(version)]
pub struct Args {
    /// Input file; stdin when omitted
    pub input: Option<PathBuf>,

    #[arg(long, help = "Line buffer capacity in bytes, sentinel included")]
    pub capacity: Option<usize>,

    #[arg(long, help = "Field letters to report, in order (e.g. 'GXYZF')")]
    pub letters: Option<String>,

    #[arg(long, value_enum, help = "Response format")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Print READY before reading input")]
    pub handshake: bool,

    #[arg(long, env = "GCODE_FIELDS_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Settings read from a TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub capacity: Option<usize>,
    pub letters: Option<String>,
    pub format: Option<OutputFormat>,
    pub handshake: Option<bool>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub capacity: usize,
    /// Letters to report, deduplicated, in configured order
    pub letters: Vec<u8>,
    pub format: OutputFormat,
    pub handshake: bool,
    pub log_level: String,
    /// Config file that was applied, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            capacity: DEFAULT_CAPACITY,
            letters: DEFAULT_LETTERS.bytes().collect(),
            format: OutputFormat::default(),
            handshake: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            config_file: None,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments and environment
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    ///
    /// An explicit `--config` path must exist; the user config file is only
    /// used when present.
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match args.config.clone() {
            Some(path) => Some(path),
            None => default_config_path().filter(|path| path.is_file()),
        };
        let file = match &config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Self::merge(args, file, config_file)
    }

    /// Layer `args` over `file` over the defaults
    pub fn merge(args: Args, file: FileConfig, config_file: Option<PathBuf>) -> Result<Self> {
        let defaults = Config::default();

        let capacity = args.capacity.or(file.capacity).unwrap_or(defaults.capacity);
        if capacity == 0 {
            bail!("Capacity must be at least 1 byte");
        }

        let letters = match args.letters.or(file.letters) {
            Some(text) => parse_letters(&text)?,
            None => defaults.letters,
        };

        Ok(Config {
            input: args.input,
            capacity,
            letters,
            format: args.format.or(file.format).unwrap_or(defaults.format),
            handshake: args.handshake || file.handshake.unwrap_or(defaults.handshake),
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
            config_file,
        })
    }
}

/// `<config_dir>/gcode-fields/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gcode-fields").join("config.toml"))
}

/// Parse a letter list such as `"GXYZ"`, dropping repeats
pub fn parse_letters(text: &str) -> Result<Vec<u8>> {
    let mut letters = Vec::new();
    for c in text.chars() {
        if !c.is_ascii_graphic() {
            bail!("Invalid field letter {:?}: expected a printable ASCII character", c);
        }
        let byte = c as u8;
        if !letters.contains(&byte) {
            letters.push(byte);
        }
    }

    if letters.is_empty() {
        bail!("At least one field letter is required");
    }
    Ok(letters)
}
