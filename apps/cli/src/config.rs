use std::time::Duration;
use std::{env, fmt, fs, io, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::args::Args;

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {path}: {source}")]
    ReadFailed {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ParseFailed {
        path: path::PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("timeout of {0}s is outside 1..=300s")]
    TimeoutOutOfRange(u64),
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: Probe,
    pub output: Output,
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Probe {
    pub timeout_secs: u64,
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub regions: Vec<String>,
    pub countries: Vec<String>,
}

impl Default for Probe {
    fn default() -> Self {
        Self { timeout_secs: peercheck::DEFAULT_TIMEOUT.as_secs(), max_concurrency: None }
    }
}

impl Probe {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/peercheck/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Option<path::PathBuf> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else {
        env::home_dir()?.join(".config")
    };

    Some(path.join("peercheck/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let or_all = |names: &[String]| {
            if names.is_empty() { "all".to_string() } else { names.join(", ") }
        };

        writeln!(f, "Current Configuration State:")?;
        write_title_1(f, "Probe")?;
        write_1(f, "Timeout (s)", &self.probe.timeout_secs)?;
        match self.probe.max_concurrency {
            Some(limit) => write_1(f, "Max Concurrency", &limit)?,
            None => write_1(f, "Max Concurrency", &"unbounded")?,
        }
        write_title_1(f, "Output")?;
        write_1(f, "JSON", &self.output.json)?;
        write_title_1(f, "Filter")?;
        write_1(f, "Regions", &or_all(&self.filter.regions))?;
        write_1(f, "Countries", &or_all(&self.filter.countries))?;

        Ok(())
    }
}

impl Config {
    /// Load the configuration file.
    ///
    /// An explicit path must exist. Without one, the default location
    /// (~/.config/peercheck/config.toml) is read if present, otherwise the
    /// defaults are used.
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path = match optional_path {
            Some(path) => normalize_toml_path(path.as_ref()),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let raw_string = fs::read_to_string(&config_path)
            .map_err(|source| Error::ReadFailed { path: config_path.clone(), source })?;
        Self::from_toml(&raw_string)
            .map_err(|source| Error::ParseFailed { path: config_path, source })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Command line flags take precedence over the file
    pub fn merge(mut self, args: &Args) -> Self {
        if args.json {
            self.output.json = true;
        }
        if let Some(timeout) = args.timeout {
            self.probe.timeout_secs = timeout;
        }
        if args.max_concurrency.is_some() {
            self.probe.max_concurrency = args.max_concurrency;
        }
        if !args.regions.is_empty() {
            self.filter.regions = args.regions.clone();
        }
        if !args.countries.is_empty() {
            self.filter.countries = args.countries.clone();
        }
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.probe.timeout_secs) {
            return Err(Error::TimeoutOutOfRange(self.probe.timeout_secs));
        }
        if self.probe.max_concurrency == Some(0) {
            return Err(Error::ZeroConcurrency);
        }
        Ok(())
    }
}
