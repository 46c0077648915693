//! ---
//! lp_section: "01-core-functionality"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Probe configuration loading and validation."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

/// Default locations inspected when `LOADPROBE_CONFIG` is unset.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["loadprobe.toml", "configs/loadprobe.toml"];

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a probe run.
///
/// Nothing in here is derived from process arguments; the argument list is
/// reserved and must not influence the outcome of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Registry id of the component to probe. Falls back to the first
    /// registered component.
    #[serde(default)]
    pub component: Option<String>,
    /// Value the identity attribute must match for the run to pass.
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`ProbeConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedProbeConfig {
    pub config: ProbeConfig,
    /// `None` when no file was found and built-in defaults are in effect.
    pub source: Option<PathBuf>,
}

impl ProbeConfig {
    pub const ENV_CONFIG_PATH: &str = "LOADPROBE_CONFIG";

    /// Load configuration, respecting the `LOADPROBE_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// An explicit `LOADPROBE_CONFIG` path must exist. Otherwise the first
    /// existing candidate wins, and defaults apply when none exists.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedProbeConfig> {
        // Read as OsString so a non-UTF-8 path is still honoured.
        if let Some(env_path) = std::env::var_os(Self::ENV_CONFIG_PATH) {
            if !env_path.to_string_lossy().trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedProbeConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.is_file() {
                let config = Self::from_path(path)?;
                return Ok(LoadedProbeConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!("no probe configuration found, using defaults");
        Ok(LoadedProbeConfig {
            config: Self::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        contents
            .parse::<ProbeConfig>()
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if let Some(component) = &self.component {
            if component.trim().is_empty() {
                return Err(anyhow!("component id cannot be blank"));
            }
        }
        if let Some(expected) = &self.expected {
            if expected.trim().is_empty() {
                return Err(anyhow!("expected value cannot be blank"));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for ProbeConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: ProbeConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Directory for the rolling JSON log file. No file is written when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ProbeConfig = "".parse().unwrap();
        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn full_document_parses() {
        let config: ProbeConfig = r#"
            component = "example"
            expected = "ExampleComponent"

            [logging]
            format = "structured-json"
            directory = "target/logs"
            file_prefix = "ci"
        "#
        .parse()
        .unwrap();
        assert_eq!(config.component.as_deref(), Some("example"));
        assert_eq!(config.expected.as_deref(), Some("ExampleComponent"));
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert_eq!(config.logging.directory, Some(PathBuf::from("target/logs")));
    }

    #[test]
    fn blank_values_are_rejected() {
        let err = "component = \"  \"".parse::<ProbeConfig>().unwrap_err();
        assert!(err.to_string().contains("component id cannot be blank"));
        let err = "expected = \"\"".parse::<ProbeConfig>().unwrap_err();
        assert!(err.to_string().contains("expected value cannot be blank"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!("compnent = \"typo\"".parse::<ProbeConfig>().is_err());
    }
}
