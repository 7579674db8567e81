// SPDX-License-Identifier: Apache-2.0
//! config
//!
//! Layer: Composition Root
//! Purpose:
//! - Layered startup configuration: defaults, TOML file, IFSWITCHD_* env,
//!   then command-line overrides.
//! - Validation and one-time tool resolution into a DaemonConfig.
//!
//! Notes:
//! - Loaded exactly once; any error here aborts startup.

use std::{
    collections::HashSet,
    ffi::OsStr,
    path::{Path, PathBuf},
    time::Duration,
};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{interface::InterfaceDescriptor, policy::ReportMode},
    infra::{
        status_commands::LinkProbes,
        tool_paths::{ToolLookupError, ToolPaths},
    },
};

pub const ENV_PREFIX: &str = "IFSWITCHD_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error(transparent)]
    Tool(#[from] ToolLookupError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Raw layered settings ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wired interfaces, highest priority first.
    pub wired: Vec<String>,
    /// Wireless interfaces, highest priority first.
    pub wireless: Vec<String>,
    pub poll_interval_secs: u64,
    pub command_timeout_secs: u64,
    pub report_mode: ReportMode,
    pub dry_run: bool,
    pub link_probe: LinkProbes,
    pub tools: ToolNames,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wired: vec!["eth0".into()],
            wireless: vec!["wlan0".into()],
            poll_interval_secs: 5,
            command_timeout_secs: 30,
            report_mode: ReportMode::default(),
            dry_run: false,
            link_probe: LinkProbes::default(),
            tools: ToolNames::default(),
        }
    }
}

/// Tool names or paths; bare names are looked up on PATH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolNames {
    pub ethtool: String,
    pub ifconfig: String,
    pub dhclient: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            ethtool: "ethtool".into(),
            ifconfig: "ifconfig".into(),
            dhclient: "dhclient".into(),
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wired: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireless: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl Settings {
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load every layer. An explicitly named config file must exist.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }

        let settings = Self::figment(path)
            .merge(Serialized::defaults(overrides))
            .extract()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wired.is_empty() && self.wireless.is_empty() {
            return Err(ConfigError::Validation {
                field: "interfaces",
                reason: "at least one wired or wireless interface is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for name in self.wired.iter().chain(&self.wireless) {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: "interfaces",
                    reason: "interface names must not be empty".into(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation {
                    field: "interfaces",
                    reason: format!("'{name}' is configured more than once"),
                });
            }
        }

        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "command_timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Validate and resolve tools against `path_var` (normally `$PATH`).
    pub fn resolve(self, path_var: Option<&OsStr>) -> Result<DaemonConfig, ConfigError> {
        self.validate()?;

        let tools = ToolPaths::resolve(
            &self.tools.ethtool,
            &self.tools.ifconfig,
            &self.tools.dhclient,
            path_var,
        )?;

        let interfaces = self
            .wired
            .into_iter()
            .map(InterfaceDescriptor::wired)
            .chain(self.wireless.into_iter().map(InterfaceDescriptor::wireless))
            .collect();

        Ok(DaemonConfig {
            interfaces,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            command_timeout: Duration::from_secs(self.command_timeout_secs),
            report_mode: self.report_mode,
            dry_run: self.dry_run,
            link_probes: self.link_probe,
            tools,
        })
    }
}

// ── Resolved runtime configuration ──────────────────────────────────

/// Built once in `main`, then handed to each component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// All wired interfaces in priority order, then all wireless ones.
    pub interfaces: Vec<InterfaceDescriptor>,
    pub poll_interval: Duration,
    pub command_timeout: Duration,
    pub report_mode: ReportMode,
    pub dry_run: bool,
    pub link_probes: LinkProbes,
    pub tools: ToolPaths,
}
