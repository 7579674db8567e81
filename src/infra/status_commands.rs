// SPDX-License-Identifier: Apache-2.0
//! status_commands
//!
//! Layer: Infrastructure
//! Purpose:
//! - StatusSource that shells out to ethtool/ifconfig and parses their text.
//!
//! Notes:
//! - The parsers return None on anything unexpected; the adapter turns that
//!   into ProbeError::Parse so the prober can demote the interface.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    domain::interface::{InterfaceClass, InterfaceDescriptor, LinkState},
    infra::tool_paths::ToolPaths,
    ports::{
        command::CommandRunner,
        status_source::{ProbeError, StatusQuery, StatusSource},
    },
};

/// How link presence is detected for a class of interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkProbe {
    /// `ethtool <iface>`, "Link detected: yes|no".
    #[default]
    Ethtool,
    /// `ifconfig -s <iface>`, RUNNING flag in the Flg column.
    InterfaceFlags,
}

/// Wireless drivers often don't report carrier through ethtool, so
/// wireless defaults to the interface flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkProbes {
    pub wired: LinkProbe,
    pub wireless: LinkProbe,
}

impl Default for LinkProbes {
    fn default() -> Self {
        Self {
            wired: LinkProbe::Ethtool,
            wireless: LinkProbe::InterfaceFlags,
        }
    }
}

impl LinkProbes {
    pub fn for_class(&self, class: InterfaceClass) -> LinkProbe {
        match class {
            InterfaceClass::Wired => self.wired,
            InterfaceClass::Wireless => self.wireless,
        }
    }
}

pub struct CommandStatusSource {
    runner: Arc<dyn CommandRunner>,
    tools: ToolPaths,
    probes: LinkProbes,
}

impl std::fmt::Debug for CommandStatusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandStatusSource")
            .field("tools", &self.tools)
            .field("probes", &self.probes)
            .finish()
    }
}

impl CommandStatusSource {
    pub fn new(runner: Arc<dyn CommandRunner>, tools: ToolPaths, probes: LinkProbes) -> Self {
        Self {
            runner,
            tools,
            probes,
        }
    }

    async fn query(
        &self,
        iface: &InterfaceDescriptor,
        query: StatusQuery,
        program: &std::path::Path,
        args: &[&str],
    ) -> Result<String, ProbeError> {
        self.runner
            .run(program, args)
            .await
            .map_err(|source| ProbeError::Execution {
                iface: iface.name.clone(),
                query,
                source,
            })
    }
}

#[async_trait]
impl StatusSource for CommandStatusSource {
    async fn link_state(&self, iface: &InterfaceDescriptor) -> Result<LinkState, ProbeError> {
        let name = iface.name.as_str();
        let (output, parsed) = match self.probes.for_class(iface.class) {
            LinkProbe::Ethtool => {
                let output = self
                    .query(iface, StatusQuery::Link, &self.tools.ethtool, &[name])
                    .await?;
                let parsed = parse_ethtool_link(&output);
                (output, parsed)
            }
            LinkProbe::InterfaceFlags => {
                let output = self
                    .query(iface, StatusQuery::Link, &self.tools.ifconfig, &["-s", name])
                    .await?;
                let parsed = parse_interface_flags(&output);
                (output, parsed)
            }
        };

        parsed.ok_or_else(|| ProbeError::Parse {
            iface: iface.name.clone(),
            query: StatusQuery::Link,
            detail: excerpt(&output),
        })
    }

    async fn address_bound(&self, iface: &InterfaceDescriptor) -> Result<bool, ProbeError> {
        let output = self
            .query(iface, StatusQuery::Address, &self.tools.ifconfig, &[iface.name.as_str()])
            .await?;

        parse_inet_bound(&output).ok_or_else(|| ProbeError::Parse {
            iface: iface.name.clone(),
            query: StatusQuery::Address,
            detail: excerpt(&output),
        })
    }
}

/// `Link detected: yes` / `Link detected: no` from `ethtool <iface>`.
pub fn parse_ethtool_link(output: &str) -> Option<LinkState> {
    let value = output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Link detected:"))?;
    match value.trim() {
        "yes" => Some(LinkState::Yes),
        "no" => Some(LinkState::No),
        _ => None,
    }
}

/// First data row of `ifconfig -s <iface>`; the flag column is the last field.
pub fn parse_interface_flags(output: &str) -> Option<LinkState> {
    let row = output
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty() && !line.starts_with("Iface") && !line.starts_with("Kernel")
        })?;
    let flags = row.split_whitespace().last()?;
    if flags.contains('R') {
        Some(LinkState::Yes)
    } else {
        Some(LinkState::No)
    }
}

/// Whether `ifconfig <iface>` lists an IPv4 address.
/// Accepts both `inet 10.0.0.2` and the older `inet addr:10.0.0.2`.
pub fn parse_inet_bound(output: &str) -> Option<bool> {
    if output.trim().is_empty() {
        return None;
    }
    let bound = output.lines().any(|line| {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("inet") {
            return false;
        }
        match tokens.next() {
            Some("addr:") => tokens.next().is_some(),
            Some(token) => !token.trim_start_matches("addr:").is_empty(),
            None => false,
        }
    });
    Some(bound)
}

fn excerpt(output: &str) -> String {
    const MAX: usize = 120;
    let flat = output.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return "<empty>".to_string();
    }
    match flat.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}
