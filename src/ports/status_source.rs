// SPDX-License-Identifier: Apache-2.0
//! status_source
//!
//! Layer: Ports
//! Purpose:
//! - Typed link and address queries for a single interface.
//!
//! Notes:
//! - Implementations own all text parsing; callers only see typed values.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::interface::{InterfaceDescriptor, LinkState},
    ports::command::CommandError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    Link,
    Address,
}

impl std::fmt::Display for StatusQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Link => f.write_str("link"),
            Self::Address => f.write_str("address"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The query process failed to run or exit cleanly.
    #[error("{query} query for {iface} failed: {source}")]
    Execution {
        iface: String,
        query: StatusQuery,
        #[source]
        source: CommandError,
    },

    /// The query ran but its output did not match the expected pattern.
    #[error("{query} query for {iface} returned unparsable output: {detail}")]
    Parse {
        iface: String,
        query: StatusQuery,
        detail: String,
    },
}

/// StatusSource = outbound port (the prober depends on this).
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Whether a physical/radio link is present.
    async fn link_state(&self, iface: &InterfaceDescriptor) -> Result<LinkState, ProbeError>;

    /// Whether the interface currently holds an IPv4 address.
    async fn address_bound(&self, iface: &InterfaceDescriptor) -> Result<bool, ProbeError>;
}
