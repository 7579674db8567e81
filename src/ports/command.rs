// SPDX-License-Identifier: Apache-2.0
//! command
//!
//! Layer: Ports
//! Purpose:
//! - Outbound port for running external tools and capturing their output.
//!
//! Notes:
//! - Status and control adapters share one runner so timeouts are uniform.

use std::{path::Path, time::Duration};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// CommandRunner = outbound port (infra adapters depend on this).
/// Returns stdout on a clean exit.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[&str]) -> Result<String, CommandError>;
}
