// SPDX-License-Identifier: Apache-2.0
//! process_runner
//!
//! Layer: Infrastructure
//! Purpose:
//! - CommandRunner backed by tokio::process with a hard per-call timeout.
//!
//! Notes:
//! - Children are spawned with kill_on_drop, so dropping the future (timeout
//!   or shutdown) also kills the process.

use std::{path::Path, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::ports::command::{CommandError, CommandRunner};

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[&str]) -> Result<String, CommandError> {
        let program_name = program.display().to_string();
        debug!(program=%program_name, args=?args, "exec");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program_name.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| CommandError::Spawn {
                program: program_name.clone(),
                source,
            })?,
            Err(_) => {
                return Err(CommandError::Timeout {
                    program: program_name,
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program_name,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
