// SPDX-License-Identifier: Apache-2.0
//! scripted_runner
//!
//! Layer: Infrastructure (tests only)
//! Purpose:
//! - CommandRunner test double: canned output per command line, records calls.

use std::{collections::HashMap, path::Path, sync::Mutex};

use async_trait::async_trait;

use crate::ports::command::{CommandError, CommandRunner};

/// Command lines are keyed as `"<program file name> <args...>"`,
/// e.g. `"ethtool eth0"`. Unscripted commands exit non-zero.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, Result<String, String>>>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, command_line: &str, stdout: &str) -> Self {
        self.script(command_line, Ok(stdout.to_string()))
    }

    pub fn fail(self, command_line: &str, stderr: &str) -> Self {
        self.script(command_line, Err(stderr.to_string()))
    }

    fn script(self, command_line: &str, response: Result<String, String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command_line.to_string(), response);
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &Path, args: &[&str]) -> Result<String, CommandError> {
        let program_name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let command_line = std::iter::once(program_name.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.executed.lock().unwrap().push(command_line.clone());

        match self.responses.lock().unwrap().get(&command_line).cloned() {
            Some(Ok(stdout)) => Ok(stdout),
            Some(Err(stderr)) => Err(CommandError::Failed {
                program: program_name,
                status: "exit status: 1".to_string(),
                stderr,
            }),
            None => Err(CommandError::Failed {
                program: program_name,
                status: "exit status: 1".to_string(),
                stderr: format!("unscripted command: {command_line}"),
            }),
        }
    }
}
