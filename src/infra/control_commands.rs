// SPDX-License-Identifier: Apache-2.0
//! control_commands
//!
//! Layer: Infrastructure
//! Purpose:
//! - InterfaceControl via ifconfig (admin up) and dhclient (lease request/release).

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    infra::tool_paths::ToolPaths,
    ports::{
        command::{CommandError, CommandRunner},
        interface_control::InterfaceControl,
    },
};

pub struct CommandInterfaceControl {
    runner: Arc<dyn CommandRunner>,
    tools: ToolPaths,
}

impl std::fmt::Debug for CommandInterfaceControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInterfaceControl")
            .field("tools", &self.tools)
            .finish()
    }
}

impl CommandInterfaceControl {
    pub fn new(runner: Arc<dyn CommandRunner>, tools: ToolPaths) -> Self {
        Self { runner, tools }
    }
}

#[async_trait]
impl InterfaceControl for CommandInterfaceControl {
    async fn set_up(&self, iface: &str) -> Result<(), CommandError> {
        self.runner.run(&self.tools.ifconfig, &[iface, "up"]).await?;
        Ok(())
    }

    async fn acquire_address(&self, iface: &str) -> Result<(), CommandError> {
        self.runner.run(&self.tools.dhclient, &[iface]).await?;
        Ok(())
    }

    async fn release_address(&self, iface: &str) -> Result<(), CommandError> {
        self.runner.run(&self.tools.dhclient, &["-r", iface]).await?;
        Ok(())
    }
}
