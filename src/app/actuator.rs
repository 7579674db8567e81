// SPDX-License-Identifier: Apache-2.0
//! actuator
//!
//! Layer: Application
//! Purpose:
//! - Carry out a Decision through the InterfaceControl port.
//!
//! Notes:
//! - Every step is attempted even when an earlier one fails; failures are
//!   collected and handed back for the loop to log. No retries within a tick.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{error, info};

use crate::{
    domain::{
        interface::{InterfaceClass, InterfaceDescriptor},
        policy::Decision,
    },
    ports::{command::CommandError, interface_control::InterfaceControl},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationStep {
    Release,
    SetUp,
    Acquire,
}

impl fmt::Display for ActuationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => f.write_str("release address"),
            Self::SetUp => f.write_str("set up"),
            Self::Acquire => f.write_str("acquire address"),
        }
    }
}

/// One failed external write.
#[derive(Debug, Error)]
#[error("{step} on {iface} failed: {source}")]
pub struct ActuationFailure {
    pub iface: String,
    pub step: ActuationStep,
    #[source]
    pub source: CommandError,
}

#[derive(Debug, Error)]
pub enum ActuationError {
    #[error("{} actuation step(s) failed", .failures.len())]
    Incomplete { failures: Vec<ActuationFailure> },
}

pub struct Actuator {
    control: Arc<dyn InterfaceControl>,
    interfaces: Vec<InterfaceDescriptor>,
    dry_run: bool,
}

impl fmt::Debug for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actuator")
            .field("interfaces", &self.interfaces)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Actuator {
    /// `interfaces` is the full configured set; disabling a class releases
    /// every one of its members.
    pub fn new(control: Arc<dyn InterfaceControl>, interfaces: Vec<InterfaceDescriptor>) -> Self {
        Self {
            control,
            interfaces,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn apply(&self, decision: &Decision) -> Result<(), ActuationError> {
        let Decision::Activate { target, disable } = decision else {
            return Ok(());
        };

        let mut failures = Vec::new();

        for class in disable {
            info!(class=%class, "disabling interface class");
            for iface in self.members(*class) {
                self.step(ActuationStep::Release, &iface.name, &mut failures)
                    .await;
            }
        }

        info!(iface=%target.name, class=%target.class, "activating interface");
        for step in [
            ActuationStep::SetUp,
            ActuationStep::Release,
            ActuationStep::Acquire,
        ] {
            self.step(step, &target.name, &mut failures).await;
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ActuationError::Incomplete { failures })
        }
    }

    fn members(&self, class: InterfaceClass) -> impl Iterator<Item = &InterfaceDescriptor> {
        self.interfaces.iter().filter(move |d| d.class == class)
    }

    async fn step(&self, step: ActuationStep, iface: &str, failures: &mut Vec<ActuationFailure>) {
        if self.dry_run {
            info!(iface=%iface, step=%step, "dry-run: skipping");
            return;
        }

        let result = match step {
            ActuationStep::Release => self.control.release_address(iface).await,
            ActuationStep::SetUp => self.control.set_up(iface).await,
            ActuationStep::Acquire => self.control.acquire_address(iface).await,
        };

        if let Err(source) = result {
            let failure = ActuationFailure {
                iface: iface.to_string(),
                step,
                source,
            };
            error!(error=%failure, "actuation step failed");
            failures.push(failure);
        }
    }
}
