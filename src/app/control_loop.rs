// SPDX-License-Identifier: Apache-2.0
//! control_loop
//!
//! Layer: Application
//! Purpose:
//! - Probe -> decide -> actuate, once per tick, until shutdown.
//!
//! Notes:
//! - Cycles run strictly in sequence; the next tick is only awaited after
//!   the actuator returns.
//! - Dropping an in-flight cycle (shutdown) drops its child processes too.

use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::{
    app::{
        actuator::{ActuationError, Actuator},
        prober::Prober,
    },
    domain::{
        interface::{InterfaceDescriptor, LogicalState},
        policy::{Decision, Evaluation, Policy},
    },
    ports::ticker::Ticker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Reconciling,
}

#[derive(Debug)]
pub struct CycleOutcome {
    pub decision: Decision,
    pub actuation: Result<(), ActuationError>,
}

pub struct ControlLoop {
    interfaces: Vec<InterfaceDescriptor>,
    prober: Prober,
    policy: Policy,
    actuator: Actuator,
    ticker: Box<dyn Ticker>,
    state: LoopState,
}

impl std::fmt::Debug for ControlLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlLoop")
            .field("interfaces", &self.interfaces)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .finish()
    }
}

impl ControlLoop {
    pub fn new(
        interfaces: Vec<InterfaceDescriptor>,
        prober: Prober,
        policy: Policy,
        actuator: Actuator,
        ticker: Box<dyn Ticker>,
    ) -> Self {
        Self {
            interfaces,
            prober,
            policy,
            actuator,
            ticker,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// One full reconciliation pass.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.state = LoopState::Reconciling;

        let report = self.prober.probe(&self.interfaces).await;
        let evaluation = self.policy.evaluate(&report.by_class());
        log_evaluation(&evaluation);

        let actuation = self.actuator.apply(&evaluation.decision).await;
        if let Err(e) = &actuation {
            error!(error=%e, "reconciliation incomplete; retrying next tick");
        }

        self.state = LoopState::Idle;
        CycleOutcome {
            decision: evaluation.decision,
            actuation,
        }
    }

    /// Run a cycle per tick until `shutdown` resolves. Returns the number of
    /// cycles that ran to completion.
    pub async fn run_until<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut completed = 0u64;

        loop {
            let ticked = tokio::select! {
                biased;
                _ = &mut shutdown => false,
                _ = self.ticker.tick() => true,
            };
            if !ticked {
                break;
            }

            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                outcome = self.run_cycle() => Some(outcome),
            };
            if outcome.is_none() {
                info!("shutdown requested mid-cycle; abandoning in-flight commands");
                self.state = LoopState::Idle;
                break;
            }
            completed += 1;
        }

        info!(cycles=%completed, "control loop stopped");
        completed
    }
}

fn log_evaluation(evaluation: &Evaluation) {
    for skipped in &evaluation.skipped {
        let iface = &skipped.status.descriptor;
        match skipped.state {
            LogicalState::Indeterminate => error!(
                iface=%iface.name,
                class=%iface.class,
                status=%skipped.status.raw(),
                "skipping interface with unknown status"
            ),
            _ => warn!(
                iface=%iface.name,
                class=%iface.class,
                status=%skipped.status.raw(),
                "skipping interface without link"
            ),
        }
    }

    match &evaluation.decision {
        Decision::NoAction { active } => {
            debug!(iface=%active.name, class=%active.class, "already configured; nothing to do");
        }
        Decision::Activate { target, .. } => {
            debug!(iface=%target.name, "activation required");
        }
        Decision::NoCandidate => {
            warn!("no usable interface in any class");
        }
    }
}
