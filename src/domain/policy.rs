// SPDX-License-Identifier: Apache-2.0
//! policy
//!
//! Layer: Domain
//! Purpose:
//! - Priority scan over probed statuses: wired before wireless, configured
//!   order within a class, already-active before link-only.
//!
//! Notes:
//! - Pure. No I/O, no clock; the control loop does the logging.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::interface::{InterfaceClass, InterfaceDescriptor, InterfaceStatus, LogicalState};

/// What the actuator should do this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// `active` already holds link and address; leave everything alone.
    NoAction { active: InterfaceDescriptor },

    /// Bring `target` up and release every interface in `disable`.
    Activate {
        target: InterfaceDescriptor,
        disable: BTreeSet<InterfaceClass>,
    },

    /// Nothing usable in any class.
    NoCandidate,
}

/// Which non-candidates end up in the skipped report.
///
/// `All` reports every interface that was scanned and rejected.
/// `ActiveOnly` drops interfaces whose state could not be determined,
/// the way the wired scan of the old shell-out script did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    #[default]
    All,
    ActiveOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInterface {
    pub status: InterfaceStatus,
    pub state: LogicalState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub skipped: Vec<SkippedInterface>,
}

pub type StatusesByClass = BTreeMap<InterfaceClass, Vec<InterfaceStatus>>;

#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    report_mode: ReportMode,
}

impl Policy {
    pub fn new(report_mode: ReportMode) -> Self {
        Self { report_mode }
    }

    pub fn decide(&self, statuses: &StatusesByClass) -> Decision {
        self.evaluate(statuses).decision
    }

    /// Decide, and collect the interfaces that were scanned but rejected.
    ///
    /// Classes are scanned highest priority first. Within a class the first
    /// `Active` interface wins outright; failing that, the first
    /// `LinkOnlyNoAddress` interface is activated and every other class is
    /// disabled. Lower-priority classes are only scanned when a higher one
    /// yields nothing.
    pub fn evaluate(&self, statuses: &StatusesByClass) -> Evaluation {
        let mut skipped = Vec::new();

        for class in InterfaceClass::ALL {
            let Some(entries) = statuses.get(&class) else {
                continue;
            };

            for status in entries {
                let state = status.logical_state();
                if state.is_candidate() || !self.reports(state) {
                    continue;
                }
                skipped.push(SkippedInterface {
                    status: status.clone(),
                    state,
                });
            }

            if let Some(active) = first_in_state(entries, LogicalState::Active) {
                return Evaluation {
                    decision: Decision::NoAction {
                        active: active.descriptor.clone(),
                    },
                    skipped,
                };
            }

            if let Some(link_only) = first_in_state(entries, LogicalState::LinkOnlyNoAddress) {
                let disable = InterfaceClass::ALL
                    .into_iter()
                    .filter(|other| *other != class)
                    .collect();
                return Evaluation {
                    decision: Decision::Activate {
                        target: link_only.descriptor.clone(),
                        disable,
                    },
                    skipped,
                };
            }
        }

        Evaluation {
            decision: Decision::NoCandidate,
            skipped,
        }
    }

    fn reports(&self, state: LogicalState) -> bool {
        match self.report_mode {
            ReportMode::All => true,
            ReportMode::ActiveOnly => state != LogicalState::Indeterminate,
        }
    }
}

fn first_in_state(entries: &[InterfaceStatus], state: LogicalState) -> Option<&InterfaceStatus> {
    entries.iter().find(|s| s.logical_state() == state)
}
