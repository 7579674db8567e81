// SPDX-License-Identifier: Apache-2.0
//! prober
//!
//! Layer: Application
//! Purpose:
//! - Probe every configured interface through the StatusSource port.
//!
//! Notes:
//! - A failing interface is demoted to Indeterminate; the batch always completes.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, error};

use crate::{
    domain::{
        interface::{InterfaceDescriptor, InterfaceStatus},
        policy::StatusesByClass,
    },
    ports::status_source::StatusSource,
};

/// Statuses for one tick, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport(IndexMap<InterfaceDescriptor, InterfaceStatus>);

impl StatusReport {
    pub fn get(&self, descriptor: &InterfaceDescriptor) -> Option<&InterfaceStatus> {
        self.0.get(descriptor)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceStatus> {
        self.0.values()
    }

    /// Group by class, keeping configured order inside each class.
    pub fn by_class(&self) -> StatusesByClass {
        let mut grouped = StatusesByClass::new();
        for status in self.0.values() {
            grouped
                .entry(status.descriptor.class)
                .or_default()
                .push(status.clone());
        }
        grouped
    }
}

impl FromIterator<InterfaceStatus> for StatusReport {
    fn from_iter<T: IntoIterator<Item = InterfaceStatus>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|status| (status.descriptor.clone(), status))
                .collect(),
        )
    }
}

#[derive(Clone)]
pub struct Prober {
    source: Arc<dyn StatusSource>,
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober").finish()
    }
}

impl Prober {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }

    pub async fn probe(&self, descriptors: &[InterfaceDescriptor]) -> StatusReport {
        let mut statuses = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            statuses.push(self.probe_one(descriptor).await);
        }
        statuses.into_iter().collect()
    }

    async fn probe_one(&self, descriptor: &InterfaceDescriptor) -> InterfaceStatus {
        let link = match self.source.link_state(descriptor).await {
            Ok(link) => Some(link),
            Err(e) => {
                error!(iface=%descriptor.name, error=%e, "link probe failed");
                None
            }
        };

        let bound = match self.source.address_bound(descriptor).await {
            Ok(bound) => Some(bound),
            Err(e) => {
                error!(iface=%descriptor.name, error=%e, "address probe failed");
                None
            }
        };

        let status = match (link, bound) {
            (Some(link), Some(bound)) => InterfaceStatus::new(descriptor.clone(), link, bound),
            _ => InterfaceStatus::indeterminate(descriptor.clone()),
        };
        debug!(iface=%descriptor.name, status=%status.raw(), state=?status.logical_state(), "probed");
        status
    }
}
