// SPDX-License-Identifier: Apache-2.0
//! fake_network
//!
//! Layer: Application (tests only)
//! Purpose:
//! - In-memory host network implementing both StatusSource and
//!   InterfaceControl, so actuation feeds back into the next probe.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{
    domain::interface::{InterfaceDescriptor, LinkState},
    ports::{
        command::CommandError,
        interface_control::InterfaceControl,
        status_source::{ProbeError, StatusQuery, StatusSource},
    },
};

#[derive(Debug, Clone, Copy)]
struct FakeInterface {
    link: LinkState,
    bound: bool,
}

#[derive(Debug, Default)]
struct State {
    interfaces: HashMap<String, FakeInterface>,
    failing_link: HashSet<String>,
    failing_address: HashSet<String>,
    failing_operations: HashSet<String>,
    probe_delay: Option<Duration>,
    link_queries: Vec<String>,
    address_queries: Vec<String>,
    probe_started: Vec<Instant>,
    operations: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakeNetwork {
    state: Mutex<State>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interface(self, name: &str, link: LinkState, bound: bool) -> Self {
        self.set_interface(name, link, bound);
        self
    }

    pub fn failing_link_probe(self, name: &str) -> Self {
        self.state.lock().unwrap().failing_link.insert(name.to_string());
        self
    }

    pub fn failing_address_probe(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_address
            .insert(name.to_string());
        self
    }

    /// `operation` uses the same form as [`FakeNetwork::operations`], e.g. `"acquire eth0"`.
    pub fn failing_operation(self, operation: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_operations
            .insert(operation.to_string());
        self
    }

    /// Every link query sleeps this long before answering.
    pub fn with_probe_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().probe_delay = Some(delay);
        self
    }

    pub fn set_interface(&self, name: &str, link: LinkState, bound: bool) {
        self.state
            .lock()
            .unwrap()
            .interfaces
            .insert(name.to_string(), FakeInterface { link, bound });
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .interfaces
            .get(name)
            .is_some_and(|i| i.bound)
    }

    pub fn link_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().link_queries.clone()
    }

    pub fn address_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().address_queries.clone()
    }

    pub fn probe_started(&self) -> Vec<Instant> {
        self.state.lock().unwrap().probe_started.clone()
    }

    /// Write operations in call order: `"up eth0"`, `"release eth0"`, `"acquire eth0"`.
    pub fn operations(&self) -> Vec<String> {
        self.state.lock().unwrap().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    fn probe_error(iface: &InterfaceDescriptor, query: StatusQuery) -> ProbeError {
        ProbeError::Parse {
            iface: iface.name.clone(),
            query,
            detail: "scripted failure".to_string(),
        }
    }

    fn missing(iface: &InterfaceDescriptor, query: StatusQuery) -> ProbeError {
        ProbeError::Execution {
            iface: iface.name.clone(),
            query,
            source: CommandError::Failed {
                program: "fake".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("{}: Device not found", iface.name),
            },
        }
    }

    fn operate(&self, verb: &str, iface: &str) -> Result<(), CommandError> {
        let operation = format!("{verb} {iface}");
        let mut state = self.state.lock().unwrap();
        state.operations.push(operation.clone());
        if state.failing_operations.contains(&operation) {
            return Err(CommandError::Failed {
                program: "fake".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("{operation} refused"),
            });
        }
        if let Some(interface) = state.interfaces.get_mut(iface) {
            match verb {
                "acquire" => interface.bound = interface.link == LinkState::Yes,
                "release" => interface.bound = false,
                _ => {}
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StatusSource for FakeNetwork {
    async fn link_state(&self, iface: &InterfaceDescriptor) -> Result<LinkState, ProbeError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.link_queries.push(iface.name.clone());
            state.probe_started.push(Instant::now());
            state.probe_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.lock().unwrap();
        if state.failing_link.contains(&iface.name) {
            return Err(Self::probe_error(iface, StatusQuery::Link));
        }
        state
            .interfaces
            .get(&iface.name)
            .map(|i| i.link)
            .ok_or_else(|| Self::missing(iface, StatusQuery::Link))
    }

    async fn address_bound(&self, iface: &InterfaceDescriptor) -> Result<bool, ProbeError> {
        let mut state = self.state.lock().unwrap();
        state.address_queries.push(iface.name.clone());
        if state.failing_address.contains(&iface.name) {
            return Err(Self::probe_error(iface, StatusQuery::Address));
        }
        state
            .interfaces
            .get(&iface.name)
            .map(|i| i.bound)
            .ok_or_else(|| Self::missing(iface, StatusQuery::Address))
    }
}

#[async_trait]
impl InterfaceControl for FakeNetwork {
    async fn set_up(&self, iface: &str) -> Result<(), CommandError> {
        self.operate("up", iface)
    }

    async fn acquire_address(&self, iface: &str) -> Result<(), CommandError> {
        self.operate("acquire", iface)
    }

    async fn release_address(&self, iface: &str) -> Result<(), CommandError> {
        self.operate("release", iface)
    }
}
