// SPDX-License-Identifier: Apache-2.0
//! interface
//!
//! Layer: Domain
//! Purpose:
//! - Interface identity (name + class) and the per-tick status read-model.
//! - Derivation of the logical state the policy engine reasons about.
//!
//! Notes:
//! - Nothing here survives a tick; statuses are rebuilt every cycle.

use std::fmt;

/// Wired/wireless grouping. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterfaceClass {
    Wired,
    Wireless,
}

impl InterfaceClass {
    /// Every class, highest priority first.
    pub const ALL: [InterfaceClass; 2] = [InterfaceClass::Wired, InterfaceClass::Wireless];
}

impl fmt::Display for InterfaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wired => f.write_str("wired"),
            Self::Wireless => f.write_str("wireless"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub class: InterfaceClass,
}

impl InterfaceDescriptor {
    pub fn new(name: impl Into<String>, class: InterfaceClass) -> Self {
        Self {
            name: name.into(),
            class,
        }
    }

    pub fn wired(name: impl Into<String>) -> Self {
        Self::new(name, InterfaceClass::Wired)
    }

    pub fn wireless(name: impl Into<String>) -> Self {
        Self::new(name, InterfaceClass::Wireless)
    }
}

impl fmt::Display for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.class)
    }
}

/// Tri-state link detection as reported by the status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    Yes,
    No,
    Unknown,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("yes"),
            Self::No => f.write_str("no"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalState {
    /// Link up and an address is bound.
    Active,
    /// Link up but unconfigured; the signal that (re)configuration is needed.
    LinkOnlyNoAddress,
    LinkDown,
    /// The status source could not tell.
    Indeterminate,
}

impl LogicalState {
    pub fn is_candidate(self) -> bool {
        matches!(self, Self::Active | Self::LinkOnlyNoAddress)
    }
}

/// Status of one interface at one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceStatus {
    pub descriptor: InterfaceDescriptor,
    pub link: LinkState,
    pub address_bound: bool,
}

impl InterfaceStatus {
    pub fn new(descriptor: InterfaceDescriptor, link: LinkState, address_bound: bool) -> Self {
        Self {
            descriptor,
            link,
            address_bound,
        }
    }

    /// Status for an interface whose probe failed.
    pub fn indeterminate(descriptor: InterfaceDescriptor) -> Self {
        Self::new(descriptor, LinkState::Unknown, false)
    }

    pub fn logical_state(&self) -> LogicalState {
        match (self.link, self.address_bound) {
            (LinkState::Yes, true) => LogicalState::Active,
            (LinkState::Yes, false) => LogicalState::LinkOnlyNoAddress,
            (LinkState::No, _) => LogicalState::LinkDown,
            (LinkState::Unknown, _) => LogicalState::Indeterminate,
        }
    }

    /// Raw status as logged for skipped interfaces.
    pub fn raw(&self) -> String {
        format!("link={} address_bound={}", self.link, self.address_bound)
    }
}
