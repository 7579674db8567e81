// SPDX-License-Identifier: Apache-2.0
//! interface_control
//!
//! Layer: Ports
//! Purpose:
//! - The three write operations the actuator needs from the network stack.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

use async_trait::async_trait;

use crate::ports::command::CommandError;

/// InterfaceControl = outbound port (the actuator depends on this).
#[async_trait]
pub trait InterfaceControl: Send + Sync {
    /// Mark the interface administratively up.
    async fn set_up(&self, iface: &str) -> Result<(), CommandError>;

    /// Start the address-acquisition client for the interface.
    async fn acquire_address(&self, iface: &str) -> Result<(), CommandError>;

    /// Release the lease and stop the address-acquisition client.
    async fn release_address(&self, iface: &str) -> Result<(), CommandError>;
}
