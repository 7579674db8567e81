// SPDX-License-Identifier: Apache-2.0
//! mod
//!
//! Layer: Ports
//! Purpose:
//! - Capability boundaries between the reconciliation core and the host.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

pub mod command;
pub mod interface_control;
pub mod status_source;
pub mod ticker;
