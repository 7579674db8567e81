// SPDX-License-Identifier: Apache-2.0
//! mod
//!
//! Layer: Application
//! Purpose:
//! - Prober, actuator and the control loop that sequences them.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

pub mod actuator;
pub mod control_loop;
#[cfg(test)]
pub mod fake_network;
pub mod prober;

pub use control_loop::ControlLoop;
