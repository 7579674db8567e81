// SPDX-License-Identifier: Apache-2.0
//! mod
//!
//! Layer: Infrastructure
//! Purpose:
//! - Host-facing adapters: process execution, tool output parsing, timers.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

pub mod control_commands;
pub mod interval_ticker;
pub mod process_runner;
#[cfg(test)]
pub mod scripted_runner;
pub mod status_commands;
pub mod tool_paths;
