// SPDX-License-Identifier: Apache-2.0
//! lib
//!
//! Layer: Crate Root
//! Purpose:
//! - Network interface reconciliation: probe every configured interface,
//!   pick one active path (wired before wireless), bring it up and release
//!   the losing class.
//!
//! Notes:
//! - domain: pure model and policy; ports: capability traits;
//!   infra: process/timer adapters; app: prober, actuator, control loop.

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;
pub mod ports;
