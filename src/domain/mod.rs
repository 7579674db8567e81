// SPDX-License-Identifier: Apache-2.0
//! mod
//!
//! Layer: Domain
//! Purpose:
//! - Interface model and the activation policy. No I/O.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

pub mod interface;
pub mod policy;
