// SPDX-License-Identifier: Apache-2.0
//! ticker
//!
//! Layer: Ports
//! Purpose:
//! - Injectable timer for the control loop cadence.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

use async_trait::async_trait;

#[async_trait]
pub trait Ticker: Send {
    /// Resolves when the next reconciliation cycle is due.
    async fn tick(&mut self);
}
