// SPDX-License-Identifier: Apache-2.0
//! interval_ticker
//!
//! Layer: Infrastructure
//! Purpose:
//! - Ticker backed by tokio::time::Interval.
//!
//! Notes:
//! - The first tick fires immediately. A cycle that overruns the period
//!   pushes the schedule back instead of firing a burst of catch-up ticks.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::ports::ticker::Ticker;

#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
