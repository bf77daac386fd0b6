// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Background eviction of stale limiter records.

use crate::handlers::{AppState, LimiterId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Sweep every limiter once. Returns the total number of records removed.
pub fn sweep_once(state: &AppState) -> usize {
    let now = state.clock.now_ms();
    let grace_ms = state.config.sweep.grace_ms;

    LimiterId::ALL
        .into_iter()
        .map(|id| {
            let limiter = state.limiter(id);
            let evicted = limiter.sweep(now, grace_ms);
            let remaining = limiter.len();
            state.metrics.record_sweep(id.name(), evicted, remaining);
            if evicted > 0 {
                debug!(limiter = id.name(), evicted, remaining, "Swept stale records");
            }
            evicted
        })
        .sum()
}

/// Spawn the periodic sweep task.
pub fn spawn(state: Arc<AppState>) -> JoinHandle<()> {
    let period = state.config.sweep.interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            sweep_once(&state);
        }
    })
}
