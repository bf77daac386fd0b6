// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for rate limit decisions.

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

/// Metrics owned by one service instance.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    decisions: IntCounterVec,
    tracked_clients: IntGaugeVec,
    evicted: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let decisions = IntCounterVec::new(
            Opts::new(
                "rate_limit_decisions_total",
                "Rate limit decisions by limiter and outcome",
            ),
            &["limiter", "outcome"],
        )?;
        let tracked_clients = IntGaugeVec::new(
            Opts::new(
                "rate_limit_tracked_clients",
                "Client keys currently held by each limiter",
            ),
            &["limiter"],
        )?;
        let evicted = IntCounterVec::new(
            Opts::new(
                "rate_limit_evicted_total",
                "Stale client records removed by the sweeper",
            ),
            &["limiter"],
        )?;

        registry.register(Box::new(decisions.clone()))?;
        registry.register(Box::new(tracked_clients.clone()))?;
        registry.register(Box::new(evicted.clone()))?;

        Ok(Self {
            registry,
            decisions,
            tracked_clients,
            evicted,
        })
    }

    /// Count one decision and refresh the limiter's table size.
    pub fn record_decision(&self, limiter: &str, admitted: bool, tracked: usize) {
        let outcome = if admitted { "admitted" } else { "rejected" };
        self.decisions.with_label_values(&[limiter, outcome]).inc();
        self.tracked_clients
            .with_label_values(&[limiter])
            .set(tracked as i64);
    }

    pub fn record_sweep(&self, limiter: &str, evicted: usize, remaining: usize) {
        self.evicted
            .with_label_values(&[limiter])
            .inc_by(evicted as u64);
        self.tracked_clients
            .with_label_values(&[limiter])
            .set(remaining as i64);
    }

    pub fn decisions(&self, limiter: &str, admitted: bool) -> u64 {
        let outcome = if admitted { "admitted" } else { "rejected" };
        self.decisions.with_label_values(&[limiter, outcome]).get()
    }

    pub fn tracked_clients(&self, limiter: &str) -> i64 {
        self.tracked_clients.with_label_values(&[limiter]).get()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
