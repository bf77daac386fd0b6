// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Attack simulation patterns for security testing.

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Virtual milliseconds between consecutive requests
    pub interval_ms: u64,
    /// Number of unique IPs to simulate (round-robin)
    pub unique_ips: usize,
    /// Virtual timestamp of the first request
    pub start_ms: u64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            interval_ms: 100,
            unique_ips: 1,
            start_ms: 0,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single IP flood - 1000 requests in one second from one address.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 1_000,
            interval_ms: 1,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Distributed attack - many IPs, each over the limit.
    pub fn distributed_attack() -> Self {
        Self {
            total_requests: 20_000,
            interval_ms: 1,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Slow drip - stay just under the limit (about 86 per minute).
    pub fn slow_drip() -> Self {
        Self {
            total_requests: 200,
            interval_ms: 700,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Persistent attacker - ten requests per second for 130 seconds.
    pub fn persistent_attacker() -> Self {
        Self {
            total_requests: 1_300,
            interval_ms: 100,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Timestamp of the `i`-th request.
    pub fn timestamp(&self, i: usize) -> u64 {
        self.start_ms + i as u64 * self.interval_ms
    }

    /// Virtual duration covered by the attack.
    pub fn span_ms(&self) -> u64 {
        self.timestamp(self.total_requests.saturating_sub(1)) - self.start_ms
    }
}
