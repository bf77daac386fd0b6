// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter.
//!
//! Each client key owns a counter and the timestamp at which its current
//! window ends. The window is reset discontinuously: the first request seen
//! strictly after `window_reset_at` starts a fresh window with a count of 1.
//! Rejected requests neither increment the count nor move the window.
//!
//! The table is a sharded concurrent map. The whole read-modify-write for a
//! key runs under that key's entry guard, so concurrent requests from the same
//! client are accounted exactly once. Checking never awaits and never logs;
//! callers decide what a rejection means.

use crate::config::WindowConfig;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;

/// Counter state for one client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    /// Requests admitted in the current window
    pub count: u32,
    /// Timestamp (ms) at which the current window ends
    pub window_reset_at: u64,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is allowed
    Admitted {
        /// Requests left in the current window
        remaining: u32,
        /// Timestamp (ms) at which the window ends
        reset_at: u64,
    },
    /// Request is rate limited
    Rejected {
        /// Time until the window rolls over
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

/// Thread-safe fixed-window rate limiter.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    window: WindowConfig,
    records: DashMap<String, RateLimitRecord>,
}

impl FixedWindowLimiter {
    /// Create a new limiter. The window is trusted to be positive; see
    /// [`Config::validate`](crate::config::Config::validate).
    pub fn new(window: WindowConfig) -> Self {
        Self {
            window,
            records: DashMap::new(),
        }
    }

    /// Decide whether the request from `key` at `now` is admitted, recording
    /// it if so.
    pub fn check_and_record(&self, key: &str, now: u64) -> bool {
        self.evaluate(key, now).is_admitted()
    }

    /// Same as [`check_and_record`](Self::check_and_record), but reports how
    /// much room is left or how long until the window rolls over.
    ///
    /// An empty key is rejected without touching the table.
    pub fn evaluate(&self, key: &str, now: u64) -> RateLimitDecision {
        if key.is_empty() {
            return RateLimitDecision::Rejected {
                retry_after: Duration::ZERO,
            };
        }

        let WindowConfig {
            window_ms,
            max_requests,
        } = self.window;

        // `get_mut` first so the steady state does not allocate a key.
        let mut record = match self.records.get_mut(key) {
            Some(existing) => existing,
            None => match self.records.entry(key.to_owned()) {
                Entry::Occupied(occupied) => occupied.into_ref(),
                Entry::Vacant(vacant) => {
                    let reset_at = now.saturating_add(window_ms);
                    vacant.insert(RateLimitRecord {
                        count: 1,
                        window_reset_at: reset_at,
                    });
                    return RateLimitDecision::Admitted {
                        remaining: max_requests.saturating_sub(1),
                        reset_at,
                    };
                }
            },
        };

        if now > record.window_reset_at {
            record.count = 1;
            record.window_reset_at = now.saturating_add(window_ms);
        } else if record.count >= max_requests {
            return RateLimitDecision::Rejected {
                retry_after: Duration::from_millis(
                    (record.window_reset_at - now).saturating_add(1),
                ),
            };
        } else {
            record.count += 1;
        }

        RateLimitDecision::Admitted {
            remaining: max_requests.saturating_sub(record.count),
            reset_at: record.window_reset_at,
        }
    }

    /// Snapshot of the record for `key`, if one exists.
    pub fn record(&self, key: &str) -> Option<RateLimitRecord> {
        self.records.get(key).map(|r| *r)
    }

    /// Number of tracked client keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove records whose window ended more than `grace_ms` before `now`.
    /// Returns the number of records removed.
    ///
    /// A removed key is simply first-seen again on its next request.
    pub fn sweep(&self, now: u64, grace_ms: u64) -> usize {
        let before = self.records.len();
        self.records
            .retain(|_, record| record.window_reset_at.saturating_add(grace_ms) >= now);
        before.saturating_sub(self.records.len())
    }
}
