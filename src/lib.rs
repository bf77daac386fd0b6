// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-Window Guard
//!
//! Per-client fixed-window rate limiting in front of a handful of demo
//! endpoints:
//!
//! - `/api/secure-endpoint`: 100 requests per minute per client IP
//! - `/api/sensitive`: 50 requests per minute per client IP
//! - Rejected requests get a 429 and do not count against the window
//! - Stale client records are swept periodically

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod middleware;
pub mod sweeper;
pub mod validator;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{Config, WindowConfig};
pub use handlers::{router, AppState};
pub use limiter::{FixedWindowLimiter, RateLimitDecision, RateLimitRecord};
pub use validator::{FormValidator, ValidationResult};
