// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for flood simulation against the fixed-window limiter.
//!
//! Attacks run on virtual time: each request carries an explicit timestamp,
//! so a two-minute attack finishes in milliseconds and is fully repeatable.

pub mod attacks;
pub mod generators;
pub mod metrics;
