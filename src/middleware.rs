// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-route rate limiting middleware.
//!
//! The client key is the peer IP address of the connection. A rejection is
//! final for that request and becomes a 429.

use crate::error::ApiError;
use crate::handlers::{AppState, LimiterId};
use crate::limiter::RateLimitDecision;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Middleware state binding the shared app state to one limiter.
#[derive(Clone)]
pub struct RouteLimit {
    state: Arc<AppState>,
    limiter: LimiterId,
}

impl RouteLimit {
    pub fn new(state: Arc<AppState>, limiter: LimiterId) -> Self {
        Self { state, limiter }
    }
}

/// Admit or reject the request before it reaches the handler.
pub async fn rate_limit(
    State(route): State<RouteLimit>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let state = &route.state;
    let name = route.limiter.name();
    let key = addr.ip().to_string();
    let now = state.clock.now_ms();

    let limiter = state.limiter(route.limiter);
    let decision = limiter.evaluate(&key, now);
    state
        .metrics
        .record_decision(name, decision.is_admitted(), limiter.len());

    match decision {
        RateLimitDecision::Admitted { remaining, .. } => {
            debug!(ip = %key, limiter = name, remaining, "Request admitted");
            Ok(next.run(request).await)
        }
        RateLimitDecision::Rejected { retry_after } => {
            info!(
                ip = %key,
                limiter = name,
                path = %request.uri().path(),
                "Request rate limited"
            );
            let retry_after = state
                .config
                .response
                .retry_after_hint
                .then_some(retry_after);
            Err(ApiError::RateLimited { retry_after })
        }
    }
}
