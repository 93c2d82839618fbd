// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP control surface.
//!
//! A single `/automation` resource: `GET` reports status, `POST` carries an
//! `action` of `start`, `stop` or `status`. Every body is an [`ApiResponse`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use sweep_core::{Clock, StateRecord};
use sweep_wire::{ApiResponse, ControlRequest, AUTOMATION_PATH};

use crate::orchestrator::{Orchestrator, OrchestratorError};

type Shared<C> = Arc<Orchestrator<C>>;

pub fn router<C: Clock>(orchestrator: Shared<C>) -> Router {
    Router::new()
        .route(
            AUTOMATION_PATH,
            get(get_automation::<C>).post(post_automation::<C>).fallback(method_not_allowed),
        )
        .with_state(orchestrator)
}

#[derive(Debug, Default, Deserialize)]
struct ActionQuery {
    action: Option<String>,
}

async fn get_automation<C: Clock>(
    State(orchestrator): State<Shared<C>>,
    Query(query): Query<ActionQuery>,
) -> Result<Json<ApiResponse>, ApiError> {
    let action = query.action.as_deref().map(|a| a.trim().to_lowercase()).unwrap_or_default();
    if !action.is_empty() && action != "status" {
        return Err(ApiError::bad_request(format!("use POST for action \"{action}\"")));
    }
    let state = orchestrator.status().map_err(|e| ApiError::from_orchestrator(e, None))?;
    Ok(Json(ApiResponse::ok(state)))
}

async fn post_automation<C: Clock>(
    State(orchestrator): State<Shared<C>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, ApiError> {
    let request = ControlRequest::parse(&body).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let result = match &request {
        ControlRequest::Start(start) => orchestrator.start(start).await,
        ControlRequest::Stop => orchestrator.stop(),
        ControlRequest::Status => orchestrator.status(),
    };
    match result {
        Ok(state) => Ok(Json(ApiResponse::ok(state))),
        Err(e) => {
            tracing::warn!(error = %e, "control request failed");
            let current = orchestrator.status().ok();
            Err(ApiError::from_orchestrator(e, current))
        }
    }
}

async fn method_not_allowed() -> ApiError {
    ApiError { status: StatusCode::METHOD_NOT_ALLOWED, body: ApiResponse::error("method not allowed") }
}

/// An error reply: status code plus `{ ok:false, error, state? }`.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: ApiResponse,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: ApiResponse::error(message) }
    }

    /// `current` is attached to server-side failures so the caller sees the
    /// recorded rollback.
    fn from_orchestrator(err: OrchestratorError, current: Option<StateRecord>) -> Self {
        let message = err.to_string();
        match err {
            OrchestratorError::Validation(_) => Self::bad_request(message),
            OrchestratorError::Conflict { state } => Self {
                status: StatusCode::CONFLICT,
                body: ApiResponse::error(message).with_state(*state),
            },
            _ => {
                let mut body = ApiResponse::error(message);
                if let Some(state) = current {
                    body = body.with_state(state);
                }
                Self { status: StatusCode::INTERNAL_SERVER_ERROR, body }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
