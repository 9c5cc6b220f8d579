// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content query proxy.
//!
//! `POST /api/content` forwards the raw body to the local content-query (GraphQL) service and
//! relays its JSON answer and status. `GET /api/content` reports where queries go.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub const CONTENT_ROUTE: &str = "/api/content";

const DEFAULT_CONTENT_TYPE: &str = "application/json";
const EMPTY_BODY: &[u8] = b"{}";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to bind content proxy on {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("content proxy stopped: {0}")]
    Serve(#[source] io::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
    #[error("upstream answered with a non-JSON body: {0}")]
    UpstreamBody(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
struct ProxyState {
    client: reqwest::Client,
    upstream: Arc<str>,
}

pub fn router(upstream_url: &str) -> Result<Router, ProxyError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(ProxyError::Client)?;
    let state = ProxyState {
        client,
        upstream: Arc::from(upstream_url),
    };
    Ok(Router::new()
        .route(CONTENT_ROUTE, post(forward_query).get(proxy_status))
        .with_state(state))
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ProxyError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ProxyError::Bind { addr, source })
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    upstream_url: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ProxyError> {
    let router = router(upstream_url)?;
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, upstream = upstream_url, "content proxy listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ProxyError::Serve)
}

async fn forward_query(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_owned();
    let body = if body.is_empty() {
        Bytes::from_static(EMPTY_BODY)
    } else {
        body
    };

    match forward(&state, &content_type, body).await {
        Ok((status, value)) => (status, Json(value)).into_response(),
        Err(err) => {
            error!(upstream = %state.upstream, %err, "content query failed");
            service_unavailable(&state.upstream)
        }
    }
}

async fn forward(
    state: &ProxyState,
    content_type: &str,
    body: Bytes,
) -> Result<(StatusCode, Value), ProxyError> {
    let response = state
        .client
        .post(state.upstream.as_ref())
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(body)
        .send()
        .await
        .map_err(ProxyError::Upstream)?;

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let value = response
        .json::<Value>()
        .await
        .map_err(ProxyError::UpstreamBody)?;
    debug!(%status, "relayed content query");
    Ok((status, value))
}

fn service_unavailable(upstream: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "error": "content service not running",
            "fix": format!("start the content service on {upstream}"),
        })),
    )
        .into_response()
}

async fn proxy_status(State(state): State<ProxyState>) -> Json<Value> {
    Json(json!({
        "message": "content query proxy active",
        "graphql": state.upstream.as_ref(),
    }))
}
