//! HTTP transport used by the presence client
//!
//! The client builds fully-formed requests and hands them to an
//! `HttpTransport`. `ReqwestTransport` is the production implementation;
//! tests substitute a recording transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{PresenceError, Result};

/// A request ready to be sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

/// Status code and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON. `url` is only used for the error.
    pub fn json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| PresenceError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute one request. Any status code is a successful send; only
    /// network failures and timeouts are errors here.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Transport backed by `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = self
            .http
            .request(method, &url)
            .headers(headers)
            .timeout(timeout);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, &url, timeout))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, &url, timeout))?;

        tracing::debug!("HTTP {} from {}", status, url);
        Ok(RawResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error, url: &str, timeout: Duration) -> PresenceError {
    if err.is_timeout() {
        PresenceError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        PresenceError::Transport {
            url: url.to_string(),
            source: Box::new(err),
        }
    }
}
