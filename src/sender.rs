// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bundled reqwest-backed implementation of [`MessageSender`].
//!
//! The strategies only need "send request, get response"; this adapter is
//! the default way to satisfy that against a live target. Redirects are
//! not followed (login responses are frequently 302s the runner must
//! inspect raw) and no cookie store is kept (the strategies thread cookies
//! explicitly).

use std::time::Duration;

use crate::errors::TransportError;
use crate::message::{HttpRequest, HttpResponse, HttpVersion, MessageSender, Method};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sender over a `reqwest::Client`
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| TransportError::Other(err.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an externally configured client (custom timeout, proxy, TLS)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl MessageSender for ReqwestSender {
    async fn send_and_receive(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = reqwest::Url::parse(request.url()).map_err(|_| TransportError::InvalidUrl {
            url: request.url().to_string(),
        })?;

        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let version = match request.version() {
            HttpVersion::Http10 => reqwest::Version::HTTP_10,
            HttpVersion::Http11 => reqwest::Version::HTTP_11,
        };

        let mut builder = self.client.request(method, url).version(version);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(TransportError::from)?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("").to_string(),
                )
            })
            .collect();
        let body = response.text().await.map_err(TransportError::from)?;

        Ok(HttpResponse {
            status_code,
            headers,
            body,
        })
    }
}
