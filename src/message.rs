// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response model and the sender capability.
//!
//! Authentication flows build an immutable [`HttpRequest`] through
//! [`HttpRequestBuilder`], hand it to a [`MessageSender`], and get back an
//! immutable [`HttpResponse`]. The pair forms an [`HttpExchange`], which is
//! what a strategy ultimately returns to the runner for logged-in/logged-out
//! inspection. Nothing is mutated between the build and send steps, so
//! concurrent login attempts never share state.

use crate::errors::TransportError;

/// HTTP methods used by the login flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Protocol version requested from the sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http10,
    Http11,
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpVersion::Http10 => write!(f, "HTTP/1.0"),
            HttpVersion::Http11 => write!(f, "HTTP/1.1"),
        }
    }
}

/// Ordered `application/x-www-form-urlencoded` body
///
/// Field order is preserved on serialization, and values are
/// percent-encoded over the RFC 3986 unreserved set. Cloning a body and
/// pushing another field yields a strict superset of the original encoding,
/// which is how the API strategy's token retry extends its first request.
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field (builder form)
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field in place
    pub fn push(&mut self, name: &str, value: &str) {
        self.fields.push((name.to_string(), value.to_string()));
    }

    /// Field names in order, for trace output that must not carry values
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Serialize to the encoded wire form
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// An immutable outbound request
///
/// Built once via [`HttpRequestBuilder`]; the sender reads it and is never
/// handed anything mutable.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: String,
    version: HttpVersion,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(Method::Post, url)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header with the given name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Builder for [`HttpRequest`]
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: Method,
    url: String,
    version: HttpVersion,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequestBuilder {
    fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            version: HttpVersion::Http11,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn version(mut self, version: HttpVersion) -> Self {
        self.version = version;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the `Cookie` request header
    pub fn cookie(self, value: &str) -> Self {
        self.header("Cookie", value)
    }

    /// Set an encoded form body and its content type
    pub fn form(mut self, body: &FormBody) -> Self {
        self.body = Some(body.encode());
        self.header("Content-Type", "application/x-www-form-urlencoded")
    }

    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// An immutable response as populated by the sender
///
/// Headers are kept as an ordered list rather than a map: repeated
/// `Set-Cookie` headers must all survive, in arrival order, for the
/// first-match cookie scan to be deterministic.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// First header with the given name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Cookies from all `Set-Cookie` headers, in arrival order
    pub fn cookies(&self) -> Vec<SetCookie> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("set-cookie"))
            .filter_map(|(_, value)| SetCookie::parse(value))
            .collect()
    }

    /// Render the status line and headers as text, for scans that cover
    /// the whole response head
    pub fn head_text(&self) -> String {
        let mut text = format!("HTTP {}\r\n", self.status_code);
        for (name, value) in &self.headers {
            text.push_str(name);
            text.push_str(": ");
            text.push_str(value);
            text.push_str("\r\n");
        }
        text
    }
}

/// A cookie announced by a `Set-Cookie` response header
///
/// Only the name/value pair is retained; attributes after the first `;`
/// (Path, Expires, HttpOnly, ...) are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
}

impl SetCookie {
    fn parse(header_value: &str) -> Option<Self> {
        let pair = header_value.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// One completed request/response round trip
///
/// The final exchange of a login flow is the login result: the runner
/// inspects its response against its own logged-in/logged-out rules.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

/// Minimal send capability the authenticators are given
///
/// Implementations own connection handling, TLS, proxying and deadlines.
/// The authenticators only require that a request either produces a
/// response (any status code) or a [`TransportError`].
#[async_trait::async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_and_receive(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
