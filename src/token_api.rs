// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token-based login against a JSON API endpoint.
//!
//! Some applications refuse plain form logins because the form embeds a
//! session-bound anti-CSRF token, but expose an API login action instead.
//! The API may answer the first credential POST with `NeedToken` and a
//! token to echo back; the strategy then repeats the POST with the token
//! appended. Any other result ends the flow after a single request.

use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::{AuthError, AuthResult};
use crate::message::{FormBody, HttpExchange, HttpRequest, HttpVersion, MessageSender};
use crate::params::{Credentials, ParamValues};
use crate::strategy::{AuthenticationStrategy, PARAM_API_URL};

const NEED_TOKEN: &str = "NeedToken";

/// `{"login": {"result": ..., "token": ...}}`
#[derive(Debug, Deserialize)]
struct LoginApiResponse {
    login: LoginStatus,
}

#[derive(Debug, Deserialize)]
struct LoginStatus {
    result: String,
    #[serde(default)]
    token: Option<String>,
}

/// One- or two-step API login strategy
pub struct TokenApiAuthenticator {
    api_url: String,
    credentials: Credentials,
}

impl TokenApiAuthenticator {
    pub const REQUIRED_PARAMS: &'static [&'static str] = &[PARAM_API_URL];
    pub const OPTIONAL_PARAMS: &'static [&'static str] = &[];

    /// Build the authenticator, validating configuration before any
    /// network call
    pub fn from_params(params: &ParamValues, credentials: Credentials) -> AuthResult<Self> {
        let api_url = params.required(PARAM_API_URL)?;
        Url::parse(api_url).map_err(|err| AuthError::InvalidParameter {
            name: PARAM_API_URL.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            api_url: api_url.to_string(),
            credentials,
        })
    }

    async fn post_login(
        &self,
        sender: &dyn MessageSender,
        body: &FormBody,
    ) -> AuthResult<HttpExchange> {
        let url = format!("{}?action=login&format=json", self.api_url);
        let request = HttpRequest::post(&url)
            .version(HttpVersion::Http10)
            .form(body)
            .build();

        debug!(
            "[TokenApi] Sending POST request to {} ({} byte body, fields: {})",
            url,
            request.body().map(str::len).unwrap_or(0),
            body.field_names().join(", ")
        );
        let response = sender.send_and_receive(&request).await?;
        info!(
            "[TokenApi] Received response status code for authentication request: {}",
            response.status_code
        );

        Ok(HttpExchange { request, response })
    }

    fn parse_login(&self, exchange: &HttpExchange) -> AuthResult<LoginApiResponse> {
        serde_json::from_str(&exchange.response.body).map_err(|err| AuthError::MalformedResponse {
            url: exchange.request.url().to_string(),
            reason: err.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl AuthenticationStrategy for TokenApiAuthenticator {
    fn required_params(&self) -> &'static [&'static str] {
        Self::REQUIRED_PARAMS
    }

    fn optional_params(&self) -> &'static [&'static str] {
        Self::OPTIONAL_PARAMS
    }

    async fn authenticate(&self, sender: &dyn MessageSender) -> AuthResult<HttpExchange> {
        info!(
            "[TokenApi] Authenticating {} against {}",
            self.credentials.username(),
            self.api_url
        );

        let mut body = FormBody::new()
            .field("lgname", self.credentials.username())
            .field("lgpassword", self.credentials.password());

        let exchange = self.post_login(sender, &body).await?;
        let parsed = self.parse_login(&exchange)?;

        if parsed.login.result != NEED_TOKEN {
            debug!("[TokenApi] Login result: {}", parsed.login.result);
            return Ok(exchange);
        }

        let token = match parsed.login.token {
            Some(token) => token,
            None => {
                warn!("[TokenApi] NeedToken response carried no login token");
                String::new()
            }
        };
        body.push("lgtoken", &token);

        self.post_login(sender, &body).await
    }
}
