// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The contract every login strategy implements.
//!
//! The scan runner collects values for the names a strategy declares,
//! constructs the strategy with those values, then calls
//! [`AuthenticationStrategy::authenticate`] with a sender capability. The
//! returned exchange carries the raw final response; deciding whether the
//! login actually succeeded is the runner's job.

use crate::errors::AuthResult;
use crate::message::{HttpExchange, MessageSender};

/// Parameter name for the API strategy's endpoint (path to the API script)
pub const PARAM_API_URL: &str = "API URL";

/// Parameter name for the form strategy's login page URL
pub const PARAM_LOGIN_URL: &str = "Login URL";

/// Parameter name for the form strategy's session cookie override
pub const PARAM_SESSION_COOKIE_NAME: &str = "Session cookie name";

pub const PARAM_USERNAME: &str = "Username";
pub const PARAM_PASSWORD: &str = "Password";

/// Credential parameter names, identical for every strategy
pub const CREDENTIAL_PARAMS: &[&str] = &[PARAM_USERNAME, PARAM_PASSWORD];

/// A pluggable login strategy
///
/// Implementations are constructed once per login attempt with their
/// configuration and credentials injected, and hold no mutable state, so a
/// runner may drive independent attempts concurrently with separate
/// instances (or sequentially with one).
#[async_trait::async_trait]
pub trait AuthenticationStrategy: Send + Sync {
    /// Parameter names the runner must collect before instantiation
    fn required_params(&self) -> &'static [&'static str];

    /// Parameter names with implementer-supplied defaults
    fn optional_params(&self) -> &'static [&'static str] {
        &[]
    }

    /// Credential parameter names
    fn credential_params(&self) -> &'static [&'static str] {
        CREDENTIAL_PARAMS
    }

    /// Run the full login flow and return the final exchange
    ///
    /// HTTP-level failures (4xx/5xx, rejected credentials) come back as the
    /// exchange itself; only configuration and transport problems are
    /// errors.
    async fn authenticate(&self, sender: &dyn MessageSender) -> AuthResult<HttpExchange>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_params() {
        assert_eq!(CREDENTIAL_PARAMS, &["Username", "Password"]);
    }
}
