// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Two-phase login against an HTML form protected by a login token.
//!
//! The target application defends against login CSRF with a token that is
//! generated when the login page is viewed, stored in the session, and
//! embedded in a hidden form field. Submitting credentials without first
//! establishing that session/token pair always fails, so the flow is:
//!
//! 1. GET the login page; harvest the `wpLoginToken` input and the session
//!    cookie issued alongside it.
//! 2. POST the credentials with the token in the body and the exact same
//!    session cookie in the `Cookie` header.
//!
//! The minimal sender does not persist cookies between requests, so the
//! cookie is threaded explicitly through [`SessionData`]. A page without
//! the token input, or a response without the session cookie, is not an
//! error: the submission is still sent and fails login the way a
//! misconfigured login URL does on the real site.

use tracing::{debug, info, warn};
use url::Url;

use crate::errors::{AuthError, AuthResult};
use crate::html;
use crate::message::{FormBody, HttpExchange, HttpRequest, HttpVersion, MessageSender};
use crate::params::{Credentials, ParamValues};
use crate::strategy::{AuthenticationStrategy, PARAM_LOGIN_URL, PARAM_SESSION_COOKIE_NAME};

/// Effective cookie name when the optional parameter is absent or empty
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "wiki_session";

/// Hidden input carrying the anti-CSRF login token
const LOGIN_TOKEN_FIELD: &str = "wpLoginToken";

/// Session state harvested from the login page, consumed by the
/// submission phase of the same attempt
///
/// Read-only once built; never persisted past one login attempt.
#[derive(Debug, Clone)]
pub struct SessionData {
    session_cookie: String,
    login_token: Option<String>,
}

impl SessionData {
    /// `name=value; HttpOnly` pair for the `Cookie` request header
    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    /// The harvested login token, if the page carried one
    pub fn login_token(&self) -> Option<&str> {
        self.login_token.as_deref()
    }
}

/// Form-based login strategy with token acquisition
pub struct FormTokenAuthenticator {
    login_url: String,
    session_cookie_name: String,
    credentials: Credentials,
}

impl FormTokenAuthenticator {
    pub const REQUIRED_PARAMS: &'static [&'static str] = &[PARAM_LOGIN_URL];
    pub const OPTIONAL_PARAMS: &'static [&'static str] = &[PARAM_SESSION_COOKIE_NAME];

    /// Build the authenticator, validating configuration before any
    /// network call
    pub fn from_params(params: &ParamValues, credentials: Credentials) -> AuthResult<Self> {
        let login_url = params.required(PARAM_LOGIN_URL)?;
        Url::parse(login_url).map_err(|err| AuthError::InvalidParameter {
            name: PARAM_LOGIN_URL.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            login_url: login_url.to_string(),
            session_cookie_name: params
                .optional_or(PARAM_SESSION_COOKIE_NAME, DEFAULT_SESSION_COOKIE_NAME),
            credentials,
        })
    }

    /// Phase 1: fetch the login page and harvest the token/cookie pair
    pub async fn get_session_data(&self, sender: &dyn MessageSender) -> AuthResult<SessionData> {
        let request = HttpRequest::get(&self.login_url)
            .version(HttpVersion::Http10)
            .build();

        debug!("[FormToken] Sending GET request to {}", self.login_url);
        let response = sender.send_and_receive(&request).await?;
        info!(
            "[FormToken] Received response status code for login page request: {}",
            response.status_code
        );

        let page = format!("{}{}", response.head_text(), response.body);
        let login_token = html::attr_of_first(&page, "input", "name", LOGIN_TOKEN_FIELD, "value");
        if login_token.is_none() {
            warn!(
                "[FormToken] No {} input found on login page, proceeding without a token",
                LOGIN_TOKEN_FIELD
            );
        }

        let cookie_value = match response
            .cookies()
            .into_iter()
            .find(|cookie| cookie.name == self.session_cookie_name)
        {
            Some(cookie) => cookie.value,
            None => {
                warn!(
                    "[FormToken] No {} cookie in login page response, proceeding with an empty value",
                    self.session_cookie_name
                );
                String::new()
            }
        };

        Ok(SessionData {
            session_cookie: format!("{}={}; HttpOnly", self.session_cookie_name, cookie_value),
            login_token,
        })
    }

    /// Phase 2: submit the credentials with the harvested token and cookie
    pub async fn do_login(
        &self,
        sender: &dyn MessageSender,
        session: &SessionData,
    ) -> AuthResult<HttpExchange> {
        let body = FormBody::new()
            .field("wpName", self.credentials.username())
            .field("wpPassword", self.credentials.password())
            .field(LOGIN_TOKEN_FIELD, session.login_token().unwrap_or(""));

        let url = if self.login_url.contains('?') {
            format!("{}&action=submitlogin&type=login", self.login_url)
        } else {
            format!("{}?action=submitlogin&type=login", self.login_url)
        };

        let request = HttpRequest::post(&url)
            .version(HttpVersion::Http10)
            .cookie(session.session_cookie())
            .form(&body)
            .build();

        debug!(
            "[FormToken] Sending POST request to {} ({} byte body, fields: {})",
            url,
            request.body().map(str::len).unwrap_or(0),
            body.field_names().join(", ")
        );
        let response = sender.send_and_receive(&request).await?;
        info!(
            "[FormToken] Received response status code for authentication request: {}",
            response.status_code
        );

        Ok(HttpExchange { request, response })
    }
}

#[async_trait::async_trait]
impl AuthenticationStrategy for FormTokenAuthenticator {
    fn required_params(&self) -> &'static [&'static str] {
        Self::REQUIRED_PARAMS
    }

    fn optional_params(&self) -> &'static [&'static str] {
        Self::OPTIONAL_PARAMS
    }

    async fn authenticate(&self, sender: &dyn MessageSender) -> AuthResult<HttpExchange> {
        info!(
            "[FormToken] Authenticating {} against {}",
            self.credentials.username(),
            self.login_url
        );

        let session = self.get_session_data(sender).await?;
        self.do_login(sender, &session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::testing::{response, MockSender};
    use crate::message::Method;

    const LOGIN_PAGE: &str = r#"
        <form action="/wiki/Special:UserLogin" method="post">
            <input type="text" name="wpName" />
            <input type="password" name="wpPassword" />
            <input type="hidden" name="wpLoginToken" value="d41d8cd98f" />
        </form>
    "#;

    fn authenticator(pairs: &[(&str, &str)]) -> FormTokenAuthenticator {
        let params: ParamValues = pairs.iter().copied().collect();
        FormTokenAuthenticator::from_params(&params, Credentials::new("alice", "p@ss!")).unwrap()
    }

    fn default_authenticator() -> FormTokenAuthenticator {
        authenticator(&[(PARAM_LOGIN_URL, "http://wiki.local/wiki/Special:UserLogin")])
    }

    #[test]
    fn test_missing_login_url_fails_fast() {
        let result = FormTokenAuthenticator::from_params(
            &ParamValues::new(),
            Credentials::new("alice", "p@ss!"),
        );
        assert!(matches!(result, Err(AuthError::MissingParameter(_))));
    }

    #[test]
    fn test_session_cookie_name_defaults() {
        let auth = default_authenticator();
        assert_eq!(auth.session_cookie_name, DEFAULT_SESSION_COOKIE_NAME);

        // An empty override behaves like an absent one
        let auth = authenticator(&[
            (PARAM_LOGIN_URL, "http://wiki.local/wiki/Special:UserLogin"),
            (PARAM_SESSION_COOKIE_NAME, ""),
        ]);
        assert_eq!(auth.session_cookie_name, "wiki_session");

        let auth = authenticator(&[
            (PARAM_LOGIN_URL, "http://wiki.local/wiki/Special:UserLogin"),
            (PARAM_SESSION_COOKIE_NAME, "my_wiki_session"),
        ]);
        assert_eq!(auth.session_cookie_name, "my_wiki_session");
    }

    #[test]
    fn test_declared_params() {
        let auth = default_authenticator();
        assert_eq!(auth.required_params(), &["Login URL"]);
        assert_eq!(auth.optional_params(), &["Session cookie name"]);
        assert_eq!(auth.credential_params(), &["Username", "Password"]);
    }

    #[tokio::test]
    async fn test_get_session_data_harvests_token_and_cookie() {
        let sender = MockSender::new(vec![response(
            200,
            &[
                ("Content-Type", "text/html"),
                ("Set-Cookie", "wiki_session=deadbeef; Path=/; HttpOnly"),
            ],
            LOGIN_PAGE,
        )]);

        let session = default_authenticator()
            .get_session_data(&sender)
            .await
            .unwrap();

        assert_eq!(session.login_token(), Some("d41d8cd98f"));
        assert_eq!(session.session_cookie(), "wiki_session=deadbeef; HttpOnly");

        let requests = sender.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method(), Method::Get);
        assert_eq!(requests[0].body(), None);
        assert_eq!(requests[0].header("Cookie"), None);
    }

    #[tokio::test]
    async fn test_get_session_data_without_token_or_cookie() {
        let sender = MockSender::new(vec![response(200, &[], "<html><body>404</body></html>")]);

        let session = default_authenticator()
            .get_session_data(&sender)
            .await
            .unwrap();

        assert_eq!(session.login_token(), None);
        // The cookie string still names the configured cookie, with an
        // empty value
        assert_eq!(session.session_cookie(), "wiki_session=; HttpOnly");
    }

    #[tokio::test]
    async fn test_authenticate_round_trips_cookie_and_token() {
        let sender = MockSender::new(vec![
            response(
                200,
                &[("Set-Cookie", "wiki_session=deadbeef; HttpOnly")],
                LOGIN_PAGE,
            ),
            response(302, &[("Location", "/wiki/Main_Page")], ""),
        ]);

        let exchange = default_authenticator().authenticate(&sender).await.unwrap();
        assert_eq!(exchange.response.status_code, 302);

        let requests = sender.requests();
        assert_eq!(requests.len(), 2);

        let submission = &requests[1];
        assert_eq!(submission.method(), Method::Post);
        assert_eq!(submission.version(), HttpVersion::Http10);
        assert_eq!(
            submission.url(),
            "http://wiki.local/wiki/Special:UserLogin?action=submitlogin&type=login"
        );
        assert_eq!(
            submission.header("Cookie"),
            Some("wiki_session=deadbeef; HttpOnly")
        );
        assert_eq!(
            submission.body(),
            Some("wpName=alice&wpPassword=p%40ss%21&wpLoginToken=d41d8cd98f")
        );
    }

    #[tokio::test]
    async fn test_query_separator_when_url_has_query() {
        let auth = authenticator(&[(PARAM_LOGIN_URL, "http://wiki.local/login?foo=1")]);
        let sender = MockSender::new(vec![
            response(200, &[], LOGIN_PAGE),
            response(200, &[], ""),
        ]);

        auth.authenticate(&sender).await.unwrap();

        let requests = sender.requests();
        assert_eq!(
            requests[1].url(),
            "http://wiki.local/login?foo=1&action=submitlogin&type=login"
        );
    }

    #[tokio::test]
    async fn test_missing_token_submits_empty_value() {
        let sender = MockSender::new(vec![
            response(200, &[], "<html><body>no form here</body></html>"),
            response(200, &[], ""),
        ]);

        default_authenticator().authenticate(&sender).await.unwrap();

        let requests = sender.requests();
        assert_eq!(
            requests[1].body(),
            Some("wpName=alice&wpPassword=p%40ss%21&wpLoginToken=")
        );
        assert_eq!(
            requests[1].header("Cookie"),
            Some("wiki_session=; HttpOnly")
        );
    }

    #[tokio::test]
    async fn test_custom_cookie_name_is_matched() {
        let auth = authenticator(&[
            (PARAM_LOGIN_URL, "http://wiki.local/wiki/Special:UserLogin"),
            (PARAM_SESSION_COOKIE_NAME, "my_wiki_session"),
        ]);
        let sender = MockSender::new(vec![response(
            200,
            &[
                ("Set-Cookie", "wiki_session=wrong"),
                ("Set-Cookie", "my_wiki_session=cafe"),
            ],
            LOGIN_PAGE,
        )]);

        let session = auth.get_session_data(&sender).await.unwrap();
        assert_eq!(session.session_cookie(), "my_wiki_session=cafe; HttpOnly");
    }

    #[tokio::test]
    async fn test_first_matching_cookie_wins() {
        let sender = MockSender::new(vec![response(
            200,
            &[
                ("Set-Cookie", "wiki_session=first"),
                ("Set-Cookie", "wiki_session=second"),
            ],
            LOGIN_PAGE,
        )]);

        let session = default_authenticator()
            .get_session_data(&sender)
            .await
            .unwrap();
        assert_eq!(session.session_cookie(), "wiki_session=first; HttpOnly");
    }
}
