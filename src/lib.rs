// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Authentication Strategy Library
 * Pluggable login strategies for authenticated scanning
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod errors;
pub mod html;
pub mod message;
pub mod params;
pub mod strategy;

// Login strategies
pub mod form_token;
pub mod token_api;

// Bundled transport adapter
pub mod sender;

pub use errors::{AuthError, AuthResult, TransportError};
pub use form_token::{FormTokenAuthenticator, SessionData};
pub use message::{
    FormBody, HttpExchange, HttpRequest, HttpResponse, HttpVersion, MessageSender, Method,
};
pub use params::{Credentials, ParamValues};
pub use sender::ReqwestSender;
pub use strategy::AuthenticationStrategy;
pub use token_api::TokenApiAuthenticator;
