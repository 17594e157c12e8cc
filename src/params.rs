// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Runner-supplied configuration parameters and login credentials.
//!
//! The scan runner collects parameter values by name (the names each
//! strategy declares) and hands them over as a [`ParamValues`] store.
//! Strategies validate at construction time, so a missing required
//! parameter fails before any network call is made.

use std::collections::HashMap;
use std::fmt;

use crate::errors::{AuthError, AuthResult};
use crate::strategy::{PARAM_PASSWORD, PARAM_USERNAME};

/// String key-value store of named configuration parameters
#[derive(Debug, Clone, Default)]
pub struct ParamValues {
    values: HashMap<String, String>,
}

impl ParamValues {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a parameter value, replacing any previous one
    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Get a parameter value as supplied by the runner
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get a required parameter, failing fast when absent or empty
    pub fn required(&self, name: &str) -> AuthResult<&str> {
        self.get(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AuthError::MissingParameter(name.to_string()))
    }

    /// Get an optional parameter, substituting the declared default when
    /// the value is absent or empty
    pub fn optional_or(&self, name: &str, default: &str) -> String {
        match self.get(name) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ParamValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Username/password pair for one login attempt
///
/// Immutable for the duration of the attempt. The `Debug` representation
/// masks the password so credentials can never leak through trace output
/// or error formatting.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Build credentials from the runner's credential parameters
    /// (`Username`, `Password`), failing fast when either is missing
    pub fn from_params(params: &ParamValues) -> AuthResult<Self> {
        let username = params.required(PARAM_USERNAME)?;
        let password = params.required(PARAM_PASSWORD)?;
        Ok(Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
