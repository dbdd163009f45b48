// ── Connection configuration ──
//
// Fully resolved connection values. Built by the configuration resolver
// and passed to `Session`; core never reads config files or the
// environment itself.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::CoreError;

/// Resolved `{host, username, password}`. Every field is non-empty.
#[derive(Clone)]
pub struct ConnectionContext {
    host: String,
    username: String,
    password: SecretString,
}

impl ConnectionContext {
    /// Build a context, refusing empty values.
    pub fn try_new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, CoreError> {
        let host = host.into();
        let username = username.into();

        let empty: Vec<&str> = [
            ("host", host.is_empty()),
            ("username", username.is_empty()),
            ("password", password.expose_secret().is_empty()),
        ]
        .into_iter()
        .filter_map(|(key, is_empty)| is_empty.then_some(key))
        .collect();

        if !empty.is_empty() {
            return Err(CoreError::Config {
                message: format!("empty connection value(s): {}", empty.join(", ")),
            });
        }

        Ok(Self {
            host,
            username,
            password,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for ConnectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionContext")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Transport tuning passed alongside the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Skip TLS verification (self-signed CloudBeaver deployments).
    pub accept_invalid_certs: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}
