//! Provider configuration for CloudBeaver tools.
//!
//! Declared `{host, username, password}` values (from a TOML file, CLI
//! flags, or a host), a one-time snapshot of the `CLOUDBEAVER_*`
//! environment, and resolution of both into a `ConnectionContext` and a
//! connected `Session`. Validation collects every problem before giving up.

use std::fmt;
use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use cloudbeaver_api::CloudBeaverClient;
use cloudbeaver_core::{
    ConnectOptions, ConnectionContext, Diagnostic, DiagnosticKind, Diagnostics, Session, Value,
};

pub const HOST_ENV: &str = "CLOUDBEAVER_HOST";
pub const USERNAME_ENV: &str = "CLOUDBEAVER_USERNAME";
pub const PASSWORD_ENV: &str = "CLOUDBEAVER_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Declared configuration ──────────────────────────────────────────

/// Declared provider configuration. Absent keys are Null.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub host: Value<String>,
    pub username: Value<String>,
    pub password: Value<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = match &self.password {
            Value::Known(_) => "[REDACTED]",
            Value::Null => "Null",
            Value::Unknown => "Unknown",
        };
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

impl ProviderConfig {
    /// Overlay explicitly given values (e.g. CLI flags) as Known.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = Value::Known(host);
        }
        if let Some(username) = username {
            self.username = Value::Known(username);
        }
        if let Some(password) = password {
            self.password = Value::Known(password);
        }
        self
    }
}

/// Load declared configuration from a TOML file. A missing file yields
/// an all-Null configuration.
pub fn load_provider_config(path: &Path) -> Result<ProviderConfig, ConfigError> {
    debug!(path = %path.display(), "loading provider config");

    let config: ProviderConfig = Figment::new()
        .merge(Serialized::defaults(ProviderConfig::default()))
        .merge(Toml::file(path))
        .extract()?;
    Ok(config)
}

// ── Environment snapshot ────────────────────────────────────────────

/// The three `CLOUDBEAVER_*` variables, read once.
#[derive(Clone, Default)]
pub struct EnvSnapshot {
    host: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
}

impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSnapshot")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl EnvSnapshot {
    /// Read the process environment.
    pub fn capture() -> Self {
        Self {
            host: std::env::var(HOST_ENV).ok(),
            username: std::env::var(USERNAME_ENV).ok(),
            password: std::env::var(PASSWORD_ENV).ok().map(SecretString::from),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }
}

// ── Resolution ──────────────────────────────────────────────────────

struct Field {
    key: &'static str,
    label: &'static str,
    env: &'static str,
}

const HOST: Field = Field {
    key: "host",
    label: "Host",
    env: HOST_ENV,
};
const USERNAME: Field = Field {
    key: "username",
    label: "Username",
    env: USERNAME_ENV,
};
const PASSWORD: Field = Field {
    key: "password",
    label: "Password",
    env: PASSWORD_ENV,
};

fn unknown_diagnostic(field: &Field) -> Diagnostic {
    Diagnostic::attribute_error(
        DiagnosticKind::UnresolvedConfiguration,
        field.key,
        format!("Unknown CloudBeaver {}", field.label),
        format!(
            "The provider cannot create the CloudBeaver client as there is an unknown \
             configuration value for the CloudBeaver {key}. Either target apply the source \
             of the value first, set the value statically in the configuration, or use the \
             {env} environment variable.",
            key = field.key,
            env = field.env,
        ),
    )
}

fn missing_diagnostic(field: &Field) -> Diagnostic {
    Diagnostic::attribute_error(
        DiagnosticKind::MissingConfiguration,
        field.key,
        format!("Missing CloudBeaver {}", field.label),
        format!(
            "The provider cannot create the CloudBeaver client as there is a missing or empty \
             value for the CloudBeaver {key}. Set the {key} value in the configuration or use \
             the {env} environment variable. If either is already set, ensure the value is \
             not empty.",
            key = field.key,
            env = field.env,
        ),
    )
}

fn construction_diagnostic(err: &impl fmt::Display) -> Diagnostic {
    Diagnostic::error(
        DiagnosticKind::ClientConstruction,
        "Unable to Create CloudBeaver Client",
        format!(
            "An unexpected error occurred when creating the CloudBeaver client. \
             If the error is not clear, please contact the provider developers.\n\n\
             CloudBeaver Client Error: {err}"
        ),
    )
}

/// Declared value if Known, else the environment value, else `""`.
fn resolve(declared: &Value<String>, env: Option<&str>) -> String {
    declared
        .clone()
        .or_if_null(|| env.map(str::to_owned))
        .into_known()
        .unwrap_or_default()
}

/// Resolve declared values against the environment snapshot.
///
/// Unknown values are reported first, one diagnostic each, and stop
/// resolution. Otherwise every field that resolves to `""` is reported.
pub fn resolve_connection(
    config: &ProviderConfig,
    env: &EnvSnapshot,
) -> Result<ConnectionContext, Diagnostics> {
    let mut diags = Diagnostics::new();
    for (field, value) in [
        (&HOST, &config.host),
        (&USERNAME, &config.username),
        (&PASSWORD, &config.password),
    ] {
        if value.is_unknown() {
            diags.push(unknown_diagnostic(field));
        }
    }
    if diags.has_error() {
        return Err(diags);
    }

    let host = resolve(&config.host, env.host.as_deref());
    let username = resolve(&config.username, env.username.as_deref());
    let password = resolve(
        &config.password,
        env.password.as_ref().map(secrecy::ExposeSecret::expose_secret),
    );

    for (field, value) in [(&HOST, &host), (&USERNAME, &username), (&PASSWORD, &password)] {
        if value.is_empty() {
            diags.push(missing_diagnostic(field));
        }
    }
    if diags.has_error() {
        return Err(diags);
    }

    ConnectionContext::try_new(host, username, SecretString::from(password))
        .map_err(|e| construction_diagnostic(&e).into())
}

/// Resolve configuration, build the client and open a session.
pub async fn configure(
    config: &ProviderConfig,
    env: &EnvSnapshot,
    options: &ConnectOptions,
) -> Result<Session<CloudBeaverClient>, Diagnostics> {
    let context = resolve_connection(config, env)?;
    Session::connect(context, options)
        .await
        .map_err(|e| construction_diagnostic(&e).into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn declared(host: &str, username: &str, password: &str) -> ProviderConfig {
        ProviderConfig {
            host: Value::known(host),
            username: Value::known(username),
            password: Value::known(password),
        }
    }

    fn keys(diags: &Diagnostics) -> Vec<&str> {
        diags.iter().filter_map(|d| d.attribute.as_deref()).collect()
    }

    #[test]
    fn declared_values_resolve() {
        let ctx = resolve_connection(
            &declared("http://cb:8978", "admin", "pw"),
            &EnvSnapshot::empty(),
        )
        .unwrap();
        assert_eq!(ctx.host(), "http://cb:8978");
        assert_eq!(ctx.username(), "admin");
        assert_eq!(ctx.password().expose_secret(), "pw");
    }

    #[test]
    fn env_fills_null_fields() {
        let env = EnvSnapshot::empty()
            .with_host("http://env:8978")
            .with_username("env-user")
            .with_password("env-pw");
        let config = ProviderConfig {
            username: Value::known("decl-user"),
            ..ProviderConfig::default()
        };

        let ctx = resolve_connection(&config, &env).unwrap();
        assert_eq!(ctx.host(), "http://env:8978");
        assert_eq!(ctx.username(), "decl-user");
        assert_eq!(ctx.password().expose_secret(), "env-pw");
    }

    #[test]
    fn env_does_not_replace_declared_empty() {
        let env = EnvSnapshot::empty().with_host("http://env:8978");
        let diags = resolve_connection(&declared("", "admin", "pw"), &env).unwrap_err();
        assert_eq!(keys(&diags), vec!["host"]);
        assert_eq!(diags.count(DiagnosticKind::MissingConfiguration), 1);
    }

    #[test]
    fn each_unknown_field_is_reported() {
        let config = ProviderConfig {
            host: Value::Unknown,
            username: Value::known("admin"),
            password: Value::Unknown,
        };
        let env = EnvSnapshot::empty()
            .with_host("http://env:8978")
            .with_password("pw");

        let diags = resolve_connection(&config, &env).unwrap_err();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.count(DiagnosticKind::UnresolvedConfiguration), 2);
        assert_eq!(keys(&diags), vec!["host", "password"]);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let diags =
            resolve_connection(&ProviderConfig::default(), &EnvSnapshot::empty()).unwrap_err();
        assert_eq!(diags.count(DiagnosticKind::MissingConfiguration), 3);
        assert_eq!(keys(&diags), vec!["host", "username", "password"]);

        let first = diags.iter().next().unwrap();
        assert_eq!(first.summary, "Missing CloudBeaver Host");
        assert!(first.detail.contains("CLOUDBEAVER_HOST"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = declared("http://file", "file-user", "file-pw").with_overrides(
            Some("http://flag".into()),
            None,
            None,
        );
        assert_eq!(config.host, Value::known("http://flag"));
        assert_eq!(config.username, Value::known("file-user"));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", declared("h", "u", "hunter2"));
        assert!(!rendered.contains("hunter2"));

        let env = EnvSnapshot::empty().with_password("hunter2");
        assert!(!format!("{env:?}").contains("hunter2"));
    }
}
