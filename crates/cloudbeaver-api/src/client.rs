// CloudBeaver GraphQL HTTP client
//
// Wraps `reqwest::Client` with endpoint normalization, session login and
// `{ data, errors }` envelope unwrapping. Team operations live in
// `teams.rs` as inherent methods so this module stays focused on
// transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{AuthPayload, GraphQlRequest, GraphQlResponse};
use crate::transport::TransportConfig;

const GRAPHQL_PATH: &str = "/api/gql";
const LOCAL_AUTH_PROVIDER: &str = "local";

const AUTH_LOGIN: &str = "\
query authLogin($provider: ID!, $credentials: Object) {
  authInfo: authLogin(provider: $provider, credentials: $credentials) { authStatus }
}";

/// Raw HTTP client for a CloudBeaver server.
///
/// Holds the administrator credentials so the session can be (re)opened
/// with [`login`](Self::login). All requests go to the single GraphQL
/// endpoint; the session cookie lives in the client's jar.
pub struct CloudBeaverClient {
    http: reqwest::Client,
    endpoint: Url,
    username: String,
    password: SecretString,
}

impl CloudBeaverClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// A cookie jar is added if the config doesn't already carry one.
    /// `host` is the server root, e.g. `https://cloudbeaver.example.com`.
    pub fn new(
        host: &str,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Self::with_client(http, host, username, password)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        host: &str,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            endpoint: Self::normalize_endpoint(host)?,
            username: username.into(),
            password,
        })
    }

    /// The GraphQL endpoint every request is sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The administrator account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Build `{host}/api/gql`, keeping any path prefix the host carries.
    fn normalize_endpoint(host: &str) -> Result<Url, Error> {
        let mut url = Url::parse(host)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme {
                scheme: url.scheme().to_owned(),
            });
        }

        let path = url.path().trim_end_matches('/').to_owned();
        if !path.ends_with(GRAPHQL_PATH) {
            url.set_path(&format!("{path}{GRAPHQL_PATH}"));
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(url)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Open an administrator session with the local auth provider.
    ///
    /// The session cookie set by the server is kept in the client's jar
    /// and sent with every later request.
    pub async fn login(&self) -> Result<(), Error> {
        debug!(user = %self.username, "logging in at {}", self.endpoint);

        let variables = json!({
            "provider": LOCAL_AUTH_PROVIDER,
            "credentials": {
                "user": self.username,
                "password": self.password.expose_secret(),
            },
        });

        let payload: AuthPayload = self
            .execute("authLogin", AUTH_LOGIN, variables)
            .await
            .map_err(|e| match e {
                Error::GraphQl { message, .. } => Error::Authentication { message },
                other => other,
            })?;

        if payload.auth_info.auth_status != "SUCCESS" {
            return Err(Error::Authentication {
                message: format!("login status {}", payload.auth_info.auth_status),
            });
        }

        debug!("login successful");
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one GraphQL operation and unwrap the response envelope.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, Error> {
        debug!(operation, "POST {}", self.endpoint);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("{operation} rejected: session expired or invalid credentials"),
            });
        }

        let body = resp.text().await?;

        if !status.is_success() {
            // CloudBeaver reports some failures as a GraphQL body with a 5xx status.
            if let Ok(envelope) = serde_json::from_str::<GraphQlResponse<serde_json::Value>>(&body)
            {
                if let Some(message) = join_errors(&envelope) {
                    return Err(Error::GraphQl { operation, message });
                }
            }
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if let Some(message) = join_errors(&envelope) {
            return Err(Error::GraphQl { operation, message });
        }

        envelope.data.ok_or(Error::MissingData { operation })
    }
}

fn join_errors<T>(envelope: &GraphQlResponse<T>) -> Option<String> {
    if envelope.errors.is_empty() {
        return None;
    }
    Some(
        envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn endpoint_appends_graphql_path() {
        let url = CloudBeaverClient::normalize_endpoint("http://localhost:8978").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8978/api/gql");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let url = CloudBeaverClient::normalize_endpoint("https://example.com/cb/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/cb/api/gql");
    }

    #[test]
    fn endpoint_is_idempotent() {
        let url = CloudBeaverClient::normalize_endpoint("https://example.com/api/gql").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/gql");
    }

    #[test]
    fn endpoint_rejects_non_http_scheme() {
        let err = CloudBeaverClient::normalize_endpoint("ftp://example.com").unwrap_err();
        assert!(matches!(err, Error::UnsupportedScheme { ref scheme } if scheme == "ftp"));
    }

    #[test]
    fn endpoint_rejects_garbage() {
        let err = CloudBeaverClient::normalize_endpoint("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
