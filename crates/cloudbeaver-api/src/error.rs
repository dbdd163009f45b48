use thiserror::Error;

/// Top-level error type for the `cloudbeaver-api` crate.
///
/// Covers authentication, transport, the GraphQL envelope and payload
/// decoding. `cloudbeaver-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed or the session is no longer accepted.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The host URL uses a scheme other than `http` or `https`.
    #[error("Unsupported URL scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },

    /// TLS or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status outside the GraphQL envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── GraphQL ─────────────────────────────────────────────────────
    /// The server answered with a non-empty `errors` array.
    #[error("GraphQL error in {operation}: {message}")]
    GraphQl {
        operation: &'static str,
        message: String,
    },

    /// The server answered without a `data` payload and without errors.
    #[error("Response to {operation} carried no data")]
    MissingData { operation: &'static str },

    /// Lookup returned no team with the requested identifier.
    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_team() {
        let err = Error::TeamNotFound {
            team_id: "infra".into(),
        };
        assert_eq!(err.to_string(), "Team not found: infra");
    }

    #[test]
    fn graphql_error_names_the_operation() {
        let err = Error::GraphQl {
            operation: "deleteTeam",
            message: "Team has members".into(),
        };
        assert_eq!(err.to_string(), "GraphQL error in deleteTeam: Team has members");
    }
}
