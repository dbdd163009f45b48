// Wire types for the CloudBeaver GraphQL API.

use serde::{Deserialize, Deserializer, Serialize};

/// A team as reported by the `AdminTeamInfo` GraphQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: String,
    pub team_name: String,
    /// `null` on the wire reads as an empty description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ── GraphQL envelope ────────────────────────────────────────────────

/// Request body: `{ "query": ..., "variables": {...} }`.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// Response body: `{ "data": ..., "errors": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

// ── Operation payloads ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct TeamPayload {
    pub team: Team,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamsPayload {
    pub teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletedPayload {
    #[serde(default)]
    pub deleted: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthPayload {
    pub auth_info: AuthInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthInfo {
    pub auth_status: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn null_description_reads_as_empty() {
        let team: Team =
            serde_json::from_str(r#"{"teamId":"infra","teamName":"infra","description":null}"#)
                .unwrap();
        assert_eq!(team.description, "");
    }

    #[test]
    fn missing_description_reads_as_empty() {
        let team: Team = serde_json::from_str(r#"{"teamId":"a","teamName":"b"}"#).unwrap();
        assert_eq!(team.team_id, "a");
        assert_eq!(team.team_name, "b");
        assert_eq!(team.description, "");
    }

    #[test]
    fn errors_default_to_empty() {
        let resp: GraphQlResponse<TeamsPayload> =
            serde_json::from_str(r#"{"data":{"teams":[]}}"#).unwrap();
        assert!(resp.errors.is_empty());
        assert!(resp.data.unwrap().teams.is_empty());
    }
}
