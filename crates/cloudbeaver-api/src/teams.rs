// Team administration endpoints
//
// CloudBeaver exposes teams through admin-only GraphQL operations:
// createTeam, updateTeam, deleteTeam and listTeams. Each mutation
// answers with the server's view of the team.

use serde_json::json;
use tracing::debug;

use crate::client::CloudBeaverClient;
use crate::error::Error;
use crate::models::{DeletedPayload, Team, TeamPayload, TeamsPayload};

const TEAM_FIELDS: &str = "teamId teamName description";

impl CloudBeaverClient {
    /// Create a team and return it as stored by the server.
    pub async fn create_team(
        &self,
        team_id: &str,
        team_name: &str,
        description: &str,
    ) -> Result<Team, Error> {
        debug!(team_id, "creating team");

        let query = format!(
            "mutation createTeam($teamId: ID!, $teamName: String, $description: String) {{
  team: createTeam(teamId: $teamId, teamName: $teamName, description: $description) {{ {TEAM_FIELDS} }}
}}"
        );
        let variables = json!({
            "teamId": team_id,
            "teamName": team_name,
            "description": description,
        });

        let payload: TeamPayload = self.execute("createTeam", &query, variables).await?;
        Ok(payload.team)
    }

    /// Fetch a single team by identifier.
    ///
    /// Returns [`Error::TeamNotFound`] when the server knows no such team.
    pub async fn get_team(&self, team_id: &str) -> Result<Team, Error> {
        debug!(team_id, "reading team");

        let query = format!(
            "query listTeams($teamId: ID) {{
  teams: listTeams(teamId: $teamId) {{ {TEAM_FIELDS} }}
}}"
        );
        let payload: TeamsPayload = self
            .execute("listTeams", &query, json!({ "teamId": team_id }))
            .await?;

        payload
            .teams
            .into_iter()
            .find(|t| t.team_id == team_id)
            .ok_or_else(|| Error::TeamNotFound {
                team_id: team_id.to_owned(),
            })
    }

    /// List every team visible to the administrator.
    pub async fn list_teams(&self) -> Result<Vec<Team>, Error> {
        let query = format!(
            "query listTeams {{
  teams: listTeams {{ {TEAM_FIELDS} }}
}}"
        );
        let payload: TeamsPayload = self.execute("listTeams", &query, json!({})).await?;
        Ok(payload.teams)
    }

    /// Update name and description of an existing team.
    pub async fn update_team(
        &self,
        team_id: &str,
        team_name: &str,
        description: &str,
    ) -> Result<Team, Error> {
        debug!(team_id, "updating team");

        let query = format!(
            "mutation updateTeam($teamId: ID!, $teamName: String, $description: String) {{
  team: updateTeam(teamId: $teamId, teamName: $teamName, description: $description) {{ {TEAM_FIELDS} }}
}}"
        );
        let variables = json!({
            "teamId": team_id,
            "teamName": team_name,
            "description": description,
        });

        let payload: TeamPayload = self.execute("updateTeam", &query, variables).await?;
        Ok(payload.team)
    }

    /// Delete a team. Teams that still have members are not force-removed.
    pub async fn delete_team(&self, team_id: &str) -> Result<(), Error> {
        debug!(team_id, "deleting team");

        let query = "mutation deleteTeam($teamId: ID!, $force: Boolean) {
  deleted: deleteTeam(teamId: $teamId, force: $force)
}";
        let payload: DeletedPayload = self
            .execute(
                "deleteTeam",
                query,
                json!({ "teamId": team_id, "force": false }),
            )
            .await?;

        match payload.deleted {
            Some(false) => Err(Error::GraphQl {
                operation: "deleteTeam",
                message: format!("server refused to delete team {team_id}"),
            }),
            _ => Ok(()),
        }
    }
}
