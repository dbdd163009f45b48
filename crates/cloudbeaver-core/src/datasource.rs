// ── Team data source ──
//
// Read-only lookup by id. No write path, no caching; the observed team is
// normalized exactly as the resource's Read does it.

use std::sync::Arc;

use tracing::debug;

use crate::client::TeamClient;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::TeamState;
use crate::schema::{Schema, team_data_source_schema};

pub struct TeamDataSource<C> {
    client: Arc<C>,
}

impl<C> Clone for TeamDataSource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: TeamClient> TeamDataSource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn type_name(provider: &str) -> String {
        format!("{provider}_team")
    }

    pub fn schema() -> Schema {
        team_data_source_schema()
    }

    /// Look up the team named by `query.id`.
    pub async fn read(&self, query: &TeamState) -> Result<TeamState, Diagnostics> {
        match query.id.as_known() {
            Some(id) => self.read_id(id).await,
            None => Err(Diagnostic::attribute_error(
                DiagnosticKind::InvalidValue,
                "id",
                "Missing Team Identifier",
                "A team lookup requires a known team identifier.",
            )
            .into()),
        }
    }

    pub async fn read_id(&self, id: &str) -> Result<TeamState, Diagnostics> {
        if id.is_empty() {
            return Err(Diagnostic::attribute_error(
                DiagnosticKind::InvalidValue,
                "id",
                "Missing Team Identifier",
                "A team lookup requires a non-empty team identifier.",
            )
            .into());
        }
        debug!(team_id = id, "looking up team");

        let team = self
            .client
            .get_team(id)
            .await
            .map_err(|e| Diagnostic::client_call("read", id, &e))?;

        Ok(TeamState::from_observed(&team))
    }
}
