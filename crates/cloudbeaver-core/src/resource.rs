// ── Team resource reconciler ──
//
// Create / Read / Update / Delete / Import for one team record. Every
// successful remote call overwrites the whole record from the server's
// view; failures leave the caller's record untouched and come back as
// diagnostics.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::client::TeamClient;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::TeamState;
use crate::plan::{Action, Plan};
use crate::schema::{Schema, team_resource_schema};
use crate::value::Value;

/// Outcome of applying a [`Plan`]: the record to persist (if any) plus
/// whatever went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyResponse {
    pub state: Option<TeamState>,
    pub diagnostics: Diagnostics,
}

impl ApplyResponse {
    fn ok(state: Option<TeamState>) -> Self {
        Self {
            state,
            diagnostics: Diagnostics::new(),
        }
    }

    fn failed(state: Option<TeamState>, diagnostics: Diagnostics) -> Self {
        Self { state, diagnostics }
    }
}

/// Lifecycle handler for the team resource type.
pub struct TeamResource<C> {
    client: Arc<C>,
}

impl<C> Clone for TeamResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: TeamClient> TeamResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Host-visible type name, e.g. `cloudbeaver_team`.
    pub fn type_name(provider: &str) -> String {
        format!("{provider}_team")
    }

    pub fn schema() -> Schema {
        team_resource_schema()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Create the declared team and return its observed state.
    pub async fn create(&self, plan: &TeamState) -> Result<TeamState, Diagnostics> {
        let id = require_id(plan)?;
        let name = plan.effective_name();
        let description = plan.effective_description();
        debug!(team_id = id, team_name = name, "creating team");

        let team = self
            .client
            .create_team(id, name, description)
            .await
            .map_err(|e| Diagnostic::client_call("create", id, &e))?;

        info!(team_id = %team.id, "team created");
        Ok(TeamState::from_observed(&team))
    }

    /// Refresh a stored record from the server.
    pub async fn read(&self, state: &TeamState) -> Result<TeamState, Diagnostics> {
        let id = require_id(state)?;
        debug!(team_id = id, "reading team");

        let team = self
            .client
            .get_team(id)
            .await
            .map_err(|e| Diagnostic::client_call("read", id, &e))?;

        Ok(TeamState::from_observed(&team))
    }

    /// Update name and description in place. The identifier cannot change
    /// here; an id change must go through [`Action::Replace`].
    pub async fn update(
        &self,
        prior: &TeamState,
        plan: &TeamState,
    ) -> Result<TeamState, Diagnostics> {
        let id = require_id(plan)?;
        if prior.id != plan.id {
            return Err(Diagnostic::attribute_error(
                DiagnosticKind::InvalidValue,
                "id",
                "Team Identifier Cannot Change In Place",
                format!(
                    "Team identifier changed from {} to {id:?}; the team must be replaced.",
                    prior.id
                ),
            )
            .into());
        }

        let name = plan.effective_name();
        let description = plan.effective_description();
        debug!(team_id = id, team_name = name, "updating team");

        let team = self
            .client
            .update_team(id, name, description)
            .await
            .map_err(|e| Diagnostic::client_call("update", id, &e))?;

        info!(team_id = %team.id, "team updated");
        Ok(TeamState::from_observed(&team))
    }

    /// Delete the team. On failure the record is still present.
    pub async fn delete(&self, state: &TeamState) -> Result<(), Diagnostics> {
        let id = require_id(state)?;
        debug!(team_id = id, "deleting team");

        self.client
            .delete_team(id)
            .await
            .map_err(|e| Diagnostic::client_call("delete", id, &e))?;

        info!(team_id = id, "team deleted");
        Ok(())
    }

    /// Seed a record for an existing remote team. Only `id` is known until
    /// the next [`read`](Self::read).
    #[allow(clippy::unused_self)]
    pub fn import_state(&self, id: &str) -> Result<TeamState, Diagnostics> {
        if id.is_empty() {
            return Err(Diagnostic::attribute_error(
                DiagnosticKind::InvalidValue,
                "id",
                "Missing Team Identifier",
                "An import requires a non-empty team identifier.",
            )
            .into());
        }
        debug!(team_id = id, "importing team");
        Ok(TeamState::imported(id))
    }

    // ── Plan execution ───────────────────────────────────────────────

    /// Execute a plan. Replacement deletes the prior team before creating
    /// the planned one; Update is never issued across an id change.
    pub async fn apply(&self, plan: &Plan) -> ApplyResponse {
        match plan.action {
            Action::NoOp => ApplyResponse::ok(plan.planned.clone()),
            Action::Create => {
                let Some(planned) = &plan.planned else {
                    return malformed(plan);
                };
                match self.create(planned).await {
                    Ok(state) => ApplyResponse::ok(Some(state)),
                    Err(diags) => ApplyResponse::failed(None, diags),
                }
            }
            Action::Update => {
                let (Some(prior), Some(planned)) = (&plan.prior, &plan.planned) else {
                    return malformed(plan);
                };
                match self.update(prior, planned).await {
                    Ok(state) => ApplyResponse::ok(Some(state)),
                    Err(diags) => ApplyResponse::failed(Some(prior.clone()), diags),
                }
            }
            Action::Delete => {
                let Some(prior) = &plan.prior else {
                    return malformed(plan);
                };
                match self.delete(prior).await {
                    Ok(()) => ApplyResponse::ok(None),
                    Err(diags) => ApplyResponse::failed(Some(prior.clone()), diags),
                }
            }
            Action::Replace => {
                let (Some(prior), Some(planned)) = (&plan.prior, &plan.planned) else {
                    return malformed(plan);
                };
                debug!(
                    from = %prior.id,
                    to = %planned.id,
                    "replacing team"
                );
                if let Err(diags) = self.delete(prior).await {
                    return ApplyResponse::failed(Some(prior.clone()), diags);
                }
                match self.create(planned).await {
                    Ok(state) => ApplyResponse::ok(Some(state)),
                    Err(diags) => ApplyResponse::failed(None, diags),
                }
            }
        }
    }
}

/// The identifier of a record about to be sent to the server.
fn require_id(state: &TeamState) -> Result<&str, Diagnostics> {
    match &state.id {
        Value::Known(id) if !id.is_empty() => Ok(id),
        Value::Unknown => Err(Diagnostic::attribute_error(
            DiagnosticKind::InvalidValue,
            "id",
            "Unknown Team Identifier",
            "The team identifier is not known yet and cannot be sent to CloudBeaver.",
        )
        .into()),
        Value::Known(_) | Value::Null => Err(Diagnostic::attribute_error(
            DiagnosticKind::InvalidValue,
            "id",
            "Missing Team Identifier",
            "The team identifier must be a non-empty string.",
        )
        .into()),
    }
}

fn malformed(plan: &Plan) -> ApplyResponse {
    ApplyResponse::failed(
        plan.prior.clone(),
        Diagnostic::error(
            DiagnosticKind::InvalidValue,
            "Malformed Plan",
            format!("A {} plan is missing the records it needs.", plan.action),
        )
        .into(),
    )
}
