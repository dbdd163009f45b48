// ── Planner ──
//
// Classifies the transition from a prior record to a declared one before
// any remote call is made. Attributes flagged `requires_replace` in the
// resource schema turn a would-be update into destroy-then-create.

use serde::Serialize;
use strum::Display;

use crate::model::{AttributeChange, TeamState};
use crate::schema::team_resource_schema;
use crate::value::Value;

/// What applying a plan will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    NoOp,
    Create,
    Update,
    /// Delete the prior team, then create the planned one.
    Replace,
    Delete,
}

/// A classified change for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub action: Action,
    pub prior: Option<TeamState>,
    pub planned: Option<TeamState>,
    /// Attribute-level differences between prior and planned.
    pub changes: Vec<AttributeChange>,
    /// Attributes that forced a replacement.
    pub replaced_by: Vec<&'static str>,
}

impl Plan {
    pub fn is_noop(&self) -> bool {
        self.action == Action::NoOp
    }
}

/// Plan the transition from `prior` (persisted state, if any) to `config`
/// (declared state, if any).
pub fn plan_team(prior: Option<&TeamState>, config: Option<&TeamState>) -> Plan {
    match (prior, config) {
        (None, None) => Plan {
            action: Action::NoOp,
            prior: None,
            planned: None,
            changes: Vec::new(),
            replaced_by: Vec::new(),
        },
        (Some(prior), None) => Plan {
            action: Action::Delete,
            prior: Some(prior.clone()),
            planned: None,
            changes: prior.changes(&TeamState::default()),
            replaced_by: Vec::new(),
        },
        (None, Some(config)) => {
            let planned = planned_state(config);
            Plan {
                action: Action::Create,
                prior: None,
                changes: TeamState::default().changes(&planned),
                planned: Some(planned),
                replaced_by: Vec::new(),
            }
        }
        (Some(prior), Some(config)) => plan_existing(prior, config),
    }
}

fn plan_existing(prior: &TeamState, config: &TeamState) -> Plan {
    let replaced_by: Vec<&'static str> = team_resource_schema()
        .replace_attributes()
        .filter(|name| prior.attribute(name) != config.attribute(name))
        .collect();

    if !replaced_by.is_empty() {
        let planned = planned_state(config);
        return Plan {
            action: Action::Replace,
            prior: Some(prior.clone()),
            changes: prior.changes(&planned),
            planned: Some(planned),
            replaced_by,
        };
    }

    let planned = planned_state(config);
    let name_changed = match &config.name {
        // An empty declared name stands for the id.
        Value::Known(_) => {
            prior.name.as_known().map(String::as_str) != Some(config.effective_name())
        }
        Value::Unknown => true,
        // Computed: an undeclared name keeps whatever the server holds.
        Value::Null => false,
    };
    let description_changed = planned.description != prior.description;

    if !name_changed && !description_changed {
        return Plan {
            action: Action::NoOp,
            prior: Some(prior.clone()),
            planned: Some(prior.clone()),
            changes: Vec::new(),
            replaced_by,
        };
    }

    Plan {
        action: Action::Update,
        prior: Some(prior.clone()),
        changes: prior.changes(&planned),
        planned: Some(planned),
        replaced_by,
    }
}

/// Apply schema defaults to a declaration: description Null takes the
/// schema default, an empty name becomes the id and an undeclared name is
/// computed by the server.
fn planned_state(config: &TeamState) -> TeamState {
    let description_default = team_resource_schema()
        .attribute("description")
        .and_then(|a| a.default)
        .map(str::to_owned);

    TeamState {
        id: config.id.clone(),
        name: match &config.name {
            Value::Null => Value::Unknown,
            Value::Known(name) if name.is_empty() && config.id.is_non_empty() => {
                Value::known(config.effective_name())
            }
            other => other.clone(),
        },
        description: config.description.clone().or_if_null(|| description_default),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Team;

    fn stored(id: &str, name: &str, description: &str) -> TeamState {
        TeamState::from_observed(&Team::new(id, name, description))
    }

    #[test]
    fn new_declaration_is_create() {
        let plan = plan_team(None, Some(&TeamState::new("one")));
        assert_eq!(plan.action, Action::Create);

        let planned = plan.planned.unwrap();
        assert!(planned.name.is_unknown());
        assert_eq!(planned.description, Value::known(""));
    }

    #[test]
    fn removed_declaration_is_delete() {
        let prior = stored("one", "one", "");
        let plan = plan_team(Some(&prior), None);
        assert_eq!(plan.action, Action::Delete);
        assert!(plan.planned.is_none());
    }

    #[test]
    fn id_change_is_replace_never_update() {
        let prior = stored("one", "one", "");
        let config = TeamState::new("two").with_description("Some description");
        let plan = plan_team(Some(&prior), Some(&config));

        assert_eq!(plan.action, Action::Replace);
        assert_eq!(plan.replaced_by, vec!["id"]);
        assert_eq!(plan.planned.unwrap().id, Value::known("two"));
    }

    #[test]
    fn unchanged_declaration_is_noop() {
        let prior = stored("one", "one", "");
        let plan = plan_team(Some(&prior), Some(&TeamState::new("one")));
        assert!(plan.is_noop());
        assert_eq!(plan.planned, Some(prior));
    }

    #[test]
    fn declared_name_matching_state_is_noop() {
        let prior = stored("one", "First", "d");
        let config = TeamState::new("one")
            .with_name("First")
            .with_description("d");
        assert!(plan_team(Some(&prior), Some(&config)).is_noop());
    }

    #[test]
    fn description_change_is_update() {
        let prior = stored("one", "one", "");
        let config = TeamState::new("one").with_description("Some description");
        let plan = plan_team(Some(&prior), Some(&config));

        assert_eq!(plan.action, Action::Update);
        assert!(plan.replaced_by.is_empty());
        let attrs: Vec<_> = plan.changes.iter().map(|c| c.attribute).collect();
        assert!(attrs.contains(&"description"));
    }

    #[test]
    fn name_change_is_update() {
        let prior = stored("one", "one", "");
        let config = TeamState::new("one").with_name("two");
        let plan = plan_team(Some(&prior), Some(&config));
        assert_eq!(plan.action, Action::Update);
        assert_eq!(plan.planned.unwrap().name, Value::known("two"));
    }

    #[test]
    fn dropping_description_resets_to_default() {
        let prior = stored("one", "one", "old");
        let plan = plan_team(Some(&prior), Some(&TeamState::new("one")));
        assert_eq!(plan.action, Action::Update);
        assert_eq!(plan.planned.unwrap().description, Value::known(""));
    }

    #[test]
    fn unread_import_plans_an_update() {
        let prior = TeamState::imported("one");
        let plan = plan_team(Some(&prior), Some(&TeamState::new("one")));
        assert_eq!(plan.action, Action::Update);
    }

    #[test]
    fn empty_name_plans_as_id() {
        let plan = plan_team(None, Some(&TeamState::new("infra").with_name("")));
        assert_eq!(plan.planned.unwrap().name, Value::known("infra"));
    }

    #[test]
    fn empty_name_converges_after_apply() {
        let converged = stored("infra", "infra", "");
        let config = TeamState::new("infra").with_name("");
        let plan = plan_team(Some(&converged), Some(&config));
        assert_eq!(plan.action, Action::NoOp);
        assert!(plan.changes.is_empty());
    }

    #[test]
    fn empty_name_renames_back_to_id() {
        let prior = stored("infra", "Custom", "");
        let config = TeamState::new("infra").with_name("");
        let plan = plan_team(Some(&prior), Some(&config));
        assert_eq!(plan.action, Action::Update);
        assert_eq!(plan.planned.unwrap().name, Value::known("infra"));
    }

    #[test]
    fn description_default_comes_from_schema() {
        let default = team_resource_schema()
            .attribute("description")
            .and_then(|a| a.default)
            .unwrap();
        let plan = plan_team(None, Some(&TeamState::new("one")));
        assert_eq!(plan.planned.unwrap().description, Value::known(default));
    }

    #[test]
    fn nothing_to_nothing_is_noop() {
        assert!(plan_team(None, None).is_noop());
    }
}
