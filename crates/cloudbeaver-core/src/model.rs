// ── Team models ──
//
// `Team` is what the server reports: always fully known. `TeamState` is
// the declared / persisted record, whose attributes stay tri-state until
// a remote round trip resolves them.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Observed team, as returned by every successful capability call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

impl From<cloudbeaver_api::Team> for Team {
    fn from(t: cloudbeaver_api::Team) -> Self {
        Self {
            id: t.team_id,
            name: t.team_name,
            description: t.description,
        }
    }
}

/// Declared or persisted team record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    #[serde(default)]
    pub id: Value<String>,
    #[serde(default)]
    pub name: Value<String>,
    #[serde(default)]
    pub description: Value<String>,
}

/// One attribute whose value differs between two records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChange {
    pub attribute: &'static str,
    pub before: String,
    pub after: String,
}

impl TeamState {
    /// A declaration carrying only the identifier; name and description Null.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Value::known(id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<Value<String>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<Value<String>>) -> Self {
        self.description = description.into();
        self
    }

    /// Seed for adopting an existing remote team: only `id` is known.
    pub fn imported(id: impl Into<String>) -> Self {
        Self {
            id: Value::known(id.into()),
            name: Value::Unknown,
            description: Value::Unknown,
        }
    }

    /// Authoritative overwrite from the server's view of the team.
    pub fn from_observed(team: &Team) -> Self {
        Self {
            id: Value::known(team.id.clone()),
            name: Value::known(team.name.clone()),
            description: Value::known(team.description.clone()),
        }
    }

    /// Name sent to the server: the declared name, or `id` when it is
    /// empty, Null or Unknown.
    pub fn effective_name(&self) -> &str {
        if self.name.is_non_empty() {
            self.name.value_str()
        } else {
            self.id.value_str()
        }
    }

    /// Description sent to the server: `""` unless a value is declared.
    pub fn effective_description(&self) -> &str {
        self.description.value_str()
    }

    /// Attribute value by schema name.
    pub fn attribute(&self, name: &str) -> Option<&Value<String>> {
        match name {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    pub fn is_fully_known(&self) -> bool {
        self.id.is_known() && self.name.is_known() && self.description.is_known()
    }

    /// Attributes whose values differ from `other`, in schema order.
    pub fn changes(&self, other: &Self) -> Vec<AttributeChange> {
        [
            ("id", &self.id, &other.id),
            ("name", &self.name, &other.name),
            ("description", &self.description, &other.description),
        ]
        .into_iter()
        .filter(|(_, before, after)| before != after)
        .map(|(attribute, before, after)| AttributeChange {
            attribute,
            before: before.to_string(),
            after: after.to_string(),
        })
        .collect()
    }
}
