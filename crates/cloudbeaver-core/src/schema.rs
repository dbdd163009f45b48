// ── Schemas ──
//
// Declarative description of the provider configuration, the team
// resource and the team lookup. The planner reads `requires_replace`
// from here, so the replace rule lives in one place.

use std::collections::BTreeMap;

use serde::Serialize;

/// Attribute flags, in the shape hosts expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub description: &'static str,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Changing this attribute forces destroy-then-create.
    pub requires_replace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl Attribute {
    pub fn required(description: &'static str) -> Self {
        Self {
            description,
            required: true,
            ..Self::default()
        }
    }

    pub fn optional(description: &'static str) -> Self {
        Self {
            description,
            optional: true,
            ..Self::default()
        }
    }

    pub fn computed(description: &'static str) -> Self {
        Self {
            description,
            computed: true,
            ..Self::default()
        }
    }

    pub fn optional_computed(description: &'static str) -> Self {
        Self {
            computed: true,
            ..Self::optional(description)
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// A resource, data source or provider configuration schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
    pub fn new(description: &'static str) -> Self {
        Self {
            description,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of attributes whose change forces replacement.
    pub fn replace_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|(_, a)| a.requires_replace)
            .map(|(name, _)| *name)
    }
}

// ── Concrete schemas ─────────────────────────────────────────────────

pub fn provider_schema() -> Schema {
    Schema::new("CloudBeaver provider")
        .with_attribute("host", Attribute::optional("Cloudbeaver's host"))
        .with_attribute(
            "username",
            Attribute::optional("Username of an account with administration privileges"),
        )
        .with_attribute(
            "password",
            Attribute::optional("Password for the account with administration privileges")
                .sensitive(),
        )
}

pub fn team_resource_schema() -> Schema {
    Schema::new("Team resource")
        .with_attribute(
            "id",
            Attribute::required("Team identifier").requires_replace(),
        )
        .with_attribute("name", Attribute::optional_computed("Team name"))
        .with_attribute(
            "description",
            Attribute::optional_computed("Team description").with_default(""),
        )
}

pub fn team_data_source_schema() -> Schema {
    Schema::new("Team data source")
        .with_attribute("id", Attribute::required("Team identifier"))
        .with_attribute("name", Attribute::computed("Team name"))
        .with_attribute("description", Attribute::computed("Team description"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn only_id_forces_replacement() {
        let schema = team_resource_schema();
        assert_eq!(schema.replace_attributes().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn description_defaults_to_empty() {
        let schema = team_resource_schema();
        let description = schema.attribute("description").unwrap();
        assert_eq!(description.default, Some(""));
        assert!(description.optional && description.computed);
    }

    #[test]
    fn password_is_sensitive() {
        let schema = provider_schema();
        assert!(schema.attribute("password").unwrap().sensitive);
        assert!(!schema.attribute("host").unwrap().sensitive);
    }

    #[test]
    fn lookup_keys_on_id() {
        let schema = team_data_source_schema();
        assert!(schema.attribute("id").unwrap().required);
        assert!(schema.attribute("name").unwrap().computed);
    }
}
