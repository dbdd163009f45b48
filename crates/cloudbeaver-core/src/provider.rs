// ── Provider metadata ──

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{Schema, provider_schema, team_data_source_schema, team_resource_schema};

/// Provider identity and the schemas it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudBeaverProvider {
    pub version: String,
}

/// Everything a host needs to render or validate declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchemas {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub version: String,
    pub provider: Schema,
    pub resources: BTreeMap<String, Schema>,
    pub data_sources: BTreeMap<String, Schema>,
}

impl CloudBeaverProvider {
    pub const TYPE_NAME: &'static str = "cloudbeaver";

    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Type name shared by the team resource and data source.
    pub fn team_type_name() -> String {
        format!("{}_team", Self::TYPE_NAME)
    }

    /// `(type name, version)`.
    pub fn metadata(&self) -> (&'static str, &str) {
        (Self::TYPE_NAME, &self.version)
    }

    pub fn schema() -> Schema {
        provider_schema()
    }

    pub fn resources() -> BTreeMap<String, Schema> {
        BTreeMap::from([(Self::team_type_name(), team_resource_schema())])
    }

    pub fn data_sources() -> BTreeMap<String, Schema> {
        BTreeMap::from([(Self::team_type_name(), team_data_source_schema())])
    }

    pub fn schemas(&self) -> ProviderSchemas {
        let (type_name, version) = self.metadata();
        ProviderSchemas {
            type_name,
            version: version.to_owned(),
            provider: Self::schema(),
            resources: Self::resources(),
            data_sources: Self::data_sources(),
        }
    }
}
