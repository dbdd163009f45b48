//! Declarative reconciliation of CloudBeaver teams.
//!
//! Sits between `cloudbeaver-api` and hosts (the CLI, or anything that
//! drives declared state):
//!
//! - **[`Value`]**: tri-state attribute values (Known / Null / Unknown).
//! - **[`TeamClient`]**: the CRUD capability the reconciler depends on,
//!   implemented for [`cloudbeaver_api::CloudBeaverClient`].
//! - **[`plan_team`]**: classifies a declared change as create, update,
//!   replace, delete or no-op before any remote call.
//! - **[`TeamResource`]** / **[`TeamDataSource`]**: lifecycle handler and
//!   read-only lookup, both normalizing through [`TeamState::from_observed`].
//! - **[`Session`]**: resolved [`ConnectionContext`] plus the injected client.
//! - **[`Diagnostics`]**: ordered structured failures returned by every
//!   configuration and lifecycle step.

pub mod client;
pub mod config;
pub mod datasource;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod session;
pub mod value;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::TeamClient;
pub use config::{ConnectOptions, ConnectionContext};
pub use datasource::TeamDataSource;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::CoreError;
pub use model::{AttributeChange, Team, TeamState};
pub use plan::{Action, Plan, plan_team};
pub use provider::{CloudBeaverProvider, ProviderSchemas};
pub use resource::{ApplyResponse, TeamResource};
pub use schema::{Attribute, Schema};
pub use session::Session;
pub use value::Value;
