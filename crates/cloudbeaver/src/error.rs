//! CLI error types with miette diagnostics.
//!
//! Maps configuration and lifecycle `Diagnostics` into user-facing errors
//! with actionable help text and process exit codes.

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

use cloudbeaver_config::ConfigError;
use cloudbeaver_core::{DiagnosticKind, Diagnostics};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

/// One entry of a diagnostic list, rendered as a related miette report.
#[derive(Debug, Error, Diagnostic)]
#[error("{summary}")]
#[diagnostic(help("{detail}"))]
pub struct Problem {
    summary: String,
    detail: String,
}

fn problems(diagnostics: Diagnostics) -> Vec<Problem> {
    diagnostics
        .into_iter()
        .map(|d| Problem {
            summary: match d.attribute {
                Some(attr) => format!("{} ({attr})", d.summary),
                None => d.summary,
            },
            detail: d.detail,
        })
        .collect()
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Provider configuration is incomplete ({} problem(s))", .problems.len())]
    #[diagnostic(
        code(cloudbeaver::configuration),
        help(
            "Set host, username and password in a --config file, with the\n\
             --host/--username/--password flags, or via CLOUDBEAVER_HOST,\n\
             CLOUDBEAVER_USERNAME and CLOUDBEAVER_PASSWORD."
        )
    )]
    Configuration {
        #[related]
        problems: Vec<Problem>,
    },

    #[error("Could not create the CloudBeaver client")]
    #[diagnostic(
        code(cloudbeaver::client),
        help(
            "Check the host URL and the administrator credentials.\n\
             Use --insecure (-k) for self-signed certificates."
        )
    )]
    ClientConstruction {
        #[related]
        problems: Vec<Problem>,
    },

    #[error("Team {operation} failed")]
    #[diagnostic(code(cloudbeaver::lifecycle))]
    Lifecycle {
        operation: &'static str,
        #[related]
        problems: Vec<Problem>,
    },

    #[error("Invalid input")]
    #[diagnostic(code(cloudbeaver::invalid))]
    InvalidInput {
        #[related]
        problems: Vec<Problem>,
    },

    #[error(transparent)]
    #[diagnostic(code(cloudbeaver::config_file))]
    ConfigFile(#[from] ConfigError),

    // ── State ────────────────────────────────────────────────────────
    #[error("No team is tracked in {path}")]
    #[diagnostic(
        code(cloudbeaver::no_state),
        help("Start tracking one with: cloudbeaver team import <ID> --state {path}")
    )]
    StateNotFound { path: String },

    #[error("{path} already tracks team '{id}'")]
    #[diagnostic(
        code(cloudbeaver::state_exists),
        help("Use a different --state file, or run: cloudbeaver team destroy --state {path}")
    )]
    StateExists { path: String, id: String },

    #[error("Invalid state file {path}")]
    #[diagnostic(code(cloudbeaver::state_file))]
    StateFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(cloudbeaver::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Classify a diagnostic list from a lifecycle operation.
    pub fn lifecycle(operation: &'static str, diagnostics: Diagnostics) -> Self {
        if diagnostics.count(DiagnosticKind::InvalidValue) == diagnostics.len() {
            return Self::InvalidInput {
                problems: problems(diagnostics),
            };
        }
        Self::Lifecycle {
            operation,
            problems: problems(diagnostics),
        }
    }

    pub fn state_file(path: &Path, source: serde_json::Error) -> Self {
        Self::StateFile {
            path: path.display().to_string(),
            source,
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } | Self::InvalidInput { .. } | Self::StateNotFound { .. } => {
                exit_code::USAGE
            }
            Self::ClientConstruction { .. } => exit_code::CONNECTION,
            Self::StateExists { .. } => exit_code::CONFLICT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Diagnostics → CliError mapping ───────────────────────────────────

impl From<Diagnostics> for CliError {
    /// Classify diagnostics from configuration resolution.
    fn from(diagnostics: Diagnostics) -> Self {
        let construction = diagnostics.count(DiagnosticKind::ClientConstruction) > 0;
        let problems = problems(diagnostics);
        if construction {
            Self::ClientConstruction { problems }
        } else {
            Self::Configuration { problems }
        }
    }
}
