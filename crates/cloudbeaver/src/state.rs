//! Local state file holding the last observed team.
//!
//! The file is the CLI's stand-in for a host's persisted state: written
//! after every successful round trip, removed when the team is deleted.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use cloudbeaver_core::{CloudBeaverProvider, TeamState};

use crate::error::CliError;

#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    #[serde(rename = "type")]
    type_name: String,
    team: TeamState,
}

/// Read the tracked team, or `None` when the file does not exist.
pub fn load(path: &Path) -> Result<Option<TeamState>, CliError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let doc: StateDocument =
        serde_json::from_str(&contents).map_err(|e| CliError::state_file(path, e))?;
    debug!(path = %path.display(), "loaded state");
    Ok(Some(doc.team))
}

/// Read the tracked team, failing when there is none.
pub fn require(path: &Path) -> Result<TeamState, CliError> {
    load(path)?.ok_or_else(|| CliError::StateNotFound {
        path: path.display().to_string(),
    })
}

pub fn save(path: &Path, team: &TeamState) -> Result<(), CliError> {
    let doc = StateDocument {
        type_name: CloudBeaverProvider::team_type_name(),
        team: team.clone(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json + "\n")?;
    debug!(path = %path.display(), "saved state");
    Ok(())
}

pub fn remove(path: &Path) -> Result<(), CliError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed state");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
