//! Team command handlers.

use std::path::Path;

use tracing::{info, warn};

use cloudbeaver_core::{Action, ApplyResponse, Plan, TeamState, plan_team};

use crate::cli::{DeclareArgs, GlobalOpts, OutputFormat, TeamArgs, TeamCommand};
use crate::error::CliError;
use crate::output;
use crate::state;

use super::util;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: TeamArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TeamCommand::Get { id } => get(&id, global).await,
        TeamCommand::Plan(declare) => plan(&declare, global),
        TeamCommand::Apply(declare) => apply(&declare, global).await,
        TeamCommand::Refresh(args) => refresh(&args.state, global).await,
        TeamCommand::Import { id, state } => import(&id, &state.state, global).await,
        TeamCommand::Destroy(args) => destroy(&args.state, global).await,
    }
}

fn declared(args: &DeclareArgs) -> TeamState {
    TeamState::new(args.id.clone())
        .with_name(args.name.clone())
        .with_description(args.description.clone())
}

fn operation(action: Action) -> &'static str {
    match action {
        Action::NoOp => "apply",
        Action::Create => "create",
        Action::Update => "update",
        Action::Replace => "replace",
        Action::Delete => "delete",
    }
}

fn print_plan(plan: &Plan, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let out = output::render_plan(global.output, plan, color)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Persist whatever the apply left behind, then surface its diagnostics.
fn persist(path: &Path, action: Action, response: ApplyResponse) -> Result<Option<TeamState>, CliError> {
    match &response.state {
        Some(team) => state::save(path, team)?,
        None => state::remove(path)?,
    }
    if response.diagnostics.has_error() {
        return Err(CliError::lifecycle(operation(action), response.diagnostics));
    }
    Ok(response.state)
}

// ── Commands ────────────────────────────────────────────────────────

async fn get(id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::connect(global).await?;
    let team = session
        .team_data_source()
        .read_id(id)
        .await
        .map_err(|d| CliError::lifecycle("read", d))?;

    let out = output::render_team(global.output, &team)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn plan(args: &DeclareArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let prior = state::load(&args.state.state)?;
    let plan = plan_team(prior.as_ref(), Some(&declared(args)));
    print_plan(&plan, global)
}

async fn apply(args: &DeclareArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = &args.state.state;
    let prior = state::load(path)?;
    let plan = plan_team(prior.as_ref(), Some(&declared(args)));

    if plan.is_noop() {
        return print_plan(&plan, global);
    }
    if matches!(global.output, OutputFormat::Table) {
        print_plan(&plan, global)?;
    }

    let session = util::connect(global).await?;
    let response = session.team_resource().apply(&plan).await;
    let team = persist(path, plan.action, response)?;
    info!(action = %plan.action, path = %path.display(), "apply complete");

    if let Some(team) = team {
        let out = output::render_team(global.output, &team)?;
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

async fn refresh(path: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let stored = state::require(path)?;
    let session = util::connect(global).await?;
    let fresh = session
        .team_resource()
        .read(&stored)
        .await
        .map_err(|d| CliError::lifecycle("read", d))?;

    let drift = stored.changes(&fresh);
    for change in &drift {
        warn!(
            team_id = %fresh.id,
            attribute = change.attribute,
            stored = %change.before,
            remote = %change.after,
            "drift detected"
        );
    }
    state::save(path, &fresh)?;

    let out = output::render_refresh(global.output, &fresh, &drift)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn import(id: &str, path: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(existing) = state::load(path)? {
        return Err(CliError::StateExists {
            path: path.display().to_string(),
            id: existing.id.to_string(),
        });
    }

    let session = util::connect(global).await?;
    let resource = session.team_resource();
    let seeded = resource
        .import_state(id)
        .map_err(|d| CliError::lifecycle("import", d))?;
    let team = resource
        .read(&seeded)
        .await
        .map_err(|d| CliError::lifecycle("import", d))?;

    state::save(path, &team)?;
    info!(team_id = id, path = %path.display(), "team imported");

    let out = output::render_team(global.output, &team)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn destroy(path: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let stored = state::require(path)?;
    let plan = plan_team(Some(&stored), None);
    if matches!(global.output, OutputFormat::Table) {
        print_plan(&plan, global)?;
    }

    let session = util::connect(global).await?;
    let response = session.team_resource().apply(&plan).await;
    persist(path, plan.action, response)?;

    if !global.quiet {
        eprintln!("Team destroyed");
    }
    Ok(())
}
