//! Output formatting: table and JSON.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! JSON uses serde. Plans render as a terraform-style change list.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use cloudbeaver_core::{Action, AttributeChange, Plan, ProviderSchemas, Schema, TeamState};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn action_marker(action: Action, color: bool) -> String {
    let marker = match action {
        Action::NoOp => " ",
        Action::Create => "+",
        Action::Update => "~",
        Action::Replace => "-/+",
        Action::Delete => "-",
    };
    if !color {
        return marker.to_owned();
    }
    match action {
        Action::Create => marker.green().to_string(),
        Action::Update => marker.yellow().to_string(),
        Action::Replace | Action::Delete => marker.red().to_string(),
        Action::NoOp => marker.to_owned(),
    }
}

// ── Teams ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&TeamState> for TeamRow {
    fn from(t: &TeamState) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name.to_string(),
            description: t.description.value_str().to_owned(),
        }
    }
}

pub fn render_team(format: OutputFormat, team: &TeamState) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_table(&[TeamRow::from(team)])),
        OutputFormat::Json => render_json(team),
    }
}

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "Attribute")]
    attribute: &'static str,
    #[tabled(rename = "Stored")]
    before: String,
    #[tabled(rename = "Remote")]
    after: String,
}

#[derive(Serialize)]
struct RefreshView<'a> {
    team: &'a TeamState,
    drift: &'a [AttributeChange],
}

/// Refreshed state plus whatever drifted since it was last saved.
pub fn render_refresh(
    format: OutputFormat,
    team: &TeamState,
    drift: &[AttributeChange],
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => render_json(&RefreshView { team, drift }),
        OutputFormat::Table => {
            let mut out = render_table(&[TeamRow::from(team)]);
            if drift.is_empty() {
                out.push_str("\nNo drift detected.");
            } else {
                let rows: Vec<ChangeRow> = drift
                    .iter()
                    .map(|c| ChangeRow {
                        attribute: c.attribute,
                        before: c.before.clone(),
                        after: c.after.clone(),
                    })
                    .collect();
                out.push_str("\nDrift:\n");
                out.push_str(&render_table(&rows));
            }
            Ok(out)
        }
    }
}

// ── Plans ────────────────────────────────────────────────────────────

/// Serializable plan summary. Planned values that are not known yet
/// render as `(known after apply)`.
#[derive(Serialize)]
struct PlanView<'a> {
    action: Action,
    team_id: String,
    changes: &'a [AttributeChange],
    replaced_by: &'a [&'static str],
}

fn plan_team_id(plan: &Plan) -> String {
    plan.planned
        .as_ref()
        .or(plan.prior.as_ref())
        .map(|t| t.id.to_string())
        .unwrap_or_default()
}

pub fn render_plan(format: OutputFormat, plan: &Plan, color: bool) -> Result<String, CliError> {
    let team_id = plan_team_id(plan);
    match format {
        OutputFormat::Json => render_json(&PlanView {
            action: plan.action,
            team_id,
            changes: &plan.changes,
            replaced_by: &plan.replaced_by,
        }),
        OutputFormat::Table => {
            if plan.is_noop() {
                return Ok("No changes. The team matches the declaration.".into());
            }
            let verb = match plan.action {
                Action::Create => "will be created",
                Action::Update => "will be updated in place",
                Action::Replace => "must be replaced",
                Action::Delete => "will be destroyed",
                Action::NoOp => "is unchanged",
            };
            let mut lines = vec![format!(
                "{} cloudbeaver_team \"{team_id}\" {verb}",
                action_marker(plan.action, color)
            )];
            for change in &plan.changes {
                let forces = if plan.replaced_by.contains(&change.attribute) {
                    " (forces replacement)"
                } else {
                    ""
                };
                lines.push(format!(
                    "    {}: {:?} -> {:?}{forces}",
                    change.attribute, change.before, change.after
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

// ── Schemas ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Type")]
    owner: String,
    #[tabled(rename = "Attribute")]
    name: &'static str,
    #[tabled(rename = "Flags")]
    flags: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

fn attribute_rows(owner: &str, schema: &Schema) -> Vec<AttributeRow> {
    schema
        .attributes
        .iter()
        .map(|(name, a)| {
            let flags: Vec<&str> = [
                (a.required, "required"),
                (a.optional, "optional"),
                (a.computed, "computed"),
                (a.sensitive, "sensitive"),
                (a.requires_replace, "forces replacement"),
            ]
            .into_iter()
            .filter_map(|(set, flag)| set.then_some(flag))
            .collect();
            AttributeRow {
                owner: owner.to_owned(),
                name,
                flags: flags.join(", "),
                description: a.description,
            }
        })
        .collect()
}

pub fn render_schemas(format: OutputFormat, schemas: &ProviderSchemas) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => render_json(schemas),
        OutputFormat::Table => {
            let mut rows = attribute_rows("provider", &schemas.provider);
            for (name, schema) in &schemas.resources {
                rows.extend(attribute_rows(&format!("resource {name}"), schema));
            }
            for (name, schema) in &schemas.data_sources {
                rows.extend(attribute_rows(&format!("data {name}"), schema));
            }
            Ok(format!(
                "{} provider v{}\n{}",
                schemas.type_name,
                schemas.version,
                render_table(&rows)
            ))
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(data)?)
}
