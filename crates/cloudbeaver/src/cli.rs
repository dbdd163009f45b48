//! Clap derive structures for the `cloudbeaver` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cloudbeaver -- declarative team management for CloudBeaver
#[derive(Debug, Parser)]
#[command(
    name = "cloudbeaver",
    version,
    about = "Manage CloudBeaver teams declaratively from the command line",
    long_about = "Plan and apply CloudBeaver team changes against a local state file.\n\n\
        Connection settings come from --config, the --host/--username/--password\n\
        flags, or the CLOUDBEAVER_HOST, CLOUDBEAVER_USERNAME and\n\
        CLOUDBEAVER_PASSWORD environment variables.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Provider config file (TOML with host, username, password)
    #[arg(long, env = "CLOUDBEAVER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// CloudBeaver host, e.g. https://cloudbeaver.example.com
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Administrator username
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Administrator password (prefer CLOUDBEAVER_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables and plans (default)
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print provider, resource and data source schemas
    Schema,

    /// Manage a team tracked in a state file
    #[command(alias = "t")]
    Team(TeamArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Team ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// Look up a team by identifier (read-only)
    Get {
        /// Team identifier
        id: String,
    },

    /// Show what apply would change, without contacting the server
    Plan(DeclareArgs),

    /// Reconcile the server with the declared team and save the result
    Apply(DeclareArgs),

    /// Re-read the tracked team and report drift
    Refresh(StateArgs),

    /// Start tracking an existing team
    Import {
        /// Team identifier
        id: String,

        #[command(flatten)]
        state: StateArgs,
    },

    /// Delete the tracked team and its state file
    Destroy(StateArgs),
}

#[derive(Debug, Args)]
pub struct StateArgs {
    /// State file tracking the team
    #[arg(long, short = 's', default_value = "team.state.json")]
    pub state: PathBuf,
}

/// Declared team attributes.
#[derive(Debug, Args)]
pub struct DeclareArgs {
    #[command(flatten)]
    pub state: StateArgs,

    /// Team identifier (changing it replaces the team)
    #[arg(long)]
    pub id: String,

    /// Team name (defaults to the identifier)
    #[arg(long)]
    pub name: Option<String>,

    /// Team description (defaults to empty)
    #[arg(long)]
    pub description: Option<String>,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
