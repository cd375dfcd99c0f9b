//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    associate::{AssociateArgs, AssociatedArgs},
    completions::CompletionsArgs,
    config::ConfigCommands,
    disassociate::DisassociateArgs,
    invites::InvitesCommands,
    services::ServicesCommands,
    worker::WorkerCommands,
};
use crate::core::Overrides;

#[derive(Parser)]
#[command(name = "paas")]
#[command(author, version, about = "Platform control-plane CLI")]
#[command(long_about = "Manage organization invitations and inspect background workers of services deployed on the platform.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (request logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Alias of the associated environment to use
    #[arg(long, short = 'E', global = true, env = "PAAS_ENV")]
    pub env: Option<String>,

    /// Settings file (default: per-user config directory)
    #[arg(long, global = true, env = "PAAS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// API host
    #[arg(long, global = true, env = "PAAS_HOST")]
    pub host: Option<String>,

    /// API version prefix
    #[arg(long, global = true, env = "PAAS_API_VERSION")]
    pub api_version: Option<String>,

    /// Session token (skips the sign-in prompt when valid)
    #[arg(long, global = true, env = "PAAS_SESSION_TOKEN", hide_env_values = true, hide = true)]
    pub session_token: Option<String>,
}

impl GlobalOpts {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            api_version: self.api_version.clone(),
            session_token: self.session_token.clone(),
            env_alias: self.env.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage invitations for your organizations
    #[command(subcommand)]
    Invites(InvitesCommands),

    /// Inspect background workers of a service
    #[command(subcommand)]
    Worker(WorkerCommands),

    /// List services in the associated environment
    #[command(subcommand)]
    Services(ServicesCommands),

    /// Associate an environment under a local alias
    Associate(AssociateArgs),

    /// List associated environments
    Associated(AssociatedArgs),

    /// Remove the association with an environment
    Disassociate(DisassociateArgs),

    /// End the current session
    Logout,

    /// View and edit settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
}
