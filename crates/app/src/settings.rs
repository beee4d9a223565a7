//! Settings of the `registry` command.
//!
//! Read from an optional TOML file (`config/registry.toml` unless `--config`
//! says otherwise), then `REGISTRY_*` environment variables, then command
//! line flags.

use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/registry.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: String,
    /// How long a newly added table item stays highlighted.
    pub highlight_ms: u64,
    /// File holding the local user settings (column selection).
    pub state_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            highlight_ms: 5_000,
            state_path: "config/registry_state.json".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "registry", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long, global = true)]
    level: Option<String>,
    /// Override the new item highlight window, in milliseconds.
    #[arg(long, global = true)]
    highlight_ms: Option<u64>,
    /// Override the local state file.
    #[arg(long, global = true)]
    state_path: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the registrations table from exported drafts and history.
    Table(TableArgs),
    /// Compute the fee summary of a registration action.
    Fee(FeeArgs),
    /// Show or change the registrations table columns.
    Columns(ColumnsArgs),
}

#[derive(Debug, ClapArgs)]
pub struct TableArgs {
    /// JSON array of drafts.
    #[arg(long)]
    pub drafts: Option<PathBuf>,
    /// JSON array of registration summaries.
    #[arg(long)]
    pub history: Option<PathBuf>,
    /// JSON new item to put on top of the table.
    #[arg(long)]
    pub add: Option<PathBuf>,
    /// Registration number to add to the table, looked up in `--source`.
    #[arg(long, requires = "source")]
    pub add_registration: Option<String>,
    /// JSON array of registration summaries to look registrations up in.
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Document id of a draft to delete.
    #[arg(long)]
    pub delete: Option<String>,
    /// Base registration of the deleted draft, for change drafts.
    #[arg(long, requires = "delete")]
    pub base: Option<String>,
    /// Registration number to remove from the table.
    #[arg(long)]
    pub remove: Option<String>,
    /// Undo the delete or remove.
    #[arg(long)]
    pub restore: bool,
    /// Registration number to expand or collapse.
    #[arg(long)]
    pub expand: Option<String>,
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FeeAction {
    New,
    Renew,
    Amend,
    Discharge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Staff,
    Sbc,
    Client,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Payment {
    #[default]
    None,
    NoFee,
    Fas,
    Bcol,
    CreditCard,
}

#[derive(Debug, ClapArgs)]
pub struct FeeArgs {
    #[arg(long, value_enum, default_value = "new")]
    pub fee_type: FeeAction,
    /// Registration type code, e.g. SECURITY_AGREEMENT.
    #[arg(long)]
    pub registration_type: String,
    /// Registration length in years.
    #[arg(long, conflicts_with = "infinite")]
    pub years: Option<u32>,
    /// Infinite registration length.
    #[arg(long)]
    pub infinite: bool,
    /// Roles of the session, repeatable.
    #[arg(long = "role", value_enum, action = ArgAction::Append)]
    pub roles: Vec<Role>,
    /// Staff payment option.
    #[arg(long, value_enum, default_value = "none")]
    pub payment: Payment,
}

#[derive(Debug, ClapArgs)]
pub struct ColumnsArgs {
    /// Headers to show, by value (`expireDays`) or label (`Days to Expiry`).
    /// Prints the current selection when empty.
    pub headers: Vec<String>,
}

pub fn load(args: &Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("REGISTRY"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = &args.level {
        settings.level = level.clone();
    }
    if let Some(highlight_ms) = args.highlight_ms {
        settings.highlight_ms = highlight_ms;
    }
    if let Some(state_path) = &args.state_path {
        settings.state_path = state_path.clone();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let args = Args::parse_from([
            "registry",
            "--config",
            "does/not/exist",
            "--highlight-ms",
            "250",
            "columns",
        ]);
        let settings = load(&args).unwrap();
        assert_eq!(settings.highlight_ms, 250);
        assert_eq!(settings.state_path, "config/registry_state.json");
    }

    #[test]
    fn fee_roles_are_repeatable() {
        let args = Args::parse_from([
            "registry",
            "fee",
            "--registration-type",
            "SECURITY_AGREEMENT",
            "--role",
            "staff",
            "--role",
            "client",
            "--payment",
            "no-fee",
        ]);
        let Command::Fee(fee) = args.command else {
            panic!("expected fee command");
        };
        assert_eq!(fee.roles, [Role::Staff, Role::Client]);
    }
}
