//! Clap derive structures for the `stockpit` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockpit -- console for inventory reference data
#[derive(Debug, Parser)]
#[command(
    name = "stockpit",
    version,
    about = "Manage inventory reference data from the command line",
    long_about = "A console for administering inventory reference collections:\n\
        product brands, measurement units, user roles, tax rates, and\n\
        application settings, over the inventory REST backend.",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "STOCKPIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "STOCKPIT_URL", global = true)]
    pub url: Option<String>,

    /// API bearer token
    #[arg(long, env = "STOCKPIT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format (default from config `[defaults]`, else table)
    #[arg(long, short = 'o', env = "STOCKPIT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output (default from config `[defaults]`, else auto)
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STOCKPIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STOCKPIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
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
    /// Manage product brands
    #[command(alias = "brand", alias = "b")]
    Brands(NamedArgs),

    /// Manage measurement units
    #[command(alias = "unit")]
    Units(NamedArgs),

    /// Manage user roles
    #[command(alias = "role")]
    Roles(NamedArgs),

    /// Manage tax rates
    #[command(alias = "tax", alias = "t")]
    Taxes(TaxesArgs),

    /// Manage application settings
    #[command(alias = "setting", alias = "s")]
    Settings(SettingsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NAME-ONLY COLLECTIONS (brands, units, roles)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NamedArgs {
    #[command(subcommand)]
    pub command: NamedCommand,
}

/// Verbs shared by collections whose only editable field is `name`.
#[derive(Debug, Subcommand)]
pub enum NamedCommand {
    /// List entries, optionally filtered by name
    #[command(alias = "ls")]
    List {
        /// Name search (substring)
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// Create a new entry
    Create {
        /// Entry name
        name: String,
    },

    /// Rename an existing entry
    Edit {
        /// Entry id
        id: i64,

        /// New name
        #[arg(long, required = true)]
        name: String,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TAXES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TaxesArgs {
    #[command(subcommand)]
    pub command: TaxesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TaxesCommand {
    /// List tax rates, optionally filtered by name
    #[command(alias = "ls")]
    List {
        /// Name search (substring)
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// Create a tax rate
    Create {
        /// Tax name
        name: String,

        /// Percentage rate (0-100)
        #[arg(long, required = true)]
        rate: f64,
    },

    /// Update a tax rate
    Edit {
        /// Tax id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New percentage rate (0-100)
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Delete a tax rate
    #[command(alias = "rm")]
    Delete {
        /// Tax id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// List settings, optionally filtered by key
    #[command(alias = "ls")]
    List {
        /// Key search (substring)
        #[arg(long, short = 'K')]
        key: Option<String>,
    },

    /// Create a setting
    Create {
        /// Setting key
        key: String,

        /// Setting value
        #[arg(long, required = true)]
        value: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a setting
    Edit {
        /// Setting key
        key: String,

        /// New value
        #[arg(long)]
        value: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a setting
    #[command(alias = "rm")]
    Delete {
        /// Setting key
        key: String,
    },

    /// Replace all settings from a JSON file (bulk update)
    Apply {
        /// JSON file containing an array of {key, value, description}
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}
