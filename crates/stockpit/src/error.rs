//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use stockpit_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(stockpit::no_token),
        help(
            "Configure a token with: stockpit config init\n\
             Or set the STOCKPIT_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(
        code(stockpit::not_found),
        help("Run: stockpit {list_command} to see available entries")
    )]
    NotFound {
        resource: String,
        identifier: String,
        list_command: String,
    },

    // ── Operations ───────────────────────────────────────────────────

    /// An operation surfaced an error through the notification gateway.
    #[error("{message}")]
    #[diagnostic(code(stockpit::operation_failed))]
    OperationFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(stockpit::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(stockpit::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: stockpit config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(stockpit::no_backend),
        help(
            "Pass --url, set STOCKPIT_URL, or create a profile with:\n\
             stockpit config init\n\
             Expected config at: {path}"
        )
    )]
    NoBackend { path: String },

    #[error(transparent)]
    #[diagnostic(code(stockpit::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(stockpit::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoToken { profile } => Self::NoToken { profile },
            ConfigError::UnknownProfile(name) => Self::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoToken { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}
