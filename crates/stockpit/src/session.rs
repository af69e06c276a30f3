//! Backend session: resolved client, gateway, and console notifier.

use std::sync::Arc;

use clap::ValueEnum;
use secrecy::SecretString;

use stockpit_api::{ResourceClient, StaticToken};
use stockpit_core::{NotificationGateway, Notifier};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::notify::ConsoleNotifier;
use crate::output;

/// Everything a command handler needs to run the pattern.
pub struct Session {
    pub client: Arc<ResourceClient>,
    pub gateway: NotificationGateway,
    pub notifier: Arc<ConsoleNotifier>,
    /// Output format after flag/config resolution.
    pub output: OutputFormat,
}

/// Resolve config file, profile, and CLI overrides into a session.
pub fn build(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = stockpit_config::load_config_or_default();

    let profile = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => Some((name.to_owned(), profile)),
        // Flags alone can stand in for a missing default profile, but an
        // explicitly named profile must exist.
        Err(e) if global.profile.is_some() => return Err(e.into()),
        Err(_) => None,
    };

    let url = match (&global.url, &profile) {
        (Some(url), _) => url.clone(),
        (None, Some((_, p))) => stockpit_config::backend_url(p)?.to_string(),
        (None, None) => {
            return Err(CliError::NoBackend {
                path: stockpit_config::config_path().display().to_string(),
            });
        }
    };

    let token: SecretString = match &global.token {
        Some(token) => SecretString::from(token.clone()),
        None => {
            let (name, p) = profile.as_ref().map_or(("default", None), |(n, p)| {
                (n.as_str(), Some(*p))
            });
            match p {
                Some(p) => stockpit_config::resolve_token(p, name)?,
                None => {
                    return Err(CliError::NoToken {
                        profile: name.into(),
                    });
                }
            }
        }
    };

    // Resolution order: [defaults] section, profile overrides, flags.
    let mut transport = cfg.transport(profile.as_ref().map(|(_, p)| *p));
    if let Some(seconds) = global.timeout {
        transport.timeout = std::time::Duration::from_secs(seconds);
    }
    if global.insecure {
        transport.danger_accept_invalid_certs = true;
    }

    let output: OutputFormat = match &global.output {
        Some(format) => format.clone(),
        None => defaults_enum("output", &cfg.defaults.output)?,
    };
    let color: ColorMode = match &global.color {
        Some(mode) => mode.clone(),
        None => defaults_enum("color", &cfg.defaults.color)?,
    };

    let client = ResourceClient::new(
        &url,
        Arc::new(StaticToken::from_secret(token)),
        &transport,
    )
    .map_err(|e| CliError::Validation {
        field: "url".into(),
        reason: e.to_string(),
    })?;

    let notifier = Arc::new(ConsoleNotifier::new(
        global.yes,
        global.quiet,
        output::should_color(&color),
    ));
    let gateway = NotificationGateway::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

    Ok(Session {
        client: Arc::new(client),
        gateway,
        notifier,
        output,
    })
}

/// Parse a `[defaults]` string into its flag enum (case-insensitive).
fn defaults_enum<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|_| CliError::Validation {
        field: format!("defaults.{field}"),
        reason: format!("unrecognized value '{raw}'"),
    })
}
