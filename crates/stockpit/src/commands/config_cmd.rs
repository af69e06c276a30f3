//! Config command handlers (no backend connection required).

use dialoguer::{Confirm, Input};

use stockpit_config::{Profile, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Profiles => {
            profiles(global);
            Ok(())
        }
        ConfigCommand::Use { name } => use_profile(&name, global),
    }
}

/// Guided setup: prompt for the backend and token, write one profile.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = load_config_or_default();

    let name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(io_err)?;

    let backend: String = Input::new()
        .with_prompt("Backend base URL")
        .interact_text()
        .map_err(io_err)?;

    let token: String = Input::new()
        .with_prompt("API token (leave blank to use STOCKPIT_TOKEN)")
        .allow_empty(true)
        .interact_text()
        .map_err(io_err)?;

    let insecure = Confirm::new()
        .with_prompt("Accept self-signed TLS certificates?")
        .default(false)
        .interact()
        .map_err(io_err)?;

    cfg.profiles.insert(
        name.clone(),
        Profile {
            backend,
            token: (!token.is_empty()).then_some(token),
            insecure: insecure.then_some(true),
            ..Profile::default()
        },
    );
    if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(name);
    }

    save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Config written to {}", config_path().display());
    }
    Ok(())
}

/// Print the resolved config as TOML, with tokens masked.
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = load_config_or_default();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("********".into());
        }
    }
    let rendered = toml::to_string_pretty(&cfg)
        .map_err(stockpit_config::ConfigError::Serialization)?;
    if !global.quiet {
        println!("{rendered}");
    }
    Ok(())
}

fn profiles(global: &GlobalOpts) {
    let cfg = load_config_or_default();
    if global.quiet {
        return;
    }
    for (name, profile) in &cfg.profiles {
        let marker = if cfg.default_profile.as_deref() == Some(name) {
            " (default)"
        } else {
            ""
        };
        println!("{name}{marker}\t{}", profile.backend);
    }
}

fn use_profile(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = load_config_or_default();
    if !cfg.profiles.contains_key(name) {
        return Err(CliError::ProfileNotFound {
            name: name.into(),
            available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
        });
    }
    cfg.default_profile = Some(name.into());
    save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Default profile set to '{name}'");
    }
    Ok(())
}

fn io_err(e: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
