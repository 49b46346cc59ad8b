//! Config subcommand handlers.

use std::path::PathBuf;

use serde::Serialize;

use wiser_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

/// The config file this invocation reads and writes.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

/// Load the active config file layered under `WISER_*` env vars.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(config::load_config_from(&active_path(global))?)
}

#[derive(Serialize)]
struct ShownConfig {
    path: String,
    #[serde(flatten)]
    config: Config,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&active_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = load(global)?;
            if cfg.secret.is_some() || config::resolve_secret(&cfg).is_some() {
                cfg.secret = Some(REDACTED.into());
            }
            let shown = ShownConfig {
                path: active_path(global).display().to_string(),
                config: cfg,
            };
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(
                format,
                &shown,
                |s| toml::to_string_pretty(&s.config).unwrap_or_default(),
                |s| s.path.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { keyring, force } => {
            let path = active_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let host = global.host.clone().ok_or_else(|| CliError::NoHost {
                path: path.display().to_string(),
            })?;

            let defaults = Config::default();
            let mut cfg = Config {
                host: Some(host.clone()),
                scan_interval: global.scan_interval.unwrap_or(defaults.scan_interval),
                timeout: global.timeout.unwrap_or(defaults.timeout),
                ..defaults
            };

            match (&global.secret, keyring) {
                (Some(secret), true) => config::store_secret(&host, secret)?,
                (None, true) => {
                    return Err(CliError::Validation {
                        field: "secret".into(),
                        reason: "--keyring needs a secret from --secret or WISER_SECRET".into(),
                    });
                }
                (secret, false) => cfg.secret.clone_from(secret),
            }

            config::save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}
