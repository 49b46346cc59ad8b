mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use wiser_core::{
    DiagnosticEvent, DiagnosticSink, HubCoordinator, HubSettings, NotificationBoard,
    TracingDiagnostics,
};

use crate::cli::{Cli, Command, GlobalOpts, OutputFormat};
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a hub
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "wiser", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the hub
        cmd => {
            // One-shot commands report a failed refresh as their error;
            // watch keeps going, so failures also go to the log
            let log_failures = matches!(cmd, Command::Watch(_));
            let session = build_session(&cli.global, log_failures).await?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &session).await
        }
    }
}

/// Build the coordinator from the config file with CLI flag overrides.
async fn build_session(global: &GlobalOpts, log_failures: bool) -> Result<Session, CliError> {
    let cfg = commands::config_cmd::load(global)?;
    let settings = hub_settings(&cfg, global)?;

    let board = Arc::new(NotificationBoard::new());
    let sink: Arc<dyn DiagnosticSink> = if log_failures {
        let board = Arc::clone(&board);
        Arc::new(move |event: &DiagnosticEvent| {
            TracingDiagnostics.report(event);
            board.report(event);
        })
    } else {
        board.clone()
    };
    let coordinator = HubCoordinator::new(settings, sink);
    coordinator.connect().await?;

    Ok(Session {
        coordinator,
        board,
        output: global
            .output
            .unwrap_or_else(|| OutputFormat::from_config(&cfg.output)),
        quiet: global.quiet,
        away_temperature: cfg.away_temperature,
    })
}

/// Flags win over env vars, which win over the config file.
fn hub_settings(
    cfg: &wiser_config::Config,
    global: &GlobalOpts,
) -> Result<HubSettings, CliError> {
    let mut cfg = cfg.clone();
    if let Some(host) = &global.host {
        cfg.host = Some(host.clone());
    }
    if let Some(secs) = global.scan_interval {
        cfg.scan_interval = secs;
    }
    if let Some(secs) = global.timeout {
        cfg.timeout = secs;
    }

    let secret = match &global.secret {
        Some(secret) => Some(SecretString::from(secret.clone())),
        None => wiser_config::resolve_secret(&cfg),
    };

    let settings = cfg.to_hub_settings(secret)?;
    tracing::debug!(
        host = %settings.host,
        scan_interval = ?settings.scan_interval,
        timeout = ?settings.timeout,
        "hub settings resolved"
    );
    Ok(settings)
}
