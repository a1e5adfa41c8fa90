// server/src/cli/cli.rs

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::try_join_all;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lib::{load_app_config, AppConfig, Database};
use rest_api::{start_server, AppState, ServiceKind};

use crate::cli::commands::{CliArgs, HealthifyCommands};

/// Parses the command line, sets up logging and runs the chosen command.
pub async fn start_cli() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    run(CliArgs::parse()).await
}

// RUST_LOG wins over the default `info` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads the layered configuration and applies command-line overrides on top.
pub fn resolve_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = load_app_config(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    let server = &mut config.server;
    match &args.command {
        HealthifyCommands::Serve { patient_port, doctor_port, admin_port } => {
            server.patient_port = patient_port.unwrap_or(server.patient_port);
            server.doctor_port = doctor_port.unwrap_or(server.doctor_port);
            server.admin_port = admin_port.unwrap_or(server.admin_port);
        }
        HealthifyCommands::Patient { port: Some(port) } => server.patient_port = *port,
        HealthifyCommands::Doctor { port: Some(port) } => server.doctor_port = *port,
        HealthifyCommands::Admin { port: Some(port) } => server.admin_port = *port,
        _ => {}
    }
    Ok(config)
}

/// Services started by `command`; empty for commands that serve nothing.
pub fn selected_services(command: &HealthifyCommands) -> Vec<ServiceKind> {
    match command {
        HealthifyCommands::Serve { .. } => ServiceKind::ALL.to_vec(),
        HealthifyCommands::Patient { .. } => vec![ServiceKind::Patient],
        HealthifyCommands::Doctor { .. } => vec![ServiceKind::Doctor],
        HealthifyCommands::Admin { .. } => vec![ServiceKind::Admin],
        HealthifyCommands::InitDb => Vec::new(),
    }
}

pub async fn run(args: CliArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let db = Database::connect(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    let services = selected_services(&args.command);
    if services.is_empty() {
        info!("Database {} is ready", config.database.url);
        db.close().await;
        return Ok(());
    }

    let mut shutdown_senders = Vec::with_capacity(services.len());
    let mut servers = Vec::with_capacity(services.len());
    for service in services {
        let (tx, rx) = oneshot::channel();
        shutdown_senders.push(tx);
        let state = AppState::new(db.clone(), config.lab.clone(), service);
        servers.push(start_server(&config.server.host, service.port(&config.server), state, rx));
    }

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received, shutting down"),
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
        for tx in shutdown_senders {
            let _ = tx.send(());
        }
    });

    let result = try_join_all(servers).await;
    db.close().await;
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn should_apply_port_and_url_overrides() {
        let args = parse(&[
            "healthify",
            "--database-url",
            "sqlite://override.db",
            "--host",
            "0.0.0.0",
            "serve",
            "--doctor-port",
            "4002",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.database.url, "sqlite://override.db");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.patient_port, 3001);
        assert_eq!(config.server.doctor_port, 4002);

        let args = parse(&["healthify", "admin", "--port", "9003"]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.server.admin_port, 9003);
        assert_eq!(config.server.patient_port, 3001);
    }

    #[test]
    fn should_select_services_per_command() {
        assert_eq!(selected_services(&parse(&["healthify", "serve"]).command), ServiceKind::ALL.to_vec());
        assert_eq!(selected_services(&parse(&["healthify", "doctor"]).command), vec![ServiceKind::Doctor]);
        assert!(selected_services(&parse(&["healthify", "init-db"]).command).is_empty());
        assert!(CliArgs::try_parse_from(["healthify", "billing"]).is_err());
    }

    #[tokio::test]
    async fn should_initialise_the_database_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("init.db");
        let url = format!("sqlite://{}", path.display());
        run(parse(&["healthify", "--database-url", &url, "init-db"])).await.unwrap();
        assert!(path.exists());
    }
}
