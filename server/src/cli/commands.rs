// server/src/cli/commands.rs

// Command-line arguments of the `healthify` binary.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "healthify")]
#[command(version = "0.1.0")]
#[command(about = "Healthify hospital management services")]
pub struct CliArgs {
    /// Configuration file layered over the built-in defaults.
    #[arg(long, short = 'c', value_hint = clap::ValueHint::FilePath, env = "HEALTHIFY_CONFIG")]
    pub config: Option<PathBuf>,
    /// SQLite database URL, e.g. `sqlite://healthify.db`.
    #[arg(long, env = "HEALTHIFY_DATABASE_URL")]
    pub database_url: Option<String>,
    /// Address every service binds to.
    #[arg(long)]
    pub host: Option<String>,
    #[command(subcommand)]
    pub command: HealthifyCommands,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum HealthifyCommands {
    /// Run the patient, doctor and admin services in one process
    Serve {
        #[arg(long)]
        patient_port: Option<u16>,
        #[arg(long)]
        doctor_port: Option<u16>,
        #[arg(long)]
        admin_port: Option<u16>,
    },
    /// Run only the patient/public service
    Patient {
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Run only the doctor service
    Doctor {
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Run only the admin service
    Admin {
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Create the database and its tables, then exit
    InitDb,
}
