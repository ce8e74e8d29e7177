//! Command-line interface definitions.

pub mod assess;
pub mod menu;
pub mod output;
pub mod roster;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::db::{self, DbPool};
use crate::directory::AppointmentStatus;
use crate::error::Result;

/// Wellness - campus wellness center console.
#[derive(Parser, Debug)]
#[command(name = "wellness")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all students
    Students(StoreArgs),

    /// List all counselors
    Counselors(StoreArgs),

    /// Inspect and update appointments
    #[command(subcommand)]
    Appointments(AppointmentsCommand),

    /// Record a self-assessment and referral in one transaction
    Assess(AssessArgs),

    /// Interactive menu over all operations
    Menu(StoreArgs),
}

/// Subcommands for `wellness appointments`
#[derive(Subcommand, Debug)]
pub enum AppointmentsCommand {
    /// List all appointments
    List(StoreArgs),
    /// Set the status of a single appointment
    SetStatus(SetStatusArgs),
}

/// Shared arguments for commands that touch the database.
#[derive(Parser, Debug, Clone)]
pub struct StoreArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "wellness.toml")]
    pub config: PathBuf,

    /// Override the configured database path
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Arguments for `appointments set-status`.
#[derive(Parser, Debug)]
pub struct SetStatusArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Appointment id to update
    #[arg(long)]
    pub id: i32,

    /// New status
    #[arg(value_enum)]
    pub status: AppointmentStatus,
}

/// Arguments for the `assess` subcommand.
///
/// Omitted fields are collected interactively.
#[derive(Parser, Debug)]
pub struct AssessArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Student id
    #[arg(long)]
    pub student: Option<i32>,

    /// Counselor id to refer to
    #[arg(long)]
    pub counselor: Option<i32>,

    /// Assessment date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    /// Anxiety score (0-10)
    #[arg(long)]
    pub anxiety: Option<i32>,

    /// Depression score (0-10)
    #[arg(long)]
    pub depression: Option<i32>,

    /// Stress score (0-10)
    #[arg(long)]
    pub stress: Option<i32>,
}

/// Dispatch a parsed command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Students(args) => {
            let (_, pool) = open_store(&args)?;
            roster::students(&pool)
        }
        Commands::Counselors(args) => {
            let (_, pool) = open_store(&args)?;
            roster::counselors(&pool)
        }
        Commands::Appointments(AppointmentsCommand::List(args)) => {
            let (_, pool) = open_store(&args)?;
            roster::appointments(&pool)
        }
        Commands::Appointments(AppointmentsCommand::SetStatus(args)) => {
            let (_, pool) = open_store(&args.store)?;
            roster::set_status(&pool, args.id, args.status)
        }
        Commands::Assess(args) => {
            let (config, pool) = open_store(&args.store)?;
            assess::run(&pool, &config, &args)
        }
        Commands::Menu(args) => {
            let (config, pool) = open_store(&args)?;
            menu::run(&pool, &config)
        }
    }
}

/// Load configuration, initialize logging, and open the database.
///
/// Migrations run on every invocation; they are idempotent.
fn open_store(args: &StoreArgs) -> Result<(Config, DbPool)> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(database) = &args.database {
        config.database.path = database.display().to_string();
    }
    config.init_logging();

    let pool = db::create_pool(&config.database)?;
    db::run_migrations(&pool)?;
    Ok((config, pool))
}
