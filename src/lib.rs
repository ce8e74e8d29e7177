//! Wellness - campus wellness center console.
//!
//! A small front-end over the wellness center's relational schema: roster
//! views for students, counselors, and appointments, a single-row status
//! update, and the transactional intake path that records a self-assessment
//! together with its referral as one atomic unit of work.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration and logging bootstrap
//! - [`db`] - Diesel/SQLite connection pool, embedded migrations, schema
//! - [`intake`] - the assessment + referral transaction coordinator
//! - [`directory`] - read-only roster queries and the status update
//! - [`cli`] - clap commands, table output, interactive menu
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use wellness::config::Config;
//! use wellness::db;
//! use wellness::intake::{IntakeRecorder, IntakeRequest};
//!
//! fn main() -> wellness::error::Result<()> {
//!     let config = Config::load_or_default("wellness.toml")?;
//!     let pool = db::create_pool(&config.database)?;
//!     db::run_migrations(&pool)?;
//!
//!     let recorder = IntakeRecorder::new(pool, config.database.busy_timeout_ms);
//!     let id = recorder.record_assessment_and_referral(&IntakeRequest {
//!         student_id: 1,
//!         counselor_id: 2,
//!         assessed_on: "2024-03-01".into(),
//!         anxiety: 3,
//!         depression: 4,
//!         stress: 2,
//!     })?;
//!     println!("new assessment {id}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod intake;
