//! # gymtrack-core
//!
//! Core library for gymtrack - a fitness program tracker.
//!
//! This library provides:
//! - Value rows for members, programs, workout and health logs
//! - The analytics engine: date windows, buckets, aggregation, streaks, summaries
//! - SQLite storage that feeds rows to the engine
//! - Access rules, configuration and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use gymtrack_core::analytics::{generate_dashboard_now, Period};
//! use gymtrack_core::{Config, Database};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let report = generate_dashboard_now(&db, "program-id", Period::Week, &config.analytics)
//!     .expect("failed to build dashboard");
//! println!("{} workouts", report.summary.totals.workouts);
//! ```

// Re-export commonly used items at the crate root
pub use access::{authorize, Actor, Capability, ProgramRole};
pub use config::Config;
pub use db::{Database, ProgramUpdate};
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod access;
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod types;
