//! Database layer for gymtrack
//!
//! This module provides the SQLite row source the analytics engine reads from:
//! - Schema migrations
//! - Repository pattern for writes and window queries

pub mod repo;
pub mod schema;

pub use repo::{Database, ProgramUpdate};
