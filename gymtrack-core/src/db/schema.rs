//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.
//! Dates are stored as `YYYY-MM-DD` text, timestamps as RFC 3339.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: members, programs, enrollments, logs
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id               TEXT PRIMARY KEY,
        name             TEXT NOT NULL,
        is_admin         INTEGER NOT NULL DEFAULT 0,
        created_at       DATETIME NOT NULL
    );

    CREATE TABLE IF NOT EXISTS programs (
        id               TEXT PRIMARY KEY,
        name             TEXT NOT NULL,
        start_date       DATE,
        end_date         DATE,
        created_at       DATETIME NOT NULL
    );

    CREATE TABLE IF NOT EXISTS program_members (
        program_id       TEXT NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
        member_id        TEXT NOT NULL REFERENCES members(id) ON DELETE CASCADE,
        role             TEXT NOT NULL,
        joined_at        DATETIME NOT NULL,
        PRIMARY KEY (program_id, member_id)
    );

    CREATE TABLE IF NOT EXISTS workout_logs (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        program_id       TEXT NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
        member_id        TEXT NOT NULL REFERENCES members(id) ON DELETE CASCADE,
        workout_type     TEXT NOT NULL,
        log_date         DATE NOT NULL,
        duration_minutes INTEGER NOT NULL CHECK (duration_minutes >= 0),
        UNIQUE (program_id, member_id, workout_type, log_date)
    );

    CREATE TABLE IF NOT EXISTS health_logs (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        program_id       TEXT NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
        member_id        TEXT NOT NULL REFERENCES members(id) ON DELETE CASCADE,
        log_date         DATE NOT NULL,
        sleep_hours      REAL,
        food_quality     INTEGER,
        UNIQUE (program_id, member_id, log_date)
    );
    "#,
    // Version 2: query indexes for window scans
    r#"
    CREATE INDEX IF NOT EXISTS idx_workout_logs_program_date
        ON workout_logs(program_id, log_date);
    CREATE INDEX IF NOT EXISTS idx_workout_logs_member
        ON workout_logs(program_id, member_id, log_date);
    CREATE INDEX IF NOT EXISTS idx_health_logs_program_date
        ON health_logs(program_id, log_date);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
