//! Database repository layer
//!
//! Provides query and insert operations for members, programs, enrollments
//! and logs. Read queries return plain value rows for the analytics engine.

use crate::access::ProgramRole;
use crate::analytics::summary::{PeriodMetrics, Ranked};
use crate::error::{Error, Result};
use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Partial update of a program.
///
/// Outer `None` leaves a field unchanged. For the dates, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramUpdate {
    pub name: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl ProgramUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    fn apply(&self, program: &mut Program) {
        if let Some(name) = &self.name {
            program.name = name.clone();
        }
        if let Some(start) = self.start_date {
            program.start_date = start;
        }
        if let Some(end) = self.end_date {
            program.end_date = end;
        }
    }
}

/// Database handle with a single shared connection
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock();
        super::schema::run_migrations(&conn)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // Every write is a single statement, so a poisoned lock holds no partial state.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ============================================
    // Member operations
    // ============================================

    /// Create a member account
    pub fn create_member(&self, name: &str, is_admin: bool) -> Result<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("member name must not be empty".to_string()));
        }

        let member = Member {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_admin,
            created_at: Utc::now(),
        };

        let conn = self.lock();
        conn.execute(
            "INSERT INTO members (id, name, is_admin, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                member.id,
                member.name,
                member.is_admin,
                member.created_at.to_rfc3339()
            ],
        )?;

        tracing::debug!(member_id = %member.id, "Created member");
        Ok(member)
    }

    /// Get a member by ID
    pub fn get_member(&self, id: &str) -> Result<Option<Member>> {
        let conn = self.lock();
        conn.query_row(
            "SELECT id, name, is_admin, created_at FROM members WHERE id = ?",
            [id],
            Self::row_to_member,
        )
        .optional()
        .map_err(Error::from)
    }

    fn row_to_member(row: &Row) -> rusqlite::Result<Member> {
        let created_at_str: String = row.get("created_at")?;
        Ok(Member {
            id: row.get("id")?,
            name: row.get("name")?,
            is_admin: row.get("is_admin")?,
            created_at: parse_timestamp(&created_at_str),
        })
    }

    // ============================================
    // Program operations
    // ============================================

    /// Create a program
    pub fn create_program(
        &self,
        name: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Program> {
        let program = Program {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            start_date,
            end_date,
            created_at: Utc::now(),
        };
        validate_program(&program)?;

        let conn = self.lock();
        conn.execute(
            r#"
            INSERT INTO programs (id, name, start_date, end_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                program.id,
                program.name,
                program.start_date.map(date_str),
                program.end_date.map(date_str),
                program.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(program_id = %program.id, "Created program");
        Ok(program)
    }

    /// Get a program by ID
    pub fn get_program(&self, id: &str) -> Result<Option<Program>> {
        let conn = self.lock();
        Self::query_program(&conn, id)
    }

    fn query_program(conn: &Connection, id: &str) -> Result<Option<Program>> {
        conn.query_row(
            "SELECT id, name, start_date, end_date, created_at FROM programs WHERE id = ?",
            [id],
            Self::row_to_program,
        )
        .optional()
        .map_err(Error::from)
    }

    fn row_to_program(row: &Row) -> rusqlite::Result<Program> {
        let start: Option<String> = row.get("start_date")?;
        let end: Option<String> = row.get("end_date")?;
        let created_at_str: String = row.get("created_at")?;

        Ok(Program {
            id: row.get("id")?,
            name: row.get("name")?,
            start_date: start.map(|s| parse_date(2, &s)).transpose()?,
            end_date: end.map(|s| parse_date(3, &s)).transpose()?,
            created_at: parse_timestamp(&created_at_str),
        })
    }

    /// The start/end window of a program
    pub fn program_window(&self, id: &str) -> Result<ProgramWindow> {
        self.get_program(id)?
            .map(|p| p.window())
            .ok_or_else(|| Error::ProgramNotFound(id.to_string()))
    }

    /// Apply a partial update and return the updated program
    pub fn update_program(&self, id: &str, update: &ProgramUpdate) -> Result<Program> {
        let conn = self.lock();
        let mut program =
            Self::query_program(&conn, id)?.ok_or_else(|| Error::ProgramNotFound(id.to_string()))?;

        if update.is_empty() {
            return Ok(program);
        }

        update.apply(&mut program);
        validate_program(&program)?;

        conn.execute(
            "UPDATE programs SET name = ?1, start_date = ?2, end_date = ?3 WHERE id = ?4",
            params![
                program.name,
                program.start_date.map(date_str),
                program.end_date.map(date_str),
                program.id,
            ],
        )?;

        tracing::debug!(program_id = %program.id, "Updated program");
        Ok(program)
    }

    // ============================================
    // Enrollment operations
    // ============================================

    /// Enroll a member in a program, or change their role
    pub fn enroll(&self, program_id: &str, member_id: &str, role: ProgramRole) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            r#"
            INSERT INTO program_members (program_id, member_id, role, joined_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(program_id, member_id) DO UPDATE SET role = excluded.role
            "#,
            params![program_id, member_id, role.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// A member's role in a program, `None` when not enrolled
    pub fn member_role(&self, program_id: &str, member_id: &str) -> Result<Option<ProgramRole>> {
        let conn = self.lock();
        Self::query_role(&conn, program_id, member_id)
    }

    fn query_role(
        conn: &Connection,
        program_id: &str,
        member_id: &str,
    ) -> Result<Option<ProgramRole>> {
        let role: Option<String> = conn
            .query_row(
                "SELECT role FROM program_members WHERE program_id = ? AND member_id = ?",
                [program_id, member_id],
                |row| row.get(0),
            )
            .optional()?;
        role.map(|r| r.parse()).transpose()
    }

    /// Number of members enrolled in a program (all roles)
    pub fn count_members(&self, program_id: &str) -> Result<i64> {
        let conn = self.lock();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM program_members WHERE program_id = ?",
            [program_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ============================================
    // Log writes
    // ============================================

    /// Insert a workout log, replacing the duration of an existing entry
    /// for the same member, type and day
    pub fn log_workout(&self, row: &WorkoutLogRow) -> Result<()> {
        if row.workout_type.trim().is_empty() {
            return Err(Error::Validation("workout_type must not be empty".to_string()));
        }

        let conn = self.lock();
        Self::require_enrolled(&conn, &row.program_id, &row.member_id)?;
        conn.execute(
            r#"
            INSERT INTO workout_logs (program_id, member_id, workout_type, log_date, duration_minutes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(program_id, member_id, workout_type, log_date) DO UPDATE SET
                duration_minutes = excluded.duration_minutes
            "#,
            params![
                row.program_id,
                row.member_id,
                row.workout_type.trim(),
                date_str(row.log_date),
                row.duration_minutes,
            ],
        )?;
        Ok(())
    }

    /// Validate and upsert a health log. Returns the stored row.
    pub fn log_health(&self, row: HealthLogRow) -> Result<HealthLogRow> {
        let row = row.validate()?;

        let conn = self.lock();
        Self::require_enrolled(&conn, &row.program_id, &row.member_id)?;
        conn.execute(
            r#"
            INSERT INTO health_logs (program_id, member_id, log_date, sleep_hours, food_quality)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(program_id, member_id, log_date) DO UPDATE SET
                sleep_hours = excluded.sleep_hours,
                food_quality = excluded.food_quality
            "#,
            params![
                row.program_id,
                row.member_id,
                date_str(row.log_date),
                row.sleep_hours,
                row.food_quality,
            ],
        )?;
        Ok(row)
    }

    fn require_enrolled(conn: &Connection, program_id: &str, member_id: &str) -> Result<()> {
        if Self::query_role(conn, program_id, member_id)?.is_none() {
            return Err(Error::Validation(format!(
                "member {} is not enrolled in program {}",
                member_id, program_id
            )));
        }
        Ok(())
    }

    // ============================================
    // Analytics queries
    // ============================================

    /// Workout rows of a program dated within `[start, end]`
    pub fn workout_rows(
        &self,
        program_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutLogRow>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            r#"
            SELECT program_id, member_id, workout_type, log_date, duration_minutes
            FROM workout_logs
            WHERE program_id = ?1 AND log_date >= ?2 AND log_date <= ?3
            ORDER BY log_date, id
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![program_id, date_str(start), date_str(end)],
                Self::row_to_workout,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(program_id, count = rows.len(), "Fetched workout rows");
        Ok(rows)
    }

    /// Every workout row of a program, regardless of date
    pub fn all_workout_rows(&self, program_id: &str) -> Result<Vec<WorkoutLogRow>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            r#"
            SELECT program_id, member_id, workout_type, log_date, duration_minutes
            FROM workout_logs
            WHERE program_id = ?1
            ORDER BY log_date, id
            "#,
        )?;

        let rows = stmt
            .query_map([program_id], Self::row_to_workout)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn row_to_workout(row: &Row) -> rusqlite::Result<WorkoutLogRow> {
        let log_date: String = row.get(3)?;
        Ok(WorkoutLogRow {
            program_id: row.get(0)?,
            member_id: row.get(1)?,
            workout_type: row.get(2)?,
            log_date: parse_date(3, &log_date)?,
            duration_minutes: row.get(4)?,
        })
    }

    /// Health rows of a program dated within `[start, end]`
    pub fn health_rows(
        &self,
        program_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HealthLogRow>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            r#"
            SELECT program_id, member_id, log_date, sleep_hours, food_quality
            FROM health_logs
            WHERE program_id = ?1 AND log_date >= ?2 AND log_date <= ?3
            ORDER BY log_date, id
            "#,
        )?;

        let rows = stmt
            .query_map(params![program_id, date_str(start), date_str(end)], |row| {
                let log_date: String = row.get(2)?;
                Ok(HealthLogRow {
                    program_id: row.get(0)?,
                    member_id: row.get(1)?,
                    log_date: parse_date(2, &log_date)?,
                    sleep_hours: row.get(3)?,
                    food_quality: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(program_id, count = rows.len(), "Fetched health rows");
        Ok(rows)
    }

    /// Distinct days a member logged a workout in a program, ascending
    pub fn member_activity_dates(
        &self,
        program_id: &str,
        member_id: &str,
    ) -> Result<Vec<NaiveDate>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            r#"
            SELECT DISTINCT log_date
            FROM workout_logs
            WHERE program_id = ?1 AND member_id = ?2
            ORDER BY log_date
            "#,
        )?;

        let dates = stmt
            .query_map([program_id, member_id], |row| {
                let s: String = row.get(0)?;
                parse_date(0, &s)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(dates)
    }

    /// Log count, minutes and distinct active members within `[start, end]`
    pub fn period_metrics(
        &self,
        program_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PeriodMetrics> {
        let conn = self.lock();
        let metrics = conn.query_row(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(duration_minutes), 0),
                COUNT(DISTINCT member_id)
            FROM workout_logs
            WHERE program_id = ?1 AND log_date >= ?2 AND log_date <= ?3
            "#,
            params![program_id, date_str(start), date_str(end)],
            |row| {
                Ok(PeriodMetrics {
                    log_count: row.get(0)?,
                    duration_sum: row.get(1)?,
                    active_members: row.get(2)?,
                })
            },
        )?;
        Ok(metrics)
    }

    /// Workout count and minutes per member within `[start, end]`.
    ///
    /// Rows come back in order of each member's first log in the window;
    /// ranking is left to the caller.
    pub fn member_rankings(
        &self,
        program_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Ranked>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            r#"
            SELECT m.id, m.name, COUNT(w.id), COALESCE(SUM(w.duration_minutes), 0)
            FROM workout_logs w
            JOIN members m ON m.id = w.member_id
            WHERE w.program_id = ?1 AND w.log_date >= ?2 AND w.log_date <= ?3
            GROUP BY m.id
            ORDER BY MIN(w.id)
            "#,
        )?;

        let rows = stmt
            .query_map(params![program_id, date_str(start), date_str(end)], |row| {
                Ok(Ranked {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    workouts: row.get(2)?,
                    minutes: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Workout count and minutes per workout type within `[start, end]`,
    /// in order of first appearance
    pub fn workout_type_rankings(
        &self,
        program_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Ranked>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            r#"
            SELECT workout_type, COUNT(*), COALESCE(SUM(duration_minutes), 0)
            FROM workout_logs
            WHERE program_id = ?1 AND log_date >= ?2 AND log_date <= ?3
            GROUP BY workout_type
            ORDER BY MIN(id)
            "#,
        )?;

        let rows = stmt
            .query_map(params![program_id, date_str(start), date_str(end)], |row| {
                let name: String = row.get(0)?;
                Ok(Ranked {
                    id: name.clone(),
                    name,
                    workouts: row.get(1)?,
                    minutes: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

fn validate_program(program: &Program) -> Result<()> {
    if program.name.is_empty() {
        return Err(Error::Validation("program name must not be empty".to_string()));
    }
    if let (Some(start), Some(end)) = (program.start_date, program.end_date) {
        if start > end {
            return Err(Error::Validation(format!(
                "program start_date {} is after end_date {}",
                start, end
            )));
        }
    }
    Ok(())
}

fn date_str(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Database, Program, Member) {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        let program = db
            .create_program("Spring Shred", Some(date(2024, 3, 1)), Some(date(2024, 5, 31)))
            .unwrap();
        let member = db.create_member("Ana", false).unwrap();
        db.enroll(&program.id, &member.id, ProgramRole::Member).unwrap();
        (db, program, member)
    }

    fn workout(program: &Program, member: &Member, kind: &str, day: NaiveDate, minutes: u32) -> WorkoutLogRow {
        WorkoutLogRow {
            program_id: program.id.clone(),
            member_id: member.id.clone(),
            workout_type: kind.to_string(),
            log_date: day,
            duration_minutes: minutes,
        }
    }

    #[test]
    fn test_program_roundtrip() {
        let (db, program, _) = setup();
        let loaded = db.get_program(&program.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Spring Shred");
        assert_eq!(loaded.start_date, Some(date(2024, 3, 1)));
        assert_eq!(loaded.end_date, Some(date(2024, 5, 31)));
        assert!(db.get_program("missing").unwrap().is_none());
    }

    #[test]
    fn test_create_program_rejects_inverted_dates() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        let err = db
            .create_program("Backwards", Some(date(2024, 2, 1)), Some(date(2024, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_partial_update() {
        let (db, program, _) = setup();

        let renamed = db
            .update_program(
                &program.id,
                &ProgramUpdate {
                    name: Some("Summer Shred".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Summer Shred");
        assert_eq!(renamed.end_date, Some(date(2024, 5, 31)));

        let cleared = db
            .update_program(
                &program.id,
                &ProgramUpdate {
                    end_date: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.end_date, None);
        assert_eq!(cleared.start_date, Some(date(2024, 3, 1)));

        let window = db.program_window(&program.id).unwrap();
        assert_eq!(window.bounds(), None);

        assert!(matches!(
            db.update_program("missing", &ProgramUpdate::default()),
            Err(Error::ProgramNotFound(_))
        ));
    }

    #[test]
    fn test_enrollment_roles() {
        let (db, program, member) = setup();
        assert_eq!(
            db.member_role(&program.id, &member.id).unwrap(),
            Some(ProgramRole::Member)
        );

        db.enroll(&program.id, &member.id, ProgramRole::Coach).unwrap();
        assert_eq!(
            db.member_role(&program.id, &member.id).unwrap(),
            Some(ProgramRole::Coach)
        );
        assert_eq!(db.count_members(&program.id).unwrap(), 1);
        assert_eq!(db.member_role(&program.id, "nobody").unwrap(), None);
    }

    #[test]
    fn test_log_workout_upserts() {
        let (db, program, member) = setup();
        let day = date(2024, 3, 5);
        db.log_workout(&workout(&program, &member, "Cardio", day, 30)).unwrap();
        db.log_workout(&workout(&program, &member, "Cardio", day, 45)).unwrap();
        db.log_workout(&workout(&program, &member, "Strength", day, 20)).unwrap();

        let rows = db.workout_rows(&program.id, day, day).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].duration_minutes, 45);
    }

    #[test]
    fn test_log_requires_enrollment() {
        let (db, program, _) = setup();
        let stranger = db.create_member("Bo", false).unwrap();
        let err = db
            .log_workout(&workout(&program, &stranger, "Yoga", date(2024, 3, 5), 30))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_log_health_validates() {
        let (db, program, member) = setup();
        let row = HealthLogRow {
            program_id: program.id.clone(),
            member_id: member.id.clone(),
            log_date: date(2024, 3, 5),
            sleep_hours: Some(f64::NAN),
            food_quality: Some(3),
        };
        assert!(matches!(
            db.log_health(row.clone()),
            Err(Error::NonFiniteValue { .. })
        ));

        let stored = db
            .log_health(HealthLogRow {
                sleep_hours: Some(7.44),
                ..row
            })
            .unwrap();
        assert_eq!(stored.sleep_hours, Some(7.4));

        let rows = db
            .health_rows(&program.id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sleep_hours, Some(7.4));
        assert_eq!(rows[0].food_quality, Some(3));
    }

    #[test]
    fn test_window_queries_are_inclusive() {
        let (db, program, member) = setup();
        for (day, minutes) in [(1, 10), (2, 20), (3, 30), (4, 40)] {
            db.log_workout(&workout(&program, &member, "Cardio", date(2024, 3, day), minutes))
                .unwrap();
        }

        let rows = db
            .workout_rows(&program.id, date(2024, 3, 2), date(2024, 3, 3))
            .unwrap();
        assert_eq!(rows.len(), 2);

        let metrics = db
            .period_metrics(&program.id, date(2024, 3, 2), date(2024, 3, 4))
            .unwrap();
        assert_eq!(metrics.log_count, 3);
        assert_eq!(metrics.duration_sum, 90);
        assert_eq!(metrics.active_members, 1);

        let empty = db
            .period_metrics(&program.id, date(2025, 1, 1), date(2025, 1, 31))
            .unwrap();
        assert_eq!(empty, PeriodMetrics::default());

        assert_eq!(db.all_workout_rows(&program.id).unwrap().len(), 4);
    }

    #[test]
    fn test_activity_dates_distinct() {
        let (db, program, member) = setup();
        let day = date(2024, 3, 5);
        db.log_workout(&workout(&program, &member, "Cardio", day, 30)).unwrap();
        db.log_workout(&workout(&program, &member, "Yoga", day, 30)).unwrap();
        db.log_workout(&workout(&program, &member, "Yoga", date(2024, 3, 6), 30))
            .unwrap();

        let dates = db.member_activity_dates(&program.id, &member.id).unwrap();
        assert_eq!(dates, vec![day, date(2024, 3, 6)]);
    }

    #[test]
    fn test_rankings_arrival_order() {
        let (db, program, ana) = setup();
        let bo = db.create_member("Bo", false).unwrap();
        db.enroll(&program.id, &bo.id, ProgramRole::Member).unwrap();

        db.log_workout(&workout(&program, &bo, "Yoga", date(2024, 3, 1), 30)).unwrap();
        db.log_workout(&workout(&program, &ana, "Cardio", date(2024, 3, 1), 20)).unwrap();
        db.log_workout(&workout(&program, &ana, "Yoga", date(2024, 3, 2), 25)).unwrap();

        let members = db
            .member_rankings(&program.id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        assert_eq!(members[0].name, "Bo");
        assert_eq!(members[1].name, "Ana");
        assert_eq!(members[1].workouts, 2);
        assert_eq!(members[1].minutes, 45);

        let types = db
            .workout_type_rankings(&program.id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        assert_eq!(types[0].name, "Yoga");
        assert_eq!(types[0].workouts, 2);
        assert_eq!(types[1].name, "Cardio");
    }
}
