use chrono::NaiveDate;
use gymtrack_core::{Database, HealthLogRow, ProgramRole, WorkoutLogRow};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

struct Seeded {
    program_id: String,
    ana_id: String,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
        }
    }

    fn db_path(&self) -> PathBuf {
        self.xdg_data.join("gymtrack/gymtrack.db")
    }

    fn write_config(&self, contents: &str) {
        let dir = self.xdg_config.join("gymtrack");
        fs::create_dir_all(&dir).expect("failed to create config dir");
        fs::write(dir.join("config.toml"), contents).expect("failed to write config");
    }

    /// One March 2024 program: Ana logs Mar 11-14, Bo logs Mar 12.
    fn seed(&self) -> Seeded {
        let db = Database::open(&self.db_path()).expect("failed to open db");
        db.migrate().expect("failed to migrate db");

        let program = db
            .create_program("Spring Shred", Some(date(3, 1)), Some(date(3, 31)))
            .expect("failed to create program");
        let ana = db.create_member("Ana", false).expect("failed to create member");
        let bo = db.create_member("Bo", false).expect("failed to create member");
        db.enroll(&program.id, &ana.id, ProgramRole::Owner)
            .expect("failed to enroll");
        db.enroll(&program.id, &bo.id, ProgramRole::Member)
            .expect("failed to enroll");

        for day in 11..=14 {
            db.log_workout(&workout(&program.id, &ana.id, "Strength", day, 45))
                .expect("failed to log workout");
        }
        db.log_workout(&workout(&program.id, &bo.id, "Yoga", 12, 30))
            .expect("failed to log workout");
        db.log_health(HealthLogRow {
            program_id: program.id.clone(),
            member_id: ana.id.clone(),
            log_date: date(3, 14),
            sleep_hours: Some(8.0),
            food_quality: Some(5),
        })
        .expect("failed to log health");

        Seeded {
            program_id: program.id,
            ana_id: ana.id,
        }
    }
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn workout(program_id: &str, member_id: &str, kind: &str, day: u32, minutes: u32) -> WorkoutLogRow {
    WorkoutLogRow {
        program_id: program_id.to_string(),
        member_id: member_id.to_string(),
        workout_type: kind.to_string(),
        log_date: date(3, day),
        duration_minutes: minutes,
    }
}

fn run_report(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("gymtrack-report"));

    Command::new(bin_path)
        .args(args)
        .arg("--today")
        .arg("2024-03-14")
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute gymtrack-report: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "gymtrack-report {} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        output.status,
        stdout,
        stderr
    );
}

fn run_json(env: &CliTestEnv, args: &[&str]) -> serde_json::Value {
    let output = run_report(env, args);
    assert_success(args, &output);
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn dashboard_json_reports_week_totals_and_trends() {
    let env = CliTestEnv::new();
    let seeded = env.seed();

    let json = run_json(
        &env,
        &[
            "dashboard",
            "--program",
            &seeded.program_id,
            "--period",
            "week",
            "--export",
            "json",
        ],
    );

    assert_eq!(json["program_name"], "Spring Shred");
    assert_eq!(json["period"], "week");
    assert_eq!(json["window"]["start"], "2024-03-08");
    assert_eq!(json["window"]["end"], "2024-03-14");

    let totals = &json["summary"]["totals"];
    assert_eq!(totals["workouts"], 5);
    assert_eq!(totals["minutes"], 4 * 45 + 30);
    assert_eq!(totals["active_members"], 2);
    assert_eq!(totals["at_risk_members"], 0);

    assert_eq!(json["timeline"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["summary"]["top_performers"][0]["name"], "Ana");
    assert!(json["summary"]["trends"].is_object());
    assert_eq!(json["summary"]["progress"]["progress_percent"], 43);
}

#[test]
fn dashboard_terminal_and_markdown_render() {
    let env = CliTestEnv::new();
    let seeded = env.seed();

    let args = ["dashboard", "--program", &seeded.program_id];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Spring Shred - Last 7 Days"), "got:\n{stdout}");
    assert!(stdout.contains("TOP PERFORMERS"));

    let args = [
        "dashboard",
        "--program",
        &seeded.program_id,
        "--period",
        "program",
        "--export",
        "md",
    ];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Spring Shred: Program"), "got:\n{stdout}");
    assert!(stdout.contains("| Workouts | 5 |"));
    // No equal-length predecessor for the program window
    assert!(!stdout.contains("## Trends"));
}

#[test]
fn config_can_disable_trends() {
    let env = CliTestEnv::new();
    let seeded = env.seed();
    env.write_config("[analytics]\ninclude_trends = false\ntop_performers = 1\n");

    let json = run_json(
        &env,
        &[
            "dashboard",
            "--program",
            &seeded.program_id,
            "--export",
            "json",
        ],
    );
    assert!(json["summary"]["trends"].is_null());
    assert_eq!(
        json["summary"]["top_performers"].as_array().map(Vec::len),
        Some(1)
    );
}

#[test]
fn timeline_streak_and_distribution_emit_json() {
    let env = CliTestEnv::new();
    let seeded = env.seed();

    let workouts = run_json(
        &env,
        &[
            "timeline",
            "--program",
            &seeded.program_id,
            "--period",
            "month",
        ],
    );
    assert_eq!(workouts["label"], "March 2024");
    let points = workouts["points"].as_array().expect("points array");
    assert_eq!(points.len(), 31);
    assert_eq!(points[11]["date"], "2024-03-12");
    assert_eq!(points[11]["workouts"], 2);

    let health = run_json(
        &env,
        &[
            "timeline",
            "--program",
            &seeded.program_id,
            "--kind",
            "health",
        ],
    );
    let last = &health["points"][6];
    assert_eq!(last["date"], "2024-03-14");
    assert_eq!(last["sleep_avg"], 8.0);
    assert_eq!(last["food_avg"], 5);

    let streak = run_json(
        &env,
        &[
            "streak",
            "--program",
            &seeded.program_id,
            "--member",
            &seeded.ana_id,
        ],
    );
    assert_eq!(streak["current"], 4);
    assert_eq!(streak["longest"], 4);
    assert_eq!(streak["milestones"][0]["days"], 3);
    assert_eq!(streak["milestones"][0]["achieved"], true);

    let distribution = run_json(&env, &["distribution", "--program", &seeded.program_id]);
    let days = distribution.as_array().expect("distribution array");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], "Sunday");
    // Tuesday Mar 12: Ana and Bo
    assert_eq!(days[2]["workouts"], 2);
}

#[test]
fn invalid_input_fails_with_message() {
    let env = CliTestEnv::new();
    let seeded = env.seed();

    let output = run_report(
        &env,
        &[
            "dashboard",
            "--program",
            &seeded.program_id,
            "--period",
            "fortnight",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid period: fortnight"), "got:\n{stderr}");

    let output = run_report(&env, &["distribution", "--program", "missing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("program not found: missing"), "got:\n{stderr}");
}
