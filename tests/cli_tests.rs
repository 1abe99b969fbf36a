use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::{hl, hl_with_home, init_db, setup_test_db, test_home};

fn onboard(db_path: &str) {
    hl().args([
        "--db", db_path, "onboard", "--gender", "Female", "--age", "31", "--weight", "70",
        "--height", "168",
    ])
    .assert()
    .success()
    .stdout(contains("Welcome aboard"))
    .stdout(contains("2310 mL"));
}

#[test]
fn test_init_creates_db() {
    let db_path = setup_test_db("init_creates_db");

    hl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok(), "db file must exist");
}

#[test]
fn test_add_and_today() {
    let db_path = setup_test_db("add_and_today");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add", "250"])
        .assert()
        .success()
        .stdout(contains("Logged 250 mL"));

    hl().args(["--db", &db_path, "add", "1000"])
        .assert()
        .success()
        .stdout(contains("Today: 1.25 L / 2.00 L"));

    hl().args(["--db", &db_path, "today", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_ml\": 1250"))
        .stdout(contains("\"goal_ml\": 2000"));
}

#[test]
fn test_add_without_amount_logs_one_cup() {
    let db_path = setup_test_db("add_one_cup");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add"])
        .assert()
        .success()
        .stdout(contains("Logged 200 mL"));
}

#[test]
fn test_add_rejects_non_positive_amount() {
    let db_path = setup_test_db("add_rejects");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    hl().args(["--db", &db_path, "add", "-50"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    hl().args(["--db", &db_path, "list", "--events"])
        .assert()
        .success()
        .stdout(contains("No drinks logged yet."));
}

#[test]
fn test_add_at_past_time() {
    let db_path = setup_test_db("add_at");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add", "--at", "2025-01-10 08:30", "300"])
        .assert()
        .success()
        .stdout(contains("2025-01-10 08:30"));

    hl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2025-01-10"))
        .stdout(contains("300 mL"));

    // Not part of today's total.
    hl().args(["--db", &db_path, "today", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_ml\": 0"));

    hl().args(["--db", &db_path, "add", "--at", "yesterday", "300"])
        .assert()
        .failure();
}

#[test]
fn test_del_event() {
    let db_path = setup_test_db("del_event");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add", "400"])
        .assert()
        .success()
        .stdout(contains("(id 1)"));

    hl().args(["--db", &db_path, "del", "999"])
        .assert()
        .success()
        .stdout(contains("Nothing deleted"));

    hl().args(["--db", &db_path, "del", "1"])
        .assert()
        .success()
        .stdout(contains("Event #1 has been deleted."));

    hl().args(["--db", &db_path, "today", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_ml\": 0"));
}

#[test]
fn test_list_and_clear() {
    let db_path = setup_test_db("list_and_clear");
    init_db(&db_path);

    hl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No drinks logged yet."));

    for amount in ["200", "300"] {
        hl().args(["--db", &db_path, "add", amount])
            .assert()
            .success();
    }

    hl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Today"))
        .stdout(contains("total 500 mL"));

    hl().args(["--db", &db_path, "list", "--events", "--json"])
        .assert()
        .success()
        .stdout(contains("\"amount_ml\": 300"));

    hl().args(["--db", &db_path, "clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("2 events deleted"));

    hl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No drinks logged yet."));
}

#[test]
fn test_first_open_keeps_stdout_clean() {
    let db_path = setup_test_db("first_open_clean");

    // No `init`: the schema is created on first open, silently.
    hl().args(["--db", &db_path, "today", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(contains("Migration applied").not());

    hl().args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("0 pending"))
        .stdout(contains("Migration completed."));
}

#[test]
fn test_onboard_rejects_zero_cup() {
    let db_path = setup_test_db("onboard_zero_cup");
    init_db(&db_path);

    hl().args([
        "--db", &db_path, "onboard", "--age", "31", "--weight", "70", "--height", "168",
        "--cup", "0",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid amount"));

    hl().args(["--db", &db_path, "add"])
        .assert()
        .success()
        .stdout(contains("Logged 200 mL"));
}

#[test]
fn test_profile_without_onboarding() {
    let db_path = setup_test_db("profile_unset");
    init_db(&db_path);

    hl().args(["--db", &db_path, "profile"])
        .assert()
        .success()
        .stdout(contains("No profile yet"));

    hl().args(["--db", &db_path, "profile", "--goal", "2500"])
        .assert()
        .failure()
        .stderr(contains("No profile found"));

    hl().args(["--db", &db_path, "profile", "--json"])
        .assert()
        .success()
        .stdout(contains("\"state\": \"unset\""));
}

#[test]
fn test_onboard_registers_reminder() {
    let db_path = setup_test_db("onboard_reminder");
    init_db(&db_path);
    onboard(&db_path);

    hl().args(["--db", &db_path, "remind", "--status"])
        .assert()
        .success()
        .stdout(contains("WaterReminderWork"))
        .stdout(contains("every 10 min"));

    hl().args(["--db", &db_path, "today", "--json"])
        .assert()
        .success()
        .stdout(contains("\"goal_ml\": 2310"));
}

#[test]
fn test_profile_updates_follow_rules() {
    let db_path = setup_test_db("profile_rules");
    init_db(&db_path);
    onboard(&db_path);

    hl().args(["--db", &db_path, "profile", "--interval", "5"])
        .assert()
        .success()
        .stdout(contains("interval=15"))
        .stdout(contains("Reminders every 15 min."));

    hl().args(["--db", &db_path, "profile", "--goal", "50000"])
        .assert()
        .success()
        .stdout(contains("goal=10000"));

    hl().args(["--db", &db_path, "profile", "--cup", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    hl().args(["--db", &db_path, "profile", "--notifications", "off"])
        .assert()
        .success()
        .stdout(contains("Reminders are off."));

    hl().args(["--db", &db_path, "remind"])
        .assert()
        .success()
        .stdout(contains("No reminder scheduled."));

    hl().args(["--db", &db_path, "profile", "--notifications", "on"])
        .assert()
        .success()
        .stdout(contains("Reminders every 15 min."));
}

#[test]
fn test_remind_run_posts_reminders() {
    let db_path = setup_test_db("remind_run");
    init_db(&db_path);
    onboard(&db_path);

    hl().args([
        "--db", &db_path, "remind", "--run", "--ticks", "2", "--every-secs", "0",
    ])
    .assert()
    .success()
    .stdout(contains("Time to Hydrate!"))
    .stdout(contains("Stay healthy by drinking a glass of water now."))
    .stdout(contains("2 reminder(s) delivered."));
}

#[test]
fn test_remind_run_without_registration() {
    let db_path = setup_test_db("remind_run_none");
    init_db(&db_path);

    hl().args(["--db", &db_path, "remind", "--sync"])
        .assert()
        .success()
        .stdout(contains("Reminder cancelled"));

    hl().args(["--db", &db_path, "remind", "--run", "--every-secs", "0"])
        .assert()
        .success()
        .stdout(contains("0 reminder(s) delivered."));
}

#[test]
fn test_log_print_records_operations() {
    let db_path = setup_test_db("log_print");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add", "250"])
        .assert()
        .success();

    hl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db(&db_path);

    hl().args(["--db", &db_path, "add", "250"])
        .assert()
        .success();

    hl().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("250"));

    hl().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."));
}

#[test]
fn test_weather_requires_coordinates() {
    let home = test_home("weather_no_coords");
    fs::remove_file(home.join("hydroledger.conf")).ok();
    let db_path = setup_test_db("weather_no_coords");

    hl_with_home(&home)
        .args(["--db", &db_path, "weather"])
        .assert()
        .failure()
        .stderr(contains("coordinates missing"));
}

#[test]
fn test_weather_unreachable_is_not_an_error() {
    let home = test_home("weather_unreachable");
    fs::write(
        home.join("hydroledger.conf"),
        "weather_base_url: \"http://127.0.0.1:1/\"\nlatitude: 45.46\nlongitude: 9.19\n",
    )
    .unwrap();
    let db_path = setup_test_db("weather_unreachable");

    hl_with_home(&home)
        .args(["--db", &db_path, "weather"])
        .assert()
        .success()
        .stdout(contains("Weather unavailable."));
}
