#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_inputs(dir: &Path, course_type: &str) {
    fs::write(
        dir.join("faculty.csv"),
        "id,name,expertise,availability\nF1,Ada,CS101,Mon;Tue\n",
    )
    .unwrap();
    fs::write(
        dir.join("courses.json"),
        format!(r#"[{{"code":"CS101","name":"Intro","credits":2,"type":"{course_type}"}}]"#),
    )
    .unwrap();
    fs::write(dir.join("rooms.csv"), "id,name,type\nR1,Amphi,Lecture\n").unwrap();
}

fn cli() -> Command {
    Command::cargo_bin("edt-cli").unwrap()
}

#[test]
fn generate_show_and_check() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "Lecture");
    let d = dir.path();

    cli()
        .current_dir(d)
        .args([
            "generate",
            "--faculty",
            "faculty.csv",
            "--courses",
            "courses.json",
            "--rooms",
            "rooms.csv",
            "--seed",
            "7",
            "--out-json",
            "edt.json",
            "--out-csv",
            "edt.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Short Break"))
        .stdout(predicate::str::contains("2 of 2 period(s) placed"));

    assert!(d.join("edt.csv").exists());

    cli()
        .current_dir(d)
        .args(["show", "--timetable", "edt.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Intro / Ada / Amphi"));

    cli()
        .current_dir(d)
        .args([
            "check",
            "--timetable",
            "edt.json",
            "--faculty",
            "faculty.csv",
            "--courses",
            "courses.json",
            "--rooms",
            "rooms.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn incomplete_timetable_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "Lab");

    cli()
        .current_dir(dir.path())
        .args([
            "generate",
            "--faculty",
            "faculty.csv",
            "--courses",
            "courses.json",
            "--rooms",
            "rooms.csv",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("2 period(s) left unassigned"));
}

#[test]
fn empty_room_file_is_refused() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "Lecture");
    fs::write(dir.path().join("rooms.csv"), "id,name,type\n").unwrap();

    cli()
        .current_dir(dir.path())
        .args([
            "generate",
            "--faculty",
            "faculty.csv",
            "--courses",
            "courses.json",
            "--rooms",
            "rooms.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incomplete input"));
}

#[test]
fn grid_lists_forty_slots() {
    let output = cli().arg("grid").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 40);
    assert_eq!(stdout.lines().filter(|l| l.ends_with("Lunch Break")).count(), 5);
}

#[test]
fn grid_flag_only_where_it_is_used() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(
        d.join("grid.json"),
        r#"{"days": ["Mon", "Wed"], "rows": [{"start": "08:00:00", "end": "09:00:00"}]}"#,
    )
    .unwrap();

    let output = cli()
        .current_dir(d)
        .args(["grid", "--grid", "grid.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 2);

    cli()
        .current_dir(d)
        .args(["show", "--grid", "grid.json", "--timetable", "edt.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--grid"));
}
