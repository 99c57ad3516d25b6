use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("employeeflow").unwrap();
    cmd.current_dir(dir.path()).env_remove("EMPLOYEEFLOW_DB");
    cmd
}

#[test]
fn export_writes_every_seeded_row() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("staff.csv");
    cmd(&tmp)
        .args(["--db", "emp.db", "--export"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Exported 10 rows"));

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "ID,Name,Department,Position,Salary");
    assert_eq!(lines.len(), 11);
    assert!(text.contains("Albert Einstein,IT,Manager,55000"));
}

#[test]
fn export_without_filename_uses_auto_export() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["--db", "emp.db", "--export"])
        .assert()
        .success();
    assert!(tmp.path().join("auto_export.csv").exists());
}

#[test]
fn reruns_do_not_reseed() {
    let tmp = TempDir::new().unwrap();
    for _ in 0..2 {
        cmd(&tmp)
            .args(["--db", "emp.db", "--export", "out.csv"])
            .assert()
            .success()
            .stdout(contains("Exported 10 rows"));
    }
}

#[test]
fn empty_database_exports_nothing() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["--db", "emp.db", "--no-seed", "--export", "out.csv"])
        .assert()
        .success()
        .stdout(contains("No rows to export."));
    assert!(!tmp.path().join("out.csv").exists());
}

#[test]
fn database_directory_is_created() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["--db", "data/hr/Employees.db", "--export", "out.csv"])
        .assert()
        .success();
    assert!(tmp.path().join("data/hr/Employees.db").exists());
}

#[test]
fn db_path_can_come_from_env() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .env("EMPLOYEEFLOW_DB", "from_env.db")
        .args(["--export", "out.csv"])
        .assert()
        .success();
    assert!(tmp.path().join("from_env.db").exists());
}

#[test]
fn help_lists_flags() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--db"))
        .stdout(contains("--no-seed"))
        .stdout(contains("--export"));
}
