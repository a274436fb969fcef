use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a test database
fn onboard_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("onboard").expect("Failed to find onboard binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Registers a newbie starting far in the future, which resolves to module A
/// (every step included, step 1 holds tasks 1 to 3).
fn register_newbie(temp_dir: &TempDir) {
    onboard_cmd(temp_dir)
        .args([
            "instructor",
            "register",
            "Ada Park",
            "--email",
            "ada@example.com",
            "--type",
            "newbie",
            "--start-date",
            "2099-09-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Registered instructor with ID: 1 in module A (Nurturing)",
        ));
}

#[test]
fn test_cli_list_empty_instructors() {
    let temp_dir = create_cli_test_environment();

    onboard_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No instructors found."));
}

#[test]
fn test_cli_module_resolve() {
    let temp_dir = create_cli_test_environment();

    onboard_cmd(&temp_dir)
        .args([
            "module",
            "resolve",
            "--type",
            "experienced",
            "--start-date",
            "2030-01-10",
            "--as-of",
            "2030-01-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Module D (Quick Adaptation)"))
        .stdout(predicate::str::contains("- Timing: urgent"))
        .stdout(predicate::str::contains("| 6 | First Week Review | Skipped |"));

    onboard_cmd(&temp_dir)
        .args([
            "module",
            "resolve",
            "--type",
            "experienced",
            "--start-date",
            "2030-01-15",
            "--as-of",
            "2030-01-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Module C (Alignment)"));
}

#[test]
fn test_cli_module_show_and_step_type() {
    let temp_dir = create_cli_test_environment();

    onboard_cmd(&temp_dir)
        .args(["module", "show", "F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Module F (Minimal Check)"))
        .stdout(predicate::str::contains("| 5 | First Class Preparation | Delayed |"));

    onboard_cmd(&temp_dir)
        .args(["module", "step-type", "b", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 5 of module b: Delayed"));

    onboard_cmd(&temp_dir)
        .args(["module", "step-type", "B", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-check"));

    onboard_cmd(&temp_dir)
        .args(["module", "show", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input for field 'module'"));
}

#[test]
fn test_cli_register_show_and_update_workflow() {
    let temp_dir = create_cli_test_environment();
    register_newbie(&temp_dir);

    onboard_cmd(&temp_dir)
        .args(["instructor", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Ada Park"))
        .stdout(predicate::str::contains("- Progress: 0/6 steps completed"))
        .stdout(predicate::str::contains("Step 1: Orientation (PM-led, ○ Pending)"));

    onboard_cmd(&temp_dir)
        .args(["task", "update", "1", "--status", "completed", "--expected-version", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated step with ID: 1"))
        .stdout(predicate::str::contains("- Task 1 status: completed"))
        .stdout(predicate::str::contains("Progress: 1/3 tasks (33%)"));

    onboard_cmd(&temp_dir)
        .args(["task", "update", "2", "--status", "skipped"])
        .assert()
        .success();

    onboard_cmd(&temp_dir)
        .args(["task", "disable", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Task 3 disabled"))
        .stdout(predicate::str::contains("✓ Completed"))
        .stdout(predicate::str::contains("Progress: 1/2 tasks (50%)"));

    onboard_cmd(&temp_dir)
        .args(["step", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[-] Skipped"))
        .stdout(predicate::str::contains("_disabled_"));

    onboard_cmd(&temp_dir)
        .args(["instructor", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Ada Park (ID: 1) (1/6)"));
}

#[test]
fn test_cli_version_conflict() {
    let temp_dir = create_cli_test_environment();
    register_newbie(&temp_dir);

    onboard_cmd(&temp_dir)
        .args(["task", "update", "1", "--status", "in-progress"])
        .assert()
        .success();

    onboard_cmd(&temp_dir)
        .args(["task", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(task 1, "))
        .stdout(predicate::str::contains("v1)"));

    onboard_cmd(&temp_dir)
        .args(["task", "show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID 999 not found"));

    onboard_cmd(&temp_dir)
        .args(["task", "update", "1", "--status", "completed", "--expected-version", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("modified concurrently"));
}

#[test]
fn test_cli_add_task() {
    let temp_dir = create_cli_test_environment();
    register_newbie(&temp_dir);

    onboard_cmd(&temp_dir)
        .args(["task", "add", "1", "Upload ID scan", "--kind", "file-upload"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID:"))
        .stdout(predicate::str::contains("Upload ID scan"))
        .stdout(predicate::str::contains("file_upload"));

    onboard_cmd(&temp_dir)
        .args(["task", "add", "999", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step with ID 999 not found"));
}

#[test]
fn test_cli_register_rejects_bad_input() {
    let temp_dir = create_cli_test_environment();

    onboard_cmd(&temp_dir)
        .args([
            "instructor",
            "register",
            "Bo Lin",
            "--email",
            "not-an-email",
            "--type",
            "experienced",
            "--start-date",
            "2099-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));

    onboard_cmd(&temp_dir)
        .args([
            "instructor",
            "register",
            "Bo Lin",
            "--email",
            "bo@example.com",
            "--type",
            "experienced",
            "--start-date",
            "next week",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start_date"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    register_newbie(&temp_dir);

    onboard_cmd(&temp_dir)
        .args(["instructor", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmed"));

    onboard_cmd(&temp_dir)
        .args(["instructor", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted instructor 'Ada Park' (ID: 1) and 6 steps",
        ));

    onboard_cmd(&temp_dir)
        .args(["instructor", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Instructor with ID 1 not found"));
}

#[test]
fn test_cli_json_output() {
    let temp_dir = create_cli_test_environment();
    register_newbie(&temp_dir);

    let output = onboard_cmd(&temp_dir)
        .args(["--json", "instructor", "show", "1"])
        .output()
        .expect("Failed to run onboard");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    assert_eq!(value["name"], "Ada Park");
    assert_eq!(value["module"], "A_NURTURING");
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["steps"][0]["step_type"], "PM_LED");
}
