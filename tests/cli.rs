use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

/// `kb` isolated from any config in the caller's home directory.
fn kb(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kb").expect("binary");
    cmd.env("KANBAN_CONFIG", dir.join("missing.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run kb");
    assert!(output.status.success(), "kb failed: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("json output")
}

const SMALL_SEED: &str = r#"{
  "categories": [],
  "tasks": [
    {
      "id": "a",
      "title": "Buy milk",
      "category": "Errands",
      "priority": "low",
      "status": "todo",
      "dueDate": "2024-06-10",
      "createdAt": "2024-06-01T09:00:00Z",
      "archived": false
    },
    {
      "id": "b",
      "title": "Ship report",
      "description": "quarterly numbers",
      "category": "Work",
      "priority": "high",
      "status": "completed",
      "dueDate": "2024-06-11",
      "createdAt": "2024-06-01T10:00:00Z",
      "archived": true
    }
  ]
}"#;

fn write_seed(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("seed.json");
    fs::write(&path, SMALL_SEED).expect("write seed");
    path
}

#[test]
fn kb_help_works() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Kanban task board"));
}

#[test]
fn subcommand_help_works() {
    let dir = TempDir::new().expect("tempdir");
    for sub in ["board", "list", "show", "add", "update", "move", "delete", "stats", "categories", "category"] {
        kb(dir.path()).arg(sub).arg("--help").assert().success();
    }
}

#[test]
fn list_uses_builtin_board() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Prepare quarterly report"));
}

#[test]
fn list_filters_by_status() {
    let dir = TempDir::new().expect("tempdir");
    let tasks = json_stdout(kb(dir.path()).args(["list", "--status", "completed", "--json"]));
    let tasks = tasks.as_array().expect("array");
    assert_eq!(tasks.len(), 2);
    for task in tasks {
        assert_eq!(task["status"], "completed");
        assert!(task["completedAt"].is_string());
    }
}

#[test]
fn list_accepts_display_status_spelling() {
    let dir = TempDir::new().expect("tempdir");
    let tasks = json_stdout(kb(dir.path()).args(["list", "--status", "In Progress", "--json"]));
    assert!(tasks.as_array().expect("array").iter().all(|t| t["status"] == "in-progress"));
}

#[test]
fn seed_file_replaces_builtin_board() {
    let dir = TempDir::new().expect("tempdir");
    let seed = write_seed(&dir);

    let tasks = json_stdout(kb(dir.path()).arg("--seed").arg(&seed).args(["list", "--query", "MILK", "--json"]));
    let tasks = tasks.as_array().expect("array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], "a");
    assert_eq!(tasks[0]["description"], "");

    let visible = json_stdout(kb(dir.path()).arg("--seed").arg(&seed).args(["list", "--hide-archived", "--json"]));
    assert_eq!(visible.as_array().expect("array").len(), 1);
}

#[test]
fn seeded_completed_task_gains_completion_stamp() {
    let dir = TempDir::new().expect("tempdir");
    let seed = write_seed(&dir);
    let task = json_stdout(kb(dir.path()).arg("--seed").arg(&seed).args(["show", "b", "--json"]));
    assert!(task["completedAt"].is_string());
}

#[test]
fn add_fills_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let task = json_stdout(kb(dir.path()).args(["add", "Water plants", "--json"]));
    assert_eq!(task["title"], "Water plants");
    assert_eq!(task["category"], "Work");
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["status"], "todo");
    assert_eq!(task["archived"], false);
    assert!(task["completedAt"].is_null());
    assert!(!task["id"].as_str().expect("id").is_empty());
}

#[test]
fn add_uses_configured_default_category() {
    let dir = TempDir::new().expect("tempdir");
    let seed = write_seed(&dir);
    let config = dir.path().join("config.toml");
    fs::write(&config, "[defaults]\ncategory = \"Inbox\"\n").expect("write config");

    let task = json_stdout(
        kb(dir.path())
            .arg("--seed")
            .arg(&seed)
            .arg("--config")
            .arg(&config)
            .args(["add", "Call plumber", "--json"]),
    );
    assert_eq!(task["category"], "Inbox");
}

#[test]
fn add_completed_task_is_stamped() {
    let dir = TempDir::new().expect("tempdir");
    let task = json_stdout(kb(dir.path()).args(["add", "Done already", "--status", "completed", "--json"]));
    assert!(task["completedAt"].is_string());
}

#[test]
fn add_rejects_blank_title() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .args(["add", "   "])
        .assert()
        .code(2)
        .stderr(contains("Task title is required"));
}

#[test]
fn add_rejects_unknown_due_date() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .args(["add", "Plan", "--due", "someday"])
        .assert()
        .code(2)
        .stderr(contains("unrecognised due date"));
}

#[test]
fn add_rejects_out_of_range_due_date() {
    let dir = TempDir::new().expect("tempdir");
    for due in ["in 100000000d", "in 400000000000000000m"] {
        kb(dir.path())
            .args(["add", "Plan", "--due", due])
            .assert()
            .code(2)
            .stderr(contains("unrecognised due date"));
    }
}

#[test]
fn move_to_completed_stamps_completion() {
    let dir = TempDir::new().expect("tempdir");
    let task = json_stdout(kb(dir.path()).args(["move", "2", "completed", "--json"]));
    assert_eq!(task["status"], "completed");
    assert!(task["completedAt"].is_string());
}

#[test]
fn update_away_from_completed_clears_stamp() {
    let dir = TempDir::new().expect("tempdir");
    let task = json_stdout(kb(dir.path()).args(["update", "4", "--status", "todo", "--json"]));
    assert_eq!(task["id"], "4");
    assert!(task["completedAt"].is_null());
}

#[test]
fn delete_unknown_task_is_user_error() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .args(["delete", "does-not-exist"])
        .assert()
        .code(2)
        .stderr(contains("Task not found"));
}

#[test]
fn json_errors_are_structured() {
    let dir = TempDir::new().expect("tempdir");
    let output = kb(dir.path())
        .args(["archive", "nope", "--json"])
        .output()
        .expect("run kb");
    assert_eq!(output.status.code(), Some(2));
    let body: Value = serde_json::from_slice(&output.stdout).expect("json error");
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["code"], 2);
}

#[test]
fn malformed_seed_is_operation_failure() {
    let dir = TempDir::new().expect("tempdir");
    let seed = dir.path().join("broken.json");
    fs::write(&seed, "{ not json").expect("write seed");
    kb(dir.path())
        .arg("--seed")
        .arg(&seed)
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn stats_reports_orphaned_categories() {
    let dir = TempDir::new().expect("tempdir");
    let seed = write_seed(&dir);
    let report = json_stdout(kb(dir.path()).arg("--seed").arg(&seed).args(["stats", "--json"]));
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["byStatus"].as_array().expect("array").len(), 3);
    let orphans = report["orphanedCategories"].as_array().expect("array");
    assert_eq!(orphans, &vec![Value::from("Errands"), Value::from("Work")]);
}

#[test]
fn list_columns_json_uses_camel_case_keys() {
    let dir = TempDir::new().expect("tempdir");
    let columns = json_stdout(kb(dir.path()).args(["list", "--columns", "--json"]));
    assert_eq!(columns["inProgress"].as_array().expect("array").len(), 2);
    assert!(columns.get("in_progress").is_none());
    assert_eq!(columns["todo"].as_array().expect("array").len(), 4);
}

#[test]
fn category_update_rejects_blank_name() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .args(["category", "update", "1", "--name", "   "])
        .assert()
        .code(2)
        .stderr(contains("Category name is required"));
}

#[test]
fn categories_recount_skips_archived() {
    let dir = TempDir::new().expect("tempdir");
    let categories = json_stdout(kb(dir.path()).args(["categories", "--recount", "--json"]));
    let work = categories
        .as_array()
        .expect("array")
        .iter()
        .find(|c| c["name"] == "Work")
        .expect("Work category");
    assert_eq!(work["taskCount"], 4);
}

#[test]
fn category_add_uses_default_color() {
    let dir = TempDir::new().expect("tempdir");
    let category = json_stdout(kb(dir.path()).args(["category", "add", "Errands", "--json"]));
    assert_eq!(category["name"], "Errands");
    assert_eq!(category["color"], "#3B82F6");
    assert_eq!(category["taskCount"], 0);
}

#[test]
fn completions_generate_without_seed() {
    let dir = TempDir::new().expect("tempdir");
    kb(dir.path())
        .arg("--seed")
        .arg(dir.path().join("absent.json"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("kb"));
}
