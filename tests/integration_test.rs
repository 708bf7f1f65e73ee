use std::process::Command;
use tempfile::TempDir;

fn atrium_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_atrium"))
}

fn init(tmp: &TempDir) {
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["init"])
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn test_init_creates_atrium_directory() {
    let tmp = TempDir::new().unwrap();

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["init"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(tmp.path().join(".atrium").exists());
    assert!(tmp.path().join(".atrium/state.json").exists());
    assert!(tmp.path().join(".atrium/prefs.json").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["init"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Already initialized"));
}

#[test]
fn test_add_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "Test"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not an atrium workspace"));
}

#[test]
fn test_full_task_workflow() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    // Add two tasks
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args([
            "add",
            "task",
            "Renew passport",
            "--priority=high",
            "--category=personal",
            "--due=2026-09-15",
            "--tag=travel",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created task"));
    assert!(stdout.contains("Renew passport"));

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "Water plants", "--priority=low"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // List shows both
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Renew passport"));
    assert!(stdout.contains("Water plants"));

    // Grab the first task's id from the JSON listing
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["list", "tasks", "--json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    let id = tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["title"] == "Renew passport")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let prefix = &id[..8];

    // Get by prefix
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["get", prefix])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Renew passport"));
    assert!(stdout.contains("high"));

    // Search with filters
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["search", "priority:high"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Renew passport"));
    assert!(!stdout.contains("Water plants"));

    // Update
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["update", prefix, "--status=in-progress", "--tag=urgent-ish"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["get", prefix, "--json"])
        .output()
        .unwrap();
    let task: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(task["status"], "in-progress");
    assert!(task["tags"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t == "urgent-ish"));

    // Done toggles to completed
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["done", prefix])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("completed"));

    // Delete with --force skips the prompt
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["delete", prefix, "--force"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["list", "tasks", "--json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}

#[test]
fn test_unknown_id_prefix_fails() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["get", "deadbeef"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not found"));
}

#[test]
fn test_email_workflow() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args([
            "add",
            "email",
            "Quarterly invoice",
            "--from=Billing <billing@example.com>",
            "--importance=high",
            "--category=finance",
            "--action-required",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["list", "emails", "--json"])
        .output()
        .unwrap();
    let emails: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let email = &emails.as_array().unwrap()[0];
    assert_eq!(email["subject"], "Quarterly invoice");
    assert_eq!(email["importance"], "high");
    assert!(email["read_at"].is_null());
    let prefix = email["id"].as_str().unwrap()[..8].to_string();

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["read", &prefix])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["list", "emails", "--json"])
        .output()
        .unwrap();
    let emails: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(!emails.as_array().unwrap()[0]["read_at"].is_null());
}

#[test]
fn test_stats_reflects_stores() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "A"])
        .output()
        .unwrap();
    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "tx", "Coffee", "4.50"])
        .output()
        .unwrap();
    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "notification", "Heads up", "Something happened"])
        .output()
        .unwrap();

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["tasks"]["total"], 1);
    assert_eq!(stats["today_transactions"], 1);
    assert_eq!(stats["monthly_spent"], 4.5);
    assert_eq!(stats["unread_notifications"], 1);
}

#[test]
fn test_theme_persists_in_prefs() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["theme", "dark"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let raw = std::fs::read_to_string(tmp.path().join(".atrium/prefs.json")).unwrap();
    let prefs: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(prefs["theme"], "dark");

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["theme", "bogus"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid theme"));
}

#[test]
fn test_digest_renders_sections() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "Ship the release", "--priority=urgent"])
        .output()
        .unwrap();

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["digest"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("---\n"));
    assert!(stdout.contains("# Daily Brief"));
    assert!(stdout.contains("- [ ] Ship the release [urgent]"));
    assert!(stdout.contains("## Finances"));
}

#[test]
fn test_search_sort_and_limit() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "No due date"])
        .output()
        .unwrap();
    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "Due soon", "--due=2026-09-01"])
        .output()
        .unwrap();
    atrium_cmd()
        .current_dir(tmp.path())
        .args(["add", "task", "Due later", "--due=2026-12-01"])
        .output()
        .unwrap();

    // Ascending by due date; the undated task sorts last either way.
    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["search", "--sort=due", "--order=asc", "--json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Due soon", "Due later", "No due date"]);

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["search", "--sort=due", "--order=desc", "--json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Due later", "Due soon", "No due date"]);

    let output = atrium_cmd()
        .current_dir(tmp.path())
        .args(["search", "--limit=1", "--json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}
