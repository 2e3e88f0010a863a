use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("pomoapp-{nanos}-{file_name}"))
}

#[test]
fn add_command_succeeds() {
    let exe = env!("CARGO_BIN_EXE_pomo");
    let store_path = temp_path("cli-add.json");
    let output = Command::new(exe)
        .args(["add", "demo task"])
        .env("POMOAPP_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: demo task"));
}

#[test]
fn add_command_persists_record() {
    let exe = env!("CARGO_BIN_EXE_pomo");
    let store_path = temp_path("cli-add-persist.json");
    let output = Command::new(exe)
        .args(["add", "demo task"])
        .env("POMOAPP_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");
    assert!(output.status.success());

    let content = std::fs::read_to_string(&store_path).expect("store file");
    std::fs::remove_file(&store_path).ok();

    let tasks: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    assert_eq!(tasks[0]["name"], "demo task");
    assert_eq!(tasks[0]["sessions"], 0);
}

#[test]
fn add_command_rejects_missing_name() {
    let exe = env!("CARGO_BIN_EXE_pomo");
    let store_path = temp_path("cli-add-missing.json");
    let output = Command::new(exe)
        .args(["add"])
        .env("POMOAPP_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation"));
}

#[test]
fn add_command_rejects_blank_name() {
    let exe = env!("CARGO_BIN_EXE_pomo");
    let store_path = temp_path("cli-add-blank.json");
    let output = Command::new(exe)
        .args(["add", "   "])
        .env("POMOAPP_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation"));
}
