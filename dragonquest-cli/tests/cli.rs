use std::io::Write;
use std::process::{Command, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "dragonquest-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn play(args: &[&str], script: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_dragonquest");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run cli");
    // The game may exit before reading everything; a broken pipe is fine.
    let _ = child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes());
    child.wait_with_output().expect("wait for cli")
}

#[test]
fn cli_plays_the_sword_and_shield_scenario() {
    let output = play(
        &["--name", "Piper", "--no-color"],
        "1\n1\n1\n1\n3\n2\n3\n5\n7\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("The Dragon's Quest"));
    assert!(stdout.contains("Welcome, Piper!"));
    assert!(stdout.contains("You have 2 gold remaining!"));
    assert!(stdout.contains("You gained 10 gold from its hoard!"));
    assert!(stdout.contains("Health is now: 85"));
    assert!(stdout.contains("Gold:       12"));
}

#[test]
fn cli_writes_json_report_on_eof() {
    let output_path = temp_path("report");
    let output = Command::new(env!("CARGO_BIN_EXE_dragonquest"))
        .args(["--name", "Sol", "--report", "json", "--output"])
        .arg(&output_path)
        .stdin(Stdio::null())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let content = std::fs::read_to_string(&output_path).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["name"], "Sol");
    assert_eq!(report["health"], 100);
    assert_eq!(report["ending"]["result"], "quit");
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn cli_rejects_a_missing_catalog_file() {
    let output = play(
        &["--name", "Ash", "--catalog", "/no/such/catalog.json"],
        "7\n",
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start a new game"));
}
