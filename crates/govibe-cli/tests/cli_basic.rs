//! Basic CLI E2E tests.
//!
//! Each test points the binary at its own temporary config directory.
//! Commands that reach the backend run against a local mock server.

use std::io::Write;
use std::process::{Command, Stdio};

use mockito::Matcher;
use tempfile::TempDir;

/// Run the CLI and return (exit code, stdout, stderr).
fn run_cli(dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_govibe"))
        .args(args)
        .env("GOVIBE_CONFIG_DIR", dir.path())
        .env_remove("GOVIBE_API_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn config_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_validate_email() {
    let dir = config_dir();
    let (code, stdout, _) = run_cli(&dir, &["validate", "email", "jane.doe@example.com"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("valid"));

    let (code, _, stderr) = run_cli(&dir, &["validate", "email", "jane@localhost"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Email"));
}

#[test]
fn test_validate_password_policies() {
    let dir = config_dir();
    let (code, _, _) = run_cli(&dir, &["validate", "password", "abcd123!"]);
    assert_eq!(code, 0);

    let (code, _, stderr) = run_cli(&dir, &["validate", "password", "abcdefgh"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("at least 8 characters"));

    let (code, _, _) = run_cli(
        &dir,
        &["validate", "password", "abcd123!", "--policy", "lenient"],
    );
    assert_eq!(code, 0);
}

#[test]
fn test_config_written_on_first_use() {
    let dir = config_dir();
    let (code, stdout, _) = run_cli(&dir, &["config", "get", "api.base_url"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "http://localhost:3000");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_and_get() {
    let dir = config_dir();
    let (code, _, _) = run_cli(&dir, &["config", "set", "countdown.tick_ms", "500"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(&dir, &["config", "get", "countdown.tick_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "500");
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = config_dir();
    let (code, _, _) = run_cli(&dir, &["config", "set", "countdown.tick_ms", "0"]);
    assert_eq!(code, 1);

    let (code, _, stderr) = run_cli(&dir, &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let dir = config_dir();
    let (code, stdout, _) = run_cli(&dir, &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["countdown"]["challenge_target_repetitions"], 10);
    assert_eq!(parsed["validation"]["password_policy"], "strict");
}

#[test]
fn test_exercise_list() {
    let dir = config_dir();
    let (code, stdout, _) = run_cli(&dir, &["exercise", "list"]);
    assert_eq!(code, 0);
    for name in ["squat", "pushup", "running", "yoga"] {
        assert!(stdout.contains(name), "missing {name}");
    }

    let (code, stdout, _) = run_cli(&dir, &["exercise", "list", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(4));
}

#[test]
fn test_challenge_url() {
    let dir = config_dir();
    let (code, stdout, _) = run_cli(
        &dir,
        &["challenge", "url", "--exercise", "push-up", "--difficulty", "hard"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("exercise=pushup"));
    assert!(stdout.contains("difficulty=hard"));
    assert!(stdout.contains("progression=true"));

    let (code, _, _) = run_cli(&dir, &["challenge", "url", "--exercise", "yoga"]);
    assert_eq!(code, 1);
}

#[test]
fn test_profile_delete_requires_confirmation() {
    let dir = config_dir();
    let (code, _, stderr) = run_cli(&dir, &["profile", "delete", "--email", "jane@example.com"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--yes"));
}

#[test]
fn test_completions() {
    let dir = config_dir();
    let (code, stdout, _) = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("govibe"));
}

/// Run `challenge start` against `api_url`, feeding `stdin` as pose
/// widget messages.
fn run_challenge(dir: &TempDir, api_url: &str, args: &[&str], stdin: &str) -> (i32, String, String) {
    let (code, _, _) = run_cli(dir, &["config", "set", "countdown.tick_ms", "50"]);
    assert_eq!(code, 0);

    let mut child = Command::new(env!("CARGO_BIN_EXE_govibe"))
        .args(["challenge", "start", "--email", "jane@example.com"])
        .args(args)
        .env("GOVIBE_CONFIG_DIR", dir.path())
        .env("GOVIBE_API_URL", api_url)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn backend_with_user() -> mockito::ServerGuard {
    let mut server = mockito::Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/user/jane(%40|@)example\.com$".into()))
        .with_status(200)
        .with_body(r#"{"_id": "u1"}"#)
        .create();
    server
}

fn events(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

fn of_type<'a>(events: &'a [serde_json::Value], kind: &str) -> Vec<&'a serde_json::Value> {
    events.iter().filter(|e| e["type"] == kind).collect()
}

#[test]
fn test_challenge_counter_messages_reach_goal() {
    let dir = config_dir();
    let mut server = backend_with_user();
    let join = server
        .mock("POST", "/challenge-participations")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "userId": "u1",
            "repetitions": 3,
            "exercise": "squat"
        })))
        .with_status(201)
        .expect(1)
        .create();

    let stdin = [
        "Camera access granted",
        r#"{"type":"posture","ready":true}"#,
        "incorrect form detected",
        r#"{"type":"counter","current_count":1}"#,
        r#"{"type":"counter","current_count":2}"#,
        r#"{"type":"counter","current_count":2}"#,
        r#"{"type":"counter","current_count":3}"#,
        r#"{"type":"counter","current_count":4}"#,
    ]
    .join("\n");
    let (code, stdout, stderr) = run_challenge(
        &dir,
        &server.url(),
        &["--target", "3", "--duration", "400"],
        &stdin,
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let events = events(&stdout);
    let completed = of_type(&events, "CountdownCompleted");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["reason"], "goal_met");
    assert_eq!(completed[0]["repetitions"], 3);
    assert_eq!(of_type(&events, "FormWarning").len(), 1);
    assert_eq!(of_type(&events, "SubmissionSucceeded").len(), 1);
    join.assert();
}

#[test]
fn test_challenge_stdin_closed_before_goal_times_out() {
    let dir = config_dir();
    let mut server = backend_with_user();
    let join = server
        .mock("POST", "/challenge-participations")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "userId": "u1",
            "repetitions": 1,
            "duration": 10
        })))
        .with_status(201)
        .expect(1)
        .create();

    let (code, stdout, stderr) = run_challenge(
        &dir,
        &server.url(),
        &["--target", "5", "--duration", "10"],
        r#"{"type":"counter","current_count":1}"#,
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let events = events(&stdout);
    let completed = of_type(&events, "CountdownCompleted");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["reason"], "time_expired");
    join.assert();
}

#[test]
fn test_challenge_camera_denied_submits_nothing() {
    let dir = config_dir();
    let mut server = backend_with_user();
    let join = server
        .mock("POST", "/challenge-participations")
        .expect(0)
        .create();

    let (code, stdout, stderr) = run_challenge(
        &dir,
        &server.url(),
        &["--target", "3", "--duration", "400"],
        "Camera access denied\n",
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("camera access denied"));

    let events = events(&stdout);
    assert_eq!(of_type(&events, "CountdownCancelled").len(), 1);
    assert!(of_type(&events, "CountdownCompleted").is_empty());
    join.assert();
}
