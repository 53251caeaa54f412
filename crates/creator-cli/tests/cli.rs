use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run(config_home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("creator")
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_json(config_home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run(config_home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_config(dir: &Path, contents: &str) -> String {
    let path = dir.join("creator.toml");
    fs::write(&path, contents).expect("write config");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms).expect("chmod");
    }
    path.to_str().expect("config path").to_string()
}

#[test]
fn validate_normalizes_valid_credentials() {
    let temp = TempDir::new().expect("temp dir");
    let value = run_json(
        temp.path(),
        &["validate", "--email", "USER@Example.COM", "--password", "Abcdef1!"],
    );
    assert_eq!(value["valid"], true);
    assert_eq!(value["email"], "user@example.com");
}

#[test]
fn validate_reports_every_violation_and_exits_invalid() {
    let temp = TempDir::new().expect("temp dir");
    let output = run(temp.path(), &["--json", "validate", "--email", "", "--password", ""]);
    assert_eq!(output.status.code(), Some(3));

    let value: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(value["valid"], false);
    assert_eq!(value["violations"]["email"][0]["message"], "Email is required");
    let password = value["violations"]["password"].as_array().expect("array");
    assert_eq!(password.len(), 5);
    assert_eq!(password[4]["rule"], "password.special");
}

#[test]
fn sign_in_redirects_to_default_destination() {
    let temp = TempDir::new().expect("temp dir");
    let value = run_json(
        temp.path(),
        &[
            "sign-in",
            "--email",
            " Ada@Example.com ",
            "--password",
            "Abcdef1!",
            "--delay-ms",
            "0",
        ],
    );
    assert_eq!(value["state"], "succeeded");
    assert_eq!(value["email"], "ada@example.com");
    assert_eq!(value["redirect"], "/dashboard");
}

#[test]
fn sign_in_uses_configured_destination_and_rejections() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_config(
        temp.path(),
        "[sign_in]\ndestination = \"/home\"\nsubmit_delay_ms = 0\nreject_emails = [\"blocked@example.com\"]\n",
    );

    let value = run_json(
        temp.path(),
        &[
            "--config",
            &config,
            "sign-in",
            "--email",
            "ada@example.com",
            "--password",
            "Abcdef1!",
        ],
    );
    assert_eq!(value["redirect"], "/home");

    let output = run(
        temp.path(),
        &[
            "--config",
            &config,
            "sign-in",
            "--email",
            "Blocked@example.com",
            "--password",
            "Abcdef1!",
        ],
    );
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("sign-in rejected"), "stderr: {}", stderr);
}

#[test]
fn sign_in_with_invalid_credentials_exits_invalid() {
    let temp = TempDir::new().expect("temp dir");
    let output = run(
        temp.path(),
        &["sign-in", "--email", "a@b.co", "--password", "abc defG1!", "--delay-ms", "0"],
    );
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("password: Password must not contain spaces"));
}

#[test]
fn missing_explicit_config_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.toml");
    let output = run(
        temp.path(),
        &["--config", missing.to_str().expect("path"), "dashboard", "overview"],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn dashboard_overview_and_revenue_match_fixture() {
    let temp = TempDir::new().expect("temp dir");
    let overview = run_json(temp.path(), &["dashboard", "overview"]);
    assert_eq!(overview["totalViews"], 100_000);
    assert_eq!(overview["engagementRate"], 7.5);

    let revenue = run_json(temp.path(), &["dashboard", "revenue"]);
    let items = revenue.as_array().expect("array");
    assert_eq!(items.len(), 5);
    assert_eq!(items[2]["type"], "Live Streams");
}

#[test]
fn dashboard_views_is_reproducible_with_seed() {
    let temp = TempDir::new().expect("temp dir");
    let args = ["dashboard", "views", "--seed", "9", "--days", "5", "--start", "2026-02-26"];
    let first = run_json(temp.path(), &args);
    let second = run_json(temp.path(), &args);
    assert_eq!(first, second);

    let points = first.as_array().expect("array");
    assert_eq!(points.len(), 5);
    assert_eq!(points[3]["date"], "2026-03-01");
}
