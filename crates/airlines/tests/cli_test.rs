//! Integration tests for the `airlines` CLI binary.
//!
//! Argument parsing, rendering, exit codes and the `watch` loop, run against
//! temporary asset files and a mock HTTP endpoint.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const SAMPLE: &str = r#"[
  {"id": "DL", "name": "Delta Air Lines", "country": "USA", "headquarters": "Atlanta, Georgia",
   "fleet_size": 975, "website": "https://www.delta.com", "logo_url": "https://logo.clearbit.com/delta.com"},
  {"id": "LH", "name": "Lufthansa", "country": "Germany", "headquarters": "Cologne",
   "fleet_size": 300, "website": "https://www.lufthansa.com", "logo_url": "https://logo.clearbit.com/lufthansa.com"},
  {"id": "UA", "name": "United Airlines", "country": "USA", "headquarters": "Chicago, Illinois",
   "fleet_size": 930, "website": "https://www.united.com", "logo_url": "https://logo.clearbit.com/united.com"}
]"#;

/// Build a [`Command`] for the `airlines` binary with env isolation.
///
/// Points config directories at a nonexistent path and clears `AIRLINES_*`
/// overrides so tests never touch the user's real configuration.
fn airlines_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("airlines");
    cmd.env("HOME", "/tmp/airlines-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/airlines-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("AIRLINES_CONFIG")
        .env_remove("AIRLINES_SOURCE__KIND")
        .env_remove("AIRLINES_SOURCE__ASSET_PATH")
        .env_remove("AIRLINES_SOURCE__BASE_URL")
        .env_remove("AIRLINES_DEFAULTS__OUTPUT")
        .env_remove("AIRLINES_CONTROLLER__SETTLE_MS")
        .env_remove("RUST_LOG");
    cmd
}

fn write_asset(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("airlines.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = airlines_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in output:\n{stderr}");
}

#[test]
fn test_help_flag() {
    airlines_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("airline")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    airlines_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("airlines"));
}

#[test]
fn test_unknown_output_format_is_usage_error() {
    airlines_cmd()
        .args(["list", "--output", "xml"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    airlines_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    airlines_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── list ────────────────────────────────────────────────────────────

#[test]
fn test_list_bundled_document() {
    let output = airlines_cmd().args(["list", "-o", "plain"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout.lines().collect();
    assert_eq!(ids.len(), 12);
    assert_eq!(ids.first(), Some(&"AA"));
    assert!(ids.contains(&"LH"));
}

#[test]
fn test_list_table_from_asset() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args(["list", "--asset", path_arg(&asset)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Lufthansa")
                .and(predicate::str::contains("Headquarters"))
                .and(predicate::str::contains("975")),
        );
}

#[test]
fn test_list_search_matches_country_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args(["list", "--asset", path_arg(&asset), "--search", "usa", "-o", "plain"])
        .assert()
        .success()
        .stdout("DL\nUA\n");
}

#[test]
fn test_list_no_matches() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args(["list", "--asset", path_arg(&asset), "--search", "atlantis"])
        .assert()
        .success()
        .stdout("No airlines found.\n");
}

#[test]
fn test_list_null_document_is_empty() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, "null");

    airlines_cmd()
        .args(["list", "--asset", path_arg(&asset), "-o", "json-compact"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_list_json_uses_wire_field_names() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    let output = airlines_cmd()
        .args(["list", "--asset", path_arg(&asset), "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[1]["fleet_size"], 300);
    assert_eq!(value[1]["logo_url"], "https://logo.clearbit.com/lufthansa.com");
}

#[test]
fn test_list_malformed_document_exits_with_data_error() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, "[{\"id\": ");

    airlines_cmd()
        .args(["list", "--asset", path_arg(&asset)])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("Failed to parse assets JSON"));
}

#[test]
fn test_list_missing_asset_file_is_data_error() {
    airlines_cmd()
        .args(["list", "--asset", "/tmp/airlines-cli-test-nonexistent/none.json"])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("Failed to parse assets JSON"));
}

#[test]
fn test_asset_and_url_together_need_source() {
    airlines_cmd()
        .args(["list", "--asset", "a.json", "--url", "https://mirror.example.com"])
        .assert()
        .code(2);
}

// ── show ────────────────────────────────────────────────────────────

#[test]
fn test_show_detail() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args(["show", "lh", "--asset", path_arg(&asset)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Lufthansa (LH)")
                .and(predicate::str::contains("Cologne"))
                .and(predicate::str::contains("https://www.lufthansa.com")),
        );
}

#[test]
fn test_show_not_found_exits_4() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args(["show", "ZZ", "--asset", path_arg(&asset)])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not found"));
}

// ── watch ───────────────────────────────────────────────────────────

#[test]
fn test_watch_once_assume_online() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args([
            "watch",
            "--assume-online",
            "--once",
            "--settle",
            "0ms",
            "--asset",
            path_arg(&asset),
            "-o",
            "plain",
        ])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout("DL\nLH\nUA\n");
}

#[test]
fn test_watch_once_applies_search() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    airlines_cmd()
        .args([
            "watch",
            "--assume-online",
            "--once",
            "--settle",
            "0ms",
            "--search",
            "germ",
            "--asset",
            path_arg(&asset),
            "-o",
            "plain",
        ])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout("LH\n");
}

#[test]
fn test_watch_once_json_frames() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);

    let output = airlines_cmd()
        .args([
            "watch",
            "--assume-online",
            "--once",
            "--settle",
            "0ms",
            "--asset",
            path_arg(&asset),
            "-o",
            "json-compact",
        ])
        .timeout(std::time::Duration::from_secs(20))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let last: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last["view"], "items");
    assert_eq!(last["data"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_watch_once_reports_load_error() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, "{not json");

    airlines_cmd()
        .args([
            "watch",
            "--assume-online",
            "--once",
            "--settle",
            "0ms",
            "--asset",
            path_arg(&asset),
        ])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse assets JSON"));
}

#[test]
fn test_watch_assume_online_conflicts_with_probe() {
    airlines_cmd()
        .args(["watch", "--assume-online", "--probe", "127.0.0.1:1"])
        .assert()
        .code(2);
}

// ── remote source ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_remote_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airlines.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/v1", server.uri());
    airlines_cmd()
        .args(["list", "--url", &url, "-o", "plain"])
        .assert()
        .success()
        .stdout("DL\nLH\nUA\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_remote_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    airlines_cmd()
        .args(["list", "--url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_remote_slow_server_exits_8() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE)
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    airlines_cmd()
        .args(["list", "--url", &server.uri(), "--timeout", "1"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("timed out after 1s"));
}

#[test]
fn test_list_remote_connection_refused_exits_7() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    airlines_cmd()
        .args(["list", "--url", &format!("http://127.0.0.1:{port}"), "--timeout", "5"])
        .assert()
        .code(7);
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    airlines_cmd()
        .args(["config", "path", "--config", "/tmp/custom/airlines.toml"])
        .assert()
        .success()
        .stdout("/tmp/custom/airlines.toml\n");
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("conf").join("config.toml");
    let cfg = path_arg(&cfg).to_owned();

    airlines_cmd()
        .args(["config", "init", "--config", &cfg])
        .assert()
        .success();
    assert!(Path::new(&cfg).exists());

    airlines_cmd()
        .args(["config", "init", "--config", &cfg])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    airlines_cmd()
        .args(["config", "init", "--force", "--config", &cfg])
        .assert()
        .success();

    airlines_cmd()
        .args(["config", "show", "--config", &cfg])
        .env("AIRLINES_CONTROLLER__SETTLE_MS", "250")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("settle_ms = 250")
                .and(predicate::str::contains("probe_addr = \"1.1.1.1:443\"")),
        );
}

#[test]
fn test_config_file_selects_output_format() {
    let dir = TempDir::new().unwrap();
    let asset = write_asset(&dir, SAMPLE);
    let cfg = dir.path().join("config.toml");
    std::fs::write(
        &cfg,
        format!(
            "[defaults]\noutput = \"plain\"\n\n[source]\nasset_path = {:?}\n",
            path_arg(&asset)
        ),
    )
    .unwrap();

    airlines_cmd()
        .args(["list", "--config", path_arg(&cfg)])
        .assert()
        .success()
        .stdout("DL\nLH\nUA\n");
}
