//! Integration tests for the `huectl` CLI binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without a bridge; the end-to-end cases point `--bridge-url` at wiremock.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `huectl` binary with env isolation.
///
/// Clears all `HUECTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn huectl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("huectl");
    cmd.env("HOME", "/tmp/huectl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/huectl-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("HUECTL_CONFIG")
        .env_remove("HUECTL_BRIDGE")
        .env_remove("HUECTL_BRIDGE_URL")
        .env_remove("HUECTL_APPLICATION_KEY")
        .env_remove("HUECTL_OUTPUT")
        .env_remove("HUECTL_INSECURE")
        .env_remove("HUECTL_CA_CERT")
        .env_remove("HUECTL_TIMEOUT");
    cmd
}

/// `huectl_cmd()` bound to a config file.
fn huectl_with_config(config: &Path) -> assert_cmd::Command {
    let mut cmd = huectl_cmd();
    cmd.arg("--config").arg(config);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, contents).unwrap();
    path
}

const PAIRED: &str = "hue_bridge_ip: 192.0.2.10\nhue_application_key: test-key\n";

fn lights_body() -> serde_json::Value {
    json!({
        "errors": [],
        "data": [
            {
                "id": "3",
                "id_v1": "/lights/3",
                "metadata": { "name": "Kitchen", "archetype": "sultan_bulb" },
                "on": { "on": true },
                "dimming": { "brightness": 50.0 },
                "color": { "xy": { "x": 0.4573, "y": 0.41 }, "gamut_type": "C" }
            },
            {
                "id": "1",
                "metadata": { "name": "Hallway" },
                "on": { "on": false }
            }
        ]
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = huectl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    huectl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("discover")
            .and(predicate::str::contains("register"))
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("lights")),
    );
}

#[test]
fn test_version_flag() {
    huectl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("huectl"));
}

#[test]
fn test_completions_zsh() {
    huectl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    huectl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_lights_on_requires_a_target() {
    let output = huectl_cmd().args(["lights", "on"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("required"), "Expected usage error:\n{text}");
}

#[test]
fn test_lights_on_rejects_name_and_id_together() {
    let output = huectl_cmd()
        .args(["lights", "on", "Kitchen", "--light-id", "3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("cannot be used with"),
        "Expected conflict error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = huectl_cmd()
        .args(["--output", "invalid", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Missing configuration ───────────────────────────────────────────

#[test]
fn test_list_without_bridge_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = huectl_with_config(&dir.path().join("config.yaml"))
        .arg("list")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("No bridge address configured"));
}

#[test]
fn test_lights_without_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = huectl_with_config(&dir.path().join("config.yaml"))
        .args(["--bridge", "192.0.2.10", "lights", "off", "--light-id", "3"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Not registered"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.yaml");
    huectl_with_config(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.yaml"));
}

#[test]
fn test_config_show_redacts_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, PAIRED);
    huectl_with_config(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("192.0.2.10")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("test-key").not()),
        );
}

// ── Against a mocked bridge ─────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_renders_lights_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .and(header("hue-application-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lights_body()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, PAIRED);

    let output = huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "list"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("On (Brightness: 50.00, XY: (0.4573, 0.4100))"));
    assert!(stdout.contains("Off"));
    assert!(stdout.find("Kitchen") < stdout.find("Hallway"));

    let plain = huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "-o", "plain", "list"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&plain.stdout), "3\n1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_keeps_every_field() {
    let server = MockServer::start().await;
    let mut body = lights_body();
    body["data"][0]["color_temperature"] = json!({ "mirek": 366, "mirek_valid": true });
    body["data"][0]["color"]["gamut"] = json!({
        "red": { "x": 0.6915, "y": 0.3083 },
        "green": { "x": 0.17, "y": 0.7 },
        "blue": { "x": 0.1532, "y": 0.0475 }
    });
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, PAIRED);

    let output = huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "-o", "json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kitchen = &devices[0];
    assert_eq!(kitchen["id"], "3");
    assert_eq!(kitchen["id_v1"], "/lights/3");
    assert_eq!(kitchen["name"], "Kitchen");
    assert_eq!(kitchen["on"], true);
    assert_eq!(kitchen["color_temperature_mirek"], 366);
    assert_eq!(kitchen["gamut_type"], "C");
    assert_eq!(kitchen["gamut"]["red"]["x"], 0.6915);
    assert_eq!(devices[1]["id"], "1");
    assert_eq!(devices[1]["on"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lights_off_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lights_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/3"))
        .and(body_json(json!({ "on": { "on": false } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errors": [], "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, PAIRED);

    huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "lights", "off", "Kitchen"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lights_on_unknown_name_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lights_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, PAIRED);

    let output = huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "lights", "on", "kitchen"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Light 'kitchen' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lights_on_bridge_error_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/5"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, PAIRED);

    let output = huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "lights", "on", "--light-id", "5"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("HTTP 503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_pending_echoes_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 101, "address": "", "description": "link button not pressed" } }
        ])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "hue_bridge_ip: 192.0.2.10\n");

    let output = huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "register"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("link button not pressed"), "{text}");

    let saved = std::fs::read_to_string(&config).unwrap();
    assert!(!saved.contains("hue_application_key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_success_saves_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_json(json!({
            "devicetype": "huectl#den",
            "generateclientkey": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "username": "abc", "clientkey": "xyz" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "hue_bridge_ip: 192.0.2.10\n");

    huectl_with_config(&config)
        .args(["--bridge-url", &server.uri(), "register", "--device-name", "den"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&config).unwrap();
    assert!(saved.contains("hue_application_key: abc"), "{saved}");
    assert!(saved.contains("hue_client_key: xyz"), "{saved}");
    assert!(saved.contains("hue_bridge_ip"), "{saved}");
}
