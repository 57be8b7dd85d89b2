use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

/// Nothing listens here, so every live request fails fast
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

fn write_config(temp: &Path, snapshots: &Path, nws: &str) -> PathBuf {
    let path = temp.join("config.yaml");
    let contents = format!(
        "service:\n  snapshot_bases: [\"{snapshots}\"]\n  request_timeout_secs: 2\n  endpoints:\n    nws: \"{nws}\"\n    open_meteo: \"{dead}\"\n    products: \"{dead}\"\n    nhc: \"{dead}\"\n",
        snapshots = snapshots.display(),
        dead = DEAD_ENDPOINT,
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

struct Fixture {
    temp: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        Self::with_nws(DEAD_ENDPOINT)
    }

    fn with_nws(nws: &str) -> Self {
        let temp = tempdir().expect("tempdir");
        let snapshots = temp.path().join("data");
        fs::create_dir_all(&snapshots).expect("snapshot dir");
        let config = write_config(temp.path(), &snapshots, nws);
        Self { temp, config }
    }

    fn snapshot(&self, file: &str, contents: &str) {
        fs::write(self.temp.path().join("data").join(file), contents).expect("snapshot");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("countywx"));
        cmd.arg("--config")
            .arg(&self.config)
            .env_remove("COUNTYWX_CONFIG")
            .env_remove("COUNTYWX_FORMAT")
            .env_remove("COUNTYWX_DEBUG")
            .env_remove("COUNTYWX_NO_CACHE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .env("HOME", self.temp.path())
            .env("XDG_CACHE_HOME", self.temp.path().join("cache"));
        cmd
    }
}

#[test]
fn version_prints_package_version() {
    Command::new(assert_cmd::cargo::cargo_bin!("countywx"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn counties_lists_defaults() {
    let fx = Fixture::new();
    fx.command()
        .arg("counties")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pitt"))
        .stdout(predicate::str::contains("Martin"))
        .stdout(predicate::str::contains("MHX"));
}

#[test]
fn current_conditions_from_snapshot() {
    let fx = Fixture::new();
    fx.snapshot(
        "pitt_weather.json",
        r#"{"weather": {
            "temp": 71.6,
            "condition": "Sunny",
            "humidity": "55",
            "windSpeed": 10,
            "windDirection": "NE",
            "stationName": "Pitt-Greenville Airport",
            "time": "2024-06-01T15:00:00-04:00"
        }}"#,
    );

    fx.command()
        .args(["current", "--county", "pitt", "--format", "json", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"temp\": 72"))
        .stdout(predicate::str::contains("\"condition\": \"Sunny\""))
        .stdout(predicate::str::contains("\"wind\": \"10 mph from NE\""))
        .stdout(predicate::str::contains("\"dewpoint\": \"N/A\""))
        .stdout(predicate::str::contains("\"dataType\": \"currentConditions\""));
}

#[test]
fn every_source_down_renders_fallback() {
    let fx = Fixture::new();

    fx.command()
        .args(["afd", "--wfo", "mhx", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Area Forecast Discussion not available at this time.",
        ));

    fx.command()
        .args(["current", "--format", "json", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"condition\": \"Data Unavailable\""))
        .stdout(predicate::str::contains("\"stationName\": \"Unknown Station\""));
}

#[test]
fn malformed_snapshot_falls_through() {
    let fx = Fixture::new();
    fx.snapshot("pitt_forecast.json", r#"{"daily": []}"#);

    fx.command()
        .args(["forecast", "--format", "json", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"daily\": []"));
}

#[test]
fn alerts_from_live_api() {
    let mut server = mockito::Server::new();
    let alerts = server
        .mock("GET", "/alerts/active")
        .match_query(mockito::Matcher::UrlEncoded(
            "point".into(),
            "35.64,-77.39".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/geo+json")
        .with_body(
            r#"{"features": [
                {"id": "urn:oid:1", "properties": {"event": "Heat Advisory", "severity": "Moderate"}},
                {"id": "urn:oid:2", "properties": {"event": "Tornado Warning", "severity": "Extreme"}}
            ]}"#,
        )
        .create();

    let fx = Fixture::with_nws(&server.url());
    let assert = fx
        .command()
        .args(["alerts", "--county", "Pitt", "--format", "table", "--no-cache"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let tornado = stdout.find("Tornado Warning").expect("tornado row");
    let heat = stdout.find("Heat Advisory").expect("heat row");
    assert!(tornado < heat, "most severe alert first");
    alerts.assert();
}

#[test]
fn tropical_outlook_from_snapshot() {
    let fx = Fixture::new();
    fx.snapshot(
        "tropical_outlook_atlantic.json",
        r#"{"outlook": "Tropical cyclone formation is not expected during the next 7 days."}"#,
    );

    fx.command()
        .args(["tropical", "atlantic", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tropical cyclone formation is not expected during the next 7 days.",
        ));
}

#[test]
fn dashboard_json_has_all_sections() {
    let fx = Fixture::new();
    fx.snapshot(
        "mhx_afd.json",
        r#"{"content": "FXUS62 KMHX 011930", "timestamp": 1717250000}"#,
    );
    fx.snapshot(
        "craven_alerts.json",
        r#"{"alerts": [{"event": "Flood Watch", "severity": "Severe"}]}"#,
    );

    fx.command()
        .args(["dashboard", "--county", "Craven", "--format", "json", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currentConditions\""))
        .stdout(predicate::str::contains("\"forecast\""))
        .stdout(predicate::str::contains("\"Flood Watch\""))
        .stdout(predicate::str::contains("FXUS62 KMHX 011930"));
}

#[test]
fn unknown_county_is_an_error() {
    let fx = Fixture::new();
    fx.command()
        .args(["current", "--county", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown county `Atlantis`"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = tempdir().expect("tempdir");
    Command::new(assert_cmd::cargo::cargo_bin!("countywx"))
        .arg("counties")
        .arg("--config")
        .arg(temp.path().join("nope.yaml"))
        .env_remove("COUNTYWX_CONFIG")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn cache_commands() {
    let fx = Fixture::new();

    fx.command()
        .args(["cache", "path", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(memory)"));

    fx.command()
        .args(["cache", "ttl", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"afd\": 180"))
        .stdout(predicate::str::contains("\"alerts\": 2"));

    fx.command()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache was already empty"));
}

#[test]
fn snapshot_results_persist_in_cache() {
    let fx = Fixture::new();
    fx.snapshot(
        "mhx_afd.json",
        r#"{"content": "FXUS62 KMHX 011930", "timestamp": 1717250000}"#,
    );

    fx.command().args(["afd"]).assert().success();

    // snapshot gone: the cached copy still answers
    fs::remove_file(fx.temp.path().join("data").join("mhx_afd.json")).expect("remove snapshot");
    fx.command()
        .args(["afd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FXUS62 KMHX 011930"));

    fx.command()
        .args(["cache", "status", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"freshEntries\": 1"));
}

#[test]
fn completion_generates_script() {
    Command::new(assert_cmd::cargo::cargo_bin!("countywx"))
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("countywx"));
}

#[test]
fn init_writes_config_once() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("countywx").join("config.yaml");
    let init = || {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("countywx"));
        cmd.arg("init")
            .arg("--config")
            .arg(&path)
            .env_remove("COUNTYWX_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    };

    init()
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote configuration"));
    let written = fs::read_to_string(&path).expect("config written");
    assert!(written.contains("Pitt"));

    init()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    init().arg("--force").assert().success();
}
