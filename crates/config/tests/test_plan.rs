//! Test plan for the `adpulse-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use adpulse_config::{load, AppConfig, AuthConfig, HttpConfig, InsightsConfig, RealtimeConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "ADPULSE_CONFIG",
    "ADPULSE__AUTH__DEFAULT_USER_ID",
    "ADPULSE__DATABASE__MAX_CONNECTIONS",
    "ADPULSE__DATABASE__URL",
    "ADPULSE__HTTP__ADDRESS",
    "ADPULSE__HTTP__PORT",
    "ADPULSE__INSIGHTS__DEFAULT_LANGUAGE",
    "ADPULSE__INSIGHTS__PLACEHOLDER_IMAGE_BASE_URL",
    "ADPULSE__REALTIME__CHANNEL_CAPACITY",
    "ADPULSE__REALTIME__REFRESH_INTERVAL_SECONDS",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

fn isolated() -> (TempDir, TestContext) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());
    (temp_dir, ctx)
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let (_temp_dir, _ctx) = isolated();

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(
        config.database.max_connections,
        defaults.database.max_connections
    );
    assert_eq!(
        config.realtime.refresh_interval_seconds,
        defaults.realtime.refresh_interval_seconds
    );
    assert_eq!(
        config.insights.placeholder_image_base_url,
        defaults.insights.placeholder_image_base_url
    );
    assert_eq!(config.auth.default_user_id, defaults.auth.default_user_id);
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adpulse.toml",
        r#"
        [http]
        port = 4242
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/adpulse.toml",
        r#"
        [http]
        port = 5151
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.http.port, 4242);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adpulse.toml",
        r#"
        [database]
        max_connections = 50

        [realtime]
        refresh_interval_seconds = 15
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.database.max_connections, 50);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(config.realtime.refresh_interval_seconds, 15);
    assert_eq!(
        config.realtime.channel_capacity,
        defaults.realtime.channel_capacity
    );
    assert_eq!(config.http.port, defaults.http.port);
}

#[test]
#[serial]
fn load_reads_explicit_config_path() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "elsewhere/custom.toml",
        r#"
        [insights]
        default_language = "en"
        "#,
    );
    let path = temp_dir.path().join("elsewhere/custom.toml");
    ctx.set_var("ADPULSE_CONFIG", path.to_string_lossy());

    let config = load().expect("configuration load should read ADPULSE_CONFIG");
    assert_eq!(config.insights.default_language, "en");
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adpulse.toml",
        r#"
        [http]
        port = 3030
        "#,
    );

    ctx.set_var("ADPULSE__HTTP__PORT", "8080");
    ctx.set_var("ADPULSE__AUTH__DEFAULT_USER_ID", "7");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.auth.default_user_id, 7);
}

#[test]
#[serial]
fn load_replaces_zero_channel_capacity_with_default() {
    let (_temp_dir, mut ctx) = isolated();

    ctx.set_var("ADPULSE__REALTIME__CHANNEL_CAPACITY", "0");

    let config = load().expect("configuration load should succeed");
    assert_eq!(config.realtime.channel_capacity, 100);
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adpulse.toml",
        r#"
        [http]
        port = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration") || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn section_defaults_match_dashboard_expectations() {
    assert_eq!(HttpConfig::default().port, 7070);
    assert_eq!(RealtimeConfig::default().refresh_interval_seconds, 5);
    assert_eq!(InsightsConfig::default().default_language, "ar");
    assert_eq!(AuthConfig::default().default_user_id, 1);
}
