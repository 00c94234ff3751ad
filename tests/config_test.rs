use std::env;
use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use issuedesk::config::Config;

/// Runs the test body inside a fresh temp directory, restoring the previous
/// working directory on drop.
struct DirGuard {
    previous: PathBuf,
    _tmp: TempDir,
}

impl DirGuard {
    fn new() -> Self {
        let previous = env::current_dir().unwrap();
        let tmp = TempDir::new().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        Self {
            previous,
            _tmp: tmp,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

#[test]
#[serial]
fn load_without_file_returns_defaults() {
    let _guard = DirGuard::new();

    let config = Config::load().unwrap();
    assert!(config.api.url.is_none());
    assert!(config.api.token.is_none());
    assert_eq!(config.timeout, 30);
}

#[test]
#[serial]
fn save_then_load_round_trips() {
    let _guard = DirGuard::new();

    let mut config = Config::load().unwrap();
    config.set_api_url("http://localhost:8080/api").unwrap();
    config.set_token("tk_roundtrip".to_string());
    config.save().unwrap();

    assert!(Config::config_path().exists());

    let loaded = Config::load().unwrap();
    assert_eq!(loaded.api.url.as_deref(), Some("http://localhost:8080/api"));
    assert_eq!(loaded.api.token.as_deref(), Some("tk_roundtrip"));
    assert_eq!(loaded.timeout, 30);
}

#[test]
#[serial]
fn partial_file_falls_back_to_defaults() {
    let _guard = DirGuard::new();

    fs::create_dir_all(".issuedesk").unwrap();
    fs::write(
        Config::config_path(),
        "api:\n  url: http://localhost:9999/api\n",
    )
    .unwrap();

    let config = Config::load().unwrap();
    assert_eq!(config.api.url.as_deref(), Some("http://localhost:9999/api"));
    assert!(config.api.token.is_none());
    assert_eq!(config.timeout, 30);
}

#[test]
#[serial]
fn malformed_file_is_an_error() {
    let _guard = DirGuard::new();

    fs::create_dir_all(".issuedesk").unwrap();
    fs::write(Config::config_path(), "api: [not, a, mapping").unwrap();

    assert!(Config::load().is_err());
}

#[test]
#[serial]
fn env_vars_override_file_values() {
    let _guard = DirGuard::new();

    let mut config = Config::default();
    config.set_api_url("http://from-file/api").unwrap();
    config.set_token("tk_file".to_string());

    unsafe {
        env::set_var("ISSUEDESK_API_URL", "http://from-env/api");
        env::set_var("ISSUEDESK_TOKEN", "tk_env");
    }
    let url = config.api_url();
    let token = config.token();
    unsafe {
        env::remove_var("ISSUEDESK_API_URL");
        env::remove_var("ISSUEDESK_TOKEN");
    }

    assert_eq!(url.as_deref(), Some("http://from-env/api"));
    assert_eq!(token.as_deref(), Some("tk_env"));

    assert_eq!(config.api_url().as_deref(), Some("http://from-file/api"));
    assert_eq!(config.token().as_deref(), Some("tk_file"));
}

#[test]
#[serial]
fn empty_env_vars_are_ignored() {
    let _guard = DirGuard::new();

    let mut config = Config::default();
    config.set_token("tk_file".to_string());

    unsafe {
        env::set_var("ISSUEDESK_TOKEN", "");
    }
    let token = config.token();
    unsafe {
        env::remove_var("ISSUEDESK_TOKEN");
    }

    assert_eq!(token.as_deref(), Some("tk_file"));
}
