//! ---
//! lp_section: "01-core-functionality"
//! lp_subsection: "integration-tests"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Configuration discovery tests."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use std::env;
use std::fs;
use std::sync::Mutex;

use loadprobe_common::config::ProbeConfig;
use loadprobe_common::logging::LogFormat;

// Tests below mutate LOADPROBE_CONFIG.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn missing_candidates_fall_back_to_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    env::remove_var(ProbeConfig::ENV_CONFIG_PATH);
    let dir = tempfile::tempdir().unwrap();
    let loaded = ProbeConfig::load_with_source(&[dir.path().join("absent.toml")]).unwrap();
    assert!(loaded.source.is_none());
    assert_eq!(loaded.config, ProbeConfig::default());
}

#[test]
fn first_existing_candidate_wins() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    env::remove_var(ProbeConfig::ENV_CONFIG_PATH);
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    fs::write(&second, "component = \"second\"").unwrap();
    let loaded = ProbeConfig::load_with_source(&[&first, &second]).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(second.as_path()));
    assert_eq!(loaded.config.component.as_deref(), Some("second"));

    fs::write(&first, "component = \"first\"").unwrap();
    let config = ProbeConfig::load(&[&first, &second]).unwrap();
    assert_eq!(config.component.as_deref(), Some("first"));
}

#[test]
fn env_override_takes_precedence_and_must_exist() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let candidate = dir.path().join("candidate.toml");
    fs::write(&candidate, "component = \"candidate\"").unwrap();
    let pinned = dir.path().join("pinned.toml");
    fs::write(&pinned, "[logging]\nformat = \"structured-json\"").unwrap();

    env::set_var(ProbeConfig::ENV_CONFIG_PATH, &pinned);
    let loaded = ProbeConfig::load_with_source(&[&candidate]).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(pinned.as_path()));
    assert_eq!(loaded.config.component, None);
    assert_eq!(loaded.config.logging.format, LogFormat::StructuredJson);

    env::set_var(ProbeConfig::ENV_CONFIG_PATH, dir.path().join("gone.toml"));
    let err = ProbeConfig::load_with_source(&[&candidate]).unwrap_err();
    assert!(err.to_string().contains("unable to read config file"));
    env::remove_var(ProbeConfig::ENV_CONFIG_PATH);
}

#[test]
fn malformed_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    env::remove_var(ProbeConfig::ENV_CONFIG_PATH);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "component = [").unwrap();
    let err = ProbeConfig::load(&[&path]).unwrap_err();
    assert!(err.to_string().contains("invalid config file"));
}

#[cfg(unix)]
#[test]
fn non_utf8_override_is_not_ignored() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let candidate = dir.path().join("candidate.toml");
    fs::write(&candidate, "component = \"candidate\"").unwrap();
    let mut pinned = dir.path().as_os_str().as_bytes().to_vec();
    pinned.extend_from_slice(b"/\xff.toml");

    env::set_var(ProbeConfig::ENV_CONFIG_PATH, OsStr::from_bytes(&pinned));
    let result = ProbeConfig::load_with_source(&[&candidate]);
    env::remove_var(ProbeConfig::ENV_CONFIG_PATH);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("unable to read config file"));
}
