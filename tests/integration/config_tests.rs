use clap::Parser;
use dupefind::cli::Cli;
use dupefind::config::Config;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all DUPEFIND_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("DUPEFIND_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();

    let config = Config::load_from_path(dir.path().join("nonexistent.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
progress_interval = 100
report_large_files = false
large_file_threshold = 1048576
chunk_size = 65536
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&path);

    assert_eq!(config.progress_interval, 100);
    assert!(!config.report_large_files);
    assert!(config.report_total_time);
    assert_eq!(config.large_file_threshold, 1_048_576);
    assert_eq!(config.chunk_size, 65_536);
}

#[test]
fn test_config_invalid_toml_falls_back() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "progress_interval = \"lots\"").unwrap();

    let config = Config::load_from_path(&path);
    assert_eq!(config, Config::default());
}

#[test]
fn test_env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "progress_interval = 100\nchunk_size = 1024\n").unwrap();

    std::env::set_var("DUPEFIND_PROGRESS_INTERVAL", "7");
    let config = Config::load_from_path(&path);
    clear_env();

    assert_eq!(config.progress_interval, 7);
    assert_eq!(config.chunk_size, 1024);
}

#[test]
fn test_cli_overrides_env_and_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "progress_interval = 100\nreport_total_time = true\n").unwrap();

    std::env::set_var("DUPEFIND_PROGRESS_INTERVAL", "7");
    let mut config = Config::load_from_path(&path);
    clear_env();

    let cli = Cli::try_parse_from([
        "dupefind",
        "--progress-interval",
        "3",
        "--no-total-time",
    ])
    .unwrap();
    config.merge_cli(&cli);

    assert_eq!(config.progress_interval, 3);
    assert!(!config.report_total_time);
}

#[test]
fn test_zero_chunk_size_in_file_is_reset() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "chunk_size = 0\n").unwrap();

    let config = Config::load_from_path(&path);
    assert_eq!(config.chunk_size, 4096);
}

#[test]
fn test_oversized_chunk_size_in_env_is_reset() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();

    std::env::set_var("DUPEFIND_CHUNK_SIZE", "109951162777600");
    let config = Config::load_from_path(dir.path().join("nonexistent.toml"));
    clear_env();

    assert_eq!(config.chunk_size, 4096);
}
