//! Configuration loading tests

use marigold_terminal::config::AppConfig;
use marigold_terminal::TerminalError;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("marigold.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let config = AppConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.player.initial_volume, 50);
    assert_eq!(config.simulation.tick_ms, 250);
    assert!(config.media_session.enabled);
    assert_eq!(
        config.logging.filter,
        "marigold_terminal=info,marigold_playback=info"
    );
}

#[test]
fn loads_sections_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[player]
initial_volume = 30
seek_step_secs = 10.0

[catalog]
path = "tracks.toml"

[simulation]
track_length_secs = 90.0
failing_uris = ["broken"]

[media_session]
enabled = false
"#,
    );

    let config = AppConfig::load(Some(&path)).unwrap();

    assert_eq!(config.player.initial_volume, 30);
    assert_eq!(config.player.seek_step_secs, 10.0);
    assert_eq!(config.player.volume_step, 10, "unset keys keep defaults");
    assert_eq!(config.catalog.path.as_deref(), Some(Path::new("tracks.toml")));
    assert_eq!(config.simulation.track_length_secs, 90.0);
    assert_eq!(config.simulation.tick_ms, 250);
    assert_eq!(config.simulation.failing_uris, vec!["broken".to_string()]);
    assert!(!config.media_session.enabled);
}

#[test]
fn explicit_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let result = AppConfig::load(Some(&missing));

    assert!(matches!(result, Err(TerminalError::Config(_))));
}

#[test]
fn invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[simulation]\ntick_ms = 0\n");

    let result = AppConfig::load(Some(&path));

    match result {
        Err(TerminalError::Config(message)) => assert!(message.contains("tick_ms")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn validation_covers_player_settings() {
    let mut config = AppConfig::default();
    config.player.initial_volume = 101;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.player.volume_step = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.player.seek_step_secs = f64::NAN;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.logging.filter = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn cli_catalog_overrides_config() {
    let mut config = AppConfig::default();
    assert_eq!(config.catalog_path(None), None);

    config.catalog.path = Some("from-config.toml".into());
    assert_eq!(
        config.catalog_path(None),
        Some(Path::new("from-config.toml"))
    );
    assert_eq!(
        config.catalog_path(Some(Path::new("from-cli.toml"))),
        Some(Path::new("from-cli.toml"))
    );
}
