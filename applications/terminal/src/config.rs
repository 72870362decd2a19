//! Terminal host configuration

use crate::error::{Result, TerminalError};
use marigold_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "marigold.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,

    #[serde(default = "default_media_session")]
    pub media_session: MediaSessionSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// TOML catalog to play instead of the built-in demo playlist
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// How often simulated time advances
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Delay before a play request resolves
    #[serde(default = "default_play_latency_ms")]
    pub play_latency_ms: u64,

    /// Length reported for every track
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: f64,

    /// Sources whose URI contains one of these fragments refuse to play
    #[serde(default)]
    pub failing_uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaSessionSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl SimulationSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn play_latency(&self) -> Duration {
        Duration::from_millis(self.play_latency_ms)
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `marigold.toml` in the
    /// working directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. MARIGOLD_PLAYER__INITIAL_VOLUME=30
        settings = settings.add_source(
            config::Environment::with_prefix("MARIGOLD")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("simulation.failing_uris")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.initial_volume > 100 {
            return Err(TerminalError::Config(format!(
                "player.initial_volume must be 0-100, got {}",
                self.player.initial_volume
            )));
        }

        if self.player.volume_step == 0 || self.player.volume_step > 100 {
            return Err(TerminalError::Config(format!(
                "player.volume_step must be 1-100, got {}",
                self.player.volume_step
            )));
        }

        if !is_positive(self.player.seek_step_secs) {
            return Err(TerminalError::Config(
                "player.seek_step_secs must be a positive number".to_string(),
            ));
        }

        if !is_positive(self.player.media_session_seek_offset_secs) {
            return Err(TerminalError::Config(
                "player.media_session_seek_offset_secs must be a positive number".to_string(),
            ));
        }

        if self.simulation.tick_ms == 0 {
            return Err(TerminalError::Config(
                "simulation.tick_ms must be greater than zero".to_string(),
            ));
        }

        if !is_positive(self.simulation.track_length_secs) {
            return Err(TerminalError::Config(
                "simulation.track_length_secs must be a positive number".to_string(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(TerminalError::Config(
                "logging.filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Catalog path, preferring the command-line override
    pub fn catalog_path<'a>(&'a self, cli_override: Option<&'a Path>) -> Option<&'a Path> {
        cli_override.or(self.catalog.path.as_deref())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// Default values
fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        play_latency_ms: default_play_latency_ms(),
        track_length_secs: default_track_length_secs(),
        failing_uris: Vec::new(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_play_latency_ms() -> u64 {
    50
}

fn default_track_length_secs() -> f64 {
    30.0
}

fn default_media_session() -> MediaSessionSettings {
    MediaSessionSettings {
        enabled: default_enabled(),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "marigold_terminal=info,marigold_playback=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            catalog: CatalogSettings::default(),
            simulation: default_simulation(),
            media_session: default_media_session(),
            logging: default_logging(),
        }
    }
}
