//! Viewer configuration.
//!
//! Settings are loaded from a TOML file. Every section is optional and
//! missing values fall back to defaults.

use replay_log::{DisplayGeometry, StepMagnitude};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default configuration file path, used when present.
pub const DEFAULT_CONFIG_PATH: &str = "replay.toml";

/// Complete viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Display surface size and margin
    #[serde(default)]
    pub display: DisplayGeometry,
    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,
    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl ViewerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the display leaves a drawable area inside the margin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = self.display;
        if display.margin < 0 || display.inner_width() <= 0 || display.inner_height() <= 0 {
            return Err(ConfigError::Display {
                width: display.width,
                height: display.height,
                margin: display.margin,
            });
        }
        Ok(())
    }

    /// Loads the explicit path if given, else [`DEFAULT_CONFIG_PATH`] if it
    /// exists, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Target ticks per second for input polling and redraw
    pub target_fps: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Swarm Replay".into(),
            target_fps: 60.0,
        }
    }
}

impl WindowConfig {
    /// Longest wait between redraws, or `None` to redraw continuously.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.target_fps.is_finite() && self.target_fps > 0.0)
            .then(|| Duration::from_secs_f64(1.0 / self.target_fps))
    }
}

/// Playback settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Signed step size at startup. 0, or +/- one of 1, 5, 10, 20, 30.
    pub initial_step: i64,
}

impl PlaybackConfig {
    /// The configured initial step if valid, else 0.
    pub fn validated_initial_step(&self) -> i64 {
        let step = self.initial_step;
        if step == 0 || StepMagnitude::from_frames(step.abs()).is_some() {
            step
        } else {
            tracing::warn!(
                "Ignoring initial_step = {}: magnitude must be one of 1, 5, 10, 20, 30",
                step
            );
            0
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Display has no area left inside the margin
    #[error("display {width}x{height} with margin {margin} leaves no drawable area")]
    Display {
        width: i32,
        height: i32,
        margin: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();

        assert_eq!(config.display.width, 600);
        assert_eq!(config.display.height, 600);
        assert_eq!(config.display.margin, 10);
        assert_eq!(config.window.target_fps, 60.0);
        assert_eq!(config.playback.initial_step, 0);
    }

    #[test]
    fn test_frame_interval() {
        let mut window = WindowConfig::default();
        window.target_fps = 50.0;
        assert_eq!(window.frame_interval(), Some(Duration::from_millis(20)));

        window.target_fps = 0.0;
        assert_eq!(window.frame_interval(), None);
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [display]
            width = 800
            height = 700
            margin = 25

            [window]
            title = "Run 17"
            target_fps = 30.0

            [playback]
            initial_step = -5
        "#;

        let config = ViewerConfig::from_str(toml).unwrap();

        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 700);
        assert_eq!(config.display.margin, 25);
        assert_eq!(config.window.title, "Run 17");
        assert_eq!(config.window.target_fps, 30.0);
        assert_eq!(config.playback.initial_step, -5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [display]
            margin = 0
        "#;

        let config = ViewerConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.display.margin, 0);
        // Default values
        assert_eq!(config.display.width, 600);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ViewerConfig::from_str("").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = ViewerConfig::from_str("[display\nwidth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = ViewerConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[display]"));
        assert!(toml.contains("[window]"));
        assert_eq!(ViewerConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_validated_initial_step() {
        let valid = PlaybackConfig { initial_step: -20 };
        assert_eq!(valid.validated_initial_step(), -20);

        let invalid = PlaybackConfig { initial_step: 3 };
        assert_eq!(invalid.validated_initial_step(), 0);
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "[window]\ntarget_fps = 24.0\n").unwrap();

        let config = ViewerConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.window.target_fps, 24.0);
    }

    #[test]
    fn test_display_without_inner_area_is_rejected() {
        let err = ViewerConfig::from_str("[display]\nwidth = 20\nheight = 600\nmargin = 10\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Display {
                width: 20,
                height: 600,
                margin: 10
            }
        ));

        let err = ViewerConfig::from_str("[display]\nheight = -5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Display { .. }));

        let err = ViewerConfig::from_str("[display]\nmargin = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Display { .. }));
    }

    #[test]
    fn test_resolve_rejects_degenerate_display() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "[display]\nwidth = 30\nheight = 30\nmargin = 15\n").unwrap();

        let err = ViewerConfig::resolve(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Display { .. }));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_resolve_missing_explicit_path_is_error() {
        let dir = tempdir().unwrap();
        let err = ViewerConfig::resolve(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
