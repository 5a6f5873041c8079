//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Scene settings (radii, tessellation, colors).
    pub scene: SceneConfig,
    /// Window settings.
    pub window: WindowConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Scene configuration - everything the frame composer consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Earth bright-tone base color, RGBA components in [0, 1].
    pub earth_color: [f32; 4],
    /// Earth radius in clip-space units, strictly positive.
    pub earth_radius: f32,
    /// Moon radius in clip-space units, strictly positive.
    pub moon_radius: f32,
    /// Moon orbit distance; doubles as the trace ring radius.
    pub moon_distance: f32,
    /// Sphere longitude segments, in [3, 128].
    pub width_segments: u32,
    /// Sphere latitude bands, in [3, 128].
    pub height_segments: u32,
    /// Trace ring segments, at least 3.
    pub trace_segments: u32,
    /// Initial zoom, in [0, 48]; fed through the view's clamped setter.
    pub scale: f32,
    /// Seed for the earth's color speckle.
    pub color_seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            earth_color: [0.0, 0.0, 0.87, 0.95],
            earth_radius: 0.01593,
            moon_radius: 0.00434,
            moon_distance: 0.961,
            width_segments: 32,
            height_segments: 32,
            trace_segments: 128,
            scale: 1.0,
            color_seed: 42,
        }
    }
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 960,
            title: "Orrery".to_string(),
            vsync: true,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw the wireframe overlay over the earth.
    pub wireframe: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            wireframe: false,
            log_level: String::new(),
        }
    }
}

/// Default config directory under the user's config dir.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("orrery"))
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;

        for (i, component) in scene.earth_color.iter().enumerate() {
            if !(0.0..=1.0).contains(component) {
                return Err(ConfigError::Invalid {
                    field: "scene.earth_color",
                    reason: format!("component {i} is {component}, expected [0, 1]"),
                });
            }
        }
        if !(scene.earth_radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scene.earth_radius",
                reason: format!("{} is not positive", scene.earth_radius),
            });
        }
        if !(scene.moon_radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scene.moon_radius",
                reason: format!("{} is not positive", scene.moon_radius),
            });
        }
        if !(scene.moon_distance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scene.moon_distance",
                reason: format!("{} is not positive", scene.moon_distance),
            });
        }
        if !(3..=128).contains(&scene.width_segments) {
            return Err(ConfigError::Invalid {
                field: "scene.width_segments",
                reason: format!("{} is outside [3, 128]", scene.width_segments),
            });
        }
        if !(3..=128).contains(&scene.height_segments) {
            return Err(ConfigError::Invalid {
                field: "scene.height_segments",
                reason: format!("{} is outside [3, 128]", scene.height_segments),
            });
        }
        if scene.trace_segments < 3 {
            return Err(ConfigError::Invalid {
                field: "scene.trace_segments",
                reason: format!("{} is below 3", scene.trace_segments),
            });
        }
        if !(0.0..=48.0).contains(&scene.scale) {
            return Err(ConfigError::Invalid {
                field: "scene.scale",
                reason: format!("{} is outside [0, 48]", scene.scale),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_out_of_range_fields_are_named() {
        let cases: Vec<(Config, &str)> = vec![
            (
                {
                    let mut c = Config::default();
                    c.scene.earth_color[2] = 1.5;
                    c
                },
                "scene.earth_color",
            ),
            (
                {
                    let mut c = Config::default();
                    c.scene.earth_radius = 0.0;
                    c
                },
                "scene.earth_radius",
            ),
            (
                {
                    let mut c = Config::default();
                    c.scene.moon_radius = -0.1;
                    c
                },
                "scene.moon_radius",
            ),
            (
                {
                    let mut c = Config::default();
                    c.scene.width_segments = 2;
                    c
                },
                "scene.width_segments",
            ),
            (
                {
                    let mut c = Config::default();
                    c.scene.height_segments = 129;
                    c
                },
                "scene.height_segments",
            ),
            (
                {
                    let mut c = Config::default();
                    c.scene.scale = 48.5;
                    c
                },
                "scene.scale",
            ),
        ];

        for (config, expected_field) in cases {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected Invalid for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scene.width_segments = 64;
        config.window.title = "Round trip".to_string();
        config.save(dir.path()).unwrap();

        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_creates_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(loaded, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(scene: oops").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            "(scene: (width_segments: 16))",
        )
        .unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(loaded.scene.width_segments, 16);
        assert_eq!(loaded.scene.trace_segments, 128);
        assert_eq!(loaded.window, WindowConfig::default());
    }
}
