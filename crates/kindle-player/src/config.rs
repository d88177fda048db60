//! Player configuration
//!
//! Loaded from a TOML file. Every field has a default, so a partial file or
//! no file at all is valid. Command-line flags are applied on top.

use kindle_asset::RES_DIR;
use kindle_core::{Color, KindleError, Result, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            fullscreen: false,
        }
    }
}

fn default_title() -> String {
    "Kindle".to_string()
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Number of compositor layers
    #[serde(default = "default_layers")]
    pub layers: usize,
    #[serde(default = "default_background")]
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            background: default_background(),
        }
    }
}

fn default_layers() -> usize {
    3
}
fn default_background() -> Color {
    Color::BLACK
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default = "default_resource_root")]
    pub root: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            root: default_resource_root(),
        }
    }
}

fn default_resource_root() -> PathBuf {
    PathBuf::from(RES_DIR)
}

impl ResourceConfig {
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.root.join("sounds")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_master_volume")]
    pub master_volume: f64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: default_master_volume(),
            enabled: true,
        }
    }
}

fn default_master_volume() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

/// Values given on the command line; `None` keeps the file's value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub layers: Option<usize>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fullscreen: bool,
    pub resources: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content).map_err(|e| {
            KindleError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &CliOverrides) -> Result<()> {
        if let Some(layers) = cli.layers {
            self.render.layers = layers;
        }
        if let Some(width) = cli.width {
            self.window.width = width;
        }
        if let Some(height) = cli.height {
            self.window.height = height;
        }
        if cli.fullscreen {
            self.window.fullscreen = true;
        }
        if let Some(root) = &cli.resources {
            self.resources.root = root.clone();
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.layers == 0 {
            return Err(KindleError::ConfigError(
                "render.layers must be at least 1".into(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(KindleError::ConfigError(format!(
                "window size {}x{} is empty",
                self.window.width, self.window.height
            )));
        }
        if self.audio.master_volume.is_nan() || self.audio.master_volume < 0.0 {
            return Err(KindleError::ConfigError(
                "audio.master_volume must be non-negative".into(),
            ));
        }
        Ok(())
    }

    pub fn window_size(&self) -> Size {
        Size::new(self.window.width, self.window.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "Kindle");
        assert_eq!(config.window_size(), Size::new(800, 600));
        assert_eq!(config.render.layers, 3);
        assert_eq!(config.render.background, Color::BLACK);
        assert_eq!(config.resources.root, PathBuf::from("game/resources/"));
        assert_eq!(
            config.resources.images_dir(),
            PathBuf::from("game/resources/images")
        );
        assert!(config.audio.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml(
            r##"
[window]
title = "Demo"
fullscreen = true

[render]
background = "#102030"

[audio]
enabled = false
"##,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        assert!(config.window.fullscreen);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.render.layers, 3);
        assert_eq!(config.render.background, Color::rgb(0x10, 0x20, 0x30));
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.master_volume, 1.0);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AppConfig::from_toml("[render]\nlayers = 0\n"),
            Err(KindleError::ConfigError(_))
        ));
        assert!(AppConfig::from_toml("[window]\nwidth = 0\n").is_err());
        assert!(AppConfig::from_toml("[audio]\nmaster_volume = -1.0\n").is_err());
        assert!(matches!(
            AppConfig::from_toml("[window\n"),
            Err(KindleError::TomlParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("kindle_cfg_{}.toml", uuid::Uuid::new_v4()));
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("kindle_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[render]\nlayers = 5\n").unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().render.layers, 5);

        std::fs::write(&path, "[render]\nlayers = \"many\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(KindleError::ConfigError(_))
        ));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(&CliOverrides {
                layers: Some(6),
                width: Some(1024),
                height: None,
                fullscreen: true,
                resources: Some(PathBuf::from("assets")),
            })
            .unwrap();

        assert_eq!(config.render.layers, 6);
        assert_eq!(config.window_size(), Size::new(1024, 600));
        assert!(config.window.fullscreen);
        assert_eq!(config.resources.sounds_dir(), PathBuf::from("assets/sounds"));

        assert!(config
            .apply_overrides(&CliOverrides {
                layers: Some(0),
                ..Default::default()
            })
            .is_err());
    }
}
