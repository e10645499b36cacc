//! Engine configuration.
//!
//! Window, frame pacing, gameplay speed and key bindings. Configuration is
//! loaded from and saved to a TOML file in the platform config directory.

use serde::{Deserialize, Serialize};
use snake_gameplay::settings::{GameSettings, MAX_TICKS_PER_SECOND, MIN_TICKS_PER_SECOND};
use snake_gameplay::input::{Action, KeyBinding, KeyCode};
use snake_gameplay::DEFAULT_TICKS_PER_SECOND;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "snake.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// File contents are not valid config TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Key bindings, stored as the `[keys]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Turn up
    pub move_up: KeyBinding,
    /// Turn down
    pub move_down: KeyBinding,
    /// Turn left
    pub move_left: KeyBinding,
    /// Turn right
    pub move_right: KeyBinding,
    /// Quit the game
    pub quit: KeyBinding,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            move_up: KeyBinding::with_secondary(KeyCode::W, KeyCode::Up),
            move_down: KeyBinding::with_secondary(KeyCode::S, KeyCode::Down),
            move_left: KeyBinding::with_secondary(KeyCode::A, KeyCode::Left),
            move_right: KeyBinding::with_secondary(KeyCode::D, KeyCode::Right),
            quit: KeyBinding::new(KeyCode::Escape),
        }
    }
}

impl KeyConfig {
    /// Bindings in the form `InputManager::set_bindings` takes.
    #[must_use]
    pub const fn bindings(&self) -> [(Action, KeyBinding); 5] {
        [
            (Action::MoveUp, self.move_up),
            (Action::MoveDown, self.move_down),
            (Action::MoveLeft, self.move_left),
            (Action::MoveRight, self.move_right),
            (Action::Quit, self.quit),
        ]
    }
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Window Settings ===
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Enable VSync
    pub vsync: bool,
    /// Target frames per second (when VSync is off)
    pub target_fps: u32,

    // === Gameplay Settings ===
    /// Snake speed in cells per second
    pub ticks_per_second: f32,
    /// Food placement seed (None = random)
    pub seed: Option<u64>,

    // === Debug Settings ===
    /// Log FPS periodically
    pub show_fps: bool,

    // === Input Settings ===
    /// Key bindings
    pub keys: KeyConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 512,
            window_height: 512,
            vsync: true,
            target_fps: 60,

            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,

            show_fps: false,

            keys: KeyConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if the file is missing or invalid.
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.validate();
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("snake").join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.window_width = self.window_width.clamp(128, 4096);
        self.window_height = self.window_height.clamp(128, 4096);
        self.target_fps = self.target_fps.clamp(30, 240);

        if !self.ticks_per_second.is_finite() {
            self.ticks_per_second = DEFAULT_TICKS_PER_SECOND;
        }
        self.ticks_per_second = self
            .ticks_per_second
            .clamp(MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND);
    }

    /// Gameplay subset handed to the game loop.
    #[must_use]
    pub fn game_settings(&self) -> GameSettings {
        let mut settings = GameSettings {
            ticks_per_second: self.ticks_per_second,
            seed: self.seed,
        };
        settings.validate();
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.window_width, 512);
        assert_eq!(config.window_height, 512);
        assert!(config.vsync);
        assert!((config.ticks_per_second - 7.5).abs() < f32::EPSILON);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        config.window_width = 10;
        config.window_height = 100_000;
        config.target_fps = 1000;
        config.ticks_per_second = 0.0;

        config.validate();

        assert_eq!(config.window_width, 128);
        assert_eq!(config.window_height, 4096);
        assert_eq!(config.target_fps, 240);
        assert!((config.ticks_per_second - MIN_TICKS_PER_SECOND).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("snake.toml");

        let config = EngineConfig {
            window_width: 640,
            vsync: false,
            ticks_per_second: 12.0,
            seed: Some(12345),
            ..EngineConfig::default()
        };

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = EngineConfig::load_from(temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("snake.toml");
        fs::write(&path, "window_width = \"wide\"").expect("Failed to write");

        let result = EngineConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("snake.toml");
        fs::write(&path, "ticks_per_second = 500.0\n").expect("Failed to write");

        let loaded = EngineConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.window_width, 512);
        assert!((loaded.ticks_per_second - MAX_TICKS_PER_SECOND).abs() < f32::EPSILON);
    }

    #[test]
    fn test_game_settings_subset() {
        let config = EngineConfig {
            ticks_per_second: 10.0,
            seed: Some(3),
            ..EngineConfig::default()
        };
        let settings = config.game_settings();
        assert!((settings.ticks_per_second - 10.0).abs() < f32::EPSILON);
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_config_toml_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        assert!(toml_str.contains("window_width"));
        assert!(toml_str.contains("ticks_per_second"));
        assert!(toml_str.contains("[keys"));
    }

    #[test]
    fn test_keys_table_parsed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("snake.toml");
        fs::write(
            &path,
            "[keys]\n\
             move_up = { primary = \"Up\" }\n\
             quit = { primary = \"Escape\", secondary = \"W\" }\n",
        )
        .expect("Failed to write");

        let loaded = EngineConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.keys.move_up, KeyBinding::new(KeyCode::Up));
        assert_eq!(
            loaded.keys.quit,
            KeyBinding::with_secondary(KeyCode::Escape, KeyCode::W)
        );
        // Unlisted actions keep their defaults
        assert_eq!(loaded.keys.move_left, KeyConfig::default().move_left);
    }

    #[test]
    fn test_keys_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("snake.toml");

        let mut config = EngineConfig::default();
        config.keys.move_left = KeyBinding::new(KeyCode::Left);
        config.keys.move_right = KeyBinding::with_secondary(KeyCode::Right, KeyCode::A);
        config.save_to(&path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.keys, config.keys);
    }

    #[test]
    fn test_default_keys_match_input_defaults() {
        use snake_gameplay::input::InputManager;

        let manager = InputManager::new();
        for (action, binding) in KeyConfig::default().bindings() {
            assert_eq!(manager.get_binding(action), Some(&binding));
        }
    }
}
