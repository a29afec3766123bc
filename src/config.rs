/// Game configuration
///
/// Every constant the simulation uses lives here: window setup, texture
/// paths, gameplay tuning and the starting level layout. A `GameConfig` is
/// built once at startup and handed to the world by value; nothing reads
/// globals.
///
/// # Loading
///
/// Configs are JSON. Every field has a default, so a file only needs the
/// values it changes:
///
/// ```json
/// { "tuning": { "player_speed": 3.0, "seed": 42 } }
/// ```
///
/// `load_or_default` looks in three places, in order: an explicit path, the
/// per-user config dir (`<config_dir>/orbit_patrol/config.json`), and
/// `assets/config/game.json`. If none exists the built-in defaults are used.
use crate::error::ConfigError;
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";
const APP_DIR_NAME: &str = "orbit_patrol";
const USER_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub textures: TextureConfig,
    pub tuning: TuningConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// RGB, 0-255
    pub clear_color: [u8; 3],
    /// Uniform view scale; 0.25 shows 8 world units across
    pub camera_zoom: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Assignment 2".to_string(),
            width: 800,
            height: 600,
            clear_color: [0, 0, 255],
            camera_zoom: 0.25,
        }
    }
}

/// Texture file paths. A missing file is not fatal; the renderer falls
/// back to a flat colour for that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub player: PathBuf,
    pub player_empowered: PathBuf,
    pub enemy: PathBuf,
    pub collectible: PathBuf,
    /// Shared by the explosion and the death marker
    pub effect: PathBuf,
    pub background: PathBuf,
}

impl Default for TextureConfig {
    fn default() -> Self {
        let dir = Path::new("assets/textures");
        TextureConfig {
            player: dir.join("body_01.png"),
            player_empowered: dir.join("body_04.png"),
            enemy: dir.join("body_03.png"),
            collectible: dir.join("item.png"),
            effect: dir.join("explosion.png"),
            background: dir.join("stars.png"),
        }
    }
}

/// How often the enemy pass runs inside one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnemyPassMode {
    /// Once per frame, on the first outer-pass visit
    #[default]
    PerFrame,
    /// Once per outer-pass visit. Enemies move as many times per frame as
    /// there are entities in the outer pass.
    PerEntity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// World units per second per held direction
    pub player_speed: f32,
    pub normalize_diagonal: bool,
    pub starting_lives: i32,

    pub first_spawn_time: f64,
    pub spawn_interval: f64,
    /// Spawn coordinates are `r - bias` with `bias` in `0..=spawn_bias_max`
    /// and `r` in `0..=spawn_offset_max`, per axis
    pub spawn_bias_max: u32,
    pub spawn_offset_max: u32,

    /// Radians per second
    pub patrol_angular_rate: f32,
    pub pursuit_gain: f32,
    /// Pursuit starts inside `pursuit_radius_factor * player.scale`
    pub pursuit_radius_factor: f32,
    /// Contact happens inside `scale - contact_margin`
    pub contact_margin: f32,

    pub explosion_duration: f64,
    pub items_for_empowerment: u32,
    pub empowerment_duration: f64,

    /// Reference point offset below/left of a new entity
    pub orbit_offset: Vec3,
    pub effect_scale: f32,
    pub background_scale: f32,
    /// Where effects wait when not showing
    pub parking_position: Vec3,

    pub enemy_pass: EnemyPassMode,
    /// Fixed spawn RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for TuningConfig {
    fn default() -> Self {
        TuningConfig {
            player_speed: 2.5,
            normalize_diagonal: false,
            starting_lives: 2,
            first_spawn_time: 7.0,
            spawn_interval: 7.0,
            spawn_bias_max: 3,
            spawn_offset_max: 2,
            patrol_angular_rate: 0.5,
            pursuit_gain: 0.1,
            pursuit_radius_factor: 1.5,
            contact_margin: 0.2,
            explosion_duration: 2.0,
            items_for_empowerment: 5,
            empowerment_duration: 10.0,
            orbit_offset: Vec3::new(0.2, 0.2, 0.0),
            effect_scale: 5.0,
            background_scale: 10.0,
            parking_position: Vec3::new(100.0, 100.0, 100.0),
            enemy_pass: EnemyPassMode::PerFrame,
            seed: None,
        }
    }
}

/// Starting positions for the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub player: Vec3,
    pub enemies: Vec<Vec3>,
    pub collectibles: Vec<Vec3>,
    pub background: Vec3,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            player: Vec3::ZERO,
            enemies: vec![Vec3::new(-2.2, 0.0, 0.0), Vec3::new(2.8, 0.0, 0.0)],
            collectibles: vec![
                Vec3::new(-3.5, 0.0, 0.0),
                Vec3::new(3.5, 0.0, 0.0),
                Vec3::new(0.0, 3.5, 0.0),
                Vec3::new(-3.0, -3.5, 0.0),
                Vec3::new(3.5, -3.5, 0.0),
            ],
            background: Vec3::ZERO,
        }
    }
}

impl GameConfig {
    /// Load and validate a config from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the first config file that exists, or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; the implicit
    /// locations are skipped silently.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            info!("Loading config from {}", path.display());
            return Self::load_from_file(path);
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                info!("Loading config from {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
            debug!("No config at {}", candidate.display());
        }

        info!("No config file found, using defaults");
        Ok(GameConfig::default())
    }

    /// Implicit config locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_DIR_NAME).join(USER_CONFIG_FILE));
        }
        paths.push(PathBuf::from(DEFAULT_CONFIG_PATH));
        paths
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tuning = &self.tuning;

        let positive = [
            ("tuning.player_speed", tuning.player_speed),
            ("tuning.effect_scale", tuning.effect_scale),
            ("tuning.background_scale", tuning.background_scale),
            ("window.camera_zoom", self.window.camera_zoom),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(tuning.spawn_interval.is_finite() && tuning.spawn_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tuning.spawn_interval must be positive, got {}",
                tuning.spawn_interval
            )));
        }

        if tuning.items_for_empowerment == 0 {
            return Err(ConfigError::Invalid(
                "tuning.items_for_empowerment must be at least 1".to_string(),
            ));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_tuning_and_layout() {
        let config = GameConfig::default();

        assert_eq!(config.tuning.starting_lives, 2);
        assert_eq!(config.tuning.player_speed, 2.5);
        assert_eq!(config.tuning.first_spawn_time, 7.0);
        assert_eq!(config.layout.enemies.len(), 2);
        assert_eq!(config.layout.collectibles.len(), 5);
        assert_eq!(config.window.title, "Assignment 2");
        assert_eq!(config.tuning.enemy_pass, EnemyPassMode::PerFrame);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{ "tuning": { "player_speed": 4.0, "seed": 9, "enemy_pass": "per_entity" } }"#;

        let config: GameConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.tuning.player_speed, 4.0);
        assert_eq!(config.tuning.seed, Some(9));
        assert_eq!(config.tuning.enemy_pass, EnemyPassMode::PerEntity);
        assert_eq!(config.tuning.pursuit_gain, 0.1);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_layout_vectors_are_arrays() {
        let json = r#"{ "layout": { "enemies": [[1.0, 2.0, 0.0]], "collectibles": [] } }"#;

        let config: GameConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.layout.enemies, vec![Vec3::new(1.0, 2.0, 0.0)]);
        assert!(config.layout.collectibles.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.tuning.player_speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.tuning.spawn_interval = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.window.camera_zoom = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.tuning.items_for_empowerment = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("orbit_patrol_cfg_{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "window": {{ "title": "Test" }} }}"#).unwrap();
        drop(file);

        let config = GameConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn test_load_errors() {
        let missing = Path::new("/definitely/not/here/orbit_patrol.json");
        assert!(matches!(
            GameConfig::load_or_default(Some(missing)),
            Err(ConfigError::Io(_))
        ));

        let path = std::env::temp_dir().join(format!("orbit_patrol_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = GameConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_search_paths_end_with_bundled_config() {
        let paths = GameConfig::search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(DEFAULT_CONFIG_PATH)));
    }
}
