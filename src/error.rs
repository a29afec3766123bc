//! Startup errors
//!
//! The simulation itself never fails. Everything that can go wrong happens
//! before the first frame: reading the config file, or bringing up the
//! platform layer.

use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`](crate::config::GameConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed fine but makes no sense (zero speed, negative scale, ...)
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level error for the binary.
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// SDL2 reports its failures as plain strings
    #[error("Platform error: {0}")]
    Platform(String),
}

impl From<String> for GameError {
    fn from(message: String) -> Self {
        GameError::Platform(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_string_converts() {
        let error: GameError = String::from("could not open window").into();
        assert_eq!(error.to_string(), "Platform error: could not open window");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let error = GameError::from(ConfigError::Invalid("speed must be positive".into()));
        assert_eq!(error.to_string(), "Invalid config: speed must be positive");
    }
}
