//! Error types for unfurl-widgets.

use thiserror::Error;

/// Errors produced while loading or validating widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a configuration.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Transition duration is negative or not finite.
    #[error("invalid transition duration: {0}s (must be finite and >= 0)")]
    InvalidDuration(f32),

    /// Collapsed height is negative or not finite.
    #[error("invalid min height: {0} (must be finite and >= 0)")]
    InvalidMinHeight(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::InvalidDuration(-1.0).to_string(),
            "invalid transition duration: -1s (must be finite and >= 0)"
        );
        assert_eq!(
            ConfigError::InvalidMinHeight(-2.5).to_string(),
            "invalid min height: -2.5 (must be finite and >= 0)"
        );
    }

    #[test]
    fn test_parse_error_from_toml() {
        let err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err = ConfigError::from(err);
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
