//! Error types for snowfall

use thiserror::Error;

/// The main error type for snowfall operations
#[derive(Debug, Error)]
pub enum SnowfallError {
    #[error("Invalid range: {field}_min ({min}) must not exceed {field}_max ({max})")]
    InvalidRange { field: String, min: i64, max: i64 },

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for snowfall operations
pub type Result<T> = std::result::Result<T, SnowfallError>;

impl From<toml::ser::Error> for SnowfallError {
    fn from(err: toml::ser::Error) -> Self {
        SnowfallError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_message_names_both_bounds() {
        let err = SnowfallError::InvalidRange {
            field: "size".into(),
            min: 20,
            max: 6,
        };
        assert_eq!(
            err.to_string(),
            "Invalid range: size_min (20) must not exceed size_max (6)"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: SnowfallError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "snowflake.png").into();
        assert!(matches!(err, SnowfallError::IoError(_)));
        assert_eq!(err.to_string(), "IO error: snowflake.png");
    }
}
