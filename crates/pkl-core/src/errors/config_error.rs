/// Configuration loading errors.
///
/// Numeric problems in weight tables are not errors: they are repaired
/// by renormalization. Only unreadable or unparsable files fail.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
