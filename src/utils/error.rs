use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EqualizerError {
    #[error("Image codec error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobPatternError(#[from] glob::PatternError),

    #[error("Failed to read matched path: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Cannot encode output file '{}': unknown or unsupported image format", path.display())]
    UnsupportedOutputFormat { path: PathBuf },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Image,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EqualizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EqualizerError::ImageError(_) => ErrorCategory::Image,
            EqualizerError::IoError(_) => ErrorCategory::System,
            EqualizerError::GlobPatternError(_)
            | EqualizerError::ConfigValidationError { .. }
            | EqualizerError::InvalidConfigValueError { .. }
            | EqualizerError::MissingConfigError { .. }
            | EqualizerError::UnsupportedOutputFormat { .. } => ErrorCategory::Configuration,
            EqualizerError::GlobError(_) => ErrorCategory::Input,
            EqualizerError::SerializationError(_) | EqualizerError::ProcessingError { .. } => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EqualizerError::IoError(e) => match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    ErrorSeverity::High
                }
                _ => ErrorSeverity::Critical,
            },
            EqualizerError::GlobError(_) | EqualizerError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line arguments or the TOML configuration file"
            }
            ErrorCategory::Image => {
                "Make sure every matched file is a valid PNG, JPEG, GIF or BMP image, or rerun with --on-error skip"
            }
            ErrorCategory::Input => "Check that the input directory is readable",
            ErrorCategory::Output => "Check that the output directory is writable",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EqualizerError::ImageError(e) => format!("Could not process image: {}", e),
            EqualizerError::IoError(e) => format!("File system error: {}", e),
            EqualizerError::UnsupportedOutputFormat { path } => format!(
                "Output '{}' has no supported image extension",
                path.display()
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EqualizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_severity_depends_on_kind() {
        let missing = EqualizerError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        assert_eq!(missing.severity(), ErrorSeverity::High);
        assert_eq!(missing.category(), ErrorCategory::System);

        let disk = EqualizerError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ));
        assert_eq!(disk.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = EqualizerError::InvalidConfigValueError {
            field: "canvas.width".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 16384".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("canvas.width"));
    }
}
