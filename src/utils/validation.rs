use crate::utils::error::{EqualizerError, Result};
use std::path::Path;

/// Upper bound for either canvas side.
pub const MAX_CANVAS_DIMENSION: u32 = 16384;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_str = path.to_string_lossy();

    if as_str.is_empty() {
        return Err(EqualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_str.contains('\0') {
        return Err(EqualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A file-name glob: non-empty, parseable, and without directory separators.
pub fn validate_pattern(field_name: &str, pattern: &str) -> Result<()> {
    validate_non_empty_string(field_name, pattern)?;

    if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
        return Err(EqualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: "Pattern matches file names only; put directories in input_dir".to_string(),
        });
    }

    glob::Pattern::new(pattern)?;
    Ok(())
}

pub fn validate_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if prefix.contains('/') || prefix.contains(std::path::MAIN_SEPARATOR) || prefix.contains('\0')
    {
        return Err(EqualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Prefix cannot contain path separators or null bytes".to_string(),
        });
    }
    Ok(())
}

pub fn validate_canvas_dimension(field_name: &str, value: u32) -> Result<()> {
    validate_range(field_name, value, 1, MAX_CANVAS_DIMENSION)
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| EqualizerError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EqualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EqualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
