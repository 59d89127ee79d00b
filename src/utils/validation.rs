use crate::utils::error::{Result, TitrationError};
use std::collections::HashSet;

pub const MAX_CONCENTRATION: f64 = 2.0;
pub const MIN_ACID_VOLUME: f64 = 1.0;
pub const MAX_ACID_VOLUME: f64 = 200.0;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TitrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TitrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Inclusive on both ends. NaN never passes.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(TitrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Concentrations live in (0, 2] mol/L.
pub fn validate_concentration(field_name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value <= MAX_CONCENTRATION) {
        return Err(TitrationError::InvalidConcentration {
            field: field_name.to_string(),
            value,
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(TitrationError::InvalidVolume {
            field: field_name.to_string(),
            value,
        });
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(TitrationError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    allowed.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TitrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("acid_volume", 25.0, MIN_ACID_VOLUME, MAX_ACID_VOLUME).is_ok());
        assert!(validate_range("acid_volume", 1.0, MIN_ACID_VOLUME, MAX_ACID_VOLUME).is_ok());
        assert!(validate_range("acid_volume", 200.0, MIN_ACID_VOLUME, MAX_ACID_VOLUME).is_ok());
        assert!(validate_range("acid_volume", 0.5, MIN_ACID_VOLUME, MAX_ACID_VOLUME).is_err());
        assert!(validate_range("acid_volume", f64::NAN, MIN_ACID_VOLUME, MAX_ACID_VOLUME).is_err());
    }

    #[test]
    fn test_validate_concentration() {
        assert!(validate_concentration("acid_concentration", 0.1).is_ok());
        assert!(validate_concentration("acid_concentration", 2.0).is_ok());
        assert!(matches!(
            validate_concentration("base_concentration", 0.0),
            Err(TitrationError::InvalidConcentration { .. })
        ));
        assert!(validate_concentration("base_concentration", 2.5).is_err());
    }

    #[test]
    fn test_validate_formats() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_formats("output.formats", &formats, &["csv", "json"]).is_ok());

        let invalid = vec!["xlsx".to_string()];
        assert!(validate_formats("output.formats", &invalid, &["csv", "json"]).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("titrant_volume", 0.0).is_ok());
        assert!(validate_non_negative("titrant_volume", -1.0).is_err());
        assert!(validate_non_negative("titrant_volume", f64::INFINITY).is_err());
    }
}
