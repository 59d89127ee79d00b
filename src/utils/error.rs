use thiserror::Error;

#[derive(Error, Debug)]
pub enum TitrationError {
    #[error("Unknown {kind}: '{name}'")]
    UnknownReagent { kind: ReagentKind, name: String },

    #[error("Invalid concentration for {field}: {value} mol/L")]
    InvalidConcentration { field: String, value: f64 },

    #[error("Invalid volume for {field}: {value} mL")]
    InvalidVolume { field: String, value: f64 },

    #[error("Logarithm of non-positive argument {argument:e} at {volume} mL of titrant")]
    DomainError { volume: f64, argument: f64 },

    #[error("Titration curve has no usable samples")]
    EmptyCurve,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReagentKind {
    Acid,
    Base,
    Indicator,
}

impl std::fmt::Display for ReagentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReagentKind::Acid => "acid",
            ReagentKind::Base => "base",
            ReagentKind::Indicator => "indicator",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Reagent,
    Chemistry,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TitrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TitrationError::UnknownReagent { .. } => ErrorCategory::Reagent,
            TitrationError::InvalidConcentration { .. }
            | TitrationError::InvalidVolume { .. }
            | TitrationError::DomainError { .. }
            | TitrationError::EmptyCurve => ErrorCategory::Chemistry,
            TitrationError::ConfigValidationError { .. }
            | TitrationError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TitrationError::IoError(_)
            | TitrationError::CsvError(_)
            | TitrationError::SerializationError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Chemistry if matches!(self, TitrationError::DomainError { .. }) => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Reagent | ErrorCategory::Chemistry | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TitrationError::UnknownReagent { kind, .. } => format!(
                "Pick a {} from the catalog (run with --list to see the available entries)",
                kind
            ),
            TitrationError::InvalidConcentration { .. } => {
                "Use a concentration greater than 0 and at most 2 mol/L".to_string()
            }
            TitrationError::InvalidVolume { .. } => {
                "Use a non-negative, finite titrant volume".to_string()
            }
            TitrationError::DomainError { .. } => {
                "Query a titrant volume away from this point or use the 'skip' sampling policy"
                    .to_string()
            }
            TitrationError::EmptyCurve => {
                "Check the acid volume; at least one curve sample must be computable".to_string()
            }
            TitrationError::ConfigValidationError { .. }
            | TitrationError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the command line or the scenario file".to_string()
            }
            TitrationError::IoError(_) => {
                "Check that the path exists and is writable".to_string()
            }
            TitrationError::CsvError(_) | TitrationError::SerializationError(_) => {
                "Check the output path and available disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Reagent => format!("Reagent not found: {}", self),
            ErrorCategory::Chemistry => format!("Titration could not be computed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("Could not write results: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TitrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let unknown = TitrationError::UnknownReagent {
            kind: ReagentKind::Indicator,
            name: "litmus".to_string(),
        };
        assert_eq!(unknown.category(), ErrorCategory::Reagent);
        assert_eq!(unknown.severity(), ErrorSeverity::High);
        assert!(unknown.to_string().contains("indicator"));
        assert!(unknown.to_string().contains("litmus"));

        let domain = TitrationError::DomainError {
            volume: 0.0,
            argument: 0.0,
        };
        assert_eq!(domain.category(), ErrorCategory::Chemistry);
        assert_eq!(domain.severity(), ErrorSeverity::Medium);

        let io = TitrationError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_friendly_message_mentions_cause() {
        let err = TitrationError::InvalidConcentration {
            field: "base_concentration".to_string(),
            value: 0.0,
        };
        let message = err.user_friendly_message();
        assert!(message.starts_with("Titration could not be computed"));
        assert!(message.contains("base_concentration"));
    }
}
