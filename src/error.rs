//! Error types for the payroll engine.
//!
//! The computation itself never fails: invalid or missing inputs degrade to
//! zero-valued results. Errors only arise at the boundaries, when loading and
//! validating configuration, resolving catalog entries, or strictly parsing
//! request values.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use paie_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot work with,
    /// such as a zero hourly base or an inverted abatement range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Rubrique id was not found in the catalog.
    #[error("Rubrique not found: {id}")]
    RubriqueNotFound {
        /// The rubrique id that was not found.
        id: String,
    },

    /// A period string was not of the form `YYYY-MM`.
    #[error("Invalid period '{period}': expected YYYY-MM")]
    InvalidPeriod {
        /// The period string that failed to parse.
        period: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/company.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/company.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "hourly_base".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'hourly_base': must be greater than zero"
        );
    }

    #[test]
    fn test_rubrique_not_found_displays_id() {
        let error = EngineError::RubriqueNotFound {
            id: "BONUS_X".to_string(),
        };
        assert_eq!(error.to_string(), "Rubrique not found: BONUS_X");
    }

    #[test]
    fn test_invalid_period_displays_period() {
        let error = EngineError::InvalidPeriod {
            period: "2024/13".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid period '2024/13': expected YYYY-MM"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "base_salary".to_string(),
            message: "cannot be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'base_salary': cannot be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_rubrique_not_found() -> EngineResult<()> {
            Err(EngineError::RubriqueNotFound {
                id: "X".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_rubrique_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
