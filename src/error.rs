//! Error taxonomy shared by the engine, history log and export

/// Errors surfaced by the calculator
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// Out-of-range or malformed input. Never coerced by the engine.
    #[error("Invalid parameter: {field} - {message}")]
    InvalidParameter { field: String, message: String },

    /// History store read/write failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Failure producing or delivering an export artifact
    #[error("Export error: {0}")]
    Export(String),

    /// Required host capability is missing
    #[error("Environment error: {0}")]
    Environment(String),
}

impl CalcError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CalcError::InvalidParameter {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// True for errors the caller should fix by correcting input
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, CalcError::InvalidParameter { .. })
    }
}

/// Helper type for calculator results
pub type CalcResult<T> = Result<T, CalcError>;
