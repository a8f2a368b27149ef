//! Relational adapter errors

use rill_diagnostics::{Diagnostic, ErrorCode, RIL0300, RIL0301, RIL0302};
use thiserror::Error;

/// Errors raised by the relational adapter
#[derive(Debug, Clone, Error)]
pub enum RelationalError {
    /// A field's type has no column representation
    #[error("unsupported column type for field '{field}': {type_signature}")]
    UnsupportedColumnType {
        field: String,
        type_signature: String,
    },

    /// A table was constrained by something other than a record type
    #[error("table constraint is not a record type: {type_signature}")]
    NotARecord { type_signature: String },

    /// Statement execution failed in the underlying store
    #[error("error in executing statement: {statement}: {message}")]
    StatementFailed { statement: String, message: String },
}

/// Relational adapter result
pub type RelationalResult<T> = Result<T, RelationalError>;

impl RelationalError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedColumnType { .. } => RIL0300,
            Self::StatementFailed { .. } => RIL0301,
            Self::NotARecord { .. } => RIL0302,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            Self::UnsupportedColumnType { field, .. } => diag.with_path(field.clone()),
            _ => diag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_column_type_names_field() {
        let err = RelationalError::UnsupportedColumnType {
            field: "status".to_string(),
            type_signature: "(int|string)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported column type for field 'status': (int|string)"
        );
        assert_eq!(err.to_diagnostic().path.as_deref(), Some("status"));
    }
}
